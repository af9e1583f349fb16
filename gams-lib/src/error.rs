use std::path::Path;

use gams_catalog::{EditError, ParseError};

/// Errors that can occur while operating on a Gams site.
#[derive(Debug, thiserror::Error)]
pub enum GamsError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("{0}")]
    Edit(#[from] EditError),

    #[error("Download failed for {url}: {message}")]
    Download { url: String, message: String },

    #[error("Image error at {path}: {source}")]
    Image {
        path: String,
        source: image::ImageError,
    },

    #[error("Remote game index: {0}")]
    Index(String),

    #[error("Refusing to touch {0}: path leaves the site root")]
    OutsideRoot(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl GamsError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn image(path: &Path, source: image::ImageError) -> Self {
        Self::Image {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn download(url: &str, message: impl ToString) -> Self {
        Self::Download {
            url: url.to_string(),
            message: message.to_string(),
        }
    }

    pub fn index(msg: impl Into<String>) -> Self {
        Self::Index(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
