use thiserror::Error;

use gams_lib::GamsError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Gams(#[from] GamsError),

    /// Terminal I/O (prompts, log file)
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
