//! User settings, stored as TOML under the platform config directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::GamsError;

/// Environment variable that overrides the configured site root.
pub const ROOT_ENV_VAR: &str = "GAMS_ROOT";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub site: SiteSettings,
    #[serde(default)]
    pub remote: RemoteSettings,
    #[serde(default)]
    pub thumbnail: ThumbnailSettings,
}

/// Layout of the Gams checkout on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteSettings {
    /// Site root; the current directory when unset.
    pub root: Option<PathBuf>,
    /// Host document, relative to the root.
    pub document: String,
    /// Name of the list variable inside the host document.
    pub list_variable: String,
    /// Logo used to synthesize thumbnails, relative to the root.
    pub default_image: String,
    /// Where backups go, relative to the root. The root itself when unset.
    pub backup_dir: Option<PathBuf>,
    /// Section used by `add` when none is given.
    pub default_section: String,
    /// File names under `g/g/` and `img/` that are never reported as orphans.
    pub whitelist: Vec<String>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            root: None,
            document: "Gams.html".to_string(),
            list_variable: gams_catalog::DEFAULT_LIST_VARIABLE.to_string(),
            default_image: "img/gams.png".to_string(),
            backup_dir: None,
            default_section: "Custom".to_string(),
            whitelist: ["Gam.html", "misc", "Ruffle", "webretro", "assets", "img", "gams.png"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Where the remote game index and game files are fetched from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RemoteSettings {
    pub index_url: String,
    pub base_url: String,
    /// Prefix shared by all playable ids in the index.
    pub id_prefix: String,
    pub timeout_secs: u64,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            index_url: "https://cdn.jsdelivr.net/gh/bubbls/ugs-singlefile@main/AASINGLEFILE.html"
                .to_string(),
            base_url: "https://cdn.jsdelivr.net/gh/bubbls/ugs-singlefile".to_string(),
            id_prefix: "cl".to_string(),
            timeout_secs: 15,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ThumbnailSettings {
    /// Edge length of generated square thumbnails, in pixels.
    pub size: u32,
}

impl Default for ThumbnailSettings {
    fn default() -> Self {
        Self { size: 256 }
    }
}

impl Settings {
    /// Pick the site root: explicit flag, then `GAMS_ROOT`, then the config
    /// file, then the current directory.
    pub fn resolve_root(&self, flag: Option<PathBuf>) -> PathBuf {
        root_from(
            flag,
            std::env::var_os(ROOT_ENV_VAR).map(PathBuf::from),
            self.site.root.clone(),
        )
    }
}

fn root_from(flag: Option<PathBuf>, env: Option<PathBuf>, config: Option<PathBuf>) -> PathBuf {
    flag.or(env)
        .or(config)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns `~/.config/gams/settings.toml` (or the platform equivalent).
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("gams").join("settings.toml")
}

/// Load settings from the default location, returning defaults if missing or corrupt.
pub fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

/// Load settings from `path`, returning defaults if missing or corrupt.
pub fn load_settings_from(path: &Path) -> Settings {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
            log::warn!("Failed to parse settings at {}: {}", path.display(), e);
            Settings::default()
        }),
        Err(_) => Settings::default(),
    }
}

/// Save settings atomically (write to temp, then rename).
pub fn save_settings_to(settings: &Settings, path: &Path) -> Result<(), GamsError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| GamsError::io(parent, e))?;
    }
    let contents = toml::to_string_pretty(settings)
        .map_err(|e| GamsError::config(format!("Failed to serialize settings: {e}")))?;
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, contents).map_err(|e| GamsError::io(&tmp, e))?;
    std::fs::rename(&tmp, path).map_err(|e| GamsError::io(path, e))?;
    Ok(())
}
