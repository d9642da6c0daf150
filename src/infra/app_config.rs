use crate::domain::{ConfigError, ViewPlacement};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_PREVIEW_BASE: &str = "githistory://authority/git-history";
pub const DEFAULT_RENDER_COMMAND: &str = "githistory.preview";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub preview_base: String,
    pub render_command: String,
    pub placement: ViewPlacement,
    /// Workspace folders; empty means the current directory.
    pub workspace_folders: Vec<PathBuf>,
    /// How deep to look for nested repositories below a workspace folder.
    pub root_scan_depth: usize,
    pub server_host: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            preview_base: DEFAULT_PREVIEW_BASE.to_string(),
            render_command: DEFAULT_RENDER_COMMAND.to_string(),
            placement: ViewPlacement::default(),
            workspace_folders: Vec::new(),
            root_scan_depth: 3,
            server_host: "127.0.0.1".to_string(),
        }
    }
}

/// Loads the config file, falling back to defaults when it is missing or invalid.
pub fn load_config() -> AppConfig {
    let path = config_path();
    match load_config_strict(&path) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("Using default config: {}", err);
            AppConfig::default()
        }
    }
}

/// Like [`load_config`], but reports unreadable or malformed files.
/// A missing file still yields the defaults.
pub fn load_config_strict(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("GITHISTORY_CONFIG_PATH") {
        return PathBuf::from(path);
    }

    app_data_dir().join("config.toml")
}

pub fn app_data_dir() -> PathBuf {
    if let Ok(path) = std::env::var("GITHISTORY_DATA_HOME") {
        return PathBuf::from(path);
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = home::home_dir() {
            return home
                .join("Library")
                .join("Application Support")
                .join("GitHistory");
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("GitHistory");
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(xdg) = std::env::var_os("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join("githistory");
        }
        if let Some(home) = home::home_dir() {
            return home.join(".local").join("share").join("githistory");
        }
    }

    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".githistory")
}
