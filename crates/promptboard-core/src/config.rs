use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Optional overrides loaded from the user's config file. Anything left
/// unset falls back to the platform data directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub board_file: Option<PathBuf>,
    #[serde(default)]
    pub credential_file: Option<PathBuf>,
    #[serde(default)]
    pub api_base: Option<String>,
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/promptboard/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("promptboard/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("promptboard\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    pub fn load() -> Self {
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                if let Ok(content) = std::fs::read_to_string(&config_path) {
                    if let Ok(config) = toml::from_str(&content) {
                        return config;
                    }
                }
            }
        }
        Self::default()
    }

    fn data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("promptboard")
    }

    /// Board snapshot location, honoring the config file override.
    pub fn effective_board_path(&self) -> PathBuf {
        self.board_file
            .clone()
            .unwrap_or_else(|| Self::data_dir().join("board.json"))
    }

    /// Credential location. Kept separate from the board snapshot; the two
    /// persist independently.
    pub fn effective_credential_path(&self) -> PathBuf {
        self.credential_file
            .clone()
            .unwrap_or_else(|| Self::data_dir().join("credential"))
    }
}
