use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Deserialize;

use crate::moods::CustomMoodConfig;

/// Application configuration loaded from TOML config file.
/// All fields have sensible defaults — the config file is optional.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Directory for the catalog artifact and liked list (overrides XDG default).
    pub data_dir: Option<PathBuf>,
    /// iTunes search settings.
    pub search: SearchConfig,
    /// Video lookup settings.
    pub video: VideoConfig,
    /// Custom mood definitions (merged with the builtin table).
    #[serde(rename = "moods")]
    pub custom_moods: Vec<CustomMoodConfig>,
}

/// iTunes Search API configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Results requested per search call.
    pub result_limit: usize,
    /// Delay between search calls in milliseconds.
    pub rate_limit_ms: u64,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            result_limit: 12,
            rate_limit_ms: 100,
            timeout_secs: 10,
        }
    }
}

/// Video lookup configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    /// Invidious-compatible instance queried for video ids.
    pub api_base: String,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            api_base: crate::video::DEFAULT_API_BASE.to_string(),
        }
    }
}

impl AppConfig {
    /// Load config from `~/.config/moodbox/config.toml`.
    /// Returns default config if file doesn't exist.
    /// Logs a warning if the file exists but can't be parsed.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        match config_path {
            Some(path) if path.exists() => {
                match std::fs::read_to_string(&path) {
                    Ok(contents) => {
                        match toml::from_str::<AppConfig>(&contents) {
                            Ok(config) => {
                                log::info!("Loaded config from {}", path.display());
                                config
                            }
                            Err(e) => {
                                log::warn!(
                                    "Failed to parse {}: {}. Using defaults.",
                                    path.display(),
                                    e
                                );
                                Self::default()
                            }
                        }
                    }
                    Err(e) => {
                        log::warn!(
                            "Failed to read {}: {}. Using defaults.",
                            path.display(),
                            e
                        );
                        Self::default()
                    }
                }
            }
            _ => {
                log::debug!("No config file found, using defaults");
                Self::default()
            }
        }
    }

    /// Get the config file path.
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", crate::APP_NAME)
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

/// Resolve the default data directory using the XDG data directory.
pub fn default_data_dir() -> PathBuf {
    if let Some(dirs) = ProjectDirs::from("", "", crate::APP_NAME) {
        dirs.data_dir().to_path_buf()
    } else {
        // Fallback: current directory
        PathBuf::from(".")
    }
}
