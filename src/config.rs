//! Persisted Configuration
//!
//! Loads and saves the game configuration (window resolution, last picked
//! track) as JSON under the user's home directory. Layout reads the
//! viewport size from here at the start of every pass, so a resolution
//! change takes effect on the next layout.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Resolutions offered by the options screen.
pub const RESOLUTIONS: [(u32, u32); 4] = [(640, 480), (800, 600), (1024, 768), (1280, 720)];

/// Errors that can occur while loading or saving the configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Reading or writing the config file failed
    Io(std::io::Error),

    /// The config file exists but is not valid JSON
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "Config file I/O error: {}", err),
            ConfigError::Parse(err) => write!(f, "Config file parse error: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for String {
    fn from(error: ConfigError) -> Self {
        error.to_string()
    }
}

/// User-facing settings persisted between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub last_track: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: 800,
            height: 600,
            last_track: 0,
        }
    }
}

impl GameConfig {
    /// Loads the configuration, falling back to defaults when no file
    /// exists yet (first run).
    pub fn load() -> Result<GameConfig, ConfigError> {
        let Some(path) = config_path() else {
            warn!("no home directory found, using default config");
            return Ok(GameConfig::default());
        };
        if !path.exists() {
            return Ok(GameConfig::default());
        }
        let data = fs::read_to_string(&path).map_err(ConfigError::Io)?;
        serde_json::from_str(&data).map_err(ConfigError::Parse)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let Some(path) = config_path() else {
            warn!("no home directory found, config not saved");
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        let data = serde_json::to_string_pretty(self).map_err(ConfigError::Parse)?;
        fs::write(&path, data).map_err(ConfigError::Io)
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".rustkart").join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_resolution() {
        let cfg = GameConfig::default();
        assert_eq!((cfg.width, cfg.height), (800, 600));
        assert_eq!(cfg.last_track, 0);
    }

    #[test]
    fn test_json_round_trip() {
        let cfg = GameConfig {
            width: 1024,
            height: 768,
            last_track: 2,
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.width, 1024);
        assert_eq!(back.height, 768);
        assert_eq!(back.last_track, 2);
    }

    #[test]
    fn test_missing_last_track_defaults() {
        // Configs written by older builds lack the field.
        let back: GameConfig = serde_json::from_str(r#"{"width":640,"height":480}"#).unwrap();
        assert_eq!(back.last_track, 0);
    }
}
