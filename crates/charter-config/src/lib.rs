//! Configuration management for charter.
//!
//! Loads configuration from TOML files: chart appearance and how loaded
//! candle data is handed to the chart.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub chart: ChartConfig,
    pub data: DataConfig,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from default locations.
    ///
    /// Searches in order:
    /// 1. `./config.toml`
    /// 2. `~/.config/charter/config.toml`
    ///
    /// Returns default config if no file found.
    pub fn load_default() -> Self {
        // Try current directory first
        if let Ok(config) = Self::load(Self::default_path()) {
            return config;
        }

        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("charter").join("config.toml");
            match Self::load(&config_path) {
                Ok(config) => return config,
                Err(ConfigError::ReadError(_)) => {}
                Err(e) => log::warn!("Ignoring {}: {}", config_path.display(), e),
            }
        }

        Self::default()
    }

    /// Save configuration to a file path.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the default config file path.
    pub fn default_path() -> PathBuf {
        PathBuf::from("config.toml")
    }
}

/// General application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Show the bundled sample when started without input.
    pub load_sample_on_start: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            load_sample_on_start: true,
        }
    }
}

/// Chart surface appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub background: String,
    pub text_color: String,
    pub grid_color: String,
    /// Border of the price and time scales.
    pub border_color: String,
    /// Chart height never drops below this many pixels.
    pub min_height: u32,
    /// Fraction of the viewport height the chart takes.
    pub height_ratio: f32,
    pub auto_size: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            background: "#0f1115".to_string(),
            text_color: "#dbe1f4".to_string(),
            grid_color: "#151923".to_string(),
            border_color: "#2a2f3a".to_string(),
            min_height: 320,
            height_ratio: 0.6,
            auto_size: true,
        }
    }
}

impl ChartConfig {
    /// Chart height for a viewport of the given height.
    pub fn height_for_viewport(&self, viewport_height: u32) -> u32 {
        let scaled = (viewport_height as f32 * self.height_ratio) as u32;
        scaled.max(self.min_height)
    }
}

/// How loaded data is handed to the chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Drop rows with non-finite or inconsistent prices before charting.
    /// Off by default: parsed rows go to the chart as they are.
    pub drop_invalid_rows: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.general.load_sample_on_start);
        assert_eq!(config.chart.background, "#0f1115");
        assert_eq!(config.chart.min_height, 320);
        assert!(!config.data.drop_invalid_rows);
    }

    #[test]
    fn test_height_for_viewport() {
        let chart = ChartConfig::default();
        assert_eq!(chart.height_for_viewport(1000), 600);
        assert_eq!(chart.height_for_viewport(400), 320);
        assert_eq!(chart.height_for_viewport(0), 320);
    }

    #[test]
    fn test_parse_toml() {
        let toml = r##"
[general]
load_sample_on_start = false

[chart]
background = "#ffffff"
min_height = 200

[data]
drop_invalid_rows = true
"##;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(!config.general.load_sample_on_start);
        assert_eq!(config.chart.background, "#ffffff");
        assert_eq!(config.chart.min_height, 200);
        // Unset fields keep their defaults
        assert_eq!(config.chart.text_color, "#dbe1f4");
        assert!(config.data.drop_invalid_rows);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.chart.height_ratio = 0.75;
        config.data.drop_invalid_rows = true;
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load("/nonexistent/charter/config.toml").unwrap_err();
        assert!(matches!(err, ConfigError::ReadError(_)));
    }
}
