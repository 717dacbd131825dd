//! User configuration loaded from `config.toml`.

use crate::calculator::AngleMode;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// How the terminal driver prints the display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Expression line followed by the result line.
    #[default]
    Text,
    /// One JSON object per update.
    Json,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Angle mode the engine starts in.
    pub angle_mode: AngleMode,
    pub output: OutputFormat,
}

impl Config {
    /// Default location: `<config dir>/calcpad/config.toml`.
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("calcpad");
        path.push("config.toml");
        path
    }

    /// Load from the default location, falling back to defaults when the
    /// file does not exist.
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load from an explicit path. A missing file is an error here.
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::parse(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        info!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.angle_mode, AngleMode::Radians);
        assert_eq!(config.output, OutputFormat::Text);
    }

    #[test]
    fn test_full_config() {
        let config = Config::parse("angle_mode = \"degrees\"\noutput = \"json\"\n").unwrap();
        assert_eq!(config.angle_mode, AngleMode::Degrees);
        assert_eq!(config.output, OutputFormat::Json);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(Config::parse("angle_mode = \"gradians\"").is_err());
        assert!(Config::parse("theme = \"dark\"").is_err());
        assert!(Config::parse("angle_mode = ").is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let path = std::env::temp_dir().join("calcpad-missing-config-7f3a.toml");
        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("calcpad-config-{}.toml", std::process::id()));
        fs::write(&path, "angle_mode = \"degrees\"\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(config.angle_mode, AngleMode::Degrees);
    }

    #[test]
    fn test_default_path_ends_with_app_dir() {
        let path = Config::default_path();
        assert!(path.ends_with("calcpad/config.toml"));
    }
}
