//! Configuration management for the CLI
//!
//! Configuration is resolved in layers, later layers winning:
//! - Default values
//! - Configuration files (YAML/JSON/TOML)
//! - Environment variables
//! - Command-line arguments

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use specgate_pipeline::SpecValidationOptions;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable toggling validation of nested objects
pub const ENV_IMPLICIT_VALIDATION: &str = "SPECGATE_IMPLICIT_VALIDATION";
/// Environment variable toggling validation of root collection elements
pub const ENV_ROOT_COLLECTION_ELEMENTS: &str = "SPECGATE_ROOT_COLLECTION_ELEMENTS";
/// Environment variable toggling fail-fast validators
pub const ENV_FAIL_FAST: &str = "SPECGATE_FAIL_FAST";
/// Environment variable overriding the default language
pub const ENV_DEFAULT_LANGUAGE: &str = "SPECGATE_DEFAULT_LANGUAGE";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pipeline options
    pub validation: SpecValidationOptions,

    /// Output settings
    pub output: OutputConfig,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Use colored output when the terminal supports it
    pub color: bool,

    /// Print the bound request next to the errors
    pub detailed: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            detailed: false,
        }
    }
}

/// On-disk configuration formats, picked by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Yaml,
    Json,
    Toml,
}

impl FileFormat {
    /// Format for `path`; anything unrecognised is read as JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Self::Yaml,
            Some("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;

        let config = match FileFormat::from_path(path) {
            FileFormat::Yaml => serde_yaml::from_str(&content)?,
            FileFormat::Toml => toml::from_str(&content)?,
            FileFormat::Json => serde_json::from_str(&content)?,
        };

        debug!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "Failed to load config");
                    }
                }
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations,
    /// then apply environment overrides
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::load()?,
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Get default configuration file paths to check
    pub fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from("specgate.yaml"),
            PathBuf::from("specgate.yml"),
            PathBuf::from("specgate.json"),
            PathBuf::from("specgate.toml"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            let specgate_dir = config_dir.join("specgate");
            paths.push(specgate_dir.join("config.yaml"));
            paths.push(specgate_dir.join("config.json"));
            paths.push(specgate_dir.join("config.toml"));
        }

        paths
    }

    /// Apply `SPECGATE_*` environment overrides
    pub fn apply_env(&mut self) -> Result<()> {
        if let Some(value) = env_flag(ENV_IMPLICIT_VALIDATION)? {
            self.validation.implicit_validation_enabled = value;
        }
        if let Some(value) = env_flag(ENV_ROOT_COLLECTION_ELEMENTS)? {
            self.validation.implicit_root_collection_element_validation_enabled = value;
        }
        if let Some(value) = env_flag(ENV_FAIL_FAST)? {
            self.validation.fail_fast = value;
        }
        if let Ok(language) = std::env::var(ENV_DEFAULT_LANGUAGE) {
            self.validation.default_language = Some(language);
        }
        Ok(())
    }

    /// Render the configuration in the given format
    pub fn render(&self, format: FileFormat) -> Result<String> {
        Ok(match format {
            FileFormat::Yaml => serde_yaml::to_string(self)?,
            FileFormat::Toml => toml::to_string_pretty(self)?,
            FileFormat::Json => serde_json::to_string_pretty(self)?,
        })
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.render(FileFormat::from_path(path))?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

fn env_flag(name: &str) -> Result<Option<bool>> {
    let Ok(value) = std::env::var(name) else {
        return Ok(None);
    };
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => Err(Error::config(format!("{name} must be a boolean, got '{value}'"))),
    }
}
