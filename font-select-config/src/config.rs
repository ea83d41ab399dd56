//! Widget configuration struct and persistence.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{Layout, LogLevel};

/// Configuration for a font-select widget instance.
///
/// Every field is defaulted so a partial (or empty) YAML file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Preview list layout
    pub layout: Layout,

    /// Initial `disabled` marker
    pub disabled: bool,

    /// Initial `multiple` marker (multiple simultaneous variation selections)
    pub multiple: bool,

    /// Initial `autofocus` marker
    pub autofocus: bool,

    /// Initial committed value (a variant full name), empty for none
    pub value: String,

    /// Debug log verbosity
    pub log_level: LogLevel,

    /// Whether discovered variants are registered as named font faces
    pub register_font_faces: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layout: Layout::default(),
            disabled: false,
            multiple: false,
            autofocus: false,
            value: String::new(),
            log_level: LogLevel::default(),
            register_font_faces: true,
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns defaults when no config file exists yet.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);

        if !config_path.exists() {
            log::info!("No config file found, using defaults");
            return Ok(Self::default());
        }
        Ok(Self::load_from(&config_path)?)
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path)?;
        let config = Self::from_yaml(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from YAML text.
    ///
    /// An empty document yields the defaults.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(contents)?)
    }

    /// Check field values that serde cannot check on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.value.chars().any(char::is_control) {
            return Err(ConfigError::Validation(format!(
                "value {:?} contains control characters",
                self.value
            )));
        }
        if self.value != self.value.trim() {
            return Err(ConfigError::Validation(format!(
                "value {:?} has leading or trailing whitespace",
                self.value
            )));
        }
        if self.disabled && self.autofocus {
            log::warn!("Config sets both disabled and autofocus; autofocus will be ignored");
        }
        Ok(())
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        Ok(self.save_to(&Self::config_path())?)
    }

    /// Save configuration to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml_ng::to_string(self)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Get the configuration file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory.
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("font-select")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            // Use XDG convention on all platforms: ~/.config/font-select
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("font-select")
            } else {
                // Fallback if home directory cannot be determined
                PathBuf::from(".")
            }
        }
    }
}
