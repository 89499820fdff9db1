#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for amo
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (~/.config/amo/config.toml)
//! - Environment variables
//! - CLI flags

use amo_errors::{ConfigError, Error, Result};
use amo_types::{ColorChoice, OutputFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub lifecycle: LifecycleConfig,
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    #[serde(default = "default_color_choice")]
    pub color: ColorChoice,
}

/// Installation lifecycle configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifecycleConfig {
    #[serde(default = "default_usage_errors")]
    pub usage_errors: UsageErrorPolicy,
    #[serde(default = "default_emit_events")]
    pub emit_events: bool,
}

/// What the store does when an action targets a record that cannot take it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageErrorPolicy {
    /// Abort immediately (development)
    Panic,
    /// Log loudly and return the error to the caller (production)
    Log,
}

impl UsageErrorPolicy {
    /// Policy matching the current build profile
    #[must_use]
    pub fn for_build() -> Self {
        if cfg!(debug_assertions) {
            Self::Panic
        } else {
            Self::Log
        }
    }
}

impl Default for UsageErrorPolicy {
    fn default() -> Self {
        Self::for_build()
    }
}

// Default implementations

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: OutputFormat::Tty,
            color: ColorChoice::Auto,
        }
    }
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            usage_errors: UsageErrorPolicy::for_build(),
            emit_events: true,
        }
    }
}

// Default value functions for serde
fn default_output_format() -> OutputFormat {
    OutputFormat::Tty
}

fn default_color_choice() -> ColorChoice {
    ColorChoice::Auto
}

fn default_usage_errors() -> UsageErrorPolicy {
    UsageErrorPolicy::for_build()
}

fn default_emit_events() -> bool {
    true
}

impl Config {
    /// Default config file path, or `None` when the platform has no config
    /// directory (e.g. `HOME` is unset)
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("amo").join("config.toml"))
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the file contents
    /// contain invalid TOML syntax that cannot be parsed.
    pub async fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::from(ConfigError::NotFound {
                    path: path.display().to_string(),
                })
            } else {
                Error::from(e)
            }
        })?;

        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string
    ///
    /// # Errors
    ///
    /// Returns an error if the contents are not valid configuration TOML.
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| ConfigError::ParseError {
                message: e.to_string(),
            })
            .map_err(Into::into)
    }

    /// Load configuration with fallback to defaults
    ///
    /// Defaults are used when there is no config directory or no file in it.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self> {
        let Some(config_path) = Self::default_path() else {
            tracing::debug!("no config directory, using defaults");
            return Ok(Self::default());
        };

        if config_path.exists() {
            tracing::debug!(path = %config_path.display(), "loading configuration");
            Self::load_from_file(&config_path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// If path is provided, loads from that file.
    /// If path is None, uses the default loading behavior.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    /// that cannot be parsed into the expected types.
    pub fn merge_env(&mut self) -> Result<()> {
        // AMO_OUTPUT
        if let Ok(output) = std::env::var("AMO_OUTPUT") {
            self.general.default_output = match output.as_str() {
                "plain" => OutputFormat::Plain,
                "tty" => OutputFormat::Tty,
                "json" => OutputFormat::Json,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "AMO_OUTPUT".to_string(),
                        value: output,
                    }
                    .into())
                }
            };
        }

        // AMO_COLOR
        if let Ok(color) = std::env::var("AMO_COLOR") {
            self.general.color = match color.as_str() {
                "always" => ColorChoice::Always,
                "auto" => ColorChoice::Auto,
                "never" => ColorChoice::Never,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "AMO_COLOR".to_string(),
                        value: color,
                    }
                    .into())
                }
            };
        }

        // AMO_USAGE_ERRORS
        if let Ok(policy) = std::env::var("AMO_USAGE_ERRORS") {
            self.lifecycle.usage_errors = match policy.as_str() {
                "panic" => UsageErrorPolicy::Panic,
                "log" => UsageErrorPolicy::Log,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "AMO_USAGE_ERRORS".to_string(),
                        value: policy,
                    }
                    .into())
                }
            };
        }

        // AMO_EMIT_EVENTS
        if let Ok(emit) = std::env::var("AMO_EMIT_EVENTS") {
            self.lifecycle.emit_events = match emit.as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "AMO_EMIT_EVENTS".to_string(),
                        value: emit,
                    }
                    .into())
                }
            };
        }

        Ok(())
    }
}
