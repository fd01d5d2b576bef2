//! Configuration settings for nginx-sites.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::SitesError;
use crate::executor::DEFAULT_ELEVATE_WITH;
use crate::options::NginxOptions;

/// Configuration file read when none is given explicitly.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/nginx-sites/config.toml";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    /// Instance nginx options.
    #[serde(default)]
    pub nginx: NginxOptions,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub privilege: PrivilegeConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format ("pretty" or "json").
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Limits configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Timeout for each external command, in seconds.
    #[serde(default = "default_command_timeout")]
    pub command_timeout_seconds: u64,
}

/// Privilege elevation configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PrivilegeConfig {
    /// Program prefixed to privileged commands.
    #[serde(default = "default_elevate_with")]
    pub elevate_with: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_command_timeout() -> u64 {
    60
}

fn default_elevate_with() -> String {
    DEFAULT_ELEVATE_WITH.to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            command_timeout_seconds: default_command_timeout(),
        }
    }
}

impl Default for PrivilegeConfig {
    fn default() -> Self {
        Self {
            elevate_with: default_elevate_with(),
        }
    }
}

impl LimitsConfig {
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_seconds)
    }
}

impl Settings {
    /// Load settings from a TOML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SitesError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SitesError::Config {
            message: format!("Failed to read config file '{}': {}", path.display(), e),
        })?;

        Self::parse(&content).map_err(|e| match e {
            SitesError::Config { message } => SitesError::Config {
                message: format!("Config file '{}': {}", path.display(), message),
            },
            other => other,
        })
    }

    /// Load settings from `path`, or from the default location.
    ///
    /// A missing file at the default location yields the defaults; an
    /// explicit path must exist.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, SitesError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_PATH);
                if default.exists() {
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse and validate settings from TOML text.
    pub fn parse(content: &str) -> Result<Self, SitesError> {
        let settings: Settings = toml::from_str(content).map_err(|e| SitesError::Config {
            message: format!("Failed to parse settings: {}", e),
        })?;

        settings.validate()?;

        Ok(settings)
    }

    /// Validate the settings.
    fn validate(&self) -> Result<(), SitesError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(SitesError::Config {
                message: format!(
                    "Invalid log level '{}'. Valid levels: {:?}",
                    self.logging.level, valid_levels
                ),
            });
        }

        let valid_formats = ["pretty", "json"];
        if !valid_formats.contains(&self.logging.format.to_lowercase().as_str()) {
            return Err(SitesError::Config {
                message: format!(
                    "Invalid log format '{}'. Valid formats: {:?}",
                    self.logging.format, valid_formats
                ),
            });
        }

        if self.limits.command_timeout_seconds == 0 {
            return Err(SitesError::Config {
                message: "command_timeout_seconds must be greater than zero".to_string(),
            });
        }

        if self.privilege.elevate_with.trim().is_empty() {
            return Err(SitesError::Config {
                message: "elevate_with must name a program".to_string(),
            });
        }

        Ok(())
    }
}
