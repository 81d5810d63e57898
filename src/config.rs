//! Configuration management for the `TripCraft` application
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::TripCraftError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `TripCraft` application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripCraftConfig {
    /// Completion service configuration
    pub completion: CompletionConfig,
    /// Cache configuration
    pub cache: CacheConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Web server configuration
    pub server: ServerConfig,
    /// Default application settings
    pub defaults: DefaultsConfig,
}

/// Completion service configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// API key for the completion service (falls back to `OPENAI_API_KEY`)
    pub api_key: Option<String>,
    /// Base URL for the completion service
    #[serde(default = "default_completion_base_url")]
    pub base_url: String,
    /// Model used for itinerary generation
    #[serde(default = "default_completion_model")]
    pub model: String,
    /// Cheaper model used for auxiliary sections
    #[serde(default = "default_completion_fast_model")]
    pub fast_model: String,
    /// Request timeout in seconds
    #[serde(default = "default_completion_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries for failed requests
    #[serde(default = "default_completion_max_retries")]
    pub max_retries: u32,
}

/// Cache configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache TTL in hours
    #[serde(default = "default_cache_ttl")]
    pub ttl_hours: u32,
    /// Maximum cache size in MB
    #[serde(default = "default_cache_max_size")]
    pub max_size_mb: u32,
    /// Cache directory location
    #[serde(default = "default_cache_location")]
    pub location: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Web server configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port the web server listens on
    #[serde(default = "default_server_port")]
    pub port: u16,
}

/// Default application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Maximum trip length in days
    #[serde(default = "default_max_trip_days")]
    pub max_trip_days: u32,
    /// Maximum number of travelers per request
    #[serde(default = "default_max_travelers")]
    pub max_travelers: u32,
}

// Default value functions
fn default_completion_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_completion_model() -> String {
    "gpt-4o".to_string()
}

fn default_completion_fast_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_completion_timeout() -> u32 {
    90
}

fn default_completion_max_retries() -> u32 {
    2
}

fn default_cache_ttl() -> u32 {
    168
}

fn default_cache_max_size() -> u32 {
    100
}

fn default_cache_location() -> String {
    "~/.cache/tripcraft".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_server_port() -> u16 {
    3000
}

fn default_max_trip_days() -> u32 {
    30
}

fn default_max_travelers() -> u32 {
    10
}

impl Default for TripCraftConfig {
    fn default() -> Self {
        Self {
            completion: CompletionConfig {
                api_key: None,
                base_url: default_completion_base_url(),
                model: default_completion_model(),
                fast_model: default_completion_fast_model(),
                timeout_seconds: default_completion_timeout(),
                max_retries: default_completion_max_retries(),
            },
            cache: CacheConfig {
                ttl_hours: default_cache_ttl(),
                max_size_mb: default_cache_max_size(),
                location: default_cache_location(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
                format: default_log_format(),
            },
            server: ServerConfig {
                port: default_server_port(),
            },
            defaults: DefaultsConfig {
                max_trip_days: default_max_trip_days(),
                max_travelers: default_max_travelers(),
            },
        }
    }
}

impl TripCraftConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Add environment variable overrides with TRIPCRAFT_ prefix
        builder = builder.add_source(
            Environment::with_prefix("TRIPCRAFT")
                .separator("_")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TripCraftConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        // Apply defaults for missing values
        config.apply_defaults();

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tripcraft").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.completion.base_url.is_empty() {
            self.completion.base_url = default_completion_base_url();
        }
        if self.completion.model.is_empty() {
            self.completion.model = default_completion_model();
        }
        if self.completion.fast_model.is_empty() {
            self.completion.fast_model = default_completion_fast_model();
        }
        if self.completion.timeout_seconds == 0 {
            self.completion.timeout_seconds = default_completion_timeout();
        }
        if self.cache.ttl_hours == 0 {
            self.cache.ttl_hours = default_cache_ttl();
        }
        if self.cache.max_size_mb == 0 {
            self.cache.max_size_mb = default_cache_max_size();
        }
        if self.cache.location.is_empty() {
            self.cache.location = default_cache_location();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.server.port == 0 {
            self.server.port = default_server_port();
        }
        if self.defaults.max_trip_days == 0 {
            self.defaults.max_trip_days = default_max_trip_days();
        }
        if self.defaults.max_travelers == 0 {
            self.defaults.max_travelers = default_max_travelers();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate API keys and credentials
    pub fn validate_api_keys(&self) -> Result<()> {
        // The key may also arrive via OPENAI_API_KEY at client construction
        if let Some(api_key) = &self.completion.api_key {
            if api_key.is_empty() {
                return Err(TripCraftError::config(
                    "Completion API key cannot be empty if provided. Either remove it or provide a valid key."
                ).into());
            }

            if api_key.len() < 8 {
                return Err(TripCraftError::config(
                    "Completion API key appears to be invalid (too short). Please check your API key."
                ).into());
            }

            if api_key.len() > 200 {
                return Err(TripCraftError::config(
                    "Completion API key appears to be invalid (too long). Please check your API key."
                ).into());
            }
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.completion.timeout_seconds > 300 {
            return Err(
                TripCraftError::config("Completion timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.completion.max_retries > 10 {
            return Err(TripCraftError::config("Completion max retries cannot exceed 10").into());
        }

        if self.cache.ttl_hours > 720 {
            return Err(TripCraftError::config("Cache TTL cannot exceed 720 hours (30 days)").into());
        }

        if self.cache.max_size_mb > 10000 {
            return Err(
                TripCraftError::config("Cache max size cannot exceed 10000 MB (10 GB)").into(),
            );
        }

        if self.defaults.max_trip_days > 90 {
            return Err(TripCraftError::config("Maximum trip length cannot exceed 90 days").into());
        }

        if self.defaults.max_travelers > 50 {
            return Err(TripCraftError::config("Maximum travelers cannot exceed 50").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TripCraftError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TripCraftError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.completion.base_url.starts_with("http://")
            && !self.completion.base_url.starts_with("https://")
        {
            return Err(TripCraftError::config(
                "Completion service base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }

    /// Create configuration directory if it doesn't exist
    pub fn ensure_config_dir() -> Result<PathBuf> {
        if let Some(config_dir) = dirs::config_dir() {
            let tripcraft_config_dir = config_dir.join("tripcraft");
            std::fs::create_dir_all(&tripcraft_config_dir).with_context(|| {
                format!(
                    "Failed to create config directory: {}",
                    tripcraft_config_dir.display()
                )
            })?;
            Ok(tripcraft_config_dir)
        } else {
            Err(TripCraftError::config("Unable to determine config directory").into())
        }
    }

    /// Resolve the cache directory, expanding a leading `~`
    #[must_use]
    pub fn cache_dir(&self) -> PathBuf {
        let location = &self.cache.location;
        if let Some(rest) = location.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TripCraftConfig::default();
        assert_eq!(config.completion.base_url, "https://api.openai.com/v1");
        assert_eq!(config.completion.model, "gpt-4o");
        assert_eq!(config.completion.fast_model, "gpt-4o-mini");
        assert_eq!(config.completion.timeout_seconds, 90);
        assert_eq!(config.cache.ttl_hours, 168);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.defaults.max_trip_days, 30);
        assert!(config.completion.api_key.is_none());
    }

    #[test]
    fn test_config_validation_missing_api_key() {
        let config = TripCraftConfig::default();
        // The key is optional at config level; the client picks it up from env
        assert!(config.validate_api_keys().is_ok());
    }

    #[test]
    fn test_config_validation_valid_api_key() {
        let mut config = TripCraftConfig::default();
        config.completion.api_key = Some("sk-valid_api_key_123".to_string());
        assert!(config.validate_api_keys().is_ok());
    }

    #[test]
    fn test_config_validation_short_api_key() {
        let mut config = TripCraftConfig::default();
        config.completion.api_key = Some("short".to_string());
        let result = config.validate_api_keys();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("too short"));
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = TripCraftConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = TripCraftConfig::default();
        config.completion.timeout_seconds = 500; // Invalid - too high
        let result = config.validate();
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("timeout cannot exceed")
        );
    }

    #[test]
    fn test_config_validation_bad_base_url() {
        let mut config = TripCraftConfig::default();
        config.completion.base_url = "ftp://example.com".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("base URL"));
    }

    #[test]
    fn test_apply_defaults_fills_empty_fields() {
        let mut config = TripCraftConfig::default();
        config.completion.model = String::new();
        config.cache.location = String::new();
        config.apply_defaults();
        assert_eq!(config.completion.model, "gpt-4o");
        assert_eq!(config.cache.location, "~/.cache/tripcraft");
    }

    #[test]
    fn test_config_path_generation() {
        let path = TripCraftConfig::get_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("tripcraft"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_cache_dir_expands_home() {
        let config = TripCraftConfig::default();
        let dir = config.cache_dir();
        assert!(!dir.to_string_lossy().starts_with("~"));
    }
}
