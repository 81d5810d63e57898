//! Error types and handling for the `TripCraft` application

use thiserror::Error;

/// Main error type for the `TripCraft` application
#[derive(Error, Debug)]
pub enum TripCraftError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Trip parameter validation errors, raised before any network call
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// The completion service could not be reached or answered abnormally
    #[error("Service unavailable: {message}")]
    ServiceUnavailable { message: String },

    /// Cache operation errors
    #[error("Cache error: {message}")]
    Cache { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl TripCraftError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new input validation error
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a new service-unavailable error
    pub fn service_unavailable<S: Into<String>>(message: S) -> Self {
        Self::ServiceUnavailable {
            message: message.into(),
        }
    }

    /// Create a new cache error
    pub fn cache<S: Into<String>>(message: S) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TripCraftError::Config { .. } => {
                "Configuration error. Please check your config file and API key.".to_string()
            }
            TripCraftError::InvalidInput { message } => {
                format!("Invalid input: {message}")
            }
            TripCraftError::ServiceUnavailable { .. } => {
                "The itinerary service is currently unavailable. Please try again in a moment."
                    .to_string()
            }
            TripCraftError::Cache { .. } => {
                "Cache operation failed. You may need to clear your cache.".to_string()
            }
            TripCraftError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            TripCraftError::General { message } => message.clone(),
        }
    }
}
