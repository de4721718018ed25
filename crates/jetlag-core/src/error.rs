//! Core error types for jetlag-core.
//!
//! Input errors (unknown zones, malformed departures, bad durations) are kept
//! distinct from the ambient configuration and I/O failures so that drivers
//! can map them to client-facing responses.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for jetlag-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Zone identifier does not resolve to a known IANA zone
    #[error("Unknown timezone: '{0}'")]
    UnknownZone(String),

    /// Departure string does not match `YYYY-MM-DD HH:MM`
    #[error("Invalid departure_time '{input}'. Use 'YYYY-MM-DD HH:MM'. Error: {detail}")]
    MalformedDeparture { input: String, detail: String },

    /// Flight duration is not a finite, non-negative number of hours
    #[error("Invalid flight duration: {0}")]
    InvalidDuration(String),

    /// A scheduled time left the four-digit year range
    #[error("Schedule out of range: {0}")]
    OutOfRange(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown config key: {0}")]
    UnknownKey(String),

    /// Home/config directory could not be prepared
    #[error("Config directory unavailable: {0}")]
    DirUnavailable(String),
}

impl CoreError {
    /// Whether the error was caused by caller-supplied input rather than the
    /// environment.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CoreError::UnknownZone(_)
                | CoreError::MalformedDeparture { .. }
                | CoreError::InvalidDuration(_)
                | CoreError::OutOfRange(_)
        )
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_zone_message_names_the_zone() {
        let err = CoreError::UnknownZone("Mars/Olympus".into());
        assert_eq!(err.to_string(), "Unknown timezone: 'Mars/Olympus'");
        assert!(err.is_input_error());
    }

    #[test]
    fn config_errors_are_not_input_errors() {
        let err: CoreError = ConfigError::UnknownKey("ui.theme".into()).into();
        assert!(!err.is_input_error());
        assert!(err.to_string().contains("ui.theme"));
    }
}
