//! Error types and handling for `CampWatch`
//!
//! Qualification itself never fails: a post that does not match simply
//! yields `false`. Errors only surface at the edges, while loading
//! configuration or validating caller-supplied input.

use thiserror::Error;

/// Main error type for the `CampWatch` crate
#[derive(Error, Debug)]
pub enum CampWatchError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// A configured date pattern failed to compile
    #[error("Invalid pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl CampWatchError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new pattern error
    pub fn pattern<S: Into<String>>(pattern: S, source: regex::Error) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            CampWatchError::Config { message } => {
                format!("Configuration error: {message}. Please check your config file.")
            }
            CampWatchError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            CampWatchError::Pattern { pattern, .. } => {
                format!("The date pattern '{pattern}' is not a valid regular expression.")
            }
            CampWatchError::Io { .. } => {
                "File operation failed. Please check the path and file permissions.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = CampWatchError::config("duplicate campsite");
        assert!(matches!(config_err, CampWatchError::Config { .. }));

        let validation_err = CampWatchError::validation("invalid coordinates");
        assert!(matches!(validation_err, CampWatchError::Validation { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = CampWatchError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let validation_err = CampWatchError::validation("latitude is NaN");
        assert!(validation_err.user_message().contains("latitude is NaN"));
    }

    #[test]
    fn test_pattern_error_keeps_pattern() {
        let source = regex::Regex::new("6월(").unwrap_err();
        let err = CampWatchError::pattern("6월(", source);
        assert!(err.to_string().contains("6월("));
        assert!(err.user_message().contains("6월("));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CampWatchError = io_err.into();
        assert!(matches!(err, CampWatchError::Io { .. }));
    }
}
