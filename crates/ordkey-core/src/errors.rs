//! Unified error system for ordkey
//!
//! Channel appends, range queries and extraction cannot fail. Errors only
//! come from the ambient layers: configuration, effect handlers and I/O.

use crate::effects::TimeError;
use serde::{Deserialize, Serialize};

/// Unified error type for all ordkey operations
#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum OrdkeyError {
    /// Invalid input or configuration
    #[error("Invalid: {message}")]
    Invalid {
        /// Error message describing the invalid input
        message: String,
    },

    /// Time effect failure
    #[error("Time error: {message}")]
    Time {
        /// Error message describing the time failure
        message: String,
    },

    /// Resource not found
    #[error("Not found: {message}")]
    NotFound {
        /// Error message describing what was not found
        message: String,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Error message describing the internal error
        message: String,
    },
}

impl OrdkeyError {
    /// Create an invalid input error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Create a time error
    pub fn time(message: impl Into<String>) -> Self {
        Self::Time {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Standard Result type for ordkey operations
pub type Result<T> = std::result::Result<T, OrdkeyError>;

impl From<TimeError> for OrdkeyError {
    fn from(err: TimeError) -> Self {
        Self::time(err.to_string())
    }
}

impl From<std::io::Error> for OrdkeyError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::not_found(err.to_string()),
            std::io::ErrorKind::InvalidData | std::io::ErrorKind::InvalidInput => {
                Self::invalid(err.to_string())
            }
            _ => Self::internal(err.to_string()),
        }
    }
}

impl From<toml::de::Error> for OrdkeyError {
    fn from(err: toml::de::Error) -> Self {
        Self::invalid(format!("Invalid TOML: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = OrdkeyError::invalid("test message");
        assert!(matches!(err, OrdkeyError::Invalid { .. }));
        assert_eq!(err.to_string(), "Invalid: test message");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = OrdkeyError::from(io_err);
        assert!(matches!(err, OrdkeyError::NotFound { .. }));
    }

    #[test]
    fn test_time_error_conversion() {
        let err = OrdkeyError::from(TimeError::OutOfRange {
            reason: "deadline overflow".to_string(),
        });
        assert!(matches!(err, OrdkeyError::Time { .. }));
        assert!(err.to_string().contains("deadline overflow"));
    }
}
