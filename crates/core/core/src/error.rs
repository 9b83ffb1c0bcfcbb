//! Error types for the admin console.
//!
//! This module defines the `AdminError` enum which represents all possible
//! errors that can occur while talking to the admin API or preparing the
//! console's configuration.

use thiserror::Error;

/// The main error type for admin console operations.
#[derive(Debug, Error)]
pub enum AdminError {
    // ==================== Transport Errors ====================
    /// The request could not be sent or the connection failed.
    #[error("HTTP error: {message}")]
    Http { message: String },

    /// The server answered with a non-success status code.
    #[error("Unexpected status {status}: {message}")]
    Status { status: u16, message: String },

    /// The request did not complete in time.
    #[error("Request timeout")]
    Timeout,

    // ==================== Payload Errors ====================
    /// The response body could not be decoded.
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    // ==================== Session Errors ====================
    /// No admin token is available for an authenticated call.
    #[error("Missing admin token")]
    MissingToken,

    // ==================== Configuration Errors ====================
    /// The configuration is invalid.
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl AdminError {
    /// Creates a new transport error.
    pub fn http(message: impl Into<String>) -> Self {
        Self::Http {
            message: message.into(),
        }
    }

    /// Creates a new status error.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Creates a new decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates a new configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

/// A Result type alias using AdminError.
pub type AdminResult<T> = Result<T, AdminError>;

impl From<serde_json::Error> for AdminError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AdminError::status(503, "Service Unavailable");
        assert_eq!(err.to_string(), "Unexpected status 503: Service Unavailable");
        assert_eq!(AdminError::MissingToken.to_string(), "Missing admin token");
    }

    #[test]
    fn test_from_serde_error() {
        let err: AdminError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, AdminError::Decode { .. }));
    }
}
