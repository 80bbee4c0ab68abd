// --- File: crates/uprocket_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for all UpRocket errors.
///
/// This enum provides a common set of error variants that can be used across all crates.
/// Each crate extends this by implementing From<SpecificError> for UprocketError.
#[derive(Error, Debug)]
pub enum UprocketError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during authentication or authorization
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during a database operation
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Error occurred during an external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for UprocketError {
    fn status_code(&self) -> u16 {
        match self {
            UprocketError::HttpError(_) => 500,
            UprocketError::ParseError(_) => 400,
            UprocketError::ConfigError(_) => 500,
            UprocketError::AuthError(_) => 403,
            UprocketError::ValidationError(_) => 400,
            UprocketError::DatabaseError(_) => 500,
            UprocketError::ExternalServiceError { .. } => 502,
            UprocketError::NotFoundError(_) => 404,
            UprocketError::InternalError(_) => 500,
        }
    }
}

// Common error conversions
impl From<reqwest::Error> for UprocketError {
    fn from(err: reqwest::Error) -> Self {
        UprocketError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for UprocketError {
    fn from(err: serde_json::Error) -> Self {
        UprocketError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for UprocketError {
    fn from(err: std::io::Error) -> Self {
        UprocketError::InternalError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> UprocketError {
    UprocketError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> UprocketError {
    UprocketError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> UprocketError {
    UprocketError::NotFoundError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> UprocketError {
    UprocketError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

pub fn internal_error<T: fmt::Display>(message: T) -> UprocketError {
    UprocketError::InternalError(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_map_to_403() {
        assert_eq!(UprocketError::AuthError("no cookie".into()).status_code(), 403);
    }

    #[test]
    fn validation_errors_map_to_400() {
        assert_eq!(validation_error("missing field").status_code(), 400);
    }
}
