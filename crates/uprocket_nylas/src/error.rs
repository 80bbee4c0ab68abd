// --- File: crates/uprocket_nylas/src/error.rs ---
use thiserror::Error;
use uprocket_common::{external_service_error, HttpStatusCode, UprocketError};

/// Nylas-specific error types.
#[derive(Error, Debug)]
pub enum NylasError {
    /// Error occurred during a Nylas API request
    #[error("Nylas API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Error returned by the Nylas API
    #[error("Nylas API returned an error: {message} (Status: {status_code})")]
    ApiError { status_code: u16, message: String },

    /// Error parsing a Nylas API response
    #[error("Failed to parse Nylas API response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Missing or incomplete Nylas configuration
    #[error("Nylas configuration missing or incomplete: {0}")]
    ConfigError(String),

    /// API key env var not set
    #[error("NYLAS_API_KEY environment variable not set")]
    MissingApiKey,

    /// No user record for the requested contractor id
    #[error("Invalid contractor id")]
    InvalidContractor,

    /// Contractor exists but is not accepting work
    #[error("Contractor is not looking for work")]
    ContractorNotAvailable,

    /// Contractor has no scheduling configuration at all
    #[error("Contractor has not completed their profile")]
    ProfileNotConfigured,

    /// Contractor has no scheduling configuration for the requested duration
    #[error("Contractor has not completed their profile for {0} minutes")]
    ProfileIncomplete(i64),

    /// Requested duration is not one this deployment sells
    #[error("No service offered for {0} minute duration.")]
    NoMatchingDuration(i64),

    /// Directory lookup failed underneath a Nylas operation
    #[error("Directory lookup failed: {0}")]
    DirectoryError(String),
}

impl NylasError {
    /// True for the 400-with-message eligibility/validation failures.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            NylasError::InvalidContractor
                | NylasError::ContractorNotAvailable
                | NylasError::ProfileNotConfigured
                | NylasError::ProfileIncomplete(_)
                | NylasError::NoMatchingDuration(_)
        )
    }
}

/// Convert NylasError to UprocketError
impl From<NylasError> for UprocketError {
    fn from(err: NylasError) -> Self {
        match err {
            NylasError::RequestError(e) => {
                UprocketError::HttpError(format!("Nylas request error: {}", e))
            }
            NylasError::ApiError {
                status_code,
                message,
            } => external_service_error(
                "Nylas API",
                format!("Status: {}, Message: {}", status_code, message),
            ),
            NylasError::ParseError(e) => {
                UprocketError::ParseError(format!("Nylas response parse error: {}", e))
            }
            NylasError::ConfigError(msg) => UprocketError::ConfigError(msg),
            NylasError::MissingApiKey => {
                UprocketError::ConfigError("NYLAS_API_KEY environment variable not set".to_string())
            }
            NylasError::InvalidContractor
            | NylasError::ContractorNotAvailable
            | NylasError::ProfileNotConfigured
            | NylasError::ProfileIncomplete(_)
            | NylasError::NoMatchingDuration(_) => {
                UprocketError::ValidationError(err.to_string())
            }
            NylasError::DirectoryError(msg) => UprocketError::DatabaseError(msg),
        }
    }
}

impl HttpStatusCode for NylasError {
    fn status_code(&self) -> u16 {
        match self {
            NylasError::RequestError(_) => 500,
            NylasError::ApiError { status_code, .. } => *status_code,
            NylasError::ParseError(_) => 500,
            NylasError::ConfigError(_) => 500,
            NylasError::MissingApiKey => 500,
            NylasError::InvalidContractor => 400,
            NylasError::ContractorNotAvailable => 400,
            NylasError::ProfileNotConfigured => 400,
            NylasError::ProfileIncomplete(_) => 400,
            NylasError::NoMatchingDuration(_) => 400,
            NylasError::DirectoryError(_) => 500,
        }
    }
}
