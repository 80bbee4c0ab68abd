// --- File: crates/uprocket_booking/src/error.rs ---
use thiserror::Error;
use uprocket_common::{HttpStatusCode, UprocketError};

/// Booking-specific error types.
#[derive(Error, Debug)]
pub enum BookingError {
    /// Error occurred during the booking HTTP request
    #[error("Booking request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Missing or incomplete configuration
    #[error("Missing configuration: {0}")]
    ConfigError(String),

    /// The store had no staged timeslot when the booking call read it
    #[error("No timeslot staged in the scheduler store")]
    MissingTimeslot,

    /// The store had no staged booking info when the booking call read it
    #[error("No booking info staged in the scheduler store")]
    MissingBookingInfo,

    /// The store was dropped before the booking call observed the write
    #[error("Scheduler store closed before the booking call observed it")]
    StoreClosed,
}

impl From<BookingError> for UprocketError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::RequestError(e) => UprocketError::HttpError(e.to_string()),
            BookingError::ConfigError(msg) => UprocketError::ConfigError(msg),
            BookingError::MissingTimeslot | BookingError::MissingBookingInfo => {
                UprocketError::ValidationError(err.to_string())
            }
            BookingError::StoreClosed => UprocketError::InternalError(err.to_string()),
        }
    }
}

impl HttpStatusCode for BookingError {
    fn status_code(&self) -> u16 {
        match self {
            BookingError::RequestError(_) => 502,
            BookingError::ConfigError(_) => 500,
            BookingError::MissingTimeslot => 400,
            BookingError::MissingBookingInfo => 400,
            BookingError::StoreClosed => 500,
        }
    }
}
