// --- File: crates/uprocket_nylas/src/models.rs ---
//! Wire types for the Nylas endpoints.
//!
//! Field names are part of the public API contract: session creation uses
//! snake_case (`contractor_id`), the booking action endpoints use camelCase
//! (`contractorId`).

use serde::{Deserialize, Serialize};

/// Request from the frontend to mint a scheduling session.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionRequest {
    pub contractor_id: String,
    /// Requested meeting duration in minutes.
    pub duration: i64,
}

/// Body for the booking confirm/cancel endpoints.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingActionRequest {
    #[serde(rename = "contractorId", default)]
    pub contractor_id: Option<String>,
}

/// Action transitions the provider supports on a pre-booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingAction {
    Confirm,
    Cancel,
}

impl BookingAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingAction::Confirm => "confirm",
            BookingAction::Cancel => "cancel",
        }
    }
}

/// One weekly open-hours window in a scheduling configuration.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenHours {
    /// Weekdays, 0 = Sunday.
    pub days: Vec<u8>,
    pub start: String,
    pub end: String,
    pub timezone: String,
}

/// Request body for `PUT /config`.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateConfigRequest {
    pub availability_calendar_ids: Vec<String>,
    pub availability_open_hours: Vec<OpenHours>,
    pub booking_calendar_id: String,
    #[serde(default)]
    pub event_title: Option<String>,
    #[serde(default)]
    pub event_description: Option<String>,
}
