// --- File: crates/uprocket_booking/src/models.rs ---

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A start/end instant pair selected from a provider availability set.
///
/// Held transiently until the attempt completes or the selection is discarded.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timeslot {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// The acting user as the booking's primary participant.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub email: String,
}

/// What the booking call consumes: the primary participant. Rebuilt whenever
/// the acting user changes.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingInfo {
    pub primary_participant: Participant,
}
