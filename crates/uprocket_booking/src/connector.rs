// --- File: crates/uprocket_booking/src/connector.rs ---
//! The scheduler connector.
//!
//! The connector performs the provider call that turns a staged timeslot into
//! a pre-booking. It reads the scheduler store through the watch channel and
//! will not issue the call until the store has caught up to the revision the
//! caller staged — the readiness half of the write → observe → act protocol.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::sync::watch;

use crate::error::BookingError;
use crate::store::{SchedulerStore, StoreSnapshot};
use uprocket_common::BoxFuture;
use uprocket_config::NylasConfig;

/// Provider reply envelope for a booking attempt.
///
/// Success carries `data`, failure carries `error`; a reply with neither is
/// treated as unexpected by the orchestrator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingAttempt {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ProviderError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderError {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A trait for the widget-side booking operation.
pub trait SchedulerConnector: Send + Sync {
    /// Book the staged timeslot, reading store state no older than `revision`.
    fn book_timeslot(&self, revision: u64) -> BoxFuture<'_, BookingAttempt, BookingError>;
}

/// Live connector: books against the session-scoped provider endpoint.
pub struct HttpSchedulerConnector {
    rx: watch::Receiver<StoreSnapshot>,
    config: NylasConfig,
    session_id: String,
}

impl HttpSchedulerConnector {
    pub fn new(store: &SchedulerStore, config: NylasConfig, session_id: String) -> Self {
        Self {
            rx: store.subscribe(),
            config,
            session_id,
        }
    }
}

impl SchedulerConnector for HttpSchedulerConnector {
    fn book_timeslot(&self, revision: u64) -> BoxFuture<'_, BookingAttempt, BookingError> {
        Box::pin(async move {
            let mut rx = self.rx.clone();
            let snapshot = rx
                .wait_for(|snapshot| snapshot.revision >= revision)
                .await
                .map_err(|_| BookingError::StoreClosed)?
                .clone();

            let timeslot = snapshot
                .selected_timeslot
                .ok_or(BookingError::MissingTimeslot)?;
            let booking_info = snapshot
                .booking_info
                .ok_or(BookingError::MissingBookingInfo)?;

            let base = self.config.scheduler_api_url.as_deref().ok_or_else(|| {
                BookingError::ConfigError("Missing scheduler_api_url in NylasConfig".to_string())
            })?;
            let url = format!("{}/v3/scheduling/bookings", base.trim_end_matches('/'));

            let response = uprocket_common::HTTP_CLIENT
                .post(&url)
                .query(&[("session_id", self.session_id.as_str())])
                .json(&json!({
                    "start_time": timeslot.start_time.timestamp(),
                    "end_time": timeslot.end_time.timestamp(),
                    "guest": {
                        "name": booking_info.primary_participant.name,
                        "email": booking_info.primary_participant.email,
                    },
                }))
                .send()
                .await?;

            // The envelope distinguishes success from failure; the status line
            // is not inspected here.
            Ok(response.json::<BookingAttempt>().await?)
        })
    }
}
