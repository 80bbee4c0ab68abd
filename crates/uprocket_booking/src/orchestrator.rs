// --- File: crates/uprocket_booking/src/orchestrator.rs ---
//! The booking orchestrator: one state machine per booking attempt.
//!
//! Idle → TimeslotSelected → one of RedirectLogin, Failed, AwaitingCheckout.
//! The attempt context (contractor, duration, acting identity) travels in
//! [`BookingContext`] rather than ambient shared state, and the pending
//! booking returned by the provider is held on the orchestrator until the
//! checkout step takes over.

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use crate::connector::SchedulerConnector;
use crate::models::{BookingInfo, Participant, Timeslot};
use crate::store::SchedulerStore;

/// Phases of one booking attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingPhase {
    Idle,
    TimeslotSelected,
    RedirectLogin,
    Failed,
    AwaitingCheckout,
}

/// Everything one attempt needs to know.
#[derive(Debug, Clone)]
pub struct BookingContext {
    pub contractor_id: String,
    pub duration_minutes: i64,
    /// The authenticated user, when there is one. `None` sends the attempt to
    /// login instead of booking.
    pub identity: Option<Participant>,
}

/// Terminal outcome of a confirm.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingOutcome {
    RedirectToLogin { target: String },
    Failed { message: String },
    ProceedToCheckout { booking: Value },
}

pub struct BookingOrchestrator<C: SchedulerConnector> {
    store: Arc<SchedulerStore>,
    connector: C,
    context: BookingContext,
    phase: BookingPhase,
    selected: Option<Timeslot>,
    pending_booking: Option<Value>,
}

impl<C: SchedulerConnector> BookingOrchestrator<C> {
    pub fn new(store: Arc<SchedulerStore>, connector: C, context: BookingContext) -> Self {
        Self {
            store,
            connector,
            context,
            phase: BookingPhase::Idle,
            selected: None,
            pending_booking: None,
        }
    }

    pub fn phase(&self) -> BookingPhase {
        self.phase
    }

    pub fn pending_booking(&self) -> Option<&Value> {
        self.pending_booking.as_ref()
    }

    /// The user picked a timeslot from the availability view.
    pub fn select_timeslot(&mut self, timeslot: Timeslot) {
        self.selected = Some(timeslot);
        self.phase = BookingPhase::TimeslotSelected;
    }

    /// The user confirmed the selected timeslot.
    ///
    /// With no identity the attempt terminates in RedirectLogin without
    /// touching the store or the connector; login resumes the flow on the
    /// contractor page via the redirect target. Otherwise the identity and
    /// timeslot are staged in the store and the connector books from the
    /// staged revision. No retry on failure.
    pub async fn confirm(&mut self) -> BookingOutcome {
        let Some(timeslot) = self.selected else {
            self.phase = BookingPhase::Failed;
            return BookingOutcome::Failed {
                message: "No timeslot selected".to_string(),
            };
        };

        let Some(identity) = self.context.identity.clone() else {
            self.phase = BookingPhase::RedirectLogin;
            return BookingOutcome::RedirectToLogin {
                target: format!("/login?redirect=/contractor/{}", self.context.contractor_id),
            };
        };

        self.store.set_selected_timeslot(timeslot);
        let revision = self.store.set_booking_info(BookingInfo {
            primary_participant: identity,
        });

        match self.connector.book_timeslot(revision).await {
            Err(e) => {
                warn!("Booking call failed: {}", e);
                self.phase = BookingPhase::Failed;
                BookingOutcome::Failed {
                    message: e.to_string(),
                }
            }
            Ok(attempt) => {
                if let Some(error) = attempt.error {
                    self.phase = BookingPhase::Failed;
                    BookingOutcome::Failed {
                        message: error.message.unwrap_or_else(|| "Error".to_string()),
                    }
                } else if let Some(data) = attempt.data {
                    info!(
                        "Pre-booking created for contractor {}",
                        self.context.contractor_id
                    );
                    self.pending_booking = Some(data.clone());
                    self.phase = BookingPhase::AwaitingCheckout;
                    BookingOutcome::ProceedToCheckout { booking: data }
                } else {
                    self.phase = BookingPhase::Failed;
                    BookingOutcome::Failed {
                        message: "Unexpected booking error".to_string(),
                    }
                }
            }
        }
    }
}
