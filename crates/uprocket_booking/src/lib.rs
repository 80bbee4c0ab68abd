//! Booking orchestration core for UpRocket
//!
//! One booking attempt stitches together three pieces:
//!
//! - [`store::SchedulerStore`] — the scheduling widget's internal store,
//!   rebuilt as an explicit write → observe → act handoff on a watch channel
//! - [`connector::SchedulerConnector`] — the widget's booking operation: takes
//!   the staged state to the provider and returns the `{error}`/`{data}`
//!   envelope
//! - [`orchestrator::BookingOrchestrator`] — the per-attempt state machine
//!   that decides between login redirect, failure, and checkout
//!
//! `POST /booking/attempt` drives one attempt end to end for the frontend.

pub mod connector;
pub mod doc;
pub mod error;
pub mod handlers;
pub mod models;
pub mod orchestrator;
pub mod routes;
pub mod store;

#[cfg(test)]
mod orchestrator_test;

// Re-export the routes function to be used by the main backend service
pub use routes::{router, routes};

pub use connector::{BookingAttempt, HttpSchedulerConnector, SchedulerConnector};
pub use error::BookingError;
pub use models::{BookingInfo, Participant, Timeslot};
pub use orchestrator::{BookingContext, BookingOrchestrator, BookingOutcome, BookingPhase};
pub use store::SchedulerStore;

#[cfg(feature = "openapi")]
pub mod openapi {
    pub use crate::doc::BookingApiDoc;
}
