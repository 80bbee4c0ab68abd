//! Nylas Scheduler integration for UpRocket
//!
//! This crate talks to the external scheduling provider on behalf of the
//! marketplace:
//!
//! - `POST /session` — mint a short-lived scheduling session for one
//!   contractor and meeting duration
//! - `POST /booking/{booking_id}/confirm` / `…/cancel` — forward pre-booking
//!   transitions, re-verifying contractor eligibility first
//! - `GET/PUT /config` — scheduling configuration CRUD, one configuration per
//!   supported duration
//! - `GET /calendars` — the contractor's calendar list
//!
//! The API key comes from the `NYLAS_API_KEY` env var; base URLs from
//! `NylasConfig` so tests can point the client at a mock server.

pub mod client;
pub mod doc;
pub mod error;
pub mod handlers;
pub mod logic;
pub mod models;
pub mod routes;

#[cfg(test)]
mod logic_test;
#[cfg(test)]
pub(crate) mod test_support;

// Re-export the routes function to be used by the main backend service
pub use routes::{router, routes};

pub use client::NylasClient;
pub use error::NylasError;

#[cfg(feature = "openapi")]
pub mod openapi {
    pub use crate::doc::NylasApiDoc;
}
