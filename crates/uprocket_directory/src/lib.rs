//! User and contractor directory for UpRocket
//!
//! This crate owns the user data model and every endpoint that reads or
//! writes it:
//!
//! - `POST /login` / `GET /logout` — session cookie lifecycle
//! - `GET /me` / `PUT /me` — the authenticated user's own record
//! - `GET /contractor` / `GET /contractor/{id}` — normalized contractor views
//!
//! Contractor views strip the provider identifiers (`grant_id`, `config_id`,
//! `config_id_60`) before anything leaves the service. Skills are a list
//! everywhere in memory; the comma-delimited storage form lives only in
//! `models::StoredUserRecord`.

pub mod doc;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export the routes function to be used by the main backend service
pub use routes::{router, routes};

pub use models::{Contractor, StoredUserRecord, UserRecord};
pub use repository::{FirebaseUserRepository, UserRepository};

#[cfg(feature = "openapi")]
pub mod openapi {
    pub use crate::doc::DirectoryApiDoc;
}
