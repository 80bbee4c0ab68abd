//! Firebase Admin integration for UpRocket
//!
//! This crate provides the server-side Firebase plumbing the rest of the
//! application builds on:
//!
//! - Authentication with Google using service account credentials
//! - A Realtime Database REST client behind the [`client::RealtimeDb`] trait
//! - Minting and verifying Firebase session cookies ([`auth::SessionAuth`])
//! - The `validate_request` helper used by identity-dependent handlers
//!
//! Nothing in here knows about users or contractors; the directory crate
//! layers the domain model on top of the `RealtimeDb` seam.

pub mod auth;
pub mod client;

pub use auth::{
    build_session_cookie, clear_session_cookie, session_cookie_from_headers, validate_request,
    DecodedIdentity, FirebaseSessionAuth, SessionAuth,
};
pub use client::{FirebaseError, FirebaseRealtimeDb, RealtimeDb};
