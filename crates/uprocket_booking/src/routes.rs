// --- File: crates/uprocket_booking/src/routes.rs ---

use axum::{routing::post, Router};
use std::sync::Arc;

use crate::handlers::{booking_attempt_handler, BookingState};
use uprocket_config::AppConfig;
use uprocket_firebase::FirebaseSessionAuth;

/// Creates a router containing all routes for the booking feature.
pub fn routes(config: Arc<AppConfig>) -> Router {
    let firebase_config = config.firebase.clone().unwrap_or_default();
    let auth_config = config.auth.clone().unwrap_or_default();

    let state = Arc::new(BookingState {
        config,
        session_auth: Arc::new(FirebaseSessionAuth::new(firebase_config, auth_config)),
    });
    router(state)
}

/// Builds the router for a prepared state. Tests inject their own state here.
pub fn router(state: Arc<BookingState>) -> Router {
    Router::new()
        .route("/booking/attempt", post(booking_attempt_handler))
        .with_state(state)
}
