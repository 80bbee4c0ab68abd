// --- File: crates/uprocket_nylas/src/routes.rs ---

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::client::NylasClient;
use crate::handlers::{
    cancel_booking_handler, confirm_booking_handler, create_session_handler, get_config_handler,
    list_calendars_handler, set_config_handler, NylasState,
};
use uprocket_config::AppConfig;
use uprocket_directory::FirebaseUserRepository;
use uprocket_firebase::{FirebaseRealtimeDb, FirebaseSessionAuth};

/// Creates a router containing all routes for the Nylas feature,
/// wired to the live provider and Firebase backends.
pub fn routes(config: Arc<AppConfig>) -> Router {
    let nylas_config = config.nylas.clone().unwrap_or_default();
    let firebase_config = config.firebase.clone().unwrap_or_default();
    let auth_config = config.auth.clone().unwrap_or_default();

    let client =
        Arc::new(NylasClient::from_env(nylas_config).expect("NYLAS_API_KEY must be set"));
    let db = Arc::new(FirebaseRealtimeDb::new(firebase_config.clone()));
    let state = Arc::new(NylasState {
        config,
        client,
        users: Arc::new(FirebaseUserRepository::new(db)),
        session_auth: Arc::new(FirebaseSessionAuth::new(firebase_config, auth_config)),
    });
    router(state)
}

/// Builds the router for a prepared state. Tests inject their own state here.
pub fn router(state: Arc<NylasState>) -> Router {
    Router::new()
        .route("/session", post(create_session_handler))
        .route("/booking/{booking_id}/confirm", post(confirm_booking_handler))
        .route("/booking/{booking_id}/cancel", post(cancel_booking_handler))
        .route(
            "/config",
            get(get_config_handler)
                .put(set_config_handler)
                .post(set_config_handler),
        )
        .route("/calendars", get(list_calendars_handler))
        .with_state(state)
}
