// --- File: crates/uprocket_directory/src/routes.rs ---

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handlers::{
    get_contractor_handler, get_me_handler, list_contractors_handler, login_handler,
    logout_handler, update_me_handler, DirectoryState,
};
use crate::repository::FirebaseUserRepository;
use uprocket_config::AppConfig;
use uprocket_firebase::{FirebaseRealtimeDb, FirebaseSessionAuth};

/// Creates a router containing all routes for the directory feature,
/// wired to the live Firebase backends.
pub fn routes(config: Arc<AppConfig>) -> Router {
    let firebase_config = config.firebase.clone().unwrap_or_default();
    let auth_config = config.auth.clone().unwrap_or_default();

    let db = Arc::new(FirebaseRealtimeDb::new(firebase_config.clone()));
    let state = Arc::new(DirectoryState {
        config,
        users: Arc::new(FirebaseUserRepository::new(db)),
        session_auth: Arc::new(FirebaseSessionAuth::new(firebase_config, auth_config)),
    });
    router(state)
}

/// Builds the router for a prepared state. Tests inject their own state here.
pub fn router(state: Arc<DirectoryState>) -> Router {
    Router::new()
        .route("/login", post(login_handler))
        .route("/logout", get(logout_handler))
        .route("/me", get(get_me_handler).put(update_me_handler))
        .route("/contractor", get(list_contractors_handler))
        .route("/contractor/{id}", get(get_contractor_handler))
        .with_state(state)
}
