// --- File: crates/uprocket_directory/src/handlers.rs ---
//! HTTP handlers for identity and directory endpoints.
//!
//! `/login` exchanges a Firebase ID token for a session cookie and bootstraps
//! the user record on first login. `/me` serves and updates the authenticated
//! user's own record. `/contractor` exposes the normalized contractor views.
//! Authorization failures are a uniform 403 `{"message":"Unauthorized"}`.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Redirect, Response},
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, warn};

use crate::models::{Contractor, UserRecord};
use crate::repository::UserRepository;
use uprocket_config::{AppConfig, AuthConfig};
use uprocket_firebase::{
    build_session_cookie, clear_session_cookie, validate_request, DecodedIdentity, SessionAuth,
};

// Define shared state needed by directory handlers
#[derive(Clone)]
pub struct DirectoryState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserRepository>,
    pub session_auth: Arc<dyn SessionAuth>,
}

impl DirectoryState {
    fn auth_config(&self) -> AuthConfig {
        self.config.auth.clone().unwrap_or_default()
    }
}

fn message_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

fn unauthorized() -> Response {
    message_response(StatusCode::FORBIDDEN, "Unauthorized")
}

async fn authenticated_identity(
    state: &DirectoryState,
    headers: &HeaderMap,
) -> Option<DecodedIdentity> {
    let auth_config = state.auth_config();
    validate_request(headers, &auth_config.cookie_name, state.session_auth.as_ref()).await
}

/// Request body for `/login`.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "idToken", default)]
    pub id_token: Option<String>,
}

/// Handler to log a user in.
///
/// Mints a session cookie from the posted ID token, loads or bootstraps the
/// user record, and returns it with the Set-Cookie header. The body is parsed
/// manually so a missing token and a missing body get the same answer.
#[axum::debug_handler]
pub async fn login_handler(State(state): State<Arc<DirectoryState>>, body: String) -> Response {
    let id_token = serde_json::from_str::<LoginRequest>(&body)
        .ok()
        .and_then(|payload| payload.id_token);
    let Some(id_token) = id_token else {
        return message_response(StatusCode::BAD_REQUEST, "ID token is required.");
    };

    let auth_config = state.auth_config();
    let expires_in_secs = auth_config.session_expiry_days * 24 * 60 * 60;

    let session_cookie = match state
        .session_auth
        .create_session_cookie(&id_token, expires_in_secs)
        .await
    {
        Ok(cookie) => cookie,
        Err(e) => {
            warn!("Failed to mint session cookie: {}", e);
            return message_response(StatusCode::FORBIDDEN, "Unable to log you in");
        }
    };

    let identity = match state.session_auth.verify_session_cookie(&session_cookie).await {
        Ok(identity) => identity,
        Err(e) => {
            warn!("Freshly minted session cookie failed verification: {}", e);
            return message_response(StatusCode::FORBIDDEN, "Unable to log you in");
        }
    };

    let mut user_data = match state.users.get_user(&identity.uid).await {
        Ok(user) => user,
        Err(e) => {
            error!("Failed to load user record on login: {}", e);
            return message_response(StatusCode::FORBIDDEN, "Unable to log you in");
        }
    };

    if user_data.is_none() {
        let record = UserRecord::bootstrap(&identity);
        if let Err(e) = state.users.save_user(&identity.uid, record).await {
            error!("Failed to bootstrap user record: {}", e);
            return message_response(StatusCode::FORBIDDEN, "Unable to log you in");
        }
        user_data = state.users.get_user(&identity.uid).await.unwrap_or(None);
    }

    let Some(user_data) = user_data else {
        return message_response(StatusCode::FORBIDDEN, "Unable to log you in");
    };

    let set_cookie = build_session_cookie(&auth_config.cookie_name, &session_cookie, expires_in_secs);
    (
        [(header::SET_COOKIE, set_cookie)],
        Json(json!({ "message": "Success", "userData": user_data })),
    )
        .into_response()
}

/// Handler to log a user out: clears the session cookie and redirects home.
#[axum::debug_handler]
pub async fn logout_handler(State(state): State<Arc<DirectoryState>>) -> Response {
    let auth_config = state.auth_config();
    (
        [(header::SET_COOKIE, clear_session_cookie(&auth_config.cookie_name))],
        Redirect::to("/"),
    )
        .into_response()
}

/// Handler to fetch the authenticated user's own record.
#[axum::debug_handler]
pub async fn get_me_handler(
    State(state): State<Arc<DirectoryState>>,
    headers: HeaderMap,
) -> Response {
    let Some(identity) = authenticated_identity(&state, &headers).await else {
        return unauthorized();
    };

    match state.users.get_user(&identity.uid).await {
        Ok(user) => Json(user).into_response(),
        Err(e) => {
            error!("Failed to load user record: {}", e);
            message_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load user data")
        }
    }
}

/// Handler to update the authenticated user's own record.
#[axum::debug_handler]
pub async fn update_me_handler(
    State(state): State<Arc<DirectoryState>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let Some(identity) = authenticated_identity(&state, &headers).await else {
        return unauthorized();
    };

    let Ok(user_data) = serde_json::from_str::<UserRecord>(&body) else {
        return message_response(StatusCode::BAD_REQUEST, "Missing user data");
    };

    if let Err(e) = state.users.save_user(&identity.uid, user_data.clone()).await {
        error!("Failed to save user record: {}", e);
        return message_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to save user data");
    }

    Json(user_data).into_response()
}

/// Handler to list all contractors looking for work.
#[axum::debug_handler]
pub async fn list_contractors_handler(
    State(state): State<Arc<DirectoryState>>,
) -> Result<Json<Vec<Contractor>>, (StatusCode, String)> {
    state.users.list_contractors().await.map(Json).map_err(|e| {
        error!("Failed to list contractors: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to load contractors".to_string(),
        )
    })
}

/// Handler to fetch one contractor by uid.
///
/// Responds 200 with JSON `null` when the contractor is absent or not looking
/// for work.
#[axum::debug_handler]
pub async fn get_contractor_handler(
    State(state): State<Arc<DirectoryState>>,
    Path(id): Path<String>,
) -> Result<Json<Option<Contractor>>, (StatusCode, String)> {
    state
        .users
        .get_contractor_by_uid(&id)
        .await
        .map(Json)
        .map_err(|e| {
            error!("Failed to load contractor {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to load contractor".to_string(),
            )
        })
}
