// --- File: crates/uprocket_nylas/src/handlers.rs ---
//! HTTP handlers for the Nylas endpoints.
//!
//! `/session` is unauthenticated (booking visitors may not be logged in yet);
//! the booking action and configuration endpoints require a valid session
//! cookie and answer 403 before anything reaches the provider.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, warn};

use crate::client::NylasClient;
use crate::error::NylasError;
use crate::logic::{apply_booking_action, create_session, set_configuration};
use crate::models::{BookingAction, BookingActionRequest, SessionRequest, UpdateConfigRequest};
use uprocket_config::{AppConfig, AuthConfig};
use uprocket_directory::{UserRecord, UserRepository};
use uprocket_firebase::{validate_request, SessionAuth};

// Define shared state needed by Nylas handlers
#[derive(Clone)]
pub struct NylasState {
    pub config: Arc<AppConfig>,
    pub client: Arc<NylasClient>,
    pub users: Arc<dyn UserRepository>,
    pub session_auth: Arc<dyn SessionAuth>,
}

impl NylasState {
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

fn provider_status(status_code: u16) -> StatusCode {
    StatusCode::from_u16(status_code).unwrap_or(StatusCode::BAD_GATEWAY)
}

/// The authenticated user, their record, with a grant — or a 403.
async fn grant_holder(state: &NylasState, headers: &HeaderMap) -> Result<UserRecord, Response> {
    let auth_config = state.auth_config();
    let identity = validate_request(headers, &auth_config.cookie_name, state.session_auth.as_ref())
        .await
        .ok_or_else(unauthorized)?;

    let user = state
        .users
        .get_user(&identity.uid)
        .await
        .map_err(|e| {
            error!("Failed to load user record: {}", e);
            unauthorized()
        })?
        .ok_or_else(unauthorized)?;

    if user.grant_id.is_empty() {
        return Err(unauthorized());
    }
    Ok(user)
}

/// Handler to mint a scheduling session for a contractor and duration.
#[axum::debug_handler]
pub async fn create_session_handler(
    State(state): State<Arc<NylasState>>,
    body: String,
) -> Response {
    if !state.config.use_nylas {
        return message_response(StatusCode::SERVICE_UNAVAILABLE, "Nylas service is disabled.");
    }

    if body.is_empty() {
        return message_response(StatusCode::BAD_REQUEST, "Missing session data");
    }
    let Ok(request) = serde_json::from_str::<SessionRequest>(&body) else {
        return message_response(StatusCode::BAD_REQUEST, "Invalid session data");
    };

    match create_session(&state.config, state.users.as_ref(), &state.client, &request).await {
        Ok(session) => Json(session).into_response(),
        Err(e) if e.is_client_error() => {
            message_response(StatusCode::BAD_REQUEST, &e.to_string())
        }
        Err(NylasError::ApiError {
            status_code,
            message,
        }) => (provider_status(status_code), message).into_response(),
        Err(e) => {
            error!("Session creation failed: {}", e);
            message_response(StatusCode::BAD_REQUEST, "Invalid session data")
        }
    }
}

/// Handler to confirm a pre-booking.
#[axum::debug_handler]
pub async fn confirm_booking_handler(
    State(state): State<Arc<NylasState>>,
    Path(booking_id): Path<String>,
    headers: HeaderMap,
    body: String,
) -> Response {
    booking_action_response(state, booking_id, headers, body, BookingAction::Confirm).await
}

/// Handler to cancel a pre-booking.
#[axum::debug_handler]
pub async fn cancel_booking_handler(
    State(state): State<Arc<NylasState>>,
    Path(booking_id): Path<String>,
    headers: HeaderMap,
    body: String,
) -> Response {
    booking_action_response(state, booking_id, headers, body, BookingAction::Cancel).await
}

async fn booking_action_response(
    state: Arc<NylasState>,
    booking_id: String,
    headers: HeaderMap,
    body: String,
    action: BookingAction,
) -> Response {
    if !state.config.use_nylas {
        return message_response(StatusCode::SERVICE_UNAVAILABLE, "Nylas service is disabled.");
    }

    let contractor_id = serde_json::from_str::<BookingActionRequest>(&body)
        .unwrap_or_default()
        .contractor_id;
    let Some(contractor_id) = contractor_id else {
        return message_response(StatusCode::BAD_REQUEST, "Please provide contractor id");
    };

    let auth_config = state.auth_config();
    if validate_request(&headers, &auth_config.cookie_name, state.session_auth.as_ref())
        .await
        .is_none()
    {
        return unauthorized();
    }

    match apply_booking_action(
        state.users.as_ref(),
        &state.client,
        &contractor_id,
        &booking_id,
        action,
    )
    .await
    {
        Ok(response) => Json(response).into_response(),
        Err(e) if e.is_client_error() => {
            message_response(StatusCode::BAD_REQUEST, &e.to_string())
        }
        Err(e) => {
            warn!("Booking {} failed: {}", action.as_str(), e);
            message_response(StatusCode::BAD_REQUEST, "Invalid session data")
        }
    }
}

/// Handler to fetch the authenticated contractor's scheduling configuration.
#[axum::debug_handler]
pub async fn get_config_handler(
    State(state): State<Arc<NylasState>>,
    headers: HeaderMap,
) -> Response {
    if !state.config.use_nylas {
        return message_response(StatusCode::SERVICE_UNAVAILABLE, "Nylas service is disabled.");
    }

    let user = match grant_holder(&state, &headers).await {
        Ok(user) => user,
        Err(response) => return response,
    };

    if user.config_id.is_empty() {
        return message_response(StatusCode::FORBIDDEN, "Configuration not created");
    }

    match state
        .client
        .get_configuration(&user.grant_id, &user.config_id)
        .await
    {
        Ok(body) => {
            let config = &body["data"]["data"];
            if config.is_null() {
                message_response(StatusCode::INTERNAL_SERVER_ERROR, "Unknown error")
            } else {
                Json(config.clone()).into_response()
            }
        }
        Err(NylasError::ApiError {
            status_code,
            message,
        }) => (provider_status(status_code), message).into_response(),
        Err(e) => {
            error!("Failed to fetch scheduling configuration: {}", e);
            message_response(StatusCode::INTERNAL_SERVER_ERROR, "Unknown error")
        }
    }
}

/// Handler to create or update the contractor's scheduling configurations,
/// one per supported duration.
#[axum::debug_handler]
pub async fn set_config_handler(
    State(state): State<Arc<NylasState>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    if !state.config.use_nylas {
        return message_response(StatusCode::SERVICE_UNAVAILABLE, "Nylas service is disabled.");
    }

    let user = match grant_holder(&state, &headers).await {
        Ok(user) => user,
        Err(response) => return response,
    };

    let Ok(request) = serde_json::from_str::<UpdateConfigRequest>(&body) else {
        return message_response(StatusCode::BAD_REQUEST, "Invalid request");
    };

    let durations = {
        let configured = state.config.supported_durations();
        if configured.is_empty() {
            vec![30, 60]
        } else {
            configured
        }
    };

    match set_configuration(state.users.as_ref(), &state.client, user, &request, &durations).await
    {
        Ok(config) => Json(config).into_response(),
        Err(NylasError::ApiError {
            status_code,
            message,
        }) => (provider_status(status_code), message).into_response(),
        Err(e) => {
            error!("Failed to save scheduling configuration: {}", e);
            message_response(StatusCode::BAD_REQUEST, "Invalid request")
        }
    }
}

/// Handler to list the authenticated contractor's calendars.
#[axum::debug_handler]
pub async fn list_calendars_handler(
    State(state): State<Arc<NylasState>>,
    headers: HeaderMap,
) -> Response {
    if !state.config.use_nylas {
        return message_response(StatusCode::SERVICE_UNAVAILABLE, "Nylas service is disabled.");
    }

    let user = match grant_holder(&state, &headers).await {
        Ok(user) => user,
        Err(response) => return response,
    };

    match state.client.list_calendars(&user.grant_id).await {
        Ok(body) => {
            let calendars = &body["data"];
            if calendars.is_null() {
                message_response(StatusCode::INTERNAL_SERVER_ERROR, "Unknown error")
            } else {
                Json(calendars.clone()).into_response()
            }
        }
        Err(NylasError::ApiError {
            status_code,
            message,
        }) => (provider_status(status_code), message).into_response(),
        Err(e) => {
            error!("Failed to list calendars: {}", e);
            message_response(StatusCode::INTERNAL_SERVER_ERROR, "Unknown error")
        }
    }
}
