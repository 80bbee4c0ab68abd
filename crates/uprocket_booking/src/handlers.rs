// --- File: crates/uprocket_booking/src/handlers.rs ---
//! HTTP driver for the booking orchestrator.
//!
//! `POST /booking/attempt` runs one orchestrator attempt against the live
//! connector. The acting identity comes from the optional session cookie; the
//! response carries the outcome discriminator the frontend branches on.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::connector::HttpSchedulerConnector;
use crate::models::{Participant, Timeslot};
use crate::orchestrator::{BookingContext, BookingOrchestrator, BookingOutcome};
use crate::store::SchedulerStore;
use uprocket_config::AppConfig;
use uprocket_firebase::{validate_request, SessionAuth};

// Define shared state needed by booking handlers
#[derive(Clone)]
pub struct BookingState {
    pub config: Arc<AppConfig>,
    pub session_auth: Arc<dyn SessionAuth>,
}

/// Request body for `/booking/attempt`.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize, Deserialize)]
pub struct BookingAttemptRequest {
    pub contractor_id: String,
    pub duration: i64,
    /// Scheduling session the timeslot was selected under.
    pub session_id: String,
    pub timeslot: Timeslot,
}

/// Response body for `/booking/attempt`.
#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BookingAttemptResponse {
    RedirectLogin { redirect: String },
    Failed { message: String },
    AwaitingCheckout { booking: Value },
}

fn message_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

/// Handler to run one booking attempt.
#[axum::debug_handler]
pub async fn booking_attempt_handler(
    State(state): State<Arc<BookingState>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    if !state.config.use_booking {
        return message_response(StatusCode::SERVICE_UNAVAILABLE, "Booking service is disabled.");
    }

    let Ok(request) = serde_json::from_str::<BookingAttemptRequest>(&body) else {
        return message_response(StatusCode::BAD_REQUEST, "Missing booking data");
    };

    let Some(nylas_config) = state.config.nylas.clone() else {
        return message_response(StatusCode::INTERNAL_SERVER_ERROR, "Nylas configuration missing");
    };

    let auth_config = state.config.auth.clone().unwrap_or_default();
    let identity =
        validate_request(&headers, &auth_config.cookie_name, state.session_auth.as_ref()).await;
    // The booking needs a full primary participant; a session without name and
    // email books nothing and goes to login like an anonymous visitor.
    let participant = identity.and_then(|identity| match (identity.name, identity.email) {
        (Some(name), Some(email)) => Some(Participant { name, email }),
        _ => None,
    });

    let attempt_id = Uuid::new_v4();
    info!(
        "Booking attempt {} for contractor {} ({} min)",
        attempt_id, request.contractor_id, request.duration
    );

    let store = Arc::new(SchedulerStore::new());
    let connector =
        HttpSchedulerConnector::new(&store, nylas_config, request.session_id.clone());
    let mut orchestrator = BookingOrchestrator::new(
        store,
        connector,
        BookingContext {
            contractor_id: request.contractor_id.clone(),
            duration_minutes: request.duration,
            identity: participant,
        },
    );
    orchestrator.select_timeslot(request.timeslot);

    let outcome = match orchestrator.confirm().await {
        BookingOutcome::RedirectToLogin { target } => {
            BookingAttemptResponse::RedirectLogin { redirect: target }
        }
        BookingOutcome::Failed { message } => BookingAttemptResponse::Failed { message },
        BookingOutcome::ProceedToCheckout { booking } => {
            BookingAttemptResponse::AwaitingCheckout { booking }
        }
    };
    Json(outcome).into_response()
}
