// --- File: crates/uprocket_nylas/src/logic.rs ---
//! Core logic for session issuance, booking transitions and configuration
//! management.
//!
//! These functions re-verify contractor eligibility on every call: the record
//! must exist, be looking for work, and carry the configuration the operation
//! needs. Provider responses pass through unshaped; the handlers decide how
//! much of an error to expose.

use serde_json::{json, Value};
use std::collections::BTreeMap;
use tracing::info;

use crate::client::NylasClient;
use crate::error::NylasError;
use crate::models::{BookingAction, SessionRequest, UpdateConfigRequest};
use uprocket_config::AppConfig;
use uprocket_directory::{UserRecord, UserRepository};

/// Session tokens default to a 30 minute time-to-live.
const DEFAULT_SESSION_TTL_MINUTES: i64 = 30;

/// Mint a scheduling session for one contractor and duration.
///
/// Every invocation mints a fresh token; nothing is cached or reused.
pub async fn create_session(
    config: &AppConfig,
    users: &dyn UserRepository,
    client: &NylasClient,
    request: &SessionRequest,
) -> Result<Value, NylasError> {
    if config.price_tier_for_duration(request.duration).is_none() {
        return Err(NylasError::NoMatchingDuration(request.duration));
    }

    let user = users
        .get_user(&request.contractor_id)
        .await
        .map_err(|e| NylasError::DirectoryError(e.to_string()))?
        .ok_or(NylasError::InvalidContractor)?;

    if !user.looking_for_work {
        return Err(NylasError::ContractorNotAvailable);
    }

    let config_id = user
        .config_id_for_duration(request.duration)
        .ok_or(NylasError::ProfileIncomplete(request.duration))?
        .to_string();

    let ttl = config
        .nylas
        .as_ref()
        .and_then(|n| n.session_ttl_minutes)
        .unwrap_or(DEFAULT_SESSION_TTL_MINUTES);

    info!(
        "Minting scheduling session for contractor {} ({} min)",
        request.contractor_id, request.duration
    );
    client
        .create_session_token(&user.grant_id, &config_id, ttl)
        .await
}

/// Forward a confirm/cancel transition for a pre-booking.
///
/// The provider resolves the organizer's email as the grant identifier for
/// booking transitions, so the call is keyed by the contractor's email.
pub async fn apply_booking_action(
    users: &dyn UserRepository,
    client: &NylasClient,
    contractor_id: &str,
    booking_id: &str,
    action: BookingAction,
) -> Result<Value, NylasError> {
    let user = users
        .get_user(contractor_id)
        .await
        .map_err(|e| NylasError::DirectoryError(e.to_string()))?
        .ok_or(NylasError::InvalidContractor)?;

    if !user.looking_for_work {
        return Err(NylasError::ContractorNotAvailable);
    }

    if user.scheduling_config_ids().is_empty() {
        return Err(NylasError::ProfileNotConfigured);
    }

    info!(
        "Forwarding {} for booking {} (contractor {})",
        action.as_str(),
        booking_id,
        contractor_id
    );
    client.booking_action(&user.email, booking_id, action).await
}

/// Build the provider configuration payload for one duration.
///
/// The `:duration` and `:participant_names` placeholders are expanded by the
/// provider when the event is created.
pub fn build_configuration(
    user: &UserRecord,
    request: &UpdateConfigRequest,
    duration_minutes: i64,
) -> Value {
    let title = request
        .event_title
        .clone()
        .unwrap_or_else(|| ":duration minute consultation with :participant_names".to_string());
    let description = request.event_description.clone().unwrap_or_else(|| {
        "A :duration minute initial consultation meeting with :participant_names".to_string()
    });

    json!({
        "version": "1.0.0",
        "availability": {
            "duration_minutes": duration_minutes,
            "interval_minutes": 15,
            "round_to_30_minutes": true,
            "participants": [{
                "name": user.name,
                "email": user.email,
                "calendar_ids": request.availability_calendar_ids,
                "open_hours": request.availability_open_hours,
            }],
        },
        "event_booking": {
            "title": title,
            "description": description,
            // 1 = pre-booking: events stay tentative until confirmed.
            "type": 1,
            "organizer": {
                "email": user.email,
                "calendar_id": request.booking_calendar_id,
            },
        },
    })
}

/// Create or update one scheduling configuration per supported duration and
/// persist the returned ids on the user record.
///
/// Returns the configuration data for the first duration (the 30-minute one in
/// the default setup).
pub async fn set_configuration(
    users: &dyn UserRepository,
    client: &NylasClient,
    user: UserRecord,
    request: &UpdateConfigRequest,
    durations: &[i64],
) -> Result<Value, NylasError> {
    let mut ids: BTreeMap<i64, String> = BTreeMap::new();
    let mut first_config: Option<Value> = None;

    for duration in durations {
        let payload = build_configuration(&user, request, *duration);
        let existing = user.config_id_for_duration(*duration).map(str::to_string);

        let response = match existing {
            Some(config_id) => {
                client
                    .update_configuration(&user.grant_id, &config_id, &payload)
                    .await?
            }
            None => client.create_configuration(&user.grant_id, &payload).await?,
        };

        let data = response.get("data").cloned().ok_or(NylasError::ApiError {
            status_code: 500,
            message: "Unknown error".to_string(),
        })?;
        let id = data
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        ids.insert(*duration, id);

        if first_config.is_none() {
            first_config = Some(data);
        }
    }

    let mut updated = user.clone();
    if let Some(id) = ids.get(&30) {
        updated.config_id = id.clone();
    }
    if let Some(id) = ids.get(&60) {
        updated.config_id_60 = id.clone();
    }
    users
        .save_user(&user.uid, updated)
        .await
        .map_err(|e| NylasError::DirectoryError(e.to_string()))?;

    first_config.ok_or_else(|| NylasError::ConfigError("No durations configured".to_string()))
}
