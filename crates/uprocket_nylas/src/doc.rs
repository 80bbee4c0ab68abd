// --- File: crates/uprocket_nylas/src/doc.rs ---
#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::models::{BookingActionRequest, OpenHours, SessionRequest, UpdateConfigRequest};

#[utoipa::path(
    post,
    path = "/session", // Path relative to /api
    request_body = SessionRequest,
    responses(
        (status = 200, description = "Session token minted, provider response passed through"),
        (status = 400, description = "Invalid contractor, ineligible contractor, or incomplete profile for the requested duration")
    ),
    tag = "Nylas"
)]
fn doc_create_session_handler() {}

#[utoipa::path(
    post,
    path = "/booking/{booking_id}/confirm",
    params(("booking_id" = String, Path, description = "Provider booking id")),
    request_body = BookingActionRequest,
    responses(
        (status = 200, description = "Provider response passed through"),
        (status = 400, description = "Missing contractor id or upstream failure"),
        (status = 403, description = "Missing or invalid session cookie")
    ),
    tag = "Nylas"
)]
fn doc_confirm_booking_handler() {}

#[utoipa::path(
    post,
    path = "/booking/{booking_id}/cancel",
    params(("booking_id" = String, Path, description = "Provider booking id")),
    request_body = BookingActionRequest,
    responses(
        (status = 200, description = "Provider response passed through"),
        (status = 400, description = "Missing contractor id or upstream failure"),
        (status = 403, description = "Missing or invalid session cookie")
    ),
    tag = "Nylas"
)]
fn doc_cancel_booking_handler() {}

#[utoipa::path(
    get,
    path = "/config",
    responses(
        (status = 200, description = "The 30-minute scheduling configuration"),
        (status = 403, description = "Unauthenticated, no grant, or configuration not created")
    ),
    tag = "Nylas"
)]
fn doc_get_config_handler() {}

#[utoipa::path(
    put,
    path = "/config",
    request_body = UpdateConfigRequest,
    responses(
        (status = 200, description = "Configurations created/updated for every supported duration"),
        (status = 400, description = "Invalid request body"),
        (status = 403, description = "Unauthenticated or no grant")
    ),
    tag = "Nylas"
)]
fn doc_set_config_handler() {}

#[utoipa::path(
    get,
    path = "/calendars",
    responses(
        (status = 200, description = "Calendars visible to the contractor's grant"),
        (status = 403, description = "Unauthenticated or no grant")
    ),
    tag = "Nylas"
)]
fn doc_list_calendars_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_create_session_handler,
        doc_confirm_booking_handler,
        doc_cancel_booking_handler,
        doc_get_config_handler,
        doc_set_config_handler,
        doc_list_calendars_handler
    ),
    components(schemas(SessionRequest, BookingActionRequest, UpdateConfigRequest, OpenHours)),
    tags((name = "Nylas", description = "Nylas Scheduler integration"))
)]
pub struct NylasApiDoc;
