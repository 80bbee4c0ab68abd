// --- File: crates/uprocket_booking/src/doc.rs ---
#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::handlers::BookingAttemptRequest;
use crate::models::{BookingInfo, Participant, Timeslot};

#[utoipa::path(
    post,
    path = "/booking/attempt", // Path relative to /api
    request_body = BookingAttemptRequest,
    responses(
        (status = 200, description = "Attempt outcome: redirect_login, failed, or awaiting_checkout with the pending booking"),
        (status = 400, description = "Missing booking data"),
        (status = 503, description = "Booking service disabled")
    ),
    tag = "Booking"
)]
fn doc_booking_attempt_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(doc_booking_attempt_handler),
    components(schemas(BookingAttemptRequest, Timeslot, Participant, BookingInfo)),
    tags((name = "Booking", description = "Booking orchestration"))
)]
pub struct BookingApiDoc;
