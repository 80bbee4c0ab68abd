// --- File: crates/uprocket_directory/src/doc.rs ---
#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::handlers::LoginRequest;
use crate::models::{Contractor, UserRecord};

#[utoipa::path(
    post,
    path = "/login", // Path relative to /api
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session cookie set, user record returned"),
        (status = 400, description = "ID token missing"),
        (status = 403, description = "Unable to log the user in")
    ),
    tag = "Directory"
)]
fn doc_login_handler() {}

#[utoipa::path(
    get,
    path = "/logout",
    responses((status = 303, description = "Session cookie cleared, redirect to /")),
    tag = "Directory"
)]
fn doc_logout_handler() {}

#[utoipa::path(
    get,
    path = "/me",
    responses(
        (status = 200, description = "The authenticated user's record", body = UserRecord),
        (status = 403, description = "Missing or invalid session cookie")
    ),
    tag = "Directory"
)]
fn doc_get_me_handler() {}

#[utoipa::path(
    put,
    path = "/me",
    request_body = UserRecord,
    responses(
        (status = 200, description = "Record saved and echoed back", body = UserRecord),
        (status = 400, description = "Missing user data"),
        (status = 403, description = "Missing or invalid session cookie")
    ),
    tag = "Directory"
)]
fn doc_update_me_handler() {}

#[utoipa::path(
    get,
    path = "/contractor",
    responses(
        (status = 200, description = "All contractors looking for work", body = [Contractor])
    ),
    tag = "Directory"
)]
fn doc_list_contractors_handler() {}

#[utoipa::path(
    get,
    path = "/contractor/{id}",
    params(("id" = String, Path, description = "Contractor uid")),
    responses(
        (status = 200, description = "The contractor, or null when absent or not looking for work", body = Contractor)
    ),
    tag = "Directory"
)]
fn doc_get_contractor_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_login_handler,
        doc_logout_handler,
        doc_get_me_handler,
        doc_update_me_handler,
        doc_list_contractors_handler,
        doc_get_contractor_handler
    ),
    components(schemas(UserRecord, Contractor, LoginRequest)),
    tags((name = "Directory", description = "User and contractor directory"))
)]
pub struct DirectoryApiDoc;
