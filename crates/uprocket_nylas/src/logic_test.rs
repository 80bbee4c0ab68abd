// --- File: crates/uprocket_nylas/src/logic_test.rs ---

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::client::NylasClient;
use crate::error::NylasError;
use crate::logic::{apply_booking_action, build_configuration, create_session, set_configuration};
use crate::models::{BookingAction, SessionRequest, UpdateConfigRequest};
use crate::test_support::{app_config, contractor, StubUsers};
use uprocket_config::NylasConfig;
use uprocket_directory::UserRepository;

fn offline_client() -> NylasClient {
    // Base URLs unset: any test reaching the network fails loudly.
    NylasClient::new(NylasConfig::default(), "test-key".to_string())
}

fn session_request(contractor_id: &str, duration: i64) -> SessionRequest {
    SessionRequest {
        contractor_id: contractor_id.to_string(),
        duration,
    }
}

#[tokio::test]
async fn session_rejects_unknown_contractor() {
    let config = app_config("http://unused");
    let users = StubUsers::default();

    let err = create_session(&config, &users, &offline_client(), &session_request("ghost", 30))
        .await
        .unwrap_err();
    assert!(matches!(err, NylasError::InvalidContractor));
    assert_eq!(err.to_string(), "Invalid contractor id");
}

#[tokio::test]
async fn session_rejects_contractor_not_looking_for_work() {
    let config = app_config("http://unused");
    let mut record = contractor("c1");
    record.looking_for_work = false;
    let users = StubUsers::with_user(record);

    let err = create_session(&config, &users, &offline_client(), &session_request("c1", 30))
        .await
        .unwrap_err();
    assert!(matches!(err, NylasError::ContractorNotAvailable));
}

#[tokio::test]
async fn session_requires_duration_specific_configuration() {
    let config = app_config("http://unused");
    // 60-minute configuration present, 30-minute missing: the 30-minute
    // request must still fail with the 30-minute message.
    let mut record = contractor("c1");
    record.config_id = String::new();
    record.config_id_60 = "cfg-60".into();
    let users = StubUsers::with_user(record);

    let err = create_session(&config, &users, &offline_client(), &session_request("c1", 30))
        .await
        .unwrap_err();
    assert!(matches!(err, NylasError::ProfileIncomplete(30)));
    assert_eq!(
        err.to_string(),
        "Contractor has not completed their profile for 30 minutes"
    );
}

#[tokio::test]
async fn session_rejects_unsold_durations() {
    let config = app_config("http://unused");
    let users = StubUsers::with_user(contractor("c1"));

    let err = create_session(&config, &users, &offline_client(), &session_request("c1", 45))
        .await
        .unwrap_err();
    assert!(matches!(err, NylasError::NoMatchingDuration(45)));
}

#[tokio::test]
async fn session_mints_token_against_grant_scoped_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v3/grants/grant-1/scheduling/session_token"))
        .and(body_json(json!({ "time_to_live": 30, "config_id": "cfg-30" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "session_id": "sess-1" } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = app_config(&server.uri());
    let users = StubUsers::with_user(contractor("c1"));
    let client = NylasClient::new(config.nylas.clone().unwrap(), "test-key".to_string());

    let session = create_session(&config, &users, &client, &session_request("c1", 30))
        .await
        .unwrap();
    assert_eq!(session["data"]["session_id"], json!("sess-1"));
}

#[tokio::test]
async fn each_session_call_mints_a_fresh_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v3/grants/grant-1/scheduling/session_token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "session_id": "sess" } })),
        )
        .expect(2)
        .mount(&server)
        .await;

    let config = app_config(&server.uri());
    let users = StubUsers::with_user(contractor("c1"));
    let client = NylasClient::new(config.nylas.clone().unwrap(), "test-key".to_string());

    for _ in 0..2 {
        create_session(&config, &users, &client, &session_request("c1", 30))
            .await
            .unwrap();
    }
    server.verify().await;
}

#[tokio::test]
async fn session_propagates_provider_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v3/grants/grant-1/scheduling/session_token"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "no grant" })))
        .mount(&server)
        .await;

    let config = app_config(&server.uri());
    let users = StubUsers::with_user(contractor("c1"));
    let client = NylasClient::new(config.nylas.clone().unwrap(), "test-key".to_string());

    let err = create_session(&config, &users, &client, &session_request("c1", 30))
        .await
        .unwrap_err();
    match err {
        NylasError::ApiError {
            status_code,
            message,
        } => {
            assert_eq!(status_code, 404);
            assert!(message.contains("no grant"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn cancel_is_keyed_by_booking_id() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v3/grants/c1@example.com/scheduling/bookings/bk-7"))
        .and(body_json(json!({ "action": "cancel" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "booking_id": "bk-7", "status": "cancelled" } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = app_config(&server.uri());
    let users = StubUsers::with_user(contractor("c1"));
    let client = NylasClient::new(config.nylas.clone().unwrap(), "test-key".to_string());

    let response = apply_booking_action(&users, &client, "c1", "bk-7", BookingAction::Cancel)
        .await
        .unwrap();
    assert_eq!(response["data"]["status"], json!("cancelled"));
}

#[tokio::test]
async fn booking_action_requires_a_configured_profile() {
    let mut record = contractor("c1");
    record.config_id = String::new();
    record.config_id_60 = String::new();
    let users = StubUsers::with_user(record);

    let err = apply_booking_action(&users, &offline_client(), "c1", "bk-1", BookingAction::Confirm)
        .await
        .unwrap_err();
    assert!(matches!(err, NylasError::ProfileNotConfigured));
}

fn update_request() -> UpdateConfigRequest {
    serde_json::from_value(json!({
        "availability_calendar_ids": ["cal-a"],
        "availability_open_hours": [
            { "days": [1, 2, 3, 4, 5], "start": "09:00", "end": "17:00", "timezone": "UTC" }
        ],
        "booking_calendar_id": "cal-a"
    }))
    .unwrap()
}

#[test]
fn configuration_template_expands_per_duration() {
    let user = contractor("c1");
    let request = update_request();

    let config = build_configuration(&user, &request, 60);
    assert_eq!(config["availability"]["duration_minutes"], json!(60));
    assert_eq!(config["availability"]["interval_minutes"], json!(15));
    assert_eq!(config["event_booking"]["type"], json!(1));
    assert_eq!(
        config["event_booking"]["organizer"]["email"],
        json!("c1@example.com")
    );
    assert_eq!(
        config["availability"]["participants"][0]["calendar_ids"],
        json!(["cal-a"])
    );
}

#[tokio::test]
async fn set_configuration_creates_one_config_per_duration_and_persists_ids() {
    let server = MockServer::start().await;
    // No existing 60-minute config: expect one update (30) and one create (60).
    Mock::given(method("PUT"))
        .and(path("/v3/grants/grant-1/scheduling/configuration/cfg-30"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "id": "cfg-30" } })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v3/grants/grant-1/scheduling/configuration"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "id": "cfg-60-new" } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = app_config(&server.uri());
    let users = StubUsers::with_user(contractor("c1"));
    let client = NylasClient::new(config.nylas.clone().unwrap(), "test-key".to_string());
    let user = users.get_user("c1").await.unwrap().unwrap();

    let first = set_configuration(&users, &client, user, &update_request(), &[30, 60])
        .await
        .unwrap();
    assert_eq!(first["id"], json!("cfg-30"));

    let saved = users.get_user("c1").await.unwrap().unwrap();
    assert_eq!(saved.config_id, "cfg-30");
    assert_eq!(saved.config_id_60, "cfg-60-new");
}
