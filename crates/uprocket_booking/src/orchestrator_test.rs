// --- File: crates/uprocket_booking/src/orchestrator_test.rs ---

use chrono::{Duration, TimeZone, Utc};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

use crate::connector::{BookingAttempt, ProviderError, SchedulerConnector};
use crate::error::BookingError;
use crate::models::{Participant, Timeslot};
use crate::orchestrator::{BookingContext, BookingOrchestrator, BookingOutcome, BookingPhase};
use crate::store::{SchedulerStore, StoreSnapshot};
use uprocket_common::BoxFuture;

fn slot() -> Timeslot {
    let start_time = Utc.with_ymd_and_hms(2026, 9, 1, 9, 0, 0).unwrap();
    Timeslot {
        start_time,
        end_time: start_time + Duration::minutes(30),
    }
}

fn client_identity() -> Participant {
    Participant {
        name: "Grace".into(),
        email: "grace@example.com".into(),
    }
}

fn context(identity: Option<Participant>) -> BookingContext {
    BookingContext {
        contractor_id: "c1".into(),
        duration_minutes: 30,
        identity,
    }
}

/// Connector double that returns a canned envelope and counts invocations.
struct MockConnector {
    calls: Arc<AtomicUsize>,
    reply: BookingAttempt,
}

impl MockConnector {
    fn new(reply: BookingAttempt) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                calls: calls.clone(),
                reply,
            },
            calls,
        )
    }
}

impl SchedulerConnector for MockConnector {
    fn book_timeslot(&self, _revision: u64) -> BoxFuture<'_, BookingAttempt, BookingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.reply.clone();
        Box::pin(async move { Ok(reply) })
    }
}

fn data_reply() -> BookingAttempt {
    BookingAttempt {
        error: None,
        data: Some(json!({ "booking_id": "bk-1", "status": "pending" })),
    }
}

fn error_reply(message: &str) -> BookingAttempt {
    BookingAttempt {
        error: Some(ProviderError {
            code: Some(409),
            message: Some(message.to_string()),
        }),
        data: None,
    }
}

#[tokio::test]
async fn anonymous_confirm_redirects_to_login_and_never_books() {
    let (connector, calls) = MockConnector::new(data_reply());
    let store = Arc::new(SchedulerStore::new());
    let mut orchestrator =
        BookingOrchestrator::new(store.clone(), connector, context(None));

    orchestrator.select_timeslot(slot());
    let outcome = orchestrator.confirm().await;

    assert_eq!(
        outcome,
        BookingOutcome::RedirectToLogin {
            target: "/login?redirect=/contractor/c1".to_string()
        }
    );
    assert_eq!(orchestrator.phase(), BookingPhase::RedirectLogin);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    // The store was never written either.
    assert_eq!(store.snapshot().revision, 0);
}

#[tokio::test]
async fn provider_error_terminates_in_failed() {
    let (connector, calls) = MockConnector::new(error_reply("Slot no longer available"));
    let store = Arc::new(SchedulerStore::new());
    let mut orchestrator =
        BookingOrchestrator::new(store, connector, context(Some(client_identity())));

    orchestrator.select_timeslot(slot());
    let outcome = orchestrator.confirm().await;

    assert_eq!(
        outcome,
        BookingOutcome::Failed {
            message: "Slot no longer available".to_string()
        }
    );
    assert_eq!(orchestrator.phase(), BookingPhase::Failed);
    assert!(orchestrator.pending_booking().is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn provider_data_stores_pending_booking_and_proceeds_to_checkout_once() {
    let (connector, calls) = MockConnector::new(data_reply());
    let store = Arc::new(SchedulerStore::new());
    let mut orchestrator =
        BookingOrchestrator::new(store, connector, context(Some(client_identity())));

    orchestrator.select_timeslot(slot());
    let outcome = orchestrator.confirm().await;

    match outcome {
        BookingOutcome::ProceedToCheckout { booking } => {
            assert_eq!(booking["booking_id"], json!("bk-1"));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(orchestrator.phase(), BookingPhase::AwaitingCheckout);
    assert_eq!(
        orchestrator.pending_booking().unwrap()["booking_id"],
        json!("bk-1")
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn empty_envelope_is_an_unexpected_failure() {
    let (connector, _) = MockConnector::new(BookingAttempt::default());
    let store = Arc::new(SchedulerStore::new());
    let mut orchestrator =
        BookingOrchestrator::new(store, connector, context(Some(client_identity())));

    orchestrator.select_timeslot(slot());
    let outcome = orchestrator.confirm().await;

    assert_eq!(
        outcome,
        BookingOutcome::Failed {
            message: "Unexpected booking error".to_string()
        }
    );
}

#[tokio::test]
async fn confirm_without_selection_fails() {
    let (connector, calls) = MockConnector::new(data_reply());
    let store = Arc::new(SchedulerStore::new());
    let mut orchestrator =
        BookingOrchestrator::new(store, connector, context(Some(client_identity())));

    let outcome = orchestrator.confirm().await;
    assert_eq!(
        outcome,
        BookingOutcome::Failed {
            message: "No timeslot selected".to_string()
        }
    );
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

/// Connector double that records the snapshot it booked from.
struct SnapshotConnector {
    rx: watch::Receiver<StoreSnapshot>,
    seen: Arc<Mutex<Option<StoreSnapshot>>>,
}

impl SchedulerConnector for SnapshotConnector {
    fn book_timeslot(&self, revision: u64) -> BoxFuture<'_, BookingAttempt, BookingError> {
        Box::pin(async move {
            let mut rx = self.rx.clone();
            let snapshot = rx
                .wait_for(|snapshot| snapshot.revision >= revision)
                .await
                .map_err(|_| BookingError::StoreClosed)?
                .clone();
            *self.seen.lock().unwrap() = Some(snapshot);
            Ok(BookingAttempt {
                error: None,
                data: Some(json!({ "booking_id": "bk-observed" })),
            })
        })
    }
}

#[tokio::test]
async fn booking_call_observes_the_staged_identity_and_timeslot() {
    let store = Arc::new(SchedulerStore::new());
    let seen = Arc::new(Mutex::new(None));
    let connector = SnapshotConnector {
        rx: store.subscribe(),
        seen: seen.clone(),
    };
    let mut orchestrator =
        BookingOrchestrator::new(store, connector, context(Some(client_identity())));

    orchestrator.select_timeslot(slot());
    let outcome = orchestrator.confirm().await;
    assert!(matches!(outcome, BookingOutcome::ProceedToCheckout { .. }));

    let snapshot = seen.lock().unwrap().clone().unwrap();
    assert_eq!(snapshot.selected_timeslot, Some(slot()));
    assert_eq!(
        snapshot.booking_info.unwrap().primary_participant,
        client_identity()
    );
}
