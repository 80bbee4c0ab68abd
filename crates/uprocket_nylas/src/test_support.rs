// --- File: crates/uprocket_nylas/src/test_support.rs ---
//! Test doubles for the directory and auth seams.

use std::collections::BTreeMap;
use std::sync::Mutex;

use uprocket_common::BoxFuture;
use uprocket_config::{AppConfig, NylasConfig, PriceTier, PricingConfig};
use uprocket_directory::{Contractor, UserRecord, UserRepository};
use uprocket_firebase::{DecodedIdentity, FirebaseError, SessionAuth};

/// In-memory [`UserRepository`].
#[derive(Default)]
pub struct StubUsers {
    records: Mutex<BTreeMap<String, UserRecord>>,
}

impl StubUsers {
    pub fn with_user(record: UserRecord) -> Self {
        let stub = Self::default();
        stub.records
            .lock()
            .unwrap()
            .insert(record.uid.clone(), record);
        stub
    }
}

impl UserRepository for StubUsers {
    fn list_contractors(&self) -> BoxFuture<'_, Vec<Contractor>, FirebaseError> {
        let contractors = self
            .records
            .lock()
            .unwrap()
            .values()
            .filter(|record| record.looking_for_work)
            .cloned()
            .map(Contractor::from)
            .collect();
        Box::pin(async move { Ok(contractors) })
    }

    fn get_contractor_by_uid(&self, uid: &str) -> BoxFuture<'_, Option<Contractor>, FirebaseError> {
        let contractor = self
            .records
            .lock()
            .unwrap()
            .get(uid)
            .filter(|record| record.looking_for_work)
            .cloned()
            .map(Contractor::from);
        Box::pin(async move { Ok(contractor) })
    }

    fn get_user(&self, uid: &str) -> BoxFuture<'_, Option<UserRecord>, FirebaseError> {
        let user = self.records.lock().unwrap().get(uid).cloned();
        Box::pin(async move { Ok(user) })
    }

    fn save_user(&self, uid: &str, record: UserRecord) -> BoxFuture<'_, (), FirebaseError> {
        self.records
            .lock()
            .unwrap()
            .insert(uid.to_string(), record);
        Box::pin(async move { Ok(()) })
    }
}

/// [`SessionAuth`] double with a fixed identity (or none).
pub struct StaticSessionAuth {
    identity: Option<DecodedIdentity>,
}

impl StaticSessionAuth {
    pub fn authed(uid: &str, name: &str, email: &str) -> Self {
        Self {
            identity: Some(DecodedIdentity {
                uid: uid.to_string(),
                name: Some(name.to_string()),
                email: Some(email.to_string()),
                picture: None,
            }),
        }
    }

    pub fn anonymous() -> Self {
        Self { identity: None }
    }
}

impl SessionAuth for StaticSessionAuth {
    fn create_session_cookie(
        &self,
        _id_token: &str,
        _valid_duration_secs: i64,
    ) -> BoxFuture<'_, String, FirebaseError> {
        let identity = self.identity.clone();
        Box::pin(async move {
            match identity {
                Some(_) => Ok("stub-session-cookie".to_string()),
                None => Err(FirebaseError::InvalidSession("stubbed failure".into())),
            }
        })
    }

    fn verify_session_cookie(&self, cookie: &str) -> BoxFuture<'_, DecodedIdentity, FirebaseError> {
        let identity = self.identity.clone();
        let cookie = cookie.to_string();
        Box::pin(async move {
            if cookie.is_empty() {
                return Err(FirebaseError::InvalidSession("empty cookie".into()));
            }
            identity.ok_or_else(|| FirebaseError::InvalidSession("no session".into()))
        })
    }
}

/// An AppConfig selling 30 and 60 minute consultations, with the provider
/// pointed at `scheduler_url`.
pub fn app_config(scheduler_url: &str) -> AppConfig {
    AppConfig {
        use_nylas: true,
        nylas: Some(NylasConfig {
            api_url: Some(scheduler_url.to_string()),
            scheduler_api_url: Some(scheduler_url.to_string()),
            session_ttl_minutes: Some(30),
        }),
        pricing: Some(PricingConfig {
            price_tiers: vec![
                PriceTier {
                    duration_minutes: 30,
                    unit_amount: 500,
                    currency: Some("USD".to_string()),
                    product_name: Some("30-minute consultation".to_string()),
                },
                PriceTier {
                    duration_minutes: 60,
                    unit_amount: 1000,
                    currency: Some("USD".to_string()),
                    product_name: Some("60-minute consultation".to_string()),
                },
            ],
            default_currency: Some("USD".to_string()),
        }),
        ..AppConfig::default()
    }
}

/// A contractor record with a grant and a 30-minute configuration.
pub fn contractor(uid: &str) -> UserRecord {
    UserRecord {
        uid: uid.to_string(),
        name: format!("Contractor {}", uid),
        email: format!("{}@example.com", uid),
        looking_for_work: true,
        grant_id: "grant-1".into(),
        config_id: "cfg-30".into(),
        ..UserRecord::default()
    }
}
