// --- File: crates/uprocket_directory/src/test_support.rs ---
//! In-memory doubles for the Firebase seams, shared by this crate's tests.

use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Mutex;
use uprocket_common::BoxFuture;
use uprocket_firebase::{DecodedIdentity, FirebaseError, RealtimeDb, SessionAuth};

/// In-memory [`RealtimeDb`]: a flat map of path → JSON value.
#[derive(Default)]
pub struct InMemoryDb {
    entries: Mutex<BTreeMap<String, Value>>,
}

impl InMemoryDb {
    pub fn insert_raw(&self, path: &str, value: Value) {
        self.entries.lock().unwrap().insert(path.to_string(), value);
    }

    pub fn raw_value(&self, path: &str) -> Option<Value> {
        self.entries.lock().unwrap().get(path).cloned()
    }
}

impl RealtimeDb for InMemoryDb {
    fn get(&self, path: &str) -> BoxFuture<'_, Option<Value>, FirebaseError> {
        let value = self.raw_value(path);
        Box::pin(async move { Ok(value) })
    }

    fn put(&self, path: &str, value: Value) -> BoxFuture<'_, (), FirebaseError> {
        self.insert_raw(path, value);
        Box::pin(async move { Ok(()) })
    }

    fn query_equal(
        &self,
        path: &str,
        child: &str,
        equals: Value,
    ) -> BoxFuture<'_, Option<Value>, FirebaseError> {
        let prefix = format!("{}/", path);
        let child = child.to_string();
        let matches: serde_json::Map<String, Value> = self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|(key, value)| {
                key.starts_with(&prefix) && value.get(&child) == Some(&equals)
            })
            .map(|(key, value)| (key[prefix.len()..].to_string(), value.clone()))
            .collect();
        Box::pin(async move {
            if matches.is_empty() {
                Ok(None)
            } else {
                Ok(Some(Value::Object(matches)))
            }
        })
    }
}

/// [`SessionAuth`] double: verification succeeds with a fixed identity, or
/// always fails for the anonymous variant.
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
