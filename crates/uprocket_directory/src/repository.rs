// --- File: crates/uprocket_directory/src/repository.rs ---
//! User repository over the Realtime Database seam.
//!
//! All reads and writes go through [`UserRepository`]; the live implementation
//! maps `StoredUserRecord` (skills as a delimited string) to and from the
//! database JSON. Database errors propagate to the caller uncaught — there is
//! no retry or fallback at this layer.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::models::{Contractor, StoredUserRecord, UserRecord};
use uprocket_common::BoxFuture;
use uprocket_firebase::{FirebaseError, RealtimeDb};

/// Database location of the user collection.
const USERS_PATH: &str = "uprocket/user";

/// A trait for directory persistence operations.
pub trait UserRepository: Send + Sync {
    /// All contractors currently looking for work, normalized for external
    /// exposure.
    fn list_contractors(&self) -> BoxFuture<'_, Vec<Contractor>, FirebaseError>;

    /// One contractor, or `None` when the record is absent or the
    /// looking-for-work flag is unset.
    fn get_contractor_by_uid(&self, uid: &str) -> BoxFuture<'_, Option<Contractor>, FirebaseError>;

    /// The full record, provider identifiers included.
    fn get_user(&self, uid: &str) -> BoxFuture<'_, Option<UserRecord>, FirebaseError>;

    /// Write the full record keyed by uid. Last writer wins.
    fn save_user(&self, uid: &str, record: UserRecord) -> BoxFuture<'_, (), FirebaseError>;
}

/// Live [`UserRepository`] backed by the Firebase Realtime Database.
pub struct FirebaseUserRepository {
    db: Arc<dyn RealtimeDb>,
}

impl FirebaseUserRepository {
    pub fn new(db: Arc<dyn RealtimeDb>) -> Self {
        Self { db }
    }

    fn user_path(uid: &str) -> String {
        format!("{}/{}", USERS_PATH, uid)
    }
}

impl UserRepository for FirebaseUserRepository {
    fn list_contractors(&self) -> BoxFuture<'_, Vec<Contractor>, FirebaseError> {
        Box::pin(async move {
            let value = self
                .db
                .query_equal(USERS_PATH, "looking_for_work", serde_json::json!(true))
                .await?;

            let Some(value) = value else {
                return Ok(Vec::new());
            };

            let users: BTreeMap<String, StoredUserRecord> = serde_json::from_value(value)?;
            Ok(users
                .into_values()
                .map(UserRecord::from)
                .filter(|record| record.looking_for_work)
                .map(Contractor::from)
                .collect())
        })
    }

    fn get_contractor_by_uid(&self, uid: &str) -> BoxFuture<'_, Option<Contractor>, FirebaseError> {
        let path = Self::user_path(uid);
        Box::pin(async move {
            let Some(value) = self.db.get(&path).await? else {
                return Ok(None);
            };
            let stored: StoredUserRecord = serde_json::from_value(value)?;
            let record = UserRecord::from(stored);
            if !record.looking_for_work {
                return Ok(None);
            }
            Ok(Some(Contractor::from(record)))
        })
    }

    fn get_user(&self, uid: &str) -> BoxFuture<'_, Option<UserRecord>, FirebaseError> {
        let path = Self::user_path(uid);
        Box::pin(async move {
            let Some(value) = self.db.get(&path).await? else {
                return Ok(None);
            };
            let stored: StoredUserRecord = serde_json::from_value(value)?;
            Ok(Some(UserRecord::from(stored)))
        })
    }

    fn save_user(&self, uid: &str, record: UserRecord) -> BoxFuture<'_, (), FirebaseError> {
        let path = Self::user_path(uid);
        Box::pin(async move {
            let stored = StoredUserRecord::from(record);
            let value = serde_json::to_value(stored)?;
            self.db.put(&path, value).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::InMemoryDb;
    use serde_json::json;

    fn repo() -> (Arc<InMemoryDb>, FirebaseUserRepository) {
        let db = Arc::new(InMemoryDb::default());
        let repo = FirebaseUserRepository::new(db.clone());
        (db, repo)
    }

    fn contractor_record(uid: &str, looking: bool) -> UserRecord {
        UserRecord {
            uid: uid.to_string(),
            name: format!("Name {}", uid),
            email: format!("{}@example.com", uid),
            looking_for_work: looking,
            skills: vec!["rust".into(), "sql".into()],
            grant_id: "grant-1".into(),
            config_id: "cfg-30".into(),
            ..UserRecord::default()
        }
    }

    #[tokio::test]
    async fn skills_round_trip_through_storage() {
        let (db, repo) = repo();
        repo.save_user("u1", contractor_record("u1", true))
            .await
            .unwrap();

        // The persisted value carries the delimited string, not a list.
        let raw = db.raw_value("uprocket/user/u1").unwrap();
        assert_eq!(raw["skills"], json!("rust,sql"));

        let loaded = repo.get_user("u1").await.unwrap().unwrap();
        assert_eq!(loaded.skills, vec!["rust".to_string(), "sql".to_string()]);
    }

    #[tokio::test]
    async fn absent_skills_load_as_empty_list() {
        let (db, repo) = repo();
        db.insert_raw(
            "uprocket/user/u2",
            json!({ "uid": "u2", "looking_for_work": true }),
        );
        let loaded = repo.get_user("u2").await.unwrap().unwrap();
        assert!(loaded.skills.is_empty());
    }

    #[tokio::test]
    async fn list_contractors_excludes_flag_unset() {
        let (_, repo) = repo();
        repo.save_user("open", contractor_record("open", true))
            .await
            .unwrap();
        repo.save_user("closed", contractor_record("closed", false))
            .await
            .unwrap();

        let contractors = repo.list_contractors().await.unwrap();
        assert_eq!(contractors.len(), 1);
        assert_eq!(contractors[0].uid, "open");
    }

    #[tokio::test]
    async fn get_contractor_excludes_flag_unset_and_missing() {
        let (_, repo) = repo();
        repo.save_user("closed", contractor_record("closed", false))
            .await
            .unwrap();

        assert!(repo.get_contractor_by_uid("closed").await.unwrap().is_none());
        assert!(repo.get_contractor_by_uid("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn listed_contractors_are_stripped_of_provider_ids() {
        let (_, repo) = repo();
        repo.save_user("open", contractor_record("open", true))
            .await
            .unwrap();

        let contractors = repo.list_contractors().await.unwrap();
        let json = serde_json::to_value(&contractors[0]).unwrap();
        let object = json.as_object().unwrap();
        assert!(!object.contains_key("grant_id"));
        assert!(!object.contains_key("config_id"));
        assert!(!object.contains_key("config_id_60"));
    }

    #[tokio::test]
    async fn get_user_keeps_provider_ids() {
        let (_, repo) = repo();
        repo.save_user("u1", contractor_record("u1", true))
            .await
            .unwrap();
        let user = repo.get_user("u1").await.unwrap().unwrap();
        assert_eq!(user.grant_id, "grant-1");
        assert_eq!(user.config_id, "cfg-30");
    }

    #[tokio::test]
    async fn save_is_last_writer_wins() {
        let (_, repo) = repo();
        repo.save_user("u1", contractor_record("u1", true))
            .await
            .unwrap();
        let mut update = contractor_record("u1", true);
        update.title = "Principal Engineer".into();
        update.skills = vec!["go".into()];
        repo.save_user("u1", update).await.unwrap();

        let user = repo.get_user("u1").await.unwrap().unwrap();
        assert_eq!(user.title, "Principal Engineer");
        assert_eq!(user.skills, vec!["go".to_string()]);
    }
}
