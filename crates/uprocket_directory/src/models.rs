// --- File: crates/uprocket_directory/src/models.rs ---
//! Directory data models.
//!
//! `UserRecord` is the in-memory shape the rest of the application works with:
//! skills are a `Vec<String>`. The database stores skills as one
//! comma-delimited string; that representation exists only in
//! `StoredUserRecord` and the conversions below, so the delimiter never leaks
//! past the persistence boundary.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uprocket_firebase::DecodedIdentity;

/// A full user record, including the provider identifiers that must never be
/// exposed outside the owner's own endpoints.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct UserRecord {
    pub uid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub picture: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub looking_for_work: bool,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub success_rate: f64,
    #[serde(default)]
    pub about: String,
    /// Scheduling configuration for 30-minute consultations.
    #[serde(default)]
    pub config_id: String,
    /// Scheduling configuration for 60-minute consultations.
    #[serde(default)]
    pub config_id_60: String,
    #[serde(default)]
    pub grant_id: String,
}

impl UserRecord {
    /// A fresh record for a first login, carrying over what the identity
    /// provider knows and leaving the profile blank.
    pub fn bootstrap(identity: &DecodedIdentity) -> Self {
        Self {
            uid: identity.uid.clone(),
            name: identity.name.clone().unwrap_or_default(),
            email: identity.email.clone().unwrap_or_default(),
            picture: identity.picture.clone().unwrap_or_default(),
            ..Self::default()
        }
    }

    /// Duration (minutes) → scheduling configuration id, for every duration
    /// this contractor has completed.
    pub fn scheduling_config_ids(&self) -> BTreeMap<i64, &str> {
        [(30, self.config_id.as_str()), (60, self.config_id_60.as_str())]
            .into_iter()
            .filter(|(_, id)| !id.is_empty())
            .collect()
    }

    pub fn config_id_for_duration(&self, duration_minutes: i64) -> Option<&str> {
        self.scheduling_config_ids()
            .get(&duration_minutes)
            .copied()
    }
}

/// The persisted shape of a user record: identical to [`UserRecord`] except
/// that `skills` is a comma-delimited string.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoredUserRecord {
    pub uid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub picture: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub looking_for_work: bool,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub success_rate: f64,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub config_id: String,
    #[serde(default)]
    pub config_id_60: String,
    #[serde(default)]
    pub grant_id: String,
}

impl From<UserRecord> for StoredUserRecord {
    fn from(record: UserRecord) -> Self {
        let skills = record.skills.join(",");
        Self {
            uid: record.uid,
            name: record.name,
            email: record.email,
            title: record.title,
            picture: record.picture,
            website: record.website,
            location: record.location,
            timezone: record.timezone,
            looking_for_work: record.looking_for_work,
            skills,
            success_rate: record.success_rate,
            about: record.about,
            config_id: record.config_id,
            config_id_60: record.config_id_60,
            grant_id: record.grant_id,
        }
    }
}

impl From<StoredUserRecord> for UserRecord {
    fn from(stored: StoredUserRecord) -> Self {
        let skills = if stored.skills.is_empty() {
            Vec::new()
        } else {
            stored.skills.split(',').map(str::to_string).collect()
        };
        Self {
            uid: stored.uid,
            name: stored.name,
            email: stored.email,
            title: stored.title,
            picture: stored.picture,
            website: stored.website,
            location: stored.location,
            timezone: stored.timezone,
            looking_for_work: stored.looking_for_work,
            skills,
            success_rate: stored.success_rate,
            about: stored.about,
            config_id: stored.config_id,
            config_id_60: stored.config_id_60,
            grant_id: stored.grant_id,
        }
    }
}

/// A contractor as exposed to clients: a [`UserRecord`] with the grant and
/// configuration identifiers removed.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Contractor {
    pub uid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub picture: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub looking_for_work: bool,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub success_rate: f64,
    #[serde(default)]
    pub about: String,
}

impl From<UserRecord> for Contractor {
    fn from(record: UserRecord) -> Self {
        Self {
            uid: record.uid,
            name: record.name,
            email: record.email,
            title: record.title,
            picture: record.picture,
            website: record.website,
            location: record.location,
            timezone: record.timezone,
            looking_for_work: record.looking_for_work,
            skills: record.skills,
            success_rate: record.success_rate,
            about: record.about,
        }
    }
}
