//! Realtime Database client module
//!
//! This module provides a client for the Firebase Realtime Database REST API.
//! Access goes through the [`RealtimeDb`] trait so repositories can be tested
//! against an in-memory implementation; [`FirebaseRealtimeDb`] is the live
//! implementation, authenticating with a service-account OAuth token.

use crate::auth::get_admin_auth_token;
use reqwest::{header, Client};
use serde_json::Value;
use thiserror::Error;
use uprocket_common::{external_service_error, BoxFuture, HttpStatusCode, UprocketError};
use uprocket_config::FirebaseConfig;

/// Errors that can occur when interacting with Firebase services
#[derive(Error, Debug)]
pub enum FirebaseError {
    /// Error during authentication with Google
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error during HTTP request to a Firebase API
    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Missing required configuration
    #[error("Missing configuration: {0}")]
    ConfigError(String),

    /// Error returned by a Firebase API
    #[error("Firebase API error: {0}")]
    ApiError(String),

    /// Error parsing a Firebase API response
    #[error("Failed to parse Firebase response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Session cookie missing, expired or failed verification
    #[error("Invalid session: {0}")]
    InvalidSession(String),
}

impl From<FirebaseError> for UprocketError {
    fn from(err: FirebaseError) -> Self {
        match err {
            FirebaseError::AuthError(msg) => UprocketError::AuthError(msg),
            FirebaseError::RequestError(e) => UprocketError::HttpError(e.to_string()),
            FirebaseError::ConfigError(msg) => UprocketError::ConfigError(msg),
            FirebaseError::ApiError(msg) => external_service_error("Firebase", msg),
            FirebaseError::ParseError(e) => UprocketError::ParseError(e.to_string()),
            FirebaseError::InvalidSession(msg) => UprocketError::AuthError(msg),
        }
    }
}

impl HttpStatusCode for FirebaseError {
    fn status_code(&self) -> u16 {
        match self {
            FirebaseError::AuthError(_) => 403,
            FirebaseError::RequestError(_) => 500,
            FirebaseError::ConfigError(_) => 500,
            FirebaseError::ApiError(_) => 502,
            FirebaseError::ParseError(_) => 500,
            FirebaseError::InvalidSession(_) => 403,
        }
    }
}

/// A trait for Realtime Database operations.
///
/// Paths are relative to the database root, without the `.json` suffix
/// (e.g. `uprocket/user/abc123`). `get` returns `None` where the database
/// holds `null`.
pub trait RealtimeDb: Send + Sync {
    /// Read the value at `path`.
    fn get(&self, path: &str) -> BoxFuture<'_, Option<Value>, FirebaseError>;

    /// Write `value` at `path`, replacing whatever was there.
    fn put(&self, path: &str, value: Value) -> BoxFuture<'_, (), FirebaseError>;

    /// Shallow query: children of `path` whose `child` key equals `equals`.
    fn query_equal(
        &self,
        path: &str,
        child: &str,
        equals: Value,
    ) -> BoxFuture<'_, Option<Value>, FirebaseError>;
}

/// Client for the Firebase Realtime Database REST API
pub struct FirebaseRealtimeDb {
    /// HTTP client for making requests to the database
    client: Client,

    /// Configuration for Firebase, including database URL and service account key path
    config: FirebaseConfig,
}

impl FirebaseRealtimeDb {
    /// Creates a new Realtime Database client with the given configuration
    pub fn new(config: FirebaseConfig) -> Self {
        Self {
            client: uprocket_common::HTTP_CLIENT.clone(),
            config,
        }
    }

    fn url(&self, path: &str) -> Result<String, FirebaseError> {
        let base = self.config.database_url.as_deref().ok_or_else(|| {
            FirebaseError::ConfigError("Missing database_url in FirebaseConfig".to_string())
        })?;
        Ok(format!("{}/{}.json", base.trim_end_matches('/'), path))
    }

    async fn access_token(&self) -> Result<String, FirebaseError> {
        get_admin_auth_token(
            &self.config,
            &[
                "https://www.googleapis.com/auth/userinfo.email",
                "https://www.googleapis.com/auth/firebase.database",
            ],
        )
        .await
        .map_err(|e| FirebaseError::AuthError(e.to_string()))
    }

    async fn parse_value(response: reqwest::Response) -> Result<Option<Value>, FirebaseError> {
        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(FirebaseError::ApiError(error_text));
        }
        let value: Value = response.json().await?;
        if value.is_null() {
            Ok(None)
        } else {
            Ok(Some(value))
        }
    }
}

impl RealtimeDb for FirebaseRealtimeDb {
    fn get(&self, path: &str) -> BoxFuture<'_, Option<Value>, FirebaseError> {
        let path = path.to_string();
        Box::pin(async move {
            let url = self.url(&path)?;
            let token = self.access_token().await?;
            let response = self
                .client
                .get(&url)
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .send()
                .await?;
            Self::parse_value(response).await
        })
    }

    fn put(&self, path: &str, value: Value) -> BoxFuture<'_, (), FirebaseError> {
        let path = path.to_string();
        Box::pin(async move {
            let url = self.url(&path)?;
            let token = self.access_token().await?;
            let response = self
                .client
                .put(&url)
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .json(&value)
                .send()
                .await?;
            if !response.status().is_success() {
                let error_text = response.text().await?;
                return Err(FirebaseError::ApiError(error_text));
            }
            Ok(())
        })
    }

    fn query_equal(
        &self,
        path: &str,
        child: &str,
        equals: Value,
    ) -> BoxFuture<'_, Option<Value>, FirebaseError> {
        let path = path.to_string();
        // The REST API wants the orderBy argument as a JSON string literal.
        let order_by = format!("\"{}\"", child);
        let equal_to = equals.to_string();
        Box::pin(async move {
            let url = self.url(&path)?;
            let token = self.access_token().await?;
            let response = self
                .client
                .get(&url)
                .query(&[("orderBy", order_by.as_str()), ("equalTo", equal_to.as_str())])
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .send()
                .await?;
            Self::parse_value(response).await
        })
    }
}
