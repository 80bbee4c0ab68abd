//! Authentication module for Firebase Admin access and session cookies
//!
//! This module covers two concerns:
//!
//! 1. Obtaining OAuth2 access tokens from a service account key file, used by
//!    the Realtime Database client and the Identity Toolkit calls.
//! 2. Minting and verifying Firebase session cookies. Login exchanges a client
//!    ID token for a long-lived session cookie via the Identity Toolkit API;
//!    every identity-dependent endpoint verifies that cookie (an RS256 JWT)
//!    against Google's published signing keys.

use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use std::{error::Error, path::Path};
use tokio::sync::RwLock;
use tracing::debug;
use uprocket_common::BoxFuture;
use uprocket_config::{AuthConfig, FirebaseConfig};
use yup_oauth2::{read_service_account_key, ServiceAccountAuthenticator};

use crate::client::FirebaseError;

/// Google's JWK endpoint for Firebase session-cookie signing keys.
const SESSION_COOKIE_JWK_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/session.firebase.google.com";

/// Identity Toolkit base URL (session cookie minting).
const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com";

/// How long fetched signing keys are reused before a refetch.
const KEY_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// Obtains an OAuth2 access token for Firebase Admin APIs
///
/// Reads the service account key file from the path in the FirebaseConfig and
/// requests a token with the given scopes.
///
/// # Errors
///
/// This function will return an error if:
/// * The key_path is missing from the FirebaseConfig
/// * The service account key file cannot be read
/// * Authentication with Google's OAuth2 service fails
/// * No token is returned from the authentication service
pub async fn get_admin_auth_token(
    config: &FirebaseConfig,
    scopes: &[&str],
) -> Result<String, Box<dyn Error + Send + Sync>> {
    let key_path = config
        .key_path
        .as_deref()
        .ok_or("Missing key_path in FirebaseConfig")?;

    let sa_key = read_service_account_key(Path::new(key_path)).await?;

    let auth = ServiceAccountAuthenticator::builder(sa_key).build().await?;

    let auth_token = auth.token(scopes).await?;
    let token = match auth_token.token() {
        Some(token) => token,
        None => {
            return Err("No token available".into());
        }
    };

    Ok(token.to_string())
}

/// The identity decoded from a verified session cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodedIdentity {
    pub uid: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub picture: Option<String>,
}

/// A trait for session-cookie operations.
///
/// The live implementation talks to the Identity Toolkit API and Google's JWK
/// endpoint; tests substitute a stub so handlers can be exercised offline.
pub trait SessionAuth: Send + Sync {
    /// Exchange a client ID token for a session cookie valid for `valid_duration_secs`.
    fn create_session_cookie(
        &self,
        id_token: &str,
        valid_duration_secs: i64,
    ) -> BoxFuture<'_, String, FirebaseError>;

    /// Verify a session cookie and return the identity it asserts.
    fn verify_session_cookie(&self, cookie: &str) -> BoxFuture<'_, DecodedIdentity, FirebaseError>;
}

// --- Live implementation ---

#[derive(Debug, Clone, Deserialize)]
struct JwkKey {
    kid: String,
    n: String,
    e: String,
}

#[derive(Debug, Clone, Deserialize)]
struct JwkSet {
    keys: Vec<JwkKey>,
}

#[derive(Debug, Deserialize)]
struct SessionClaims {
    sub: String,
    name: Option<String>,
    email: Option<String>,
    picture: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreateSessionCookieResponse {
    #[serde(rename = "sessionCookie")]
    session_cookie: String,
}

/// Live [`SessionAuth`] backed by the Identity Toolkit API and Google JWKs.
pub struct FirebaseSessionAuth {
    firebase: FirebaseConfig,
    auth: AuthConfig,
    keys: RwLock<Option<(Instant, JwkSet)>>,
}

impl FirebaseSessionAuth {
    pub fn new(firebase: FirebaseConfig, auth: AuthConfig) -> Self {
        Self {
            firebase,
            auth,
            keys: RwLock::new(None),
        }
    }

    fn project_id(&self) -> Result<&str, FirebaseError> {
        self.firebase.project_id.as_deref().ok_or_else(|| {
            FirebaseError::ConfigError("Missing project_id in FirebaseConfig".to_string())
        })
    }

    async fn signing_keys(&self) -> Result<JwkSet, FirebaseError> {
        {
            let cached = self.keys.read().await;
            if let Some((fetched_at, keys)) = cached.as_ref() {
                if fetched_at.elapsed() < KEY_CACHE_TTL {
                    return Ok(keys.clone());
                }
            }
        }

        let url = self
            .auth
            .public_keys_url
            .as_deref()
            .unwrap_or(SESSION_COOKIE_JWK_URL);
        debug!("Fetching session-cookie signing keys from {}", url);
        let response = uprocket_common::HTTP_CLIENT.get(url).send().await?;
        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(FirebaseError::ApiError(error_text));
        }
        let keys: JwkSet = response.json().await?;

        let mut cached = self.keys.write().await;
        *cached = Some((Instant::now(), keys.clone()));
        Ok(keys)
    }
}

impl SessionAuth for FirebaseSessionAuth {
    fn create_session_cookie(
        &self,
        id_token: &str,
        valid_duration_secs: i64,
    ) -> BoxFuture<'_, String, FirebaseError> {
        let id_token = id_token.to_string();
        Box::pin(async move {
            let project_id = self.project_id()?;
            let token = get_admin_auth_token(
                &self.firebase,
                &["https://www.googleapis.com/auth/identitytoolkit"],
            )
            .await
            .map_err(|e| FirebaseError::AuthError(e.to_string()))?;

            let base = self
                .auth
                .identity_toolkit_url
                .as_deref()
                .unwrap_or(IDENTITY_TOOLKIT_URL);
            let url = format!(
                "{}/v1/projects/{}:createSessionCookie",
                base.trim_end_matches('/'),
                project_id
            );

            let response = uprocket_common::HTTP_CLIENT
                .post(&url)
                .header(reqwest::header::AUTHORIZATION, format!("Bearer {}", token))
                .json(&serde_json::json!({
                    "idToken": id_token,
                    "validDuration": valid_duration_secs,
                }))
                .send()
                .await?;

            if !response.status().is_success() {
                let error_text = response.text().await?;
                return Err(FirebaseError::ApiError(error_text));
            }

            let body: CreateSessionCookieResponse = response.json().await?;
            Ok(body.session_cookie)
        })
    }

    fn verify_session_cookie(&self, cookie: &str) -> BoxFuture<'_, DecodedIdentity, FirebaseError> {
        let cookie = cookie.to_string();
        Box::pin(async move {
            let project_id = self.project_id()?.to_string();

            let header = decode_header(&cookie)
                .map_err(|e| FirebaseError::InvalidSession(e.to_string()))?;
            let kid = header
                .kid
                .ok_or_else(|| FirebaseError::InvalidSession("missing key id".to_string()))?;

            let keys = self.signing_keys().await?;
            let key = keys
                .keys
                .iter()
                .find(|k| k.kid == kid)
                .ok_or_else(|| FirebaseError::InvalidSession("unknown signing key".to_string()))?;
            let decoding_key = DecodingKey::from_rsa_components(&key.n, &key.e)
                .map_err(|e| FirebaseError::InvalidSession(e.to_string()))?;

            let mut validation = Validation::new(Algorithm::RS256);
            validation.set_audience(&[&project_id]);
            validation.set_issuer(&[format!(
                "https://session.firebase.google.com/{}",
                project_id
            )]);

            let data = decode::<SessionClaims>(&cookie, &decoding_key, &validation)
                .map_err(|e| FirebaseError::InvalidSession(e.to_string()))?;

            Ok(DecodedIdentity {
                uid: data.claims.sub,
                name: data.claims.name,
                email: data.claims.email,
                picture: data.claims.picture,
            })
        })
    }
}

// --- Cookie helpers ---

/// Extract the session cookie value from the Cookie header, if present.
pub fn session_cookie_from_headers(headers: &http::HeaderMap, cookie_name: &str) -> Option<String> {
    let raw = headers.get(http::header::COOKIE)?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == cookie_name).then(|| value.to_string())
    })
}

/// Validate the request's session cookie.
///
/// Returns `None` when the cookie is absent or fails verification; callers map
/// that to a uniform 403.
pub async fn validate_request(
    headers: &http::HeaderMap,
    cookie_name: &str,
    auth: &dyn SessionAuth,
) -> Option<DecodedIdentity> {
    let cookie = session_cookie_from_headers(headers, cookie_name)?;
    auth.verify_session_cookie(&cookie).await.ok()
}

/// Build a Set-Cookie value for a freshly minted session cookie.
pub fn build_session_cookie(name: &str, value: &str, max_age_secs: i64) -> String {
    format!(
        "{}={}; Max-Age={}; Path=/; HttpOnly; SameSite=Lax",
        name, value, max_age_secs
    )
}

/// Build a Set-Cookie value that clears the session cookie.
pub fn clear_session_cookie(name: &str) -> String {
    format!("{}=; Max-Age=0; Path=/; HttpOnly; SameSite=Lax", name)
}
