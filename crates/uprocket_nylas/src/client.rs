// --- File: crates/uprocket_nylas/src/client.rs ---
//! Client for the Nylas Scheduler and core APIs.
//!
//! All calls are bearer-token authenticated with the API key from
//! `NYLAS_API_KEY`. Responses are returned as raw JSON values because most
//! endpoints here are passthroughs; non-2xx responses surface as
//! [`NylasError::ApiError`] carrying the provider's status and body.

use reqwest::{Client, RequestBuilder};
use serde_json::{json, Value};

use crate::error::NylasError;
use crate::models::BookingAction;
use uprocket_config::NylasConfig;

pub struct NylasClient {
    client: Client,
    config: NylasConfig,
    api_key: String,
}

impl NylasClient {
    pub fn new(config: NylasConfig, api_key: String) -> Self {
        Self {
            client: uprocket_common::HTTP_CLIENT.clone(),
            config,
            api_key,
        }
    }

    /// Creates a client with the API key from the `NYLAS_API_KEY` env var.
    pub fn from_env(config: NylasConfig) -> Result<Self, NylasError> {
        let api_key = std::env::var("NYLAS_API_KEY").map_err(|_| NylasError::MissingApiKey)?;
        Ok(Self::new(config, api_key))
    }

    fn scheduler_base(&self) -> Result<&str, NylasError> {
        self.config
            .scheduler_api_url
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
            .ok_or_else(|| {
                NylasError::ConfigError("Missing scheduler_api_url in NylasConfig".to_string())
            })
    }

    fn api_base(&self) -> Result<&str, NylasError> {
        self.config
            .api_url
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
            .ok_or_else(|| NylasError::ConfigError("Missing api_url in NylasConfig".to_string()))
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<Value, NylasError> {
        let response = builder.bearer_auth(&self.api_key).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(NylasError::ApiError {
                status_code: status.as_u16(),
                message: body,
            });
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Mint a session token scoped to one scheduling configuration.
    pub async fn create_session_token(
        &self,
        grant_id: &str,
        config_id: &str,
        ttl_minutes: i64,
    ) -> Result<Value, NylasError> {
        let url = format!(
            "{}/v3/grants/{}/scheduling/session_token",
            self.scheduler_base()?,
            grant_id
        );
        self.execute(self.client.post(&url).json(&json!({
            "time_to_live": ttl_minutes,
            "config_id": config_id,
        })))
        .await
    }

    /// Apply a confirm/cancel transition to a pre-booking.
    pub async fn booking_action(
        &self,
        grant: &str,
        booking_id: &str,
        action: BookingAction,
    ) -> Result<Value, NylasError> {
        let url = format!(
            "{}/v3/grants/{}/scheduling/bookings/{}",
            self.scheduler_base()?,
            grant,
            booking_id
        );
        self.execute(self.client.put(&url).json(&json!({
            "action": action.as_str(),
        })))
        .await
    }

    /// Fetch one scheduling configuration.
    pub async fn get_configuration(
        &self,
        grant_id: &str,
        config_id: &str,
    ) -> Result<Value, NylasError> {
        let url = format!(
            "{}/v3/grants/{}/scheduling/configuration/{}",
            self.scheduler_base()?,
            grant_id,
            config_id
        );
        self.execute(self.client.get(&url)).await
    }

    /// Create a scheduling configuration.
    pub async fn create_configuration(
        &self,
        grant_id: &str,
        configuration: &Value,
    ) -> Result<Value, NylasError> {
        let url = format!(
            "{}/v3/grants/{}/scheduling/configuration",
            self.scheduler_base()?,
            grant_id
        );
        self.execute(
            self.client
                .post(&url)
                .json(&json!({ "data": configuration })),
        )
        .await
    }

    /// Update an existing scheduling configuration.
    pub async fn update_configuration(
        &self,
        grant_id: &str,
        config_id: &str,
        configuration: &Value,
    ) -> Result<Value, NylasError> {
        let url = format!(
            "{}/v3/grants/{}/scheduling/configuration/{}",
            self.scheduler_base()?,
            grant_id,
            config_id
        );
        self.execute(
            self.client
                .put(&url)
                .json(&json!({ "data": configuration })),
        )
        .await
    }

    /// List the calendars the grant can see.
    pub async fn list_calendars(&self, grant_id: &str) -> Result<Value, NylasError> {
        let url = format!("{}/v3/grants/{}/calendars", self.api_base()?, grant_id);
        self.execute(self.client.get(&url)).await
    }
}
