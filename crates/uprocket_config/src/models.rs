// --- File: crates/uprocket_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

// --- Firebase Config ---
// Holds non-secret Firebase config. The service account key is read from key_path.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct FirebaseConfig {
    pub project_id: Option<String>,
    pub key_path: Option<String>,
    // Realtime Database root, e.g. https://uprocket-default-rtdb.firebaseio.com
    pub database_url: Option<String>,
}

// --- Auth / Session Cookie Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default = "default_session_expiry_days")]
    pub session_expiry_days: i64,
    /// Override for Google's session-cookie JWK endpoint (tests point this at a mock).
    pub public_keys_url: Option<String>,
    /// Override for the Identity Toolkit base URL (tests point this at a mock).
    pub identity_toolkit_url: Option<String>,
}

fn default_cookie_name() -> String {
    "uprocket_session".to_string()
}

fn default_session_expiry_days() -> i64 {
    5
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            session_expiry_days: default_session_expiry_days(),
            public_keys_url: None,
            identity_toolkit_url: None,
        }
    }
}

// --- Nylas Scheduler Config ---
// Holds non-secret Nylas config. API key loaded directly from env var: NYLAS_API_KEY
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct NylasConfig {
    /// Base URL for the core API (grants, calendars), e.g. https://api.us.nylas.com
    pub api_url: Option<String>,
    /// Base URL for the Scheduler API (configurations, sessions, bookings).
    pub scheduler_api_url: Option<String>,
    /// Time-to-live for scheduling session tokens, in minutes.
    pub session_ttl_minutes: Option<i64>,
}

// --- Pricing ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PriceTier {
    pub duration_minutes: i64,
    /// Price in the smallest currency unit (cents).
    pub unit_amount: i64,
    pub currency: Option<String>,
    pub product_name: Option<String>,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct PricingConfig {
    #[serde(default)]
    pub price_tiers: Vec<PriceTier>,
    pub default_currency: Option<String>,
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_nylas: bool,
    #[serde(default)]
    pub use_booking: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub firebase: Option<FirebaseConfig>,
    #[serde(default)]
    pub auth: Option<AuthConfig>,
    #[serde(default)]
    pub nylas: Option<NylasConfig>,
    #[serde(default)]
    pub pricing: Option<PricingConfig>,
}

impl AppConfig {
    /// Durations (in minutes) this deployment sells, derived from the price tiers.
    pub fn supported_durations(&self) -> Vec<i64> {
        self.pricing
            .as_ref()
            .map(|p| p.price_tiers.iter().map(|t| t.duration_minutes).collect())
            .unwrap_or_default()
    }

    pub fn price_tier_for_duration(&self, duration_minutes: i64) -> Option<&PriceTier> {
        self.pricing
            .as_ref()?
            .price_tiers
            .iter()
            .find(|t| t.duration_minutes == duration_minutes)
    }
}
