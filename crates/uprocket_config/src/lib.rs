// --- File: crates/uprocket_config/src/lib.rs ---

use config::{Config, ConfigError, Environment, File};

pub mod models;
pub use models::*;

/// Loads the application configuration.
///
/// Sources, in order of precedence (later wins):
/// 1. `config/default.*` file
/// 2. `config/{RUN_MODE}.*` file
/// 3. Environment variables prefixed with `APP`, `__` as section separator
///    (e.g. `APP_SERVER__PORT=9000`, `APP_NYLAS__API_URL=...`).
///
/// Secrets (the Nylas API key) are not part of `AppConfig`; they are read from
/// plain env vars at the call site. `.env` is loaded here for local development.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    dotenv::dotenv().ok();
    let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "default".into());

    Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8080_i64)?
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_minimal_config() {
        let cfg: AppConfig = serde_json::from_str(
            r#"{ "server": { "host": "0.0.0.0", "port": 3000 } }"#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 3000);
        assert!(!cfg.use_nylas);
        assert!(cfg.firebase.is_none());
    }

    #[test]
    fn auth_defaults_apply() {
        let cfg: AppConfig = serde_json::from_str(
            r#"{ "server": { "host": "h", "port": 1 }, "auth": {} }"#,
        )
        .unwrap();
        let auth = cfg.auth.unwrap();
        assert_eq!(auth.cookie_name, "uprocket_session");
        assert_eq!(auth.session_expiry_days, 5);
    }

    #[test]
    fn supported_durations_follow_price_tiers() {
        let cfg: AppConfig = serde_json::from_str(
            r#"{
                "server": { "host": "h", "port": 1 },
                "pricing": { "price_tiers": [
                    { "duration_minutes": 30, "unit_amount": 500 },
                    { "duration_minutes": 60, "unit_amount": 1000 }
                ]}
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.supported_durations(), vec![30, 60]);
        assert_eq!(cfg.price_tier_for_duration(30).unwrap().unit_amount, 500);
        assert!(cfg.price_tier_for_duration(45).is_none());
    }
}
