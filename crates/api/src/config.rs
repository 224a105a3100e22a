//! Process configuration, read from the environment (and an optional `.env`).

use std::path::PathBuf;

use bloglist_observability::LogFormat;
use thiserror::Error;

pub const DEFAULT_JWT_SECRET: &str = "dev-secret";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: `{value}` ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl_secs: i64,
    pub bcrypt_cost: u32,
    pub static_dir: PathBuf,
    pub seed_phonebook: bool,
    pub use_persistent_stores: bool,
    pub database_url: Option<String>,
    pub log_format: LogFormat,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            token_ttl_secs: 3600,
            bcrypt_cost: 10,
            static_dir: PathBuf::from("dist"),
            seed_phonebook: true,
            use_persistent_stores: false,
            database_url: None,
            log_format: LogFormat::Json,
        }
    }
}

impl ApiConfig {
    /// Load `.env` (if present) and read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = get("HOST") {
            config.host = host;
        }
        if let Some(port) = get("PORT") {
            config.port = parse_number("PORT", &port)?;
        }
        if let Some(secret) = get("JWT_SECRET") {
            config.jwt_secret = secret;
        }
        if let Some(ttl) = get("TOKEN_TTL_SECS") {
            config.token_ttl_secs = parse_number("TOKEN_TTL_SECS", &ttl)?;
            if config.token_ttl_secs <= 0 {
                return Err(invalid("TOKEN_TTL_SECS", &ttl, "must be positive"));
            }
        }
        if let Some(cost) = get("BCRYPT_COST") {
            config.bcrypt_cost = parse_number("BCRYPT_COST", &cost)?;
            if !(4..=31).contains(&config.bcrypt_cost) {
                return Err(invalid("BCRYPT_COST", &cost, "must be between 4 and 31"));
            }
        }
        if let Some(dir) = get("STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }
        if let Some(seed) = get("SEED_PHONEBOOK") {
            config.seed_phonebook = parse_flag("SEED_PHONEBOOK", &seed)?;
        }
        if let Some(persistent) = get("USE_PERSISTENT_STORES") {
            config.use_persistent_stores = parse_flag("USE_PERSISTENT_STORES", &persistent)?;
        }
        config.database_url = get("DATABASE_URL");
        if let Some(format) = get("LOG_FORMAT") {
            config.log_format = LogFormat::from_env_value(&format);
        }

        Ok(config)
    }

    /// In-memory, unseeded, cheap hashing.
    pub fn for_tests(jwt_secret: impl Into<String>) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            jwt_secret: jwt_secret.into(),
            bcrypt_cost: 4,
            seed_phonebook: false,
            log_format: LogFormat::Pretty,
            ..Self::default()
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }

    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.token_ttl_secs)
    }
}

fn parse_number<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| invalid(key, value, e.to_string()))
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, value, "expected true or false")),
    }
}

fn invalid(key: &'static str, value: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.into(),
    }
}
