//! Server configuration
//!
//! Everything is read from the environment once at startup. Missing optional
//! variables fall back to defaults suitable for local development.

use std::net::SocketAddr;
use std::ops::RangeInclusive;
use std::time::Duration;

use auth::AuthConfig;
use base64::Engine;
use base64::engine::general_purpose;
use learnpath::{LearnPathConfig, OpenAiConfig};
use platform::rate_limit::{RateLimitConfig, RateLimitConfigError};
use thiserror::Error;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:31113";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("{name}: {source}")]
    RateLimit {
        name: &'static str,
        #[source]
        source: RateLimitConfigError,
    },

    #[error("OPENAI_API_KEY must be set unless USE_MOCK_AI=true")]
    MissingApiKey,
}

/// Which content source answers generation requests.
#[derive(Debug, Clone)]
pub enum AiMode {
    Mock { latency_ms: RangeInclusive<u64> },
    OpenAi(OpenAiConfig),
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_address: SocketAddr,
    pub database: DatabaseConfig,
    pub frontend_origins: Vec<String>,
    pub ai: AiMode,
    pub learnpath: LearnPathConfig,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let bind_address = parse_or(&var, "BIND_ADDRESS", DEFAULT_BIND_ADDRESS.parse().ok())?;

        let database = DatabaseConfig {
            url: var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            max_connections: parse_or(&var, "DATABASE_MAX_CONNECTIONS", Some(5))?,
            acquire_timeout: secs_or(&var, "DATABASE_ACQUIRE_TIMEOUT_SECS", 5)?,
        };

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        let use_mock = parse_or(&var, "USE_MOCK_AI", Some(false))?;
        let ai = if use_mock {
            AiMode::Mock {
                latency_ms: latency_range(&var)?,
            }
        } else {
            let api_key = var("OPENAI_API_KEY").ok_or(ConfigError::MissingApiKey)?;
            let mut openai = OpenAiConfig::new(api_key);
            if let Some(model) = var("OPENAI_MODEL") {
                openai.model = model;
            }
            if let Some(base_url) = var("OPENAI_BASE_URL") {
                openai.base_url = base_url.trim_end_matches('/').to_string();
            }
            openai.timeout = secs_or(&var, "OPENAI_TIMEOUT_SECS", openai.timeout.as_secs())?;
            AiMode::OpenAi(openai)
        };

        let defaults = LearnPathConfig::default();
        let learnpath = LearnPathConfig {
            generate_rate_limit: rate_limit_or(
                &var,
                "GENERATE_RATE_LIMIT",
                defaults.generate_rate_limit,
            )?,
            refine_rate_limit: rate_limit_or(&var, "REFINE_RATE_LIMIT", defaults.refine_rate_limit)?,
            generation_timeout: secs_or(
                &var,
                "GENERATION_TIMEOUT_SECS",
                defaults.generation_timeout.as_secs(),
            )?,
            store_timeout: secs_or(&var, "STORE_TIMEOUT_SECS", defaults.store_timeout.as_secs())?,
        };

        let auth = auth_config(&var)?;

        Ok(Self {
            bind_address,
            database,
            frontend_origins,
            ai,
            learnpath,
            auth,
        })
    }
}

fn auth_config<V>(var: &V) -> Result<AuthConfig, ConfigError>
where
    V: Fn(&str) -> Option<String>,
{
    let mut config = match var("SESSION_SECRET") {
        Some(encoded) => AuthConfig {
            session_secret: decode_secret(&encoded)?,
            ..AuthConfig::default()
        },
        None if cfg!(debug_assertions) => {
            tracing::warn!("SESSION_SECRET not set, sessions will not survive a restart");
            AuthConfig::with_random_secret()
        }
        None => return Err(ConfigError::Missing("SESSION_SECRET")),
    };

    config.cookie_secure = parse_or(var, "COOKIE_SECURE", Some(!cfg!(debug_assertions)))?;

    Ok(config)
}

fn decode_secret(encoded: &str) -> Result<[u8; 32], ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        name: "SESSION_SECRET",
        value: "[REDACTED]".to_string(),
        reason,
    };

    let bytes = general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|e| invalid(e.to_string()))?;

    <[u8; 32]>::try_from(bytes.as_slice())
        .map_err(|_| invalid(format!("expected 32 bytes, got {}", bytes.len())))
}

fn parse_or<V, T>(var: &V, name: &'static str, default: Option<T>) -> Result<T, ConfigError>
where
    V: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match var(name) {
        Some(value) => {
            let parsed = value.trim().parse::<T>();
            parsed.map_err(|e| ConfigError::Invalid {
                name,
                reason: e.to_string(),
                value,
            })
        }
        None => default.ok_or(ConfigError::Missing(name)),
    }
}

fn secs_or<V>(var: &V, name: &'static str, default: u64) -> Result<Duration, ConfigError>
where
    V: Fn(&str) -> Option<String>,
{
    let secs: u64 = parse_or(var, name, Some(default))?;
    if secs == 0 {
        return Err(ConfigError::Invalid {
            name,
            value: secs.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(Duration::from_secs(secs))
}

fn rate_limit_or<V>(
    var: &V,
    name: &'static str,
    default: RateLimitConfig,
) -> Result<RateLimitConfig, ConfigError>
where
    V: Fn(&str) -> Option<String>,
{
    match var(name) {
        Some(value) => value
            .parse()
            .map_err(|source| ConfigError::RateLimit { name, source }),
        None => Ok(default),
    }
}

/// `MOCK_AI_LATENCY_MS` as `"<min>-<max>"`, or a single fixed value.
fn latency_range<V>(var: &V) -> Result<RangeInclusive<u64>, ConfigError>
where
    V: Fn(&str) -> Option<String>,
{
    let Some(value) = var("MOCK_AI_LATENCY_MS") else {
        return Ok(500..=1500);
    };

    let invalid = |reason: &str| ConfigError::Invalid {
        name: "MOCK_AI_LATENCY_MS",
        value: value.clone(),
        reason: reason.to_string(),
    };

    let (min, max) = match value.split_once('-') {
        Some((min, max)) => (min.trim(), max.trim()),
        None => (value.trim(), value.trim()),
    };
    let min: u64 = min.parse().map_err(|_| invalid("expected <min>-<max>"))?;
    let max: u64 = max.parse().map_err(|_| invalid("expected <min>-<max>"))?;
    if min > max {
        return Err(invalid("min is greater than max"));
    }

    Ok(min..=max)
}
