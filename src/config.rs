use std::str::FromStr;

use anyhow::Context;
use serde::Deserialize;

/// Default token lifetime: 12 hours.
pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 12 * 60 * 60;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_seconds: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database = DatabaseConfig {
            url: std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            max_connections: env_or("DB_MAX_CONNECTIONS", 10)?,
            acquire_timeout_secs: env_or("DB_ACQUIRE_TIMEOUT_SECS", 5)?,
        };

        let secret = std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        let jwt = JwtConfig {
            secret,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "authd".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "authd-users".into()),
            ttl_seconds: env_or("JWT_TTL_SECONDS", DEFAULT_TOKEN_TTL_SECONDS)?,
        };

        let port = match std::env::var("APP_PORT") {
            Ok(raw) => parse_or("APP_PORT", Some(raw), 5000)?,
            Err(_) => env_or("PORT", 5000)?,
        };

        let config = Self {
            database,
            jwt,
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port,
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations the server must not start with.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.jwt.secret.trim().is_empty() {
            anyhow::bail!("JWT_SECRET must not be empty");
        }
        if self.jwt.ttl_seconds <= 0 {
            anyhow::bail!("JWT_TTL_SECONDS must be positive");
        }
        Ok(())
    }
}

fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    parse_or(key, std::env::var(key).ok(), default)
}

/// Unset falls back to `default`; set but unparsable is an error.
fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        None => Ok(default),
        Some(v) => v
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has invalid value {v:?}")),
    }
}
