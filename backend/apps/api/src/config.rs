//! Server Configuration
//!
//! Everything the binary reads from the environment, resolved once at startup.

use anyhow::{Context, bail};
use auth::AuthConfig;
use axum::http::HeaderValue;
use std::env;
use std::time::Duration;

const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_PORT: u16 = 8080;

pub struct ServerConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub port: u16,
    pub auth: AuthConfig,
    /// Empty means no cross-origin access
    pub cors_origins: Vec<HeaderValue>,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok(), cfg!(debug_assertions))
    }

    /// `allow_random_secret` lets a missing `JWT_SECRET` fall back to a
    /// per-process key
    fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        allow_random_secret: bool,
    ) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;

        let max_connections = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let ttl_secs = parse_or(
            &lookup,
            "TOKEN_TTL_SECS",
            AuthConfig::DEFAULT_TOKEN_TTL.as_secs(),
        )?;
        if ttl_secs == 0 {
            bail!("TOKEN_TTL_SECS must be positive");
        }

        let auth = match lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
            Some(secret) => AuthConfig::new(secret),
            None if allow_random_secret => {
                tracing::warn!("JWT_SECRET not set, using a random key");
                AuthConfig::development()
            }
            None => bail!("JWT_SECRET must be set in production"),
        };
        let auth = auth.with_token_ttl(Duration::from_secs(ttl_secs));
        let auth = match lookup("PASSWORD_PEPPER").filter(|s| !s.is_empty()) {
            Some(pepper) => auth.with_pepper(pepper),
            None => auth,
        };

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                origin
                    .parse()
                    .with_context(|| format!("invalid CORS origin {origin:?}"))
            })
            .collect::<anyhow::Result<_>>()?;

        Ok(Self {
            database_url,
            max_connections,
            port,
            auth,
            cors_origins,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} is not a valid number: {raw:?}")),
        None => Ok(default),
    }
}
