//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_JWT_AUDIENCE, DEFAULT_JWT_ISSUER, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT, MIN_JWT_KEY_LENGTH,
};
use crate::errors::{AppError, AppResult};

/// Token signing settings.
#[derive(Clone)]
pub struct JwtConfig {
    key: String,
    pub issuer: String,
    pub audience: String,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("key", &"[REDACTED]")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}

impl JwtConfig {
    /// Build signing settings, rejecting keys too short for HS256.
    pub fn new(
        key: impl Into<String>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> AppResult<Self> {
        let key = key.into();
        if key.len() < MIN_JWT_KEY_LENGTH {
            return Err(AppError::configuration(format!(
                "JWT_KEY must be at least {} bytes long",
                MIN_JWT_KEY_LENGTH
            )));
        }

        Ok(Self {
            key,
            issuer: issuer.into(),
            audience: audience.into(),
        })
    }

    /// Get key bytes for token signing/verification.
    pub fn key_bytes(&self) -> &[u8] {
        self.key.as_bytes()
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub server_host: String,
    pub server_port: u16,
    /// Whether the built-in `admin@admin.com` account may log in
    pub auth_bypass_enabled: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt", &self.jwt)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("auth_bypass_enabled", &self.auth_bypass_enabled)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// Returns `ConfigurationMissing` if `JWT_KEY` is unset or too short.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let key = lookup("JWT_KEY")
            .filter(|k| !k.is_empty())
            .ok_or_else(|| AppError::configuration("JWT_KEY is not configured"))?;

        let jwt = JwtConfig::new(
            key,
            lookup("JWT_ISSUER").unwrap_or_else(|| DEFAULT_JWT_ISSUER.to_string()),
            lookup("JWT_AUDIENCE").unwrap_or_else(|| DEFAULT_JWT_AUDIENCE.to_string()),
        )?;

        Ok(Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            jwt,
            server_host: lookup("SERVER_HOST")
                .unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            server_port: lookup("SERVER_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            auth_bypass_enabled: lookup("AUTH_BYPASS_ENABLED")
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
        })
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
