use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

use crate::server::middleware::RateLimitConfig;

pub const TWILIO_ENV_VARS: [&str; 3] = [
    "TWILIO_ACCOUNT_SID",
    "TWILIO_AUTH_TOKEN",
    "TWILIO_VERIFY_SERVICE_SID",
];

/// Twilio Verify credentials. Only present when all three are set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwilioCredentials {
    pub account_sid: String,
    pub auth_token: String,
    pub verify_service_sid: String,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub twilio: Option<TwilioCredentials>,
    /// Names of required Twilio variables that were unset or empty
    pub missing_twilio_vars: Vec<&'static str>,
    /// Override for the Verify API host (staging, mocks)
    pub twilio_verify_base_url: Option<String>,
    /// Empty means any origin
    pub allowed_origins: Vec<String>,
    pub rate_limit: Option<RateLimitConfig>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// Missing Twilio credentials are not an error here: the server starts
    /// and fails closed per request.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let missing_twilio_vars: Vec<&'static str> = TWILIO_ENV_VARS
            .iter()
            .copied()
            .filter(|name| non_empty(*name).is_none())
            .collect();

        let twilio = match (
            non_empty("TWILIO_ACCOUNT_SID"),
            non_empty("TWILIO_AUTH_TOKEN"),
            non_empty("TWILIO_VERIFY_SERVICE_SID"),
        ) {
            (Some(account_sid), Some(auth_token), Some(verify_service_sid)) => {
                Some(TwilioCredentials {
                    account_sid,
                    auth_token,
                    verify_service_sid,
                })
            }
            _ => None,
        };

        let rate_limit_enabled = non_empty("RATE_LIMIT_ENABLED")
            .unwrap_or_else(|| "true".to_string())
            .parse::<bool>()
            .context("RATE_LIMIT_ENABLED must be true or false")?;

        let rate_limit = if rate_limit_enabled {
            Some(RateLimitConfig {
                per_second: non_empty("RATE_LIMIT_PER_SECOND")
                    .unwrap_or_else(|| "2".to_string())
                    .parse()
                    .context("RATE_LIMIT_PER_SECOND must be a valid number")?,
                burst_size: non_empty("RATE_LIMIT_BURST")
                    .unwrap_or_else(|| "5".to_string())
                    .parse()
                    .context("RATE_LIMIT_BURST must be a valid number")?,
            })
        } else {
            None
        };

        Ok(Self {
            port: non_empty("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            twilio,
            missing_twilio_vars,
            twilio_verify_base_url: non_empty("TWILIO_VERIFY_BASE_URL"),
            allowed_origins: non_empty("ALLOWED_ORIGINS")
                .unwrap_or_default()
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            rate_limit,
        })
    }
}
