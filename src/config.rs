//! Environment configuration.

use std::time::Duration;

use crate::error::{AdminError, Result};

#[derive(Clone, Debug)]
pub struct AdminConfig {
    pub backend_url: String,
    pub port: u16,
    pub request_timeout: Duration,
    pub cache_keep_for: Duration,
    pub allowed_origin: Option<String>,
    pub cdek: CdekConfig,
}

#[derive(Clone, Debug)]
pub struct CdekConfig {
    pub widget_key: Option<String>,
    pub sender_city: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:8083/api/v1".to_string(),
            port: 8084,
            request_timeout: Duration::from_secs(10),
            cache_keep_for: Duration::from_secs(60),
            allowed_origin: None,
            cdek: CdekConfig { widget_key: None, sender_city: "Москва".to_string() },
        }
    }
}

impl AdminConfig {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let backend_url = lookup("BACKEND_URL")
            .ok_or_else(|| AdminError::Config("BACKEND_URL is not set".to_string()))?
            .trim_end_matches('/')
            .to_string();
        if !backend_url.starts_with("http://") && !backend_url.starts_with("https://") {
            return Err(AdminError::Config(format!("BACKEND_URL must be an http(s) URL, got {backend_url}")));
        }

        Ok(Self {
            backend_url,
            port: parse_or(&lookup, "PORT", defaults.port)?,
            request_timeout: Duration::from_secs(parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 10)?),
            cache_keep_for: Duration::from_secs(parse_or(&lookup, "CACHE_KEEP_SECS", 60)?),
            allowed_origin: lookup("ALLOWED_ORIGIN").filter(|v| !v.is_empty()),
            cdek: CdekConfig {
                widget_key: lookup("CDEK_WIDGET_KEY").filter(|v| !v.is_empty()),
                sender_city: lookup("CDEK_SENDER_CITY").unwrap_or(defaults.cdek.sender_city),
            },
        })
    }
}

fn parse_or<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T> {
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| AdminError::Config(format!("{key} has invalid value {raw:?}"))),
        None => Ok(default),
    }
}
