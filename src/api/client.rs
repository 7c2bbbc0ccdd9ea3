//! HTTP transport to the shop backend.

use reqwest::{multipart, Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use validator::Validate;

use super::cache::QueryCache;
use super::endpoint::Endpoint;
use super::tags::Tag;
use crate::config::AdminConfig;
use crate::error::{AdminError, Result};

/// Typed client for the backend. Queries go through the tag cache, mutations
/// invalidate it.
#[derive(Debug)]
pub struct AdminApi {
    client: Client,
    base_url: String,
    cache: QueryCache,
}

impl AdminApi {
    pub fn new(config: &AdminConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.request_timeout.min(std::time::Duration::from_secs(5)))
            .build()?;

        Ok(Self {
            client,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
            cache: QueryCache::new(config.cache_keep_for),
        })
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &Endpoint) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, endpoint.path))
            .map_err(|e| AdminError::Config(format!("bad URL for {}: {e}", endpoint.name)))?;
        if !endpoint.query.is_empty() {
            url.query_pairs_mut().extend_pairs(endpoint.query.iter());
        }
        Ok(url)
    }

    /// Cached read. `provides` computes the tags of a fresh result.
    pub async fn query<T, F>(&self, endpoint: Endpoint, provides: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: FnOnce(&T) -> Vec<Tag>,
    {
        let key = endpoint.cache_key();
        if let Some(cached) = self.cache.get(&key) {
            tracing::trace!(endpoint = endpoint.name, "cache hit");
            return decode(endpoint.name, cached);
        }

        let epoch = self.cache.epoch();
        let value = self.send(&endpoint, None).await?;
        let typed: T = decode(endpoint.name, value.clone())?;
        self.cache.insert_since(key, value, provides(&typed), epoch);
        Ok(typed)
    }

    /// Validated write. The body is checked before any request goes out.
    pub async fn mutate<B, T>(&self, endpoint: Endpoint, body: &B) -> Result<T>
    where
        B: Serialize + Validate,
        T: DeserializeOwned,
    {
        body.validate()?;
        let json = serde_json::to_value(body).map_err(|e| AdminError::Decode(e.to_string()))?;
        self.write(endpoint, Some(json)).await
    }

    /// Write whose body has no client-side rules (status switches, reorder lists).
    pub async fn command<B, T>(&self, endpoint: Endpoint, body: Option<&B>) -> Result<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let json = body
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| AdminError::Decode(e.to_string()))?;
        self.write(endpoint, json).await
    }

    /// Write whose response body is irrelevant (deletes, reorders). Any 2xx is success.
    pub async fn discard<B: Serialize>(&self, endpoint: Endpoint, body: Option<&B>) -> Result<()> {
        let json = body
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| AdminError::Decode(e.to_string()))?;
        self.send(&endpoint, json).await?;
        self.cache.invalidate(&endpoint.invalidates);
        Ok(())
    }

    pub async fn upload<T: DeserializeOwned>(&self, endpoint: Endpoint, form: multipart::Form) -> Result<T> {
        let url = self.url(&endpoint)?;
        tracing::debug!(endpoint = endpoint.name, %url, "uploading");
        let response = self.client.request(endpoint.method.clone(), url).multipart(form).send().await?;
        let value = read_json(endpoint.name, response).await?;
        self.cache.invalidate(&endpoint.invalidates);
        decode(endpoint.name, value)
    }

    /// Raw relay with no cache and no decoding, for third-party widget calls.
    pub async fn relay(&self, endpoint: Endpoint, body: Option<Value>) -> Result<Value> {
        self.send(&endpoint, body).await
    }

    async fn write<T: DeserializeOwned>(&self, endpoint: Endpoint, body: Option<Value>) -> Result<T> {
        let value = self.send(&endpoint, body).await?;
        self.cache.invalidate(&endpoint.invalidates);
        decode(endpoint.name, value)
    }

    async fn send(&self, endpoint: &Endpoint, body: Option<Value>) -> Result<Value> {
        let url = self.url(endpoint)?;
        tracing::debug!(endpoint = endpoint.name, method = %endpoint.method, %url, "calling backend");

        let mut request = self.client.request(endpoint.method.clone(), url);
        if let Some(body) = &body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(|e| {
            tracing::warn!(endpoint = endpoint.name, error = %e, "backend unreachable");
            AdminError::Http(e)
        })?;
        read_json(endpoint.name, response).await
    }
}

async fn read_json(name: &str, response: reqwest::Response) -> Result<Value> {
    let status = response.status();
    let bytes = response.bytes().await?;

    if !status.is_success() {
        let message = error_message(status, &bytes);
        tracing::warn!(endpoint = name, status = status.as_u16(), %message, "backend returned an error");
        return Err(AdminError::Api { status: status.as_u16(), message });
    }
    if bytes.is_empty() || status == StatusCode::NO_CONTENT {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&bytes).map_err(|e| AdminError::Decode(format!("{name}: {e}")))
}

fn decode<T: DeserializeOwned>(name: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| AdminError::Decode(format!("{name}: {e}")))
}

/// Pulls a human-readable message out of an error body.
fn error_message(status: StatusCode, body: &[u8]) -> String {
    let fallback = || status.canonical_reason().unwrap_or("Request failed").to_string();
    let Ok(json) = serde_json::from_slice::<Value>(body) else {
        let text = String::from_utf8_lossy(body).trim().to_string();
        return if text.is_empty() || text.len() > 300 { fallback() } else { text };
    };

    for key in ["message", "detail", "error"] {
        match json.get(key) {
            Some(Value::String(s)) if !s.is_empty() => return s.clone(),
            Some(Value::Array(items)) => {
                if let Some(msg) = items.iter().find_map(|item| item.get("msg").and_then(Value::as_str)) {
                    return msg.to_string();
                }
            }
            _ => {}
        }
    }
    fallback()
}
