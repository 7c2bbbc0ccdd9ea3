//! Declarative endpoint descriptions.

use std::fmt;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use super::tags::Tag;
use crate::error::{AdminError, Result};

/// One backend call: method, path, query pairs and the cache tags a
/// successful call invalidates.
#[derive(Clone, Debug)]
pub struct Endpoint {
    pub name: &'static str,
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub invalidates: Vec<Tag>,
}

impl Endpoint {
    pub fn new(name: &'static str, method: Method, path: impl Into<String>) -> Self {
        Self { name, method, path: path.into(), query: Vec::new(), invalidates: Vec::new() }
    }

    pub fn get(name: &'static str, path: impl Into<String>) -> Self { Self::new(name, Method::GET, path) }
    pub fn post(name: &'static str, path: impl Into<String>) -> Self { Self::new(name, Method::POST, path) }
    pub fn put(name: &'static str, path: impl Into<String>) -> Self { Self::new(name, Method::PUT, path) }
    pub fn patch(name: &'static str, path: impl Into<String>) -> Self { Self::new(name, Method::PATCH, path) }
    pub fn delete(name: &'static str, path: impl Into<String>) -> Self { Self::new(name, Method::DELETE, path) }

    /// Flattens a serializable filter struct into query pairs. `None` fields are skipped.
    pub fn query<Q: Serialize>(mut self, params: &Q) -> Result<Self> {
        let value = serde_json::to_value(params).map_err(|e| AdminError::Decode(e.to_string()))?;
        match value {
            Value::Object(map) => {
                for (key, value) in map {
                    let rendered = match value {
                        Value::Null => continue,
                        Value::String(s) => s,
                        other => other.to_string(),
                    };
                    self.query.push((key, rendered));
                }
                Ok(self)
            }
            Value::Null => Ok(self),
            other => Err(AdminError::Decode(format!("query parameters must be an object, got {other}"))),
        }
    }

    pub fn invalidates(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        self.invalidates.extend(tags);
        self
    }

    /// Key the query cache stores this request under.
    pub fn cache_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)?;
        for (i, (key, value)) in self.query.iter().enumerate() {
            write!(f, "{}{}={}", if i == 0 { '?' } else { '&' }, key, value)?;
        }
        Ok(())
    }
}
