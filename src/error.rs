//! Error and toast types shared by the client, forms and dashboard server.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Validation failed")]
    Validation(#[from] ValidationErrors),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Index {index} out of range for {len} items")]
    Reorder { index: usize, len: usize },

    #[error("{field}: {message}")]
    Form { field: String, message: String },
}

pub type Result<T> = std::result::Result<T, AdminError>;

impl AdminError {
    pub fn form(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Form { field: field.into(), message: message.into() }
    }

    /// Status code the dashboard answers with for this error.
    pub fn status(&self) -> u16 {
        match self {
            Self::Api { status, .. } => *status,
            Self::Validation(_) | Self::Form { .. } | Self::Reorder { .. } => 422,
            Self::Http(e) if e.is_timeout() => 504,
            Self::Http(_) | Self::Decode(_) => 502,
            Self::Config(_) => 500,
        }
    }

    /// Field name to messages, for errors that belong next to form inputs.
    pub fn field_errors(&self) -> Option<FieldErrors> {
        match self {
            Self::Validation(errors) => Some(FieldErrors::from(errors)),
            Self::Form { field, message } => {
                let mut fields = FieldErrors::default();
                fields.push(field.clone(), message.clone());
                Some(fields)
            }
            _ => None,
        }
    }

    pub fn toast(&self) -> Toast {
        let message = match self {
            Self::Api { message, .. } => message.clone(),
            Self::Validation(_) | Self::Form { .. } => "Check the highlighted fields".to_string(),
            Self::Http(_) | Self::Decode(_) => "Server is unavailable, try again later".to_string(),
            other => other.to_string(),
        };
        Toast { severity: Severity::Error, message, fields: self.field_errors() }
    }
}

/// Inline form errors keyed by field path (`items[0].price`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    fn collect(&mut self, prefix: &str, errors: &ValidationErrors) {
        for (field, kind) in errors.errors() {
            let path = if prefix.is_empty() { field.to_string() } else { format!("{prefix}.{field}") };
            match kind {
                ValidationErrorsKind::Field(list) => {
                    for error in list {
                        let message = error
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| default_message(&error.code));
                        self.push(path.clone(), message);
                    }
                }
                ValidationErrorsKind::Struct(inner) => self.collect(&path, inner),
                ValidationErrorsKind::List(items) => {
                    for (index, inner) in items {
                        self.collect(&format!("{path}[{index}]"), inner);
                    }
                }
            }
        }
    }
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut fields = FieldErrors::default();
        fields.collect("", errors);
        fields
    }
}

fn default_message(code: &str) -> String {
    match code {
        "length" => "Invalid length".to_string(),
        "email" => "Invalid email".to_string(),
        "range" => "Out of range".to_string(),
        "required" => "Required".to_string(),
        other => other.replace('_', " "),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Error,
}

/// Snackbar payload the dashboard shows for a finished action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self { severity: Severity::Success, message: message.into(), fields: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    #[test]
    fn test_api_error_toast_uses_server_message() {
        let err = AdminError::Api { status: 409, message: "Slug already taken".into() };
        let toast = err.toast();
        assert_eq!(toast.severity, Severity::Error);
        assert_eq!(toast.message, "Slug already taken");
        assert!(toast.fields.is_none());
        assert_eq!(err.status(), 409);
    }

    #[test]
    fn test_validation_errors_become_field_errors() {
        let mut errors = ValidationErrors::new();
        errors.add("name", ValidationError::new("length"));
        let mut custom = ValidationError::new("slug");
        custom.message = Some("Only lowercase letters".into());
        errors.add("slug", custom);

        let err = AdminError::Validation(errors);
        let fields = err.field_errors().unwrap();
        assert_eq!(fields.get("name").unwrap(), ["Invalid length".to_string()]);
        assert_eq!(fields.get("slug").unwrap(), ["Only lowercase letters".to_string()]);
        assert_eq!(err.status(), 422);
    }

    #[test]
    fn test_form_error_toast_points_to_field() {
        let err = AdminError::form("category_id", "Filters are already used by products");
        let toast = err.toast();
        assert!(toast.fields.unwrap().contains("category_id"));
    }
}
