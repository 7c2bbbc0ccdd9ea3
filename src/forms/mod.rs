//! Form state for the create/update flows.
//!
//! Each form keeps loosely typed field state (text inputs, optional
//! selections), turns it into a request body or a set of inline field
//! errors, and hands valid bodies to an API mutation through [`submit`].

use std::future::Future;
use std::str::FromStr;

use rust_decimal::Decimal;
use validator::Validate;

use crate::error::{FieldErrors, Result};

pub mod filter_group;
pub mod product;
pub mod publication;

pub use filter_group::FilterGroupForm;
pub use product::ProductForm;
pub use publication::{PublicationForm, PublicationStep, VariationDraft};

/// Outcome of pressing "save".
#[derive(Debug, PartialEq)]
pub enum Submission<T> {
    Saved(T),
    Invalid(FieldErrors),
}

impl<T> Submission<T> {
    pub fn saved(self) -> Option<T> {
        match self {
            Self::Saved(value) => Some(value),
            Self::Invalid(_) => None,
        }
    }
}

/// Validates `body` and only then runs `mutation`. Invalid input never reaches
/// the backend; backend failures come back as `Err` and are shown as a toast.
pub async fn submit<B, T, F, Fut>(body: &B, mutation: F) -> Result<Submission<T>>
where
    B: Validate,
    F: FnOnce(&B) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    if let Err(errors) = body.validate() {
        let fields = FieldErrors::from(&errors);
        tracing::debug!(fields = fields.len(), "form rejected before submit");
        return Ok(Submission::Invalid(fields));
    }
    mutation(body).await.map(Submission::Saved)
}

/// Like [`submit`] for forms that first build their body from field state.
pub async fn submit_form<B, T, F, Fut>(body: std::result::Result<B, FieldErrors>, mutation: F) -> Result<Submission<T>>
where
    B: Validate,
    F: FnOnce(&B) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    match body {
        Ok(body) => submit(&body, mutation).await,
        Err(fields) => Ok(Submission::Invalid(fields)),
    }
}

/// Money input: accepts `1 299,50` as well as `1299.50`.
pub(crate) fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).map(|c| if c == ',' { '.' } else { c }).collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

/// Runs the body's own rules and merges them into already collected errors.
pub(crate) fn finish<B: Validate>(body: B, mut fields: FieldErrors) -> std::result::Result<B, FieldErrors> {
    if let Err(errors) = body.validate() {
        fields.merge(FieldErrors::from(&errors));
    }
    if fields.is_empty() { Ok(body) } else { Err(fields) }
}
