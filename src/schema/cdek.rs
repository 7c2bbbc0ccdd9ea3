//! CDEK waybill shapes. Waybills are created and tracked by the backend, which talks to CDEK.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::values::validate_phone;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CdekAddress {
    #[validate(length(min = 1, max = 255))]
    pub city: String,
    #[validate(length(min = 1, max = 255))]
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Recipient {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(custom = "validate_phone")]
    pub phone: String,
}

/// Package dimensions as CDEK expects them: grams and centimetres.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Package {
    #[validate(range(min = 1, max = 30000))]
    pub weight: u32,
    #[validate(range(min = 1, max = 150))]
    pub length: u32,
    #[validate(range(min = 1, max = 150))]
    pub width: u32,
    #[validate(range(min = 1, max = 150))]
    pub height: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_target", skip_on_field_errors = false))]
pub struct WaybillBody {
    pub order_id: Uuid,
    pub tariff_code: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_point: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate]
    pub to_address: Option<CdekAddress>,
    #[validate]
    pub recipient: Recipient,
    #[validate(length(min = 1))]
    #[validate]
    pub packages: Vec<Package>,
}

fn validate_target(body: &WaybillBody) -> Result<(), ValidationError> {
    match (&body.delivery_point, &body.to_address) {
        (Some(_), None) | (None, Some(_)) => Ok(()),
        _ => {
            let mut err = ValidationError::new("delivery_target");
            err.message = Some(Cow::Borrowed("Choose either a pickup point or a door address"));
            Err(err)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CdekWaybill {
    pub uuid: Uuid,
    pub order_id: Uuid,
    #[serde(default)]
    pub cdek_number: Option<String>,
    pub status: String,
    pub tariff_code: u32,
    #[serde(default)]
    pub delivery_point: Option<String>,
    #[serde(default)]
    pub to_address: Option<CdekAddress>,
    #[serde(default)]
    pub packages: Vec<Package>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintForm {
    pub url: String,
}
