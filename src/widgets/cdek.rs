//! Glue for the CDEK courier map widget.
//!
//! The dashboard injects the widget script with a [`WidgetConfig`]; when the
//! operator picks a pickup point or a door address the widget calls back with
//! a [`WidgetChoice`], which becomes the delivery target of a waybill.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::config::CdekConfig;
use crate::error::{AdminError, Result};
use crate::schema::{CdekAddress, Package, Recipient, WaybillBody};

pub const SCRIPT_URL: &str = "https://cdn.jsdelivr.net/npm/@cdek-it/widget@3";

/// Tariffs offered in the widget: "warehouse-warehouse" and "warehouse-door" parcels.
pub const OFFICE_TARIFFS: [u32; 2] = [136, 234];
pub const DOOR_TARIFFS: [u32; 2] = [137, 233];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetSender {
    pub city: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetGood {
    pub width: u32,
    pub height: u32,
    pub length: u32,
    pub weight: u32,
}

impl From<Package> for WidgetGood {
    fn from(p: Package) -> Self {
        Self { width: p.width, height: p.height, length: p.length, weight: p.weight }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetTariffs {
    pub office: Vec<u32>,
    pub door: Vec<u32>,
}

/// Options object handed to `new window.CDEKWidget(...)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    pub api_key: String,
    pub service_path: String,
    pub default_location: String,
    pub from: WidgetSender,
    pub goods: Vec<WidgetGood>,
    pub tariffs: WidgetTariffs,
    pub lang: String,
    pub currency: String,
}

impl WidgetConfig {
    /// `service_path` is where the widget sends its office/tariff lookups.
    pub fn new(config: &CdekConfig, service_path: impl Into<String>, packages: &[Package]) -> Result<Self> {
        let api_key = config
            .widget_key
            .clone()
            .ok_or_else(|| AdminError::Config("CDEK_WIDGET_KEY is not set".to_string()))?;
        Ok(Self {
            api_key,
            service_path: service_path.into(),
            default_location: config.sender_city.clone(),
            from: WidgetSender { city: config.sender_city.clone() },
            goods: packages.iter().copied().map(WidgetGood::from).collect(),
            tariffs: WidgetTariffs { office: OFFICE_TARIFFS.to_vec(), door: DOOR_TARIFFS.to_vec() },
            lang: "rus".to_string(),
            currency: "RUB".to_string(),
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    Office,
    Door,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WidgetTariff {
    pub tariff_code: u32,
    #[serde(default)]
    pub tariff_name: Option<String>,
    #[serde(default)]
    pub delivery_sum: Option<f64>,
    #[serde(default)]
    pub period_min: Option<u32>,
    #[serde(default)]
    pub period_max: Option<u32>,
}

/// Arguments of the widget's `onChoose(mode, tariff, address)` callback.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WidgetChoice {
    pub mode: DeliveryMode,
    pub tariff: WidgetTariff,
    pub address: Value,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeliveryTarget {
    Office { code: String, address: String },
    Door(CdekAddress),
}

fn text(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl WidgetChoice {
    /// Delivery target and tariff code picked in the widget.
    pub fn target(&self) -> Result<(DeliveryTarget, u32)> {
        let missing = |field: &str| AdminError::form("delivery", format!("CDEK widget did not return {field}"));
        let target = match self.mode {
            DeliveryMode::Office => DeliveryTarget::Office {
                code: text(&self.address, "code").ok_or_else(|| missing("office code"))?,
                address: text(&self.address, "address").unwrap_or_default(),
            },
            DeliveryMode::Door => {
                let address = text(&self.address, "formatted")
                    .or_else(|| text(&self.address, "name"))
                    .ok_or_else(|| missing("address"))?;
                let city = text(&self.address, "city").ok_or_else(|| missing("city"))?;
                DeliveryTarget::Door(CdekAddress { city, address, postal_code: text(&self.address, "postal_code") })
            }
        };
        Ok((target, self.tariff.tariff_code))
    }

    /// Builds the waybill request for `order_id`. Validation happens on submit.
    pub fn into_waybill(self, order_id: Uuid, recipient: Recipient, packages: Vec<Package>) -> Result<WaybillBody> {
        let (target, tariff_code) = self.target()?;
        let (delivery_point, to_address) = match target {
            DeliveryTarget::Office { code, .. } => (Some(code), None),
            DeliveryTarget::Door(address) => (None, Some(address)),
        };
        Ok(WaybillBody { order_id, tariff_code, delivery_point, to_address, recipient, packages })
    }
}
