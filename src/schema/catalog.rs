//! Catalog shapes: categories, products, templates, filter groups, publications.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::common::Image;
use super::values::{validate_discount, validate_price, validate_sku, validate_slug};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<Image>,
    #[serde(default)]
    pub position: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct CategoryBody {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(custom = "validate_slug")]
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_id: Option<Uuid>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    pub filter_group_id: Uuid,
    pub filter_id: Uuid,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub sku: String,
    pub category_id: Uuid,
    #[serde(default)]
    pub template_id: Option<Uuid>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub characteristics: BTreeMap<String, String>,
    #[serde(default)]
    pub filters: Vec<ProductFilter>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct ProductBody {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(custom = "validate_sku")]
    pub sku: String,
    pub category_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    #[validate(custom = "validate_price")]
    pub price: Decimal,
    #[serde(default)]
    pub image_ids: Vec<Uuid>,
    #[serde(default)]
    pub characteristics: BTreeMap<String, String>,
    #[serde(default)]
    pub filters: Vec<ProductFilter>,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct TemplateCharacteristic {
    #[validate(length(min = 1, max = 64))]
    pub key: String,
    #[validate(length(min = 1, max = 100))]
    pub label: String,
    #[serde(default)]
    pub required: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductTemplate {
    pub id: Uuid,
    pub name: String,
    pub category_id: Uuid,
    #[serde(default)]
    pub characteristics: Vec<TemplateCharacteristic>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ProductTemplateBody {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub category_id: Uuid,
    #[validate]
    pub characteristics: Vec<TemplateCharacteristic>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub id: Uuid,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterGroup {
    pub id: Uuid,
    pub name: String,
    pub category_id: Uuid,
    #[serde(default)]
    pub position: u32,
    #[serde(default)]
    pub filters: Vec<Filter>,
    /// Set by the backend once any product references one of the filters.
    #[serde(default)]
    pub is_used: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct FilterGroupBody {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub category_id: Uuid,
    #[validate(length(min = 1))]
    #[validate]
    pub filters: Vec<FilterValueBody>,
}

/// A value in a filter group write. Existing values carry their `id`, so a
/// rename keeps the products that reference it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct FilterValueBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[validate(length(min = 1, max = 100))]
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: Uuid,
    pub product_id: Uuid,
    pub variation_label: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub discount: Option<Decimal>,
    pub quantity: u32,
    #[serde(default)]
    pub position: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct CatalogItemBody {
    pub product_id: Uuid,
    #[validate(length(min = 1, max = 100))]
    pub variation_label: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[validate(custom = "validate_price")]
    pub price: Decimal,
    #[serde(default, with = "rust_decimal::serde::float_option", skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_discount")]
    pub discount: Option<Decimal>,
    pub quantity: u32,
    pub position: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    pub id: Uuid,
    pub link_name: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category_id: Uuid,
    #[serde(default)]
    pub preorder_id: Option<Uuid>,
    pub is_active: bool,
    #[serde(default)]
    pub items: Vec<CatalogItem>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct PublicationBody {
    #[validate(custom = "validate_slug")]
    pub link_name: String,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 10000))]
    pub description: Option<String>,
    pub category_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preorder_id: Option<Uuid>,
    #[serde(default)]
    pub is_active: bool,
    #[validate(length(min = 1))]
    #[validate]
    pub items: Vec<CatalogItemBody>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationBody {
    pub is_active: bool,
}
