use std::collections::BTreeMap;

use uuid::Uuid;

use super::{finish, parse_amount};
use crate::error::{AdminError, FieldErrors, Result};
use crate::schema::{Image, Product, ProductBody, ProductFilter, ProductTemplate, Sku};
use crate::widgets::reorder::{apply_drag, DragResult};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub sku: String,
    pub description: String,
    pub price: String,
    pub is_active: bool,
    pub(super) category_id: Option<Uuid>,
    pub(super) template_id: Option<Uuid>,
    pub(super) required: Vec<String>,
    pub(super) images: Vec<Image>,
    pub(super) characteristics: BTreeMap<String, String>,
    pub(super) filters: Vec<ProductFilter>,
}

impl ProductForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Edit form pre-filled from an existing product. The template's required
    /// keys are not known here; call [`apply_template`](Self::apply_template) to restore them.
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            sku: product.sku.clone(),
            description: product.description.clone().unwrap_or_default(),
            price: product.price.to_string(),
            is_active: product.is_active,
            category_id: Some(product.category_id),
            template_id: product.template_id,
            required: Vec::new(),
            images: product.images.clone(),
            characteristics: product.characteristics.clone(),
            filters: product.filters.clone(),
        }
    }

    pub fn category_id(&self) -> Option<Uuid> { self.category_id }
    pub fn template_id(&self) -> Option<Uuid> { self.template_id }
    pub fn images(&self) -> &[Image] { &self.images }
    pub fn filters(&self) -> &[ProductFilter] { &self.filters }
    pub fn characteristics(&self) -> &BTreeMap<String, String> { &self.characteristics }

    /// Filters and templates belong to a category, so switching it drops both.
    pub fn set_category(&mut self, category_id: Uuid) {
        if self.category_id == Some(category_id) {
            return;
        }
        self.category_id = Some(category_id);
        self.template_id = None;
        self.required.clear();
        self.filters.clear();
    }

    /// Adds the template's characteristic keys that are not filled in yet.
    pub fn apply_template(&mut self, template: &ProductTemplate) -> Result<()> {
        match self.category_id {
            Some(id) if id == template.category_id => {}
            Some(_) => return Err(AdminError::form("template_id", "Template belongs to another category")),
            None => return Err(AdminError::form("category_id", "Choose a category first")),
        }
        self.template_id = Some(template.id);
        self.required = template.characteristics.iter().filter(|c| c.required).map(|c| c.key.clone()).collect();
        for characteristic in &template.characteristics {
            self.characteristics.entry(characteristic.key.clone()).or_default();
        }
        Ok(())
    }

    pub fn set_characteristic(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.characteristics.insert(key.into(), value.into());
    }

    /// Removing a required key is refused; clear its value instead.
    pub fn remove_characteristic(&mut self, key: &str) -> Result<()> {
        if self.required.iter().any(|k| k == key) {
            return Err(AdminError::form(format!("characteristics.{key}"), "Required by the template"));
        }
        self.characteristics.remove(key);
        Ok(())
    }

    /// Selects `filter_id` within its group, replacing the previous choice for that group.
    pub fn select_filter(&mut self, filter_group_id: Uuid, filter_id: Uuid) {
        self.filters.retain(|f| f.filter_group_id != filter_group_id);
        self.filters.push(ProductFilter { filter_group_id, filter_id });
    }

    pub fn clear_filter(&mut self, filter_group_id: Uuid) {
        self.filters.retain(|f| f.filter_group_id != filter_group_id);
    }

    pub fn add_image(&mut self, image: Image) {
        if !self.images.iter().any(|i| i.id == image.id) {
            self.images.push(image);
        }
    }

    pub fn remove_image(&mut self, id: Uuid) {
        self.images.retain(|i| i.id != id);
    }

    pub fn drop_image(&mut self, drag: DragResult) -> Result<bool> {
        apply_drag(&mut self.images, drag)
    }

    pub fn body(&self) -> std::result::Result<ProductBody, FieldErrors> {
        let mut fields = FieldErrors::default();

        let category_id = self.category_id.unwrap_or_else(|| {
            fields.push("category_id", "Choose a category");
            Uuid::nil()
        });
        let price = parse_amount(&self.price).unwrap_or_else(|| {
            fields.push("price", "Enter a price");
            Default::default()
        });
        for key in &self.required {
            if self.characteristics.get(key).map_or(true, |v| v.trim().is_empty()) {
                fields.push(format!("characteristics.{key}"), "Required by the template");
            }
        }
        let sku = Sku::new(self.sku.as_str()).map(String::from).unwrap_or_else(|_| self.sku.trim().to_string());

        let body = ProductBody {
            name: self.name.trim().to_string(),
            sku,
            category_id,
            template_id: self.template_id,
            description: Some(self.description.trim().to_string()).filter(|d| !d.is_empty()),
            price,
            image_ids: self.images.iter().map(|i| i.id).collect(),
            characteristics: self
                .characteristics
                .iter()
                .filter(|(_, v)| !v.trim().is_empty())
                .map(|(k, v)| (k.clone(), v.trim().to_string()))
                .collect(),
            filters: self.filters.clone(),
            is_active: self.is_active,
        };
        finish(body, fields)
    }
}
