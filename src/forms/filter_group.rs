use uuid::Uuid;

use super::finish;
use crate::error::{AdminError, FieldErrors, Result};
use crate::schema::{FilterGroup, FilterGroupBody, FilterValueBody};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterGroupForm {
    pub name: String,
    category_id: Option<Uuid>,
    values: Vec<FilterValueBody>,
    category_locked: bool,
}

impl FilterGroupForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Once products use the group's filters its category is frozen. The
    /// backend enforces this too; the form only keeps the field read-only.
    pub fn from_group(group: &FilterGroup) -> Self {
        Self {
            name: group.name.clone(),
            category_id: Some(group.category_id),
            values: group
                .filters
                .iter()
                .map(|f| FilterValueBody { id: Some(f.id), value: f.value.clone() })
                .collect(),
            category_locked: group.is_used,
        }
    }

    pub fn category_id(&self) -> Option<Uuid> { self.category_id }
    pub fn values(&self) -> Vec<&str> { self.values.iter().map(|v| v.value.as_str()).collect() }
    pub fn is_category_locked(&self) -> bool { self.category_locked }

    pub fn set_category(&mut self, category_id: Uuid) -> Result<()> {
        if self.category_locked && self.category_id != Some(category_id) {
            return Err(AdminError::form("category_id", "Filters of this group are already used by products"));
        }
        self.category_id = Some(category_id);
        Ok(())
    }

    /// Adds a value unless it is blank or already present (case-insensitive).
    pub fn add_value(&mut self, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() || self.position_of(value).is_some() {
            return false;
        }
        self.values.push(FilterValueBody { id: None, value: value.to_string() });
        true
    }

    /// Renames in place, keeping the value's id. Refuses blanks and duplicates of other values.
    pub fn rename_value(&mut self, index: usize, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() || index >= self.values.len() || self.position_of(value).is_some_and(|i| i != index) {
            return false;
        }
        self.values[index].value = value.to_string();
        true
    }

    pub fn remove_value(&mut self, index: usize) -> Option<String> {
        (index < self.values.len()).then(|| self.values.remove(index).value)
    }

    fn position_of(&self, value: &str) -> Option<usize> {
        let value = value.to_lowercase();
        self.values.iter().position(|v| v.value.to_lowercase() == value)
    }

    pub fn body(&self) -> std::result::Result<FilterGroupBody, FieldErrors> {
        let mut fields = FieldErrors::default();
        let category_id = self.category_id.unwrap_or_else(|| {
            fields.push("category_id", "Choose a category");
            Uuid::nil()
        });
        let body = FilterGroupBody { name: self.name.trim().to_string(), category_id, filters: self.values.clone() };
        finish(body, fields)
    }
}
