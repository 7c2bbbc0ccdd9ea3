//! Three-step publication wizard: details, variations, review.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::validate_length;

use super::{finish, parse_amount};
use crate::error::{FieldErrors, Result};
use crate::schema::values::validate_slug;
use crate::schema::{slugify, CatalogItemBody, Product, Publication, PublicationBody};
use crate::widgets::reorder::{apply_drag, DragResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicationStep {
    #[default]
    Details,
    Variations,
    Review,
}

/// One catalog item as typed into the variations table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationDraft {
    pub product_id: Option<Uuid>,
    pub label: String,
    pub price: String,
    pub discount: String,
    pub quantity: u32,
}

impl VariationDraft {
    pub fn for_product(product: &Product) -> Self {
        Self {
            product_id: Some(product.id),
            label: product.name.clone(),
            price: product.price.to_string(),
            discount: String::new(),
            quantity: 1,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PublicationForm {
    pub title: String,
    pub description: String,
    pub category_id: Option<Uuid>,
    pub preorder_id: Option<Uuid>,
    pub is_active: bool,
    link_name: String,
    link_name_edited: bool,
    variations: Vec<VariationDraft>,
    step: PublicationStep,
}

impl PublicationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_publication(publication: &Publication) -> Self {
        let mut items = publication.items.clone();
        items.sort_by_key(|i| i.position);
        Self {
            title: publication.title.clone(),
            description: publication.description.clone().unwrap_or_default(),
            category_id: Some(publication.category_id),
            preorder_id: publication.preorder_id,
            is_active: publication.is_active,
            link_name: publication.link_name.clone(),
            link_name_edited: true,
            variations: items
                .iter()
                .map(|i| VariationDraft {
                    product_id: Some(i.product_id),
                    label: i.variation_label.clone(),
                    price: i.price.to_string(),
                    discount: i.discount.map(|d| d.to_string()).unwrap_or_default(),
                    quantity: i.quantity,
                })
                .collect(),
            step: PublicationStep::Details,
        }
    }

    pub fn step(&self) -> PublicationStep { self.step }
    pub fn link_name(&self) -> &str { &self.link_name }
    pub fn variations(&self) -> &[VariationDraft] { &self.variations }

    /// Until the link is edited by hand it follows the title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        if !self.link_name_edited {
            self.link_name = slugify(&self.title);
        }
    }

    pub fn set_link_name(&mut self, link_name: impl Into<String>) {
        self.link_name = link_name.into();
        self.link_name_edited = true;
    }

    pub fn add_variation(&mut self, draft: VariationDraft) {
        self.variations.push(draft);
    }

    pub fn variation_mut(&mut self, index: usize) -> Option<&mut VariationDraft> {
        self.variations.get_mut(index)
    }

    pub fn remove_variation(&mut self, index: usize) -> Option<VariationDraft> {
        (index < self.variations.len()).then(|| self.variations.remove(index))
    }

    pub fn drop_variation(&mut self, drag: DragResult) -> Result<bool> {
        apply_drag(&mut self.variations, drag)
    }

    /// Advances when the current step is valid, otherwise reports its errors.
    pub fn next(&mut self) -> std::result::Result<PublicationStep, FieldErrors> {
        let errors = match self.step {
            PublicationStep::Details => self.details_errors(),
            PublicationStep::Variations => self.items().err().unwrap_or_default(),
            PublicationStep::Review => return self.body().map(|_| PublicationStep::Review),
        };
        if !errors.is_empty() {
            return Err(errors);
        }
        self.step = match self.step {
            PublicationStep::Details => PublicationStep::Variations,
            _ => PublicationStep::Review,
        };
        Ok(self.step)
    }

    pub fn back(&mut self) -> PublicationStep {
        self.step = match self.step {
            PublicationStep::Review => PublicationStep::Variations,
            _ => PublicationStep::Details,
        };
        self.step
    }

    fn details_errors(&self) -> FieldErrors {
        let mut fields = FieldErrors::default();
        let title = self.title.trim();
        if title.is_empty() {
            fields.push("title", "Enter a title");
        } else if !validate_length(title, None, Some(200), None) {
            fields.push("title", "Title is longer than 200 characters");
        }
        if let Err(e) = validate_slug(&self.link_name) {
            fields.push("link_name", e.message.map(|m| m.to_string()).unwrap_or_else(|| "Invalid link".to_string()));
        }
        if self.category_id.is_none() {
            fields.push("category_id", "Choose a category");
        }
        fields
    }

    fn items(&self) -> std::result::Result<Vec<CatalogItemBody>, FieldErrors> {
        let mut fields = FieldErrors::default();
        if self.variations.is_empty() {
            fields.push("items", "Add at least one variation");
        }
        let mut items = Vec::with_capacity(self.variations.len());
        for (index, draft) in self.variations.iter().enumerate() {
            let field = |name: &str| format!("items[{index}].{name}");
            let product_id = draft.product_id.unwrap_or_else(|| {
                fields.push(field("product_id"), "Choose a product");
                Uuid::nil()
            });
            let price = parse_amount(&draft.price).unwrap_or_else(|| {
                fields.push(field("price"), "Enter a price");
                Default::default()
            });
            let discount = if draft.discount.trim().is_empty() {
                None
            } else {
                let parsed = parse_amount(&draft.discount);
                if parsed.is_none() {
                    fields.push(field("discount"), "Enter a percentage");
                }
                parsed
            };
            items.push(CatalogItemBody {
                product_id,
                variation_label: draft.label.trim().to_string(),
                price,
                discount,
                quantity: draft.quantity,
                position: index as u32,
            });
        }
        if fields.is_empty() { Ok(items) } else { Err(fields) }
    }

    /// Final payload; positions follow the on-screen order.
    pub fn body(&self) -> std::result::Result<PublicationBody, FieldErrors> {
        let mut fields = self.details_errors();
        let items = self.items().unwrap_or_else(|errors| {
            fields.merge(errors);
            Vec::new()
        });
        let body = PublicationBody {
            link_name: self.link_name.clone(),
            title: self.title.trim().to_string(),
            description: Some(self.description.trim().to_string()).filter(|d| !d.is_empty()),
            category_id: self.category_id.unwrap_or_else(Uuid::nil),
            preorder_id: self.preorder_id,
            is_active: self.is_active,
            items,
        };
        if !fields.is_empty() {
            return Err(fields);
        }
        finish(body, fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn variation(label: &str, price: &str) -> VariationDraft {
        VariationDraft { product_id: Some(Uuid::new_v4()), label: label.into(), price: price.into(), discount: String::new(), quantity: 3 }
    }

    #[test]
    fn test_link_follows_title_until_edited() {
        let mut form = PublicationForm::new();
        form.set_title("Кружка Чёрная");
        assert_eq!(form.link_name(), "kruzhka-chernaya");
        form.set_link_name("black-mug");
        form.set_title("Other");
        assert_eq!(form.link_name(), "black-mug");
    }

    #[test]
    fn test_steps_only_advance_when_valid() {
        let mut form = PublicationForm::new();
        let errors = form.next().unwrap_err();
        assert!(errors.contains("title") && errors.contains("category_id"));
        assert_eq!(form.step(), PublicationStep::Details);

        form.set_title("Black mug");
        form.category_id = Some(Uuid::new_v4());
        assert_eq!(form.next(), Ok(PublicationStep::Variations));

        let errors = form.next().unwrap_err();
        assert!(errors.contains("items"));

        form.add_variation(variation("350 ml", "abc"));
        let errors = form.next().unwrap_err();
        assert!(errors.contains("items[0].price"));

        form.variation_mut(0).unwrap().price = "590".into();
        assert_eq!(form.next(), Ok(PublicationStep::Review));
        assert_eq!(form.back(), PublicationStep::Variations);
        assert_eq!(form.back(), PublicationStep::Details);
        assert_eq!(form.back(), PublicationStep::Details);
    }

    #[test]
    fn test_overlong_title_stops_at_details() {
        let mut form = PublicationForm::new();
        form.set_title("м".repeat(201));
        form.category_id = Some(Uuid::new_v4());
        let errors = form.next().unwrap_err();
        assert_eq!(errors.get("title").map(|m| m.len()), Some(1));
        assert_eq!(form.step(), PublicationStep::Details);

        form.set_title("м".repeat(200));
        assert_eq!(form.next(), Ok(PublicationStep::Variations));
    }

    #[test]
    fn test_body_positions_follow_order() {
        let mut form = PublicationForm::new();
        form.set_title("Mugs");
        form.category_id = Some(Uuid::new_v4());
        form.add_variation(variation("Small", "300"));
        form.add_variation(variation("Large", "450,5"));
        form.drop_variation(DragResult { from: 1, to: Some(0) }).unwrap();

        let body = form.body().unwrap();
        assert_eq!(body.items[0].variation_label, "Large");
        assert_eq!(body.items[0].position, 0);
        assert_eq!(body.items[0].price, Decimal::new(4505, 1));
        assert_eq!(body.items[1].position, 1);
    }

    #[test]
    fn test_discount_is_checked() {
        let mut form = PublicationForm::new();
        form.set_title("Mugs");
        form.category_id = Some(Uuid::new_v4());
        let mut draft = variation("Small", "300");
        draft.discount = "150".into();
        form.add_variation(draft);
        let errors = form.body().unwrap_err();
        assert!(errors.contains("items[0].discount"));
    }
}
