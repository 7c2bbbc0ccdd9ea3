use uuid::Uuid;

use super::tags::{entity_tags, list_tags, Tag, TagKind};
use super::{AdminApi, Endpoint};
use crate::error::Result;
use crate::schema::{Category, CategoryBody};

impl AdminApi {
    pub async fn categories(&self) -> Result<Vec<Category>> {
        self.query(Endpoint::get("getCategories", "/categories"), |rows: &Vec<Category>| {
            list_tags(TagKind::Category, rows.iter().map(|c| &c.id))
        })
        .await
    }

    pub async fn category(&self, id: Uuid) -> Result<Category> {
        self.query(Endpoint::get("getCategory", format!("/categories/{id}")), |c: &Category| {
            vec![Tag::id(TagKind::Category, c.id)]
        })
        .await
    }

    pub async fn create_category(&self, body: &CategoryBody) -> Result<Category> {
        let endpoint = Endpoint::post("createCategory", "/categories").invalidates([Tag::list(TagKind::Category)]);
        self.mutate(endpoint, body).await
    }

    pub async fn update_category(&self, id: Uuid, body: &CategoryBody) -> Result<Category> {
        let endpoint = Endpoint::patch("updateCategory", format!("/categories/{id}"))
            .invalidates(entity_tags(TagKind::Category, id));
        self.mutate(endpoint, body).await
    }

    /// Products and filter groups hang off categories, so their lists go too.
    pub async fn delete_category(&self, id: Uuid) -> Result<()> {
        let endpoint = Endpoint::delete("deleteCategory", format!("/categories/{id}"))
            .invalidates(entity_tags(TagKind::Category, id))
            .invalidates([Tag::list(TagKind::Product), Tag::list(TagKind::FilterGroup)]);
        self.discard::<()>(endpoint, None).await
    }
}
