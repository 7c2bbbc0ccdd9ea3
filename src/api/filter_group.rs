use serde::Serialize;
use uuid::Uuid;

use super::tags::{entity_tags, list_tags, Tag, TagKind};
use super::{AdminApi, Endpoint};
use crate::error::Result;
use crate::schema::{FilterGroup, FilterGroupBody, Position, ReorderRequest};

#[derive(Serialize)]
struct ByCategory {
    category_id: Option<Uuid>,
}

impl AdminApi {
    pub async fn filter_groups(&self, category_id: Option<Uuid>) -> Result<Vec<FilterGroup>> {
        let endpoint = Endpoint::get("getFilterGroups", "/filter-groups").query(&ByCategory { category_id })?;
        self.query(endpoint, |rows: &Vec<FilterGroup>| list_tags(TagKind::FilterGroup, rows.iter().map(|g| &g.id)))
            .await
    }

    pub async fn filter_group(&self, id: Uuid) -> Result<FilterGroup> {
        self.query(Endpoint::get("getFilterGroup", format!("/filter-groups/{id}")), |g: &FilterGroup| {
            vec![Tag::id(TagKind::FilterGroup, g.id)]
        })
        .await
    }

    /// Bypasses the cache. Use it when a decision hinges on `is_used`, which
    /// changes as products are edited elsewhere.
    pub async fn filter_group_fresh(&self, id: Uuid) -> Result<FilterGroup> {
        self.command::<(), _>(Endpoint::get("getFilterGroup", format!("/filter-groups/{id}")), None).await
    }

    pub async fn create_filter_group(&self, body: &FilterGroupBody) -> Result<FilterGroup> {
        let endpoint = Endpoint::post("createFilterGroup", "/filter-groups").invalidates([Tag::list(TagKind::FilterGroup)]);
        self.mutate(endpoint, body).await
    }

    /// Renamed or removed filter values show up on products.
    pub async fn update_filter_group(&self, id: Uuid, body: &FilterGroupBody) -> Result<FilterGroup> {
        let endpoint = Endpoint::patch("updateFilterGroup", format!("/filter-groups/{id}"))
            .invalidates(entity_tags(TagKind::FilterGroup, id))
            .invalidates([Tag::all(TagKind::Product)]);
        self.mutate(endpoint, body).await
    }

    pub async fn delete_filter_group(&self, id: Uuid) -> Result<()> {
        let endpoint = Endpoint::delete("deleteFilterGroup", format!("/filter-groups/{id}"))
            .invalidates(entity_tags(TagKind::FilterGroup, id))
            .invalidates([Tag::all(TagKind::Product)]);
        self.discard::<()>(endpoint, None).await
    }

    pub async fn reorder_filter_groups(&self, positions: Vec<Position>) -> Result<()> {
        let endpoint = Endpoint::put("reorderFilterGroups", "/filter-groups/order")
            .invalidates([Tag::list(TagKind::FilterGroup)]);
        self.discard(endpoint, Some(&ReorderRequest { positions })).await
    }
}
