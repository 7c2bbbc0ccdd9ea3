use uuid::Uuid;

use super::tags::{entity_tags, list_tags, Tag, TagKind};
use super::{AdminApi, Endpoint};
use crate::error::Result;
use crate::schema::{ActivationBody, Page, Position, Publication, PublicationBody, PublicationQuery, ReorderRequest};

impl AdminApi {
    pub async fn publications(&self, filters: &PublicationQuery) -> Result<Page<Publication>> {
        let endpoint = Endpoint::get("getPublications", "/publications").query(filters)?;
        self.query(endpoint, |page: &Page<Publication>| {
            list_tags(TagKind::Publication, page.items.iter().map(|p| &p.id))
        })
        .await
    }

    pub async fn publication(&self, id: Uuid) -> Result<Publication> {
        self.query(Endpoint::get("getPublication", format!("/publications/{id}")), |p: &Publication| {
            vec![Tag::id(TagKind::Publication, p.id)]
        })
        .await
    }

    pub async fn create_publication(&self, body: &PublicationBody) -> Result<Publication> {
        let endpoint = Endpoint::post("createPublication", "/publications")
            .invalidates([Tag::list(TagKind::Publication), Tag::all(TagKind::Preorder)]);
        self.mutate(endpoint, body).await
    }

    pub async fn update_publication(&self, id: Uuid, body: &PublicationBody) -> Result<Publication> {
        let endpoint = Endpoint::patch("updatePublication", format!("/publications/{id}"));
        self.mutate(publication_write(endpoint, id), body).await
    }

    pub async fn set_publication_active(&self, id: Uuid, is_active: bool) -> Result<Publication> {
        let endpoint = Endpoint::patch("setPublicationActive", format!("/publications/{id}/active"));
        let endpoint = publication_write(endpoint, id).invalidates([Tag::all(TagKind::Metrics)]);
        self.command(endpoint, Some(&ActivationBody { is_active })).await
    }

    pub async fn delete_publication(&self, id: Uuid) -> Result<()> {
        let endpoint = publication_write(Endpoint::delete("deletePublication", format!("/publications/{id}")), id);
        self.discard::<()>(endpoint, None).await
    }

    pub async fn reorder_publication_items(&self, id: Uuid, positions: Vec<Position>) -> Result<Publication> {
        let endpoint = publication_write(Endpoint::put("reorderPublicationItems", format!("/publications/{id}/items/order")), id);
        self.command(endpoint, Some(&ReorderRequest { positions })).await
    }
}

/// Preorders list their publications, so any publication write refreshes them.
fn publication_write(endpoint: Endpoint, id: Uuid) -> Endpoint {
    endpoint
        .invalidates(entity_tags(TagKind::Publication, id))
        .invalidates([Tag::all(TagKind::Preorder)])
}
