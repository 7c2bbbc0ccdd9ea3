use uuid::Uuid;

use super::tags::{entity_tags, list_tags, Tag, TagKind};
use super::{AdminApi, Endpoint};
use crate::error::{AdminError, Result};
use crate::schema::{Preorder, PreorderBody, PreorderStatusBody};

impl AdminApi {
    pub async fn preorders(&self) -> Result<Vec<Preorder>> {
        self.query(Endpoint::get("getPreorders", "/preorders"), |rows: &Vec<Preorder>| {
            list_tags(TagKind::Preorder, rows.iter().map(|p| &p.id))
        })
        .await
    }

    pub async fn preorder(&self, id: Uuid) -> Result<Preorder> {
        self.query(Endpoint::get("getPreorder", format!("/preorders/{id}")), |p: &Preorder| {
            vec![Tag::id(TagKind::Preorder, p.id)]
        })
        .await
    }

    pub async fn create_preorder(&self, body: &PreorderBody) -> Result<Preorder> {
        let endpoint = Endpoint::post("createPreorder", "/preorders")
            .invalidates([Tag::list(TagKind::Preorder), Tag::list(TagKind::Publication)]);
        self.mutate(endpoint, body).await
    }

    pub async fn update_preorder(&self, id: Uuid, body: &PreorderBody) -> Result<Preorder> {
        let endpoint = preorder_write(Endpoint::patch("updatePreorder", format!("/preorders/{id}")), id);
        self.mutate(endpoint, body).await
    }

    /// Requests the next stage for `preorder`. Finished preorders are rejected without a call.
    pub async fn advance_preorder(&self, preorder: &Preorder) -> Result<Preorder> {
        let status = preorder
            .status
            .next()
            .ok_or_else(|| AdminError::form("status", "Preorder is already finished"))?;
        let id = preorder.id;
        tracing::info!(%id, ?status, "advancing preorder");
        let endpoint = preorder_write(Endpoint::patch("advancePreorder", format!("/preorders/{id}/status")), id);
        self.command(endpoint, Some(&PreorderStatusBody { status })).await
    }

    pub async fn delete_preorder(&self, id: Uuid) -> Result<()> {
        let endpoint = preorder_write(Endpoint::delete("deletePreorder", format!("/preorders/{id}")), id);
        self.discard::<()>(endpoint, None).await
    }
}

fn preorder_write(endpoint: Endpoint, id: Uuid) -> Endpoint {
    endpoint
        .invalidates(entity_tags(TagKind::Preorder, id))
        .invalidates([Tag::list(TagKind::Publication)])
}
