use uuid::Uuid;

use super::tags::{entity_tags, list_tags, Tag, TagKind};
use super::{AdminApi, Endpoint};
use crate::error::Result;
use crate::schema::{Faq, FaqBody, Position, ReorderRequest};

impl AdminApi {
    pub async fn faq(&self) -> Result<Vec<Faq>> {
        self.query(Endpoint::get("getFaq", "/faq"), |rows: &Vec<Faq>| list_tags(TagKind::Faq, rows.iter().map(|f| &f.id)))
            .await
    }

    pub async fn create_faq(&self, body: &FaqBody) -> Result<Faq> {
        self.mutate(Endpoint::post("createFaq", "/faq").invalidates([Tag::list(TagKind::Faq)]), body).await
    }

    pub async fn update_faq(&self, id: Uuid, body: &FaqBody) -> Result<Faq> {
        let endpoint = Endpoint::patch("updateFaq", format!("/faq/{id}")).invalidates(entity_tags(TagKind::Faq, id));
        self.mutate(endpoint, body).await
    }

    pub async fn delete_faq(&self, id: Uuid) -> Result<()> {
        let endpoint = Endpoint::delete("deleteFaq", format!("/faq/{id}")).invalidates(entity_tags(TagKind::Faq, id));
        self.discard::<()>(endpoint, None).await
    }

    pub async fn reorder_faq(&self, positions: Vec<Position>) -> Result<()> {
        let endpoint = Endpoint::put("reorderFaq", "/faq/order").invalidates([Tag::list(TagKind::Faq)]);
        self.discard(endpoint, Some(&ReorderRequest { positions })).await
    }
}
