use uuid::Uuid;

use super::tags::{entity_tags, list_tags, Tag, TagKind};
use super::{AdminApi, Endpoint};
use crate::error::Result;
use crate::schema::{ProductTemplate, ProductTemplateBody};

impl AdminApi {
    pub async fn product_templates(&self) -> Result<Vec<ProductTemplate>> {
        self.query(Endpoint::get("getProductTemplates", "/product-templates"), |rows: &Vec<ProductTemplate>| {
            list_tags(TagKind::ProductTemplate, rows.iter().map(|t| &t.id))
        })
        .await
    }

    pub async fn product_template(&self, id: Uuid) -> Result<ProductTemplate> {
        self.query(Endpoint::get("getProductTemplate", format!("/product-templates/{id}")), |t: &ProductTemplate| {
            vec![Tag::id(TagKind::ProductTemplate, t.id)]
        })
        .await
    }

    pub async fn create_product_template(&self, body: &ProductTemplateBody) -> Result<ProductTemplate> {
        let endpoint = Endpoint::post("createProductTemplate", "/product-templates")
            .invalidates([Tag::list(TagKind::ProductTemplate)]);
        self.mutate(endpoint, body).await
    }

    pub async fn update_product_template(&self, id: Uuid, body: &ProductTemplateBody) -> Result<ProductTemplate> {
        let endpoint = Endpoint::patch("updateProductTemplate", format!("/product-templates/{id}"))
            .invalidates(entity_tags(TagKind::ProductTemplate, id));
        self.mutate(endpoint, body).await
    }

    pub async fn delete_product_template(&self, id: Uuid) -> Result<()> {
        let endpoint = Endpoint::delete("deleteProductTemplate", format!("/product-templates/{id}"))
            .invalidates(entity_tags(TagKind::ProductTemplate, id));
        self.discard::<()>(endpoint, None).await
    }
}
