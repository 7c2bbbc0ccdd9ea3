use uuid::Uuid;

use super::tags::{entity_tags, list_tags, Tag, TagKind};
use super::{AdminApi, Endpoint};
use crate::error::Result;
use crate::schema::{Page, Position, Product, ProductBody, ProductQuery, ReorderRequest};

impl AdminApi {
    pub async fn products(&self, filters: &ProductQuery) -> Result<Page<Product>> {
        let endpoint = Endpoint::get("getProducts", "/products").query(filters)?;
        self.query(endpoint, |page: &Page<Product>| {
            list_tags(TagKind::Product, page.items.iter().map(|p| &p.id))
        })
        .await
    }

    pub async fn product(&self, id: Uuid) -> Result<Product> {
        self.query(Endpoint::get("getProduct", format!("/products/{id}")), |p: &Product| {
            vec![Tag::id(TagKind::Product, p.id)]
        })
        .await
    }

    pub async fn create_product(&self, body: &ProductBody) -> Result<Product> {
        let endpoint = Endpoint::post("createProduct", "/products").invalidates([Tag::list(TagKind::Product)]);
        self.mutate(endpoint, body).await
    }

    /// Publications embed product data, so every cached publication is dropped as well.
    pub async fn update_product(&self, id: Uuid, body: &ProductBody) -> Result<Product> {
        let endpoint = Endpoint::patch("updateProduct", format!("/products/{id}"))
            .invalidates(entity_tags(TagKind::Product, id))
            .invalidates([Tag::all(TagKind::Publication)]);
        self.mutate(endpoint, body).await
    }

    pub async fn delete_product(&self, id: Uuid) -> Result<()> {
        let endpoint = Endpoint::delete("deleteProduct", format!("/products/{id}"))
            .invalidates(entity_tags(TagKind::Product, id))
            .invalidates([Tag::all(TagKind::Publication)]);
        self.discard::<()>(endpoint, None).await
    }

    pub async fn reorder_product_images(&self, id: Uuid, positions: Vec<Position>) -> Result<Product> {
        let endpoint = Endpoint::put("reorderProductImages", format!("/products/{id}/images/order"))
            .invalidates([Tag::id(TagKind::Product, id)]);
        self.command(endpoint, Some(&ReorderRequest { positions })).await
    }
}
