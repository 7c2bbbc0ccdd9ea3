use uuid::Uuid;

use super::tags::{entity_tags, list_tags, Tag, TagKind};
use super::{AdminApi, Endpoint};
use crate::error::Result;
use crate::schema::{Order, OrderCommentBody, OrderEvent, OrderEventBody, OrderQuery, OrderStatus, OrderStatusBody, Page};

impl AdminApi {
    pub async fn orders(&self, filters: &OrderQuery) -> Result<Page<Order>> {
        let endpoint = Endpoint::get("getOrders", "/orders").query(filters)?;
        self.query(endpoint, |page: &Page<Order>| list_tags(TagKind::Order, page.items.iter().map(|o| &o.id)))
            .await
    }

    pub async fn order(&self, id: Uuid) -> Result<Order> {
        self.query(Endpoint::get("getOrder", format!("/orders/{id}")), |o: &Order| vec![Tag::id(TagKind::Order, o.id)])
            .await
    }

    /// Asks the backend to move the order; it decides whether the transition is allowed.
    pub async fn update_order_status(&self, id: Uuid, status: OrderStatus) -> Result<Order> {
        let endpoint = order_write(Endpoint::patch("updateOrderStatus", format!("/orders/{id}/status")), id)
            .invalidates([Tag::all(TagKind::Metrics)]);
        self.command(endpoint, Some(&OrderStatusBody { status })).await
    }

    pub async fn update_order_comment(&self, id: Uuid, body: &OrderCommentBody) -> Result<Order> {
        let endpoint = order_write(Endpoint::patch("updateOrderComment", format!("/orders/{id}/comment")), id);
        self.mutate(endpoint, body).await
    }

    pub async fn order_events(&self, order_id: Uuid) -> Result<Vec<OrderEvent>> {
        self.query(Endpoint::get("getOrderEvents", format!("/orders/{order_id}/events")), move |_: &Vec<OrderEvent>| {
            vec![Tag::id(TagKind::OrderEvent, order_id)]
        })
        .await
    }

    pub async fn create_order_event(&self, order_id: Uuid, body: &OrderEventBody) -> Result<OrderEvent> {
        let endpoint = order_write(Endpoint::post("createOrderEvent", format!("/orders/{order_id}/events")), order_id)
            .invalidates([Tag::all(TagKind::Metrics)]);
        self.mutate(endpoint, body).await
    }
}

/// An order write changes the order row, its list and its event history.
fn order_write(endpoint: Endpoint, id: Uuid) -> Endpoint {
    endpoint
        .invalidates(entity_tags(TagKind::Order, id))
        .invalidates([Tag::id(TagKind::OrderEvent, id)])
}
