//! Writes on one resource refresh the cached reads of the resources that depend on it.

mod common;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use common::{spawn_backend, Backend, CATEGORY_ID, GROUP_ID, ORDER_ID, PREORDER_ID, PRODUCT_ID, PUBLICATION_ID};
use rust_decimal::Decimal;
use shop_admin::schema::*;
use shop_admin::AdminApi;
use uuid::Uuid;

fn product_body() -> ProductBody {
    ProductBody {
        name: "Mug".into(),
        sku: "MUG-1".into(),
        category_id: CATEGORY_ID,
        template_id: None,
        description: None,
        price: Decimal::new(499, 0),
        image_ids: vec![],
        characteristics: BTreeMap::new(),
        filters: vec![],
        is_active: true,
    }
}

fn publication_body() -> PublicationBody {
    PublicationBody {
        link_name: "black-mug".into(),
        title: "Black mug".into(),
        description: None,
        category_id: CATEGORY_ID,
        preorder_id: None,
        is_active: true,
        items: vec![CatalogItemBody {
            product_id: PRODUCT_ID,
            variation_label: "350 ml".into(),
            price: Decimal::new(590, 0),
            discount: None,
            quantity: 10,
            position: 0,
        }],
    }
}

fn march() -> MetricsQuery {
    MetricsQuery {
        from: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        to: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
    }
}

/// Reads the preorder list and returns how often the backend has served it.
async fn preorder_fetches(api: &AdminApi, backend: &Backend) -> usize {
    api.preorders().await.unwrap();
    backend.count("GET /preorders")
}

#[tokio::test]
async fn product_writes_refresh_publications() {
    let (backend, api) = spawn_backend().await;
    api.publications(&PublicationQuery::default()).await.unwrap();
    api.categories().await.unwrap();

    api.update_product(PRODUCT_ID, &product_body()).await.unwrap();
    api.publications(&PublicationQuery::default()).await.unwrap();
    assert_eq!(backend.count("GET /publications"), 2);

    api.delete_product(PRODUCT_ID).await.unwrap();
    api.publications(&PublicationQuery::default()).await.unwrap();
    assert_eq!(backend.count("GET /publications"), 3);

    api.categories().await.unwrap();
    assert_eq!(backend.count("GET /categories"), 1);
}

#[tokio::test]
async fn filter_group_update_refreshes_products() {
    let (backend, api) = spawn_backend().await;
    api.products(&ProductQuery::default()).await.unwrap();
    api.product(PRODUCT_ID).await.unwrap();

    let body = FilterGroupBody {
        name: "Color".into(),
        category_id: CATEGORY_ID,
        filters: vec![FilterValueBody { id: Some(Uuid::from_u128(0x2223)), value: "Black".into() }],
    };
    api.update_filter_group(GROUP_ID, &body).await.unwrap();

    api.products(&ProductQuery::default()).await.unwrap();
    api.product(PRODUCT_ID).await.unwrap();
    assert_eq!(backend.count("GET /products"), 2);
    assert_eq!(backend.count(&format!("GET /products/{PRODUCT_ID}")), 2);
}

#[tokio::test]
async fn publication_writes_refresh_preorders() {
    let (backend, api) = spawn_backend().await;
    assert_eq!(preorder_fetches(&api, &backend).await, 1);

    api.update_publication(PUBLICATION_ID, &publication_body()).await.unwrap();
    assert_eq!(preorder_fetches(&api, &backend).await, 2);

    api.reorder_publication_items(PUBLICATION_ID, vec![Position { id: Uuid::new_v4(), position: 0 }])
        .await
        .unwrap();
    assert_eq!(preorder_fetches(&api, &backend).await, 3);

    api.set_publication_active(PUBLICATION_ID, false).await.unwrap();
    assert_eq!(preorder_fetches(&api, &backend).await, 4);
}

#[tokio::test]
async fn order_writes_refresh_metrics_and_event_log() {
    let (backend, api) = spawn_backend().await;
    let events = format!("GET /orders/{ORDER_ID}/events");
    api.metrics(march()).await.unwrap();
    api.order_events(ORDER_ID).await.unwrap();

    api.update_order_status(ORDER_ID, OrderStatus::Assembling).await.unwrap();
    api.metrics(march()).await.unwrap();
    api.order_events(ORDER_ID).await.unwrap();
    assert_eq!(backend.count("GET /metrics"), 2);
    assert_eq!(backend.count(&events), 2);

    let event = OrderEventBody { status: OrderStatus::Assembling, comment: Some("Packed".into()) };
    api.create_order_event(ORDER_ID, &event).await.unwrap();
    api.metrics(march()).await.unwrap();
    api.order_events(ORDER_ID).await.unwrap();
    assert_eq!(backend.count("GET /metrics"), 3);
    assert_eq!(backend.count(&events), 3);

    api.update_order_comment(ORDER_ID, &OrderCommentBody { comment: "Call first".into() }).await.unwrap();
    api.metrics(march()).await.unwrap();
    api.order_events(ORDER_ID).await.unwrap();
    assert_eq!(backend.count("GET /metrics"), 3);
    assert_eq!(backend.count(&events), 4);
}

#[tokio::test]
async fn preorder_writes_refresh_publication_list() {
    let (backend, api) = spawn_backend().await;
    api.publications(&PublicationQuery::default()).await.unwrap();

    let body = PreorderBody { title: "Spring batch".into(), expected_at: None, publications: vec![PUBLICATION_ID] };
    api.update_preorder(PREORDER_ID, &body).await.unwrap();
    api.publications(&PublicationQuery::default()).await.unwrap();
    assert_eq!(backend.count("GET /publications"), 2);

    let current = api.preorder(PREORDER_ID).await.unwrap();
    api.advance_preorder(&current).await.unwrap();
    api.publications(&PublicationQuery::default()).await.unwrap();
    assert_eq!(backend.count("GET /publications"), 3);
}
