mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{spawn_backend, CATEGORY_ID, FAQ_ID, ORDER_ID, PREORDER_ID};
use shop_admin::schema::{CategoryBody, Package, Preorder, PreorderStatus, Recipient, WaybillBody};
use shop_admin::AdminError;
use uuid::Uuid;

fn category_body(slug: &str) -> CategoryBody {
    CategoryBody { name: "Mugs".into(), slug: slug.into(), ..Default::default() }
}

#[tokio::test]
async fn queries_are_cached_until_a_mutation_invalidates_them() {
    let (backend, api) = spawn_backend().await;

    assert_eq!(api.categories().await.unwrap().len(), 1);
    assert_eq!(api.categories().await.unwrap()[0].name, "Mugs");
    assert_eq!(backend.count("GET /categories"), 1);

    api.create_category(&category_body("cups")).await.unwrap();
    api.categories().await.unwrap();
    assert_eq!(backend.count("GET /categories"), 2);
}

#[tokio::test]
async fn list_fetched_across_a_mutation_is_not_cached() {
    let (backend, api) = spawn_backend().await;
    let api = Arc::new(api);
    backend.set_list_delay(Duration::from_millis(300));

    let in_flight = tokio::spawn({
        let api = Arc::clone(&api);
        async move { api.categories().await }
    });
    tokio::time::sleep(Duration::from_millis(50)).await;
    backend.set_list_delay(Duration::ZERO);
    api.create_category(&CategoryBody { name: "New".into(), slug: "new".into(), ..Default::default() })
        .await
        .unwrap();

    let old: Vec<String> = in_flight.await.unwrap().unwrap().into_iter().map(|c| c.name).collect();
    assert_eq!(old, ["Mugs"]);

    let fresh: Vec<String> = api.categories().await.unwrap().into_iter().map(|c| c.name).collect();
    assert_eq!(fresh, ["Mugs", "New"]);
    assert_eq!(backend.count("GET /categories"), 2);
}

#[tokio::test]
async fn update_evicts_only_matching_entries() {
    let (backend, api) = spawn_backend().await;

    api.categories().await.unwrap();
    api.category(CATEGORY_ID).await.unwrap();
    api.update_category(CATEGORY_ID, &category_body("mugs")).await.unwrap();

    api.category(CATEGORY_ID).await.unwrap();
    api.categories().await.unwrap();
    let path = format!("GET /categories/{CATEGORY_ID}");
    assert_eq!(backend.count(&path), 2);
    assert_eq!(backend.count("GET /categories"), 2);
}

#[tokio::test]
async fn invalid_body_never_reaches_backend() {
    let (backend, api) = spawn_backend().await;

    let err = api.create_category(&category_body("Not A Slug")).await.unwrap_err();
    let fields = err.field_errors().expect("field errors");
    assert!(fields.contains("slug"));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn backend_errors_carry_server_message() {
    let (_backend, api) = spawn_backend().await;

    match api.create_category(&category_body("taken")).await {
        Err(AdminError::Api { status, message }) => {
            assert_eq!(status, 409);
            assert_eq!(message, "Slug is already taken");
        }
        other => panic!("expected api error, got {other:?}"),
    }

    let err = api.category(Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err.toast().message, "Category not found");
}

#[tokio::test]
async fn failed_mutation_keeps_cache() {
    let (backend, api) = spawn_backend().await;

    api.categories().await.unwrap();
    assert!(api.create_category(&category_body("taken")).await.is_err());
    api.categories().await.unwrap();
    assert_eq!(backend.count("GET /categories"), 1);
}

#[tokio::test]
async fn delete_accepts_empty_response() {
    let (backend, api) = spawn_backend().await;
    api.delete_category(CATEGORY_ID).await.unwrap();
    assert_eq!(backend.count(&format!("DELETE /categories/{CATEGORY_ID}")), 1);
}

#[tokio::test]
async fn delete_ignores_returned_entity() {
    let (backend, api) = spawn_backend().await;
    api.delete_faq(FAQ_ID).await.unwrap();
    assert_eq!(backend.count(&format!("DELETE /faq/{FAQ_ID}")), 1);
}

#[tokio::test]
async fn undecodable_response_is_reported() {
    let (_backend, api) = spawn_backend().await;
    let err = api.faq().await.unwrap_err();
    assert!(matches!(err, AdminError::Decode(_)));
    assert_eq!(err.status(), 502);
}

#[tokio::test]
async fn missing_waybill_is_none_until_one_is_issued() {
    let (backend, api) = spawn_backend().await;

    assert!(api.waybill(ORDER_ID).await.unwrap().is_none());

    let body = WaybillBody {
        order_id: ORDER_ID,
        tariff_code: 136,
        delivery_point: Some("MSK1".into()),
        to_address: None,
        recipient: Recipient { name: "Анна".into(), phone: "+79990001122".into() },
        packages: vec![Package { weight: 400, length: 10, width: 10, height: 10 }],
    };
    let waybill = api.create_waybill(&body).await.unwrap();
    assert_eq!(waybill.order_id, ORDER_ID);
    assert_eq!(waybill.delivery_point.as_deref(), Some("MSK1"));
    assert_eq!(backend.count("POST /cdek/waybills"), 1);
}

#[tokio::test]
async fn finished_preorder_is_not_advanced() {
    let (backend, api) = spawn_backend().await;

    let preorder = api.preorder(PREORDER_ID).await.unwrap();
    assert_eq!(preorder.status, PreorderStatus::Shipping);
    let advanced = api.advance_preorder(&preorder).await.unwrap();
    assert_eq!(advanced.status, PreorderStatus::Finished);

    let finished = Preorder { status: PreorderStatus::Finished, ..preorder };
    assert!(matches!(api.advance_preorder(&finished).await, Err(AdminError::Form { .. })));
    assert_eq!(backend.count(&format!("PATCH /preorders/{PREORDER_ID}/status")), 1);
}

#[tokio::test]
async fn widget_service_calls_are_relayed_with_query() {
    let (_backend, api) = spawn_backend().await;
    let reply = api
        .cdek_service(vec![("action".into(), "offices".into()), ("city_code".into(), "44".into())], None)
        .await
        .unwrap();
    assert_eq!(reply["query"], "action=offices&city_code=44");
}
