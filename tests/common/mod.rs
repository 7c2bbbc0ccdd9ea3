//! In-process stand-in for the shop backend.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use parking_lot::Mutex;
use serde_json::{json, Value};
use shop_admin::{AdminApi, AdminConfig};
use uuid::Uuid;

pub const CATEGORY_ID: Uuid = Uuid::from_u128(0x1111);
pub const GROUP_ID: Uuid = Uuid::from_u128(0x2222);
pub const ORDER_ID: Uuid = Uuid::from_u128(0x3333);
pub const PREORDER_ID: Uuid = Uuid::from_u128(0x4444);
pub const PRODUCT_ID: Uuid = Uuid::from_u128(0x5555);
pub const PUBLICATION_ID: Uuid = Uuid::from_u128(0x6666);
pub const FAQ_ID: Uuid = Uuid::from_u128(0x7777);

const CREATED_AT: &str = "2024-03-01T10:00:00Z";

#[derive(Clone)]
pub struct Backend {
    pub calls: Arc<Mutex<Vec<String>>>,
    categories: Arc<Mutex<Vec<String>>>,
    list_delay: Arc<Mutex<Duration>>,
    group_used: Arc<AtomicBool>,
}

impl Default for Backend {
    fn default() -> Self {
        Self {
            calls: Arc::default(),
            categories: Arc::new(Mutex::new(vec!["Mugs".to_string()])),
            list_delay: Arc::default(),
            group_used: Arc::new(AtomicBool::new(true)),
        }
    }
}

impl Backend {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls.lock().iter().filter(|c| c.as_str() == call).count()
    }

    /// Delay applied to `GET /categories` after the response is snapshotted.
    pub fn set_list_delay(&self, delay: Duration) {
        *self.list_delay.lock() = delay;
    }

    pub fn set_group_used(&self, used: bool) {
        self.group_used.store(used, Ordering::SeqCst);
    }

    fn record(&self, method: &Method, uri: &Uri) {
        self.calls.lock().push(format!("{} {}", method, uri.path()));
    }
}

pub fn category(id: Uuid, name: &str) -> Value {
    json!({"id": id, "name": name, "slug": "mugs", "position": 0, "created_at": CREATED_AT})
}

pub fn filter_group(is_used: bool) -> Value {
    json!({
        "id": GROUP_ID, "name": "Color", "category_id": CATEGORY_ID, "position": 0,
        "filters": [{"id": Uuid::from_u128(0x2223), "value": "Black"}], "is_used": is_used
    })
}

pub fn preorder(status: &str) -> Value {
    json!({"id": PREORDER_ID, "title": "Spring batch", "status": status, "publications": [], "created_at": CREATED_AT})
}

fn product() -> Value {
    json!({
        "id": PRODUCT_ID, "name": "Mug", "sku": "MUG-1", "category_id": CATEGORY_ID, "price": 499.0,
        "is_active": true, "created_at": CREATED_AT, "updated_at": CREATED_AT
    })
}

fn publication() -> Value {
    json!({
        "id": PUBLICATION_ID, "link_name": "black-mug", "title": "Black mug", "category_id": CATEGORY_ID,
        "is_active": true, "items": [], "created_at": CREATED_AT
    })
}

fn order() -> Value {
    json!({
        "id": ORDER_ID, "number": "A-1001", "user_id": Uuid::from_u128(0x8888), "status": "paid", "items": [],
        "total": 990.0, "created_at": CREATED_AT,
        "delivery": {"kind": "pickup", "recipient_name": "Анна", "recipient_phone": "+79990001122"}
    })
}

fn order_event() -> Value {
    json!({"id": Uuid::from_u128(0x3334), "order_id": ORDER_ID, "status": "paid", "created_at": CREATED_AT})
}

fn page(item: Value) -> Value {
    json!({"items": [item], "total": 1, "page": 1, "per_page": 20})
}

/// Canned replies for routes that only need to answer with a valid shape.
fn fixture(method: &Method, path: &str) -> Option<Value> {
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    let reply = match (method.as_str(), segments.as_slice()) {
        ("GET", ["products"]) => page(product()),
        (_, ["products", _]) | ("PUT", ["products", _, "images", "order"]) => product(),
        ("GET", ["publications"]) => page(publication()),
        (_, ["publications", ..]) => publication(),
        ("GET", ["preorders"]) => json!([preorder("funding")]),
        (_, ["preorders", _]) => preorder("shipping"),
        ("GET", ["orders", _]) | ("PATCH", ["orders", _, "status" | "comment"]) => order(),
        ("GET", ["orders", _, "events"]) => json!([order_event()]),
        ("POST", ["orders", _, "events"]) => order_event(),
        ("GET", ["metrics"]) => json!({
            "orders_count": 12, "revenue": 15400.0, "average_check": 1283.33,
            "new_users": 3, "active_publications": 7
        }),
        ("DELETE", ["faq", _]) => json!({"id": FAQ_ID, "question": "Shipping?", "answer": "Worldwide", "position": 0}),
        _ => return None,
    };
    Some(reply)
}

async fn fallback(State(b): State<Backend>, method: Method, uri: Uri) -> Response {
    b.record(&method, &uri);
    match fixture(&method, uri.path()) {
        Some(reply) => Json(reply).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({"message": "No such route"}))).into_response(),
    }
}

async fn categories(State(b): State<Backend>, method: Method, uri: Uri) -> Json<Value> {
    b.record(&method, &uri);
    let names = b.categories.lock().clone();
    let delay = *b.list_delay.lock();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    let rows: Vec<Value> = names
        .iter()
        .enumerate()
        .map(|(i, name)| category(Uuid::from_u128(CATEGORY_ID.as_u128() + i as u128), name))
        .collect();
    Json(Value::Array(rows))
}

async fn create_category(State(b): State<Backend>, method: Method, uri: Uri, Json(body): Json<Value>) -> impl IntoResponse {
    b.record(&method, &uri);
    if body["slug"] == "taken" {
        return (StatusCode::CONFLICT, Json(json!({"message": "Slug is already taken"})));
    }
    let name = body["name"].as_str().unwrap_or_default().to_string();
    let id = {
        let mut names = b.categories.lock();
        names.push(name.clone());
        Uuid::from_u128(CATEGORY_ID.as_u128() + names.len() as u128 - 1)
    };
    (StatusCode::CREATED, Json(category(id, &name)))
}

async fn category_item(State(b): State<Backend>, method: Method, uri: Uri, Path(id): Path<Uuid>) -> impl IntoResponse {
    b.record(&method, &uri);
    if id != CATEGORY_ID {
        return (StatusCode::NOT_FOUND, Json(json!({"detail": "Category not found"}))).into_response();
    }
    if method == Method::DELETE {
        return StatusCode::NO_CONTENT.into_response();
    }
    Json(category(CATEGORY_ID, "Mugs")).into_response()
}

async fn filter_group_item(State(b): State<Backend>, method: Method, uri: Uri) -> Json<Value> {
    b.record(&method, &uri);
    Json(filter_group(b.group_used.load(Ordering::SeqCst)))
}

async fn waybill(State(b): State<Backend>, method: Method, uri: Uri) -> impl IntoResponse {
    b.record(&method, &uri);
    (StatusCode::NOT_FOUND, Json(json!({"message": "No waybill"})))
}

async fn create_waybill(State(b): State<Backend>, method: Method, uri: Uri, Json(body): Json<Value>) -> impl IntoResponse {
    b.record(&method, &uri);
    (StatusCode::CREATED, Json(json!({
        "uuid": Uuid::from_u128(0x9999), "order_id": body["order_id"], "status": "ACCEPTED",
        "tariff_code": body["tariff_code"], "delivery_point": body["delivery_point"],
        "packages": body["packages"], "created_at": "2024-03-02T10:00:00Z"
    })))
}

async fn preorder_status(State(b): State<Backend>, method: Method, uri: Uri, Json(body): Json<Value>) -> Json<Value> {
    b.record(&method, &uri);
    Json(preorder(body["status"].as_str().unwrap_or("funding")))
}

async fn cdek_service(State(b): State<Backend>, method: Method, uri: Uri) -> Json<Value> {
    b.record(&method, &uri);
    Json(json!({"query": uri.query(), "offices": []}))
}

async fn broken(State(b): State<Backend>, method: Method, uri: Uri) -> impl IntoResponse {
    b.record(&method, &uri);
    (StatusCode::OK, "<html>maintenance</html>")
}

pub fn router(backend: Backend) -> Router {
    Router::new()
        .route("/categories", get(categories).post(create_category))
        .route("/categories/:id", get(category_item).patch(category_item).delete(category_item))
        .route("/filter-groups/:id", get(filter_group_item).patch(filter_group_item))
        .route("/orders/:id/waybill", get(waybill))
        .route("/cdek/waybills", post(create_waybill))
        .route("/cdek/service", get(cdek_service))
        .route("/preorders/:id/status", patch(preorder_status))
        .route("/faq", get(broken))
        .fallback(fallback)
        .with_state(backend)
}

/// Starts the fake backend and returns it with its base URL.
pub async fn start_backend() -> (Backend, String) {
    let backend = Backend::default();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    let app = router(backend.clone());
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve backend") });
    (backend, format!("http://{addr}"))
}

pub async fn spawn_backend() -> (Backend, AdminApi) {
    let (backend, url) = start_backend().await;
    (backend, AdminApi::new(&config_for(&url)).expect("client"))
}

pub fn config_for(backend_url: &str) -> AdminConfig {
    AdminConfig {
        backend_url: backend_url.to_string(),
        request_timeout: Duration::from_secs(5),
        cache_keep_for: Duration::from_secs(60),
        ..Default::default()
    }
}
