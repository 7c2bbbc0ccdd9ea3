//! Dashboard HTTP surface. Every route forwards to the backend through
//! [`AdminApi`] and answers failures with a toast payload.

use std::sync::Arc;

use axum::{http::{HeaderValue, StatusCode}, response::{IntoResponse, Response}, routing::get, Json, Router};
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::api::AdminApi;
use crate::config::AdminConfig;
use crate::error::AdminError;
use crate::schema::Position;
use crate::widgets::reorder::positions;

mod catalog;
mod cdek;
mod content;
mod sales;

#[derive(Clone)]
pub struct AppState {
    pub api: Arc<AdminApi>,
    pub config: Arc<AdminConfig>,
}

impl AppState {
    pub fn new(config: AdminConfig) -> crate::Result<Self> {
        let api = AdminApi::new(&config)?;
        Ok(Self { api: Arc::new(api), config: Arc::new(config) })
    }
}

pub type ApiResult<T> = Result<T, AdminError>;

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status()).unwrap_or(StatusCode::BAD_GATEWAY);
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(self.toast())).into_response()
    }
}

/// New order of a sortable list, as ids top to bottom.
#[derive(Debug, Deserialize)]
pub struct OrderedIds {
    pub ids: Vec<Uuid>,
}

impl OrderedIds {
    pub fn positions(&self) -> Vec<Position> {
        positions(&self.ids, |id| *id)
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = match state.config.allowed_origin.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => CorsLayer::new().allow_origin(origin).allow_methods(tower_http::cors::Any).allow_headers(tower_http::cors::Any),
        _ => CorsLayer::permissive(),
    };

    let api = Router::new()
        .merge(catalog::routes())
        .merge(sales::routes())
        .merge(cdek::routes())
        .merge(content::routes());

    Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": "shop-admin"})) }))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
