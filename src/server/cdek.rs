use std::collections::BTreeMap;

use axum::{extract::{Path, Query, State}, http::StatusCode, routing::{get, post}, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::{ApiResult, AppState};
use crate::error::AdminError;
use crate::schema::{CdekWaybill, Package, PrintForm, Recipient, WaybillBody};
use crate::widgets::cdek::{WidgetChoice, WidgetConfig, SCRIPT_URL};

const SERVICE_PATH: &str = "/api/cdek/service";

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders/:id/waybill", get(get_waybill).post(create_waybill_from_widget).delete(delete_waybill))
        .route("/cdek/waybills", post(create_waybill))
        .route("/cdek/waybills/:uuid/print", get(print_waybill))
        .route("/cdek/widget", get(widget))
        .route("/cdek/service", get(service).post(service_post))
}

async fn get_waybill(State(s): State<AppState>, Path(order_id): Path<Uuid>) -> ApiResult<Json<Option<CdekWaybill>>> {
    Ok(Json(s.api.waybill(order_id).await?))
}

async fn create_waybill(State(s): State<AppState>, Json(body): Json<WaybillBody>) -> ApiResult<(StatusCode, Json<CdekWaybill>)> {
    Ok((StatusCode::CREATED, Json(s.api.create_waybill(&body).await?)))
}

#[derive(Debug, Deserialize)]
struct WidgetWaybill {
    choice: WidgetChoice,
    recipient: Recipient,
    packages: Vec<Package>,
}

/// Issues a waybill straight from the widget's `onChoose` payload.
async fn create_waybill_from_widget(
    State(s): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(req): Json<WidgetWaybill>,
) -> ApiResult<(StatusCode, Json<CdekWaybill>)> {
    let body = req.choice.into_waybill(order_id, req.recipient, req.packages)?;
    Ok((StatusCode::CREATED, Json(s.api.create_waybill(&body).await?)))
}

async fn delete_waybill(State(s): State<AppState>, Path(order_id): Path<Uuid>) -> ApiResult<StatusCode> {
    let waybill = s
        .api
        .waybill(order_id)
        .await?
        .ok_or_else(|| AdminError::Api { status: 404, message: "Order has no waybill".to_string() })?;
    s.api.delete_waybill(&waybill).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn print_waybill(State(s): State<AppState>, Path(uuid): Path<Uuid>) -> ApiResult<Json<PrintForm>> {
    Ok(Json(s.api.waybill_print_form(uuid).await?))
}

#[derive(Debug, Default, Deserialize)]
struct WidgetParams {
    #[serde(default)]
    packages: Option<String>,
}

#[derive(Debug, Serialize)]
struct WidgetBootstrap {
    script_url: &'static str,
    config: WidgetConfig,
}

/// Script URL and options for the map widget. `packages` is a JSON array of package dimensions.
async fn widget(State(s): State<AppState>, Query(p): Query<WidgetParams>) -> ApiResult<Json<Value>> {
    let packages: Vec<Package> = match p.packages.as_deref() {
        Some(raw) => serde_json::from_str(raw).map_err(|e| AdminError::form("packages", e.to_string()))?,
        None => Vec::new(),
    };
    let config = WidgetConfig::new(&s.config.cdek, SERVICE_PATH, &packages)?;
    let bootstrap = WidgetBootstrap { script_url: SCRIPT_URL, config };
    serde_json::to_value(bootstrap).map(Json).map_err(|e| AdminError::Decode(e.to_string()))
}

async fn service(State(s): State<AppState>, Query(q): Query<BTreeMap<String, String>>) -> ApiResult<Json<Value>> {
    Ok(Json(s.api.cdek_service(q.into_iter().collect(), None).await?))
}

async fn service_post(State(s): State<AppState>, Query(q): Query<BTreeMap<String, String>>, Json(body): Json<Value>) -> ApiResult<Json<Value>> {
    Ok(Json(s.api.cdek_service(q.into_iter().collect(), Some(body)).await?))
}
