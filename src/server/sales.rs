use axum::{extract::{Path, Query, State}, http::StatusCode, routing::{get, patch, post}, Json, Router};
use uuid::Uuid;

use super::{ApiResult, AppState};
use crate::schema::*;

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_orders))
        .route("/orders/:id", get(get_order))
        .route("/orders/:id/status", patch(update_order_status))
        .route("/orders/:id/comment", patch(update_order_comment))
        .route("/orders/:id/events", get(list_order_events).post(create_order_event))
        .route("/preorders", get(list_preorders).post(create_preorder))
        .route("/preorders/:id", get(get_preorder).patch(update_preorder).delete(delete_preorder))
        .route("/preorders/:id/advance", post(advance_preorder))
        .route("/users", get(list_users))
        .route("/users/:id", get(get_user))
        .route("/users/:id/role", patch(update_user_role))
        .route("/metrics", get(get_metrics))
}

async fn list_orders(State(s): State<AppState>, Query(q): Query<OrderQuery>) -> ApiResult<Json<Page<Order>>> { Ok(Json(s.api.orders(&q).await?)) }
async fn get_order(State(s): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<Json<Order>> { Ok(Json(s.api.order(id).await?)) }

async fn update_order_status(State(s): State<AppState>, Path(id): Path<Uuid>, Json(body): Json<OrderStatusBody>) -> ApiResult<Json<Order>> {
    Ok(Json(s.api.update_order_status(id, body.status).await?))
}

async fn update_order_comment(State(s): State<AppState>, Path(id): Path<Uuid>, Json(body): Json<OrderCommentBody>) -> ApiResult<Json<Order>> {
    Ok(Json(s.api.update_order_comment(id, &body).await?))
}

async fn list_order_events(State(s): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<Json<Vec<OrderEvent>>> { Ok(Json(s.api.order_events(id).await?)) }

async fn create_order_event(State(s): State<AppState>, Path(id): Path<Uuid>, Json(body): Json<OrderEventBody>) -> ApiResult<(StatusCode, Json<OrderEvent>)> {
    Ok((StatusCode::CREATED, Json(s.api.create_order_event(id, &body).await?)))
}

async fn list_preorders(State(s): State<AppState>) -> ApiResult<Json<Vec<Preorder>>> { Ok(Json(s.api.preorders().await?)) }
async fn get_preorder(State(s): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<Json<Preorder>> { Ok(Json(s.api.preorder(id).await?)) }

async fn create_preorder(State(s): State<AppState>, Json(body): Json<PreorderBody>) -> ApiResult<(StatusCode, Json<Preorder>)> {
    Ok((StatusCode::CREATED, Json(s.api.create_preorder(&body).await?)))
}

async fn update_preorder(State(s): State<AppState>, Path(id): Path<Uuid>, Json(body): Json<PreorderBody>) -> ApiResult<Json<Preorder>> {
    Ok(Json(s.api.update_preorder(id, &body).await?))
}

async fn advance_preorder(State(s): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<Json<Preorder>> {
    let preorder = s.api.preorder(id).await?;
    Ok(Json(s.api.advance_preorder(&preorder).await?))
}

async fn delete_preorder(State(s): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<StatusCode> {
    s.api.delete_preorder(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_users(State(s): State<AppState>, Query(q): Query<UserQuery>) -> ApiResult<Json<Page<User>>> { Ok(Json(s.api.users(&q).await?)) }
async fn get_user(State(s): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<Json<User>> { Ok(Json(s.api.user(id).await?)) }

async fn update_user_role(State(s): State<AppState>, Path(id): Path<Uuid>, Json(body): Json<UserRoleBody>) -> ApiResult<Json<User>> {
    Ok(Json(s.api.update_user_role(id, body.role).await?))
}

async fn get_metrics(State(s): State<AppState>, Query(range): Query<MetricsQuery>) -> ApiResult<Json<Metrics>> { Ok(Json(s.api.metrics(range).await?)) }
