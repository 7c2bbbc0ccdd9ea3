use axum::{extract::{Path, Query, State}, http::StatusCode, routing::{get, patch, put}, Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use super::{ApiResult, AppState, OrderedIds};
use crate::schema::*;

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/:id", get(get_category).patch(update_category).delete(delete_category))
        .route("/products", get(list_products).post(create_product))
        .route("/products/:id", get(get_product).patch(update_product).delete(delete_product))
        .route("/products/:id/images/order", put(reorder_product_images))
        .route("/product-templates", get(list_templates).post(create_template))
        .route("/product-templates/:id", get(get_template).patch(update_template).delete(delete_template))
        .route("/filter-groups", get(list_filter_groups).post(create_filter_group))
        .route("/filter-groups/order", put(reorder_filter_groups))
        .route("/filter-groups/:id", get(get_filter_group).patch(update_filter_group).delete(delete_filter_group))
        .route("/publications", get(list_publications).post(create_publication))
        .route("/publications/:id", get(get_publication).patch(update_publication).delete(delete_publication))
        .route("/publications/:id/active", patch(set_publication_active))
        .route("/publications/:id/items/order", put(reorder_publication_items))
}

async fn list_categories(State(s): State<AppState>) -> ApiResult<Json<Vec<Category>>> { Ok(Json(s.api.categories().await?)) }
async fn get_category(State(s): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<Json<Category>> { Ok(Json(s.api.category(id).await?)) }

async fn create_category(State(s): State<AppState>, Json(body): Json<CategoryBody>) -> ApiResult<(StatusCode, Json<Category>)> {
    Ok((StatusCode::CREATED, Json(s.api.create_category(&body).await?)))
}

async fn update_category(State(s): State<AppState>, Path(id): Path<Uuid>, Json(body): Json<CategoryBody>) -> ApiResult<Json<Category>> {
    Ok(Json(s.api.update_category(id, &body).await?))
}

async fn delete_category(State(s): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<StatusCode> {
    s.api.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_products(State(s): State<AppState>, Query(q): Query<ProductQuery>) -> ApiResult<Json<Page<Product>>> { Ok(Json(s.api.products(&q).await?)) }
async fn get_product(State(s): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<Json<Product>> { Ok(Json(s.api.product(id).await?)) }

async fn create_product(State(s): State<AppState>, Json(body): Json<ProductBody>) -> ApiResult<(StatusCode, Json<Product>)> {
    Ok((StatusCode::CREATED, Json(s.api.create_product(&body).await?)))
}

async fn update_product(State(s): State<AppState>, Path(id): Path<Uuid>, Json(body): Json<ProductBody>) -> ApiResult<Json<Product>> {
    Ok(Json(s.api.update_product(id, &body).await?))
}

async fn delete_product(State(s): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<StatusCode> {
    s.api.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn reorder_product_images(State(s): State<AppState>, Path(id): Path<Uuid>, Json(order): Json<OrderedIds>) -> ApiResult<Json<Product>> {
    Ok(Json(s.api.reorder_product_images(id, order.positions()).await?))
}

async fn list_templates(State(s): State<AppState>) -> ApiResult<Json<Vec<ProductTemplate>>> { Ok(Json(s.api.product_templates().await?)) }
async fn get_template(State(s): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<Json<ProductTemplate>> { Ok(Json(s.api.product_template(id).await?)) }

async fn create_template(State(s): State<AppState>, Json(body): Json<ProductTemplateBody>) -> ApiResult<(StatusCode, Json<ProductTemplate>)> {
    Ok((StatusCode::CREATED, Json(s.api.create_product_template(&body).await?)))
}

async fn update_template(State(s): State<AppState>, Path(id): Path<Uuid>, Json(body): Json<ProductTemplateBody>) -> ApiResult<Json<ProductTemplate>> {
    Ok(Json(s.api.update_product_template(id, &body).await?))
}

async fn delete_template(State(s): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<StatusCode> {
    s.api.delete_product_template(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
struct FilterGroupParams {
    category_id: Option<Uuid>,
}

async fn list_filter_groups(State(s): State<AppState>, Query(p): Query<FilterGroupParams>) -> ApiResult<Json<Vec<FilterGroup>>> {
    Ok(Json(s.api.filter_groups(p.category_id).await?))
}

async fn get_filter_group(State(s): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<Json<FilterGroup>> { Ok(Json(s.api.filter_group(id).await?)) }

async fn create_filter_group(State(s): State<AppState>, Json(body): Json<FilterGroupBody>) -> ApiResult<(StatusCode, Json<FilterGroup>)> {
    Ok((StatusCode::CREATED, Json(s.api.create_filter_group(&body).await?)))
}

/// Refuses a category switch for groups already in use before asking the backend.
async fn update_filter_group(State(s): State<AppState>, Path(id): Path<Uuid>, Json(body): Json<FilterGroupBody>) -> ApiResult<Json<FilterGroup>> {
    let current = s.api.filter_group_fresh(id).await?;
    let mut form = crate::forms::FilterGroupForm::from_group(&current);
    form.set_category(body.category_id)?;
    Ok(Json(s.api.update_filter_group(id, &body).await?))
}

async fn delete_filter_group(State(s): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<StatusCode> {
    s.api.delete_filter_group(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn reorder_filter_groups(State(s): State<AppState>, Json(order): Json<OrderedIds>) -> ApiResult<StatusCode> {
    s.api.reorder_filter_groups(order.positions()).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_publications(State(s): State<AppState>, Query(q): Query<PublicationQuery>) -> ApiResult<Json<Page<Publication>>> {
    Ok(Json(s.api.publications(&q).await?))
}

async fn get_publication(State(s): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<Json<Publication>> { Ok(Json(s.api.publication(id).await?)) }

async fn create_publication(State(s): State<AppState>, Json(body): Json<PublicationBody>) -> ApiResult<(StatusCode, Json<Publication>)> {
    Ok((StatusCode::CREATED, Json(s.api.create_publication(&body).await?)))
}

async fn update_publication(State(s): State<AppState>, Path(id): Path<Uuid>, Json(body): Json<PublicationBody>) -> ApiResult<Json<Publication>> {
    Ok(Json(s.api.update_publication(id, &body).await?))
}

async fn set_publication_active(State(s): State<AppState>, Path(id): Path<Uuid>, Json(body): Json<ActivationBody>) -> ApiResult<Json<Publication>> {
    Ok(Json(s.api.set_publication_active(id, body.is_active).await?))
}

async fn delete_publication(State(s): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<StatusCode> {
    s.api.delete_publication(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn reorder_publication_items(State(s): State<AppState>, Path(id): Path<Uuid>, Json(order): Json<OrderedIds>) -> ApiResult<Json<Publication>> {
    Ok(Json(s.api.reorder_publication_items(id, order.positions()).await?))
}
