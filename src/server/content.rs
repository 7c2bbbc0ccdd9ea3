use axum::{extract::{Multipart, Path, State}, http::StatusCode, routing::{get, patch, post, put}, Json, Router};
use uuid::Uuid;

use super::{ApiResult, AppState, OrderedIds};
use crate::error::AdminError;
use crate::schema::{Faq, FaqBody, Image};
use crate::widgets::crop::CropArea;

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/faq", get(list_faq).post(create_faq))
        .route("/faq/order", put(reorder_faq))
        .route("/faq/:id", patch(update_faq).delete(delete_faq))
        .route("/images", post(upload_image))
}

async fn list_faq(State(s): State<AppState>) -> ApiResult<Json<Vec<Faq>>> { Ok(Json(s.api.faq().await?)) }

async fn create_faq(State(s): State<AppState>, Json(body): Json<FaqBody>) -> ApiResult<(StatusCode, Json<Faq>)> {
    Ok((StatusCode::CREATED, Json(s.api.create_faq(&body).await?)))
}

async fn update_faq(State(s): State<AppState>, Path(id): Path<Uuid>, Json(body): Json<FaqBody>) -> ApiResult<Json<Faq>> {
    Ok(Json(s.api.update_faq(id, &body).await?))
}

async fn delete_faq(State(s): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<StatusCode> {
    s.api.delete_faq(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn reorder_faq(State(s): State<AppState>, Json(order): Json<OrderedIds>) -> ApiResult<StatusCode> {
    s.api.reorder_faq(order.positions()).await?;
    Ok(StatusCode::NO_CONTENT)
}

struct Upload {
    file_name: String,
    mime: String,
    bytes: Vec<u8>,
}

/// Accepts `file` plus optional `crop_x`, `crop_y`, `crop_width`, `crop_height` fields.
async fn upload_image(State(s): State<AppState>, mut multipart: Multipart) -> ApiResult<(StatusCode, Json<Image>)> {
    let bad = |field: &str, e: &dyn std::fmt::Display| AdminError::form(field, e.to_string());
    let mut upload = None;
    let mut crop = [None::<u32>; 4];

    while let Some(field) = multipart.next_field().await.map_err(|e| bad("file", &e))? {
        let name = field.name().unwrap_or_default().to_string();
        let slot = match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("image").to_string();
                let mime = field.content_type().unwrap_or("application/octet-stream").to_string();
                let bytes = field.bytes().await.map_err(|e| bad("file", &e))?.to_vec();
                upload = Some(Upload { file_name, mime, bytes });
                continue;
            }
            "crop_x" => 0,
            "crop_y" => 1,
            "crop_width" => 2,
            "crop_height" => 3,
            _ => continue,
        };
        let text = field.text().await.map_err(|e| bad(&name, &e))?;
        crop[slot] = Some(text.trim().parse().map_err(|e| bad(&name, &e))?);
    }

    let upload = upload.ok_or_else(|| AdminError::form("file", "Attach an image"))?;
    if !upload.mime.starts_with("image/") {
        return Err(AdminError::form("file", "Only images can be uploaded"));
    }
    let crop = match crop {
        [Some(x), Some(y), Some(width), Some(height)] if width > 0 && height > 0 => Some(CropArea { x, y, width, height }),
        [None, None, None, None] => None,
        _ => return Err(AdminError::form("crop", "Incomplete crop area")),
    };

    let image = s.api.upload_image(&upload.file_name, &upload.mime, upload.bytes, crop).await?;
    Ok((StatusCode::CREATED, Json(image)))
}
