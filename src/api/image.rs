use reqwest::multipart::{Form, Part};

use super::{AdminApi, Endpoint};
use crate::error::Result;
use crate::schema::Image;
use crate::widgets::crop::CropArea;

impl AdminApi {
    /// Uploads an image; the backend cuts `crop` out of it before storing.
    pub async fn upload_image(&self, file_name: &str, mime: &str, bytes: Vec<u8>, crop: Option<CropArea>) -> Result<Image> {
        let part = Part::bytes(bytes).file_name(file_name.to_string()).mime_str(mime)?;
        let mut form = Form::new().part("file", part);
        if let Some(area) = crop {
            form = form
                .text("crop_x", area.x.to_string())
                .text("crop_y", area.y.to_string())
                .text("crop_width", area.width.to_string())
                .text("crop_height", area.height.to_string());
        }
        tracing::info!(file_name, ?crop, "uploading image");
        self.upload(Endpoint::post("uploadImage", "/images"), form).await
    }
}
