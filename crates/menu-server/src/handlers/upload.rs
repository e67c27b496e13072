use axum::{
    extract::{Multipart, State},
    Json,
};
use menu_core::MenuError;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::SuccessResponse;
use crate::state::AppState;
use crate::storage::UploadsReport;
use crate::utils::error::ApiError;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteImageRequest {
    pub image_url: String,
}

/// POST /api/upload - multipart form with an `image` file field.
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    info!("Image upload request received");

    let mut file_data: Option<Vec<u8>> = None;
    let mut filename: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read field: {}", e)))?
    {
        if field.name() != Some("image") {
            continue;
        }
        filename = field.file_name().map(|s| s.to_string());
        file_data = Some(
            field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?
                .to_vec(),
        );
    }

    let file_data = file_data.ok_or_else(|| ApiError::BadRequest("No file uploaded".to_string()))?;
    let filename = filename.ok_or_else(|| ApiError::BadRequest("filename required".to_string()))?;

    let url = state.menu_service.upload_image(&filename, &file_data).await?;
    Ok(Json(UploadResponse { url }))
}

/// POST /api/delete-image
pub async fn delete_image(
    State(state): State<AppState>,
    Json(payload): Json<DeleteImageRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    if payload.image_url.is_empty() {
        return Err(MenuError::InvalidImageReference(payload.image_url).into());
    }
    state.menu_service.delete_image(&payload.image_url).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// GET /api/check-images
pub async fn check_images(State(state): State<AppState>) -> Result<Json<UploadsReport>, ApiError> {
    Ok(Json(state.image_store.inspect().await?))
}
