//! Root-level category endpoints. Each responds with the committed tree.

use axum::{
    extract::{Path, State},
    Json,
};
use menu_core::tree::Direction;
use menu_core::{CategoryPatch, MenuCategory, NEW_CATEGORY_NAME};
use serde::Deserialize;

use crate::state::AppState;
use crate::utils::error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct CreateCategoryRequest {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub direction: Direction,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub from_index: usize,
    pub to_index: usize,
}

type MenuResponse = Result<Json<Vec<MenuCategory>>, ApiError>;

/// POST /api/categories
pub async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<CreateCategoryRequest>,
) -> MenuResponse {
    let name = payload.name.as_deref().unwrap_or(NEW_CATEGORY_NAME);
    Ok(Json(state.menu_service.create_category(name).await?))
}

/// PATCH /api/categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
    Json(patch): Json<CategoryPatch>,
) -> MenuResponse {
    Ok(Json(state.menu_service.update_category(&category_id, patch).await?))
}

/// DELETE /api/categories/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> MenuResponse {
    Ok(Json(state.menu_service.delete_category(&category_id).await?))
}

/// POST /api/categories/{id}/reorder
pub async fn reorder_category(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
    Json(payload): Json<ReorderRequest>,
) -> MenuResponse {
    Ok(Json(
        state
            .menu_service
            .reorder_category(&category_id, payload.direction)
            .await?,
    ))
}

/// POST /api/categories/move
pub async fn move_category(
    State(state): State<AppState>,
    Json(payload): Json<MoveRequest>,
) -> MenuResponse {
    Ok(Json(
        state
            .menu_service
            .move_category(payload.from_index, payload.to_index)
            .await?,
    ))
}
