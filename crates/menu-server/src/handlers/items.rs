//! Item endpoints. Locations travel in the JSON body as `categoryId`,
//! `itemId` and `parentPath`.

use axum::{extract::State, Json};
use menu_core::services::ItemCreated;
use menu_core::tree::{Direction, DragRef};
use menu_core::{MenuCategory, MenuItemPatch};
use serde::Deserialize;

use crate::state::AppState;
use crate::utils::error::ApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub category_id: String,
    #[serde(default)]
    pub parent_path: Vec<String>,
    #[serde(default)]
    pub is_subcategory: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequest {
    pub category_id: String,
    pub item_id: String,
    #[serde(default)]
    pub parent_path: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    pub category_id: String,
    pub item_id: String,
    #[serde(default)]
    pub parent_path: Vec<String>,
    pub updates: MenuItemPatch,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderItemRequest {
    pub category_id: String,
    pub item_id: String,
    #[serde(default)]
    pub parent_path: Vec<String>,
    pub direction: Direction,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveItemRequest {
    pub category_id: String,
    #[serde(default)]
    pub parent_path: Vec<String>,
    pub from_index: usize,
    pub to_index: usize,
}

#[derive(Debug, Deserialize)]
pub struct DragRequest {
    pub dragged: DragRef,
    pub target: DragRef,
}

type MenuResponse = Result<Json<Vec<MenuCategory>>, ApiError>;

/// POST /api/items
pub async fn add_item(
    State(state): State<AppState>,
    Json(payload): Json<AddItemRequest>,
) -> Result<Json<ItemCreated>, ApiError> {
    let created = state
        .menu_service
        .add_item(
            &payload.category_id,
            &payload.parent_path,
            payload.is_subcategory,
        )
        .await?;
    Ok(Json(created))
}

/// POST /api/items/update
pub async fn update_item(
    State(state): State<AppState>,
    Json(payload): Json<UpdateItemRequest>,
) -> MenuResponse {
    let menu = state
        .menu_service
        .update_item(
            &payload.category_id,
            &payload.item_id,
            &payload.parent_path,
            payload.updates,
        )
        .await?;
    Ok(Json(menu))
}

/// POST /api/items/delete
pub async fn delete_item(
    State(state): State<AppState>,
    Json(payload): Json<ItemRequest>,
) -> MenuResponse {
    let menu = state
        .menu_service
        .delete_item(&payload.category_id, &payload.item_id, &payload.parent_path)
        .await?;
    Ok(Json(menu))
}

/// POST /api/items/duplicate
pub async fn duplicate_item(
    State(state): State<AppState>,
    Json(payload): Json<ItemRequest>,
) -> MenuResponse {
    let menu = state
        .menu_service
        .duplicate_item(&payload.category_id, &payload.item_id, &payload.parent_path)
        .await?;
    Ok(Json(menu))
}

/// POST /api/items/toggle-visibility
pub async fn toggle_visibility(
    State(state): State<AppState>,
    Json(payload): Json<ItemRequest>,
) -> MenuResponse {
    let menu = state
        .menu_service
        .toggle_visibility(&payload.category_id, &payload.item_id, &payload.parent_path)
        .await?;
    Ok(Json(menu))
}

/// POST /api/items/reorder
pub async fn reorder_item(
    State(state): State<AppState>,
    Json(payload): Json<ReorderItemRequest>,
) -> MenuResponse {
    let menu = state
        .menu_service
        .reorder_item(
            &payload.category_id,
            &payload.item_id,
            &payload.parent_path,
            payload.direction,
        )
        .await?;
    Ok(Json(menu))
}

/// POST /api/items/move
pub async fn move_item(
    State(state): State<AppState>,
    Json(payload): Json<MoveItemRequest>,
) -> MenuResponse {
    let menu = state
        .menu_service
        .move_item(
            &payload.category_id,
            &payload.parent_path,
            payload.from_index,
            payload.to_index,
        )
        .await?;
    Ok(Json(menu))
}

/// POST /api/drag
pub async fn drag(State(state): State<AppState>, Json(payload): Json<DragRequest>) -> MenuResponse {
    let menu = state
        .menu_service
        .move_dragged(&payload.dragged, &payload.target)
        .await?;
    Ok(Json(menu))
}
