//! Whole-document endpoints.

use axum::{
    extract::{Query, State},
    Json,
};
use menu_core::tree::SortType;
use menu_core::MenuCategory;
use serde::Deserialize;
use tracing::info;

use super::SuccessResponse;
use crate::state::AppState;
use crate::utils::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct SortQuery {
    #[serde(default)]
    pub sort: SortType,
}

/// GET /api/menu
pub async fn get_menu(State(state): State<AppState>) -> Result<Json<Vec<MenuCategory>>, ApiError> {
    Ok(Json(state.menu_service.load_menu().await?))
}

/// POST /api/menu - replaces the stored document.
pub async fn save_menu(
    State(state): State<AppState>,
    Json(menu): Json<Vec<MenuCategory>>,
) -> Result<Json<SuccessResponse>, ApiError> {
    info!("Whole-menu save requested ({} categories)", menu.len());
    state.menu_service.save_menu(&menu).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// GET /api/menu/public
pub async fn public_menu(
    State(state): State<AppState>,
) -> Result<Json<Vec<MenuCategory>>, ApiError> {
    Ok(Json(state.menu_service.public_menu().await?))
}

/// GET /api/menu/sorted?sort=name|date|order
pub async fn sorted_menu(
    State(state): State<AppState>,
    Query(query): Query<SortQuery>,
) -> Result<Json<Vec<MenuCategory>>, ApiError> {
    Ok(Json(state.menu_service.sorted_menu(query.sort).await?))
}
