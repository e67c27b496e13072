use axum::{
    extract::{Query, State},
    Json,
};
use menu_core::tree::{Crumb, FilterType, SearchResult};
use serde::Deserialize;

use crate::state::AppState;
use crate::utils::error::ApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreadcrumbRequest {
    pub category_id: String,
    #[serde(default)]
    pub parent_path: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub filter: FilterType,
}

/// POST /api/breadcrumbs
pub async fn breadcrumbs(
    State(state): State<AppState>,
    Json(payload): Json<BreadcrumbRequest>,
) -> Result<Json<Vec<Crumb>>, ApiError> {
    let trail = state
        .menu_service
        .breadcrumbs(&payload.category_id, &payload.parent_path)
        .await?;
    Ok(Json(trail))
}

/// GET /api/search?q=&filter=all|categories|items|hidden
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<SearchResult>>, ApiError> {
    Ok(Json(state.menu_service.search(&query.q, query.filter).await?))
}
