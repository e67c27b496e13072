use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::handlers::{categories, health, items, menu, navigation, upload};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let uploads_prefix = state.settings.storage.uploads_url_prefix.clone();
    let uploads = ServeDir::new(&state.settings.storage.uploads_dir);
    let body_limit = state.settings.max_upload_bytes();

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let menu_routes = Router::new()
        .route("/api/menu", get(menu::get_menu).post(menu::save_menu))
        .route("/api/menu/public", get(menu::public_menu))
        .route("/api/menu/sorted", get(menu::sorted_menu));

    let image_routes = Router::new()
        .route("/api/upload", post(upload::upload_image))
        .route("/api/delete-image", post(upload::delete_image))
        .route("/api/check-images", get(upload::check_images));

    let category_routes = Router::new()
        .route("/api/categories", post(categories::create_category))
        .route("/api/categories/move", post(categories::move_category))
        .route(
            "/api/categories/{id}",
            patch(categories::update_category).delete(categories::delete_category),
        )
        .route(
            "/api/categories/{id}/reorder",
            post(categories::reorder_category),
        );

    let item_routes = Router::new()
        .route("/api/items", post(items::add_item))
        .route("/api/items/update", post(items::update_item))
        .route("/api/items/delete", post(items::delete_item))
        .route("/api/items/duplicate", post(items::duplicate_item))
        .route("/api/items/toggle-visibility", post(items::toggle_visibility))
        .route("/api/items/reorder", post(items::reorder_item))
        .route("/api/items/move", post(items::move_item))
        .route("/api/drag", post(items::drag));

    let navigation_routes = Router::new()
        .route("/api/breadcrumbs", post(navigation::breadcrumbs))
        .route("/api/search", get(navigation::search));

    Router::new()
        .merge(health_routes)
        .merge(menu_routes)
        .merge(image_routes)
        .merge(category_routes)
        .merge(item_routes)
        .merge(navigation_routes)
        // Uploaded dish images
        .nest_service(&uploads_prefix, uploads)
        .with_state(state)
        // CORS
        .layer(CorsLayer::permissive())
        // Tracing
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        // Body limit (image uploads)
        .layer(DefaultBodyLimit::max(body_limit))
}
