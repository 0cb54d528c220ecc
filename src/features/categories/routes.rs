use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Create routes for the categories feature
pub fn routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route(
            "/api/categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route("/api/categories/search", get(handlers::search_categories))
        .route(
            "/api/categories/name/{name}",
            get(handlers::get_category_by_name),
        )
        .route(
            "/api/categories/status/{status}",
            get(handlers::list_categories_by_status),
        )
        .route(
            "/api/categories/{id}",
            get(handlers::get_category)
                .patch(handlers::update_category)
                .delete(handlers::delete_category),
        )
        .route(
            "/api/categories/{id}/disable",
            patch(handlers::disable_category),
        )
        .route(
            "/api/categories/{id}/enable",
            patch(handlers::enable_category),
        )
        .with_state(service)
}
