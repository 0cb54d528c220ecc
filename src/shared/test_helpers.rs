#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
use axum::Router;

#[cfg(test)]
use crate::features::categories::{
    repositories::InMemoryCategoryRepository, routes, CategoryService,
};

/// Category service over a fresh in-memory store
#[cfg(test)]
pub fn in_memory_category_service() -> Arc<CategoryService> {
    Arc::new(CategoryService::new(Arc::new(
        InMemoryCategoryRepository::new(),
    )))
}

/// Category routes wired to a fresh in-memory store
#[cfg(test)]
pub fn category_test_router() -> Router {
    routes::routes(in_memory_category_service())
}
