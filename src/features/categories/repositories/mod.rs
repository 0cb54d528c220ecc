//! Persistence collaborator for the category lifecycle.
//!
//! The service only talks to [`CategoryRepository`]. Uniqueness of names among
//! non-deleted categories is enforced by the storage itself; implementations
//! report a clash as [`RepositoryError::UniqueViolation`].

#[cfg(test)]
mod memory;
mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::features::categories::dtos::CategoryFilter;
use crate::features::categories::models::{Category, CategoryStatus, NewCategory};
use crate::shared::types::{Page, PaginationQuery};

#[cfg(test)]
pub use memory::InMemoryCategoryRepository;
pub use postgres::PgCategoryRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    /// The row no longer holds the status the caller read
    #[error("Category {id} is no longer {expected}")]
    StatusChanged {
        id: i64,
        expected: CategoryStatus,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Whether a non-deleted category already uses this normalized name
    async fn exists_by_name(&self, name: &str) -> RepositoryResult<bool>;

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Category>>;

    /// Exact match on the normalized name, preferring a non-deleted record
    async fn find_by_name(&self, name: &str) -> RepositoryResult<Option<Category>>;

    /// Case-insensitive substring match across all statuses
    async fn find_by_name_containing(&self, fragment: &str) -> RepositoryResult<Vec<Category>>;

    async fn find_by_status(&self, status: CategoryStatus) -> RepositoryResult<Vec<Category>>;

    async fn find_page(
        &self,
        page: &PaginationQuery,
        filter: &CategoryFilter,
    ) -> RepositoryResult<Page<Category>>;

    /// Insert an ACTIVE category; storage assigns id and timestamps
    async fn insert(&self, category: NewCategory) -> RepositoryResult<Category>;

    /// Persist changes to an existing category and refresh `updated_at`.
    ///
    /// The write only applies while the stored status is still `expected`;
    /// otherwise it fails with [`RepositoryError::StatusChanged`].
    async fn save(
        &self,
        category: &Category,
        expected: CategoryStatus,
    ) -> RepositoryResult<Category>;
}
