use std::sync::Arc;

use chrono::Utc;

use crate::features::categories::dtos::{CategoryFilter, CreateCategoryDto, UpdateCategoryDto};
use crate::features::categories::error::{CategoryError, Result};
use crate::features::categories::models::{Category, CategoryStatus};
use crate::features::categories::repositories::{CategoryRepository, RepositoryError};
use crate::features::categories::validator;
use crate::shared::types::{Page, PaginationQuery};

fn storage_error(e: RepositoryError) -> CategoryError {
    CategoryError::Storage(e)
}

fn already_exists(name: &str) -> CategoryError {
    CategoryError::AlreadyExists(format!("Category with name {} already exists", name))
}

fn not_found_by_id(id: i64) -> CategoryError {
    CategoryError::NotFound(format!("Category not found with ID: {}", id))
}

/// Map a write failure; both cases mean a concurrent writer got there first
fn write_error(e: RepositoryError, name: &str) -> CategoryError {
    match e {
        RepositoryError::UniqueViolation(_) => already_exists(name),
        RepositoryError::StatusChanged { id, expected } => CategoryError::InvalidTransition(
            format!("Category with ID {} is no longer {}", id, expected),
        ),
        other => storage_error(other),
    }
}

fn requests_deletion(dto: &UpdateCategoryDto) -> bool {
    dto.status
        .as_deref()
        .is_some_and(|s| s.trim().eq_ignore_ascii_case(CategoryStatus::Deleted.as_str()))
}

fn ensure_valid_id(id: i64) -> Result<()> {
    if id <= 0 {
        return Err(CategoryError::InvalidData(
            "Category ID must be a positive number".to_string(),
        ));
    }
    Ok(())
}

/// Service for category lifecycle operations
pub struct CategoryService {
    repository: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self { repository }
    }

    /// Create a new ACTIVE category from a validated, normalized request
    pub async fn create(&self, dto: Option<CreateCategoryDto>) -> Result<Category> {
        let new_category = validator::validate_create(dto.as_ref())?;

        if dto.as_ref().is_some_and(|d| d.status.is_some()) {
            tracing::debug!("Ignoring caller-supplied status on category create");
        }

        if self
            .repository
            .exists_by_name(&new_category.name)
            .await
            .map_err(storage_error)?
        {
            return Err(already_exists(&new_category.name));
        }

        let name = new_category.name.clone();
        let category = self
            .repository
            .insert(new_category)
            .await
            .map_err(|e| write_error(e, &name))?;

        tracing::info!(
            "Category created: id={}, name={}",
            category.id,
            category.name
        );

        Ok(category)
    }

    /// Get category by id, whatever its status
    pub async fn get_by_id(&self, id: i64) -> Result<Category> {
        ensure_valid_id(id)?;

        self.repository
            .find_by_id(id)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| not_found_by_id(id))
    }

    /// Get category by name; soft-deleted categories are not visible
    pub async fn get_by_name(&self, name: Option<&str>) -> Result<Category> {
        let normalized = validator::normalize_lookup(name)?;

        let category = self
            .repository
            .find_by_name(&normalized)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| {
                CategoryError::NotFound(format!("Category not found with name: {}", normalized))
            })?;

        if category.is_deleted() {
            return Err(CategoryError::NotFound(format!(
                "Category with name {} is deleted",
                normalized
            )));
        }

        Ok(category)
    }

    /// Case-insensitive partial-name search over non-deleted categories.
    ///
    /// No matches is an empty list, not an error.
    pub async fn search_by_partial_name(&self, fragment: Option<&str>) -> Result<Vec<Category>> {
        let normalized = validator::normalize_lookup(fragment)?;

        let categories = self
            .repository
            .find_by_name_containing(&normalized)
            .await
            .map_err(storage_error)?;

        Ok(categories.into_iter().filter(|c| !c.is_deleted()).collect())
    }

    /// Apply a partial update; blank fields are left untouched
    pub async fn update(&self, id: i64, dto: Option<UpdateCategoryDto>) -> Result<Category> {
        ensure_valid_id(id)?;
        let dto = dto
            .ok_or_else(|| CategoryError::InvalidData("Category data cannot be null".to_string()))?;
        let patch = validator::normalize_patch(&dto)?;
        if requests_deletion(&dto) {
            tracing::warn!(
                "Ignoring DELETED status in update of category id={}; use delete instead",
                id
            );
        }
        if patch.is_empty() {
            tracing::debug!("Category update for id={} carries no changes", id);
        }

        let mut category = self.get_by_id(id).await?;

        if category.is_deleted() && patch.status.is_some() {
            return Err(CategoryError::InvalidTransition(format!(
                "Category with ID {} is deleted and cannot change status",
                id
            )));
        }

        if let Some(new_name) = patch.name.as_deref() {
            if !category.is_deleted()
                && new_name != category.name
                && self
                    .repository
                    .exists_by_name(new_name)
                    .await
                    .map_err(storage_error)?
            {
                return Err(already_exists(new_name));
            }
        }

        let expected = category.status();
        category.apply(patch);

        let updated = self
            .repository
            .save(&category, expected)
            .await
            .map_err(|e| write_error(e, &category.name))?;

        tracing::info!("Category updated: id={}, name={}", updated.id, updated.name);

        Ok(updated)
    }

    /// ACTIVE -> INACTIVE
    pub async fn disable(&self, id: i64) -> Result<Category> {
        self.transition(id, CategoryStatus::Inactive).await
    }

    /// INACTIVE -> ACTIVE
    pub async fn enable(&self, id: i64) -> Result<Category> {
        self.transition(id, CategoryStatus::Active).await
    }

    /// Soft delete: status DELETED and `deleted_at` stamped. Irreversible.
    pub async fn delete(&self, id: i64) -> Result<Category> {
        self.transition(id, CategoryStatus::Deleted).await
    }

    async fn transition(&self, id: i64, next: CategoryStatus) -> Result<Category> {
        let mut category = self.get_by_id(id).await?;
        let previous = category.status();

        category.transition_to(next, Utc::now())?;

        let saved = self
            .repository
            .save(&category, previous)
            .await
            .map_err(|e| write_error(e, &category.name))?;

        tracing::info!(
            "Category status changed: id={}, name={}, {} -> {}",
            saved.id,
            saved.name,
            previous,
            next
        );

        Ok(saved)
    }

    /// All categories in the given status; empty is fine
    pub async fn list_by_status(&self, status: CategoryStatus) -> Result<Vec<Category>> {
        self.repository
            .find_by_status(status)
            .await
            .map_err(storage_error)
    }

    /// One page of categories matching the filter
    pub async fn list_paged(
        &self,
        page: &PaginationQuery,
        filter: &CategoryFilter,
    ) -> Result<Page<Category>> {
        self.repository
            .find_page(page, filter)
            .await
            .map_err(storage_error)
    }
}
