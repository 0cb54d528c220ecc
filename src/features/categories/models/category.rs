use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;

use crate::features::categories::error::CategoryError;
use crate::features::categories::validator::CategoryPatch;

/// Category lifecycle status matching the `category_status` database enum
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema,
)]
#[sqlx(type_name = "category_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum CategoryStatus {
    #[default]
    Active,
    Inactive,
    Deleted,
}

impl CategoryStatus {
    pub const ALL: [CategoryStatus; 3] = [
        CategoryStatus::Active,
        CategoryStatus::Inactive,
        CategoryStatus::Deleted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryStatus::Active => "ACTIVE",
            CategoryStatus::Inactive => "INACTIVE",
            CategoryStatus::Deleted => "DELETED",
        }
    }
}

impl fmt::Display for CategoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryStatus {
    type Err = CategoryError;

    /// Case-insensitive; anything outside the three states is invalid data
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CategoryError::InvalidData(format!("Unknown status: {}", value)))
    }
}

/// Audit and lifecycle fields shared by catalog records
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct AuditFields {
    pub status: CategoryStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Database model for category
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: String,
    #[sqlx(flatten)]
    pub audit: AuditFields,
}

/// Normalized insert payload; the stored status is always ACTIVE
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub description: String,
}

impl Category {
    pub fn status(&self) -> CategoryStatus {
        self.audit.status
    }

    pub fn is_deleted(&self) -> bool {
        self.audit.status == CategoryStatus::Deleted
    }

    /// Merge an already-normalized patch into this record
    pub fn apply(&mut self, patch: CategoryPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(status) = patch.status {
            self.audit.status = status;
        }
    }

    /// Move to `next`, enforcing the lifecycle state machine.
    ///
    /// ACTIVE and INACTIVE switch freely, either may become DELETED, and
    /// DELETED is terminal. `deleted_at` is stamped with `now` on deletion.
    pub fn transition_to(
        &mut self,
        next: CategoryStatus,
        now: DateTime<Utc>,
    ) -> Result<(), CategoryError> {
        match (self.audit.status, next) {
            (CategoryStatus::Deleted, _) => {
                return Err(CategoryError::InvalidTransition(format!(
                    "Category with ID {} is deleted and cannot change status",
                    self.id
                )));
            }
            (CategoryStatus::Active, CategoryStatus::Active) => {
                return Err(CategoryError::AlreadyActive(format!(
                    "Category with ID {} is already active",
                    self.id
                )));
            }
            (CategoryStatus::Inactive, CategoryStatus::Inactive) => {
                return Err(CategoryError::AlreadyInactive(format!(
                    "Category with ID {} is already inactive",
                    self.id
                )));
            }
            _ => {}
        }

        self.audit.status = next;
        if next == CategoryStatus::Deleted {
            self.audit.deleted_at = Some(now);
        }
        Ok(())
    }
}
