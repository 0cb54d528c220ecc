use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::features::categories::error::Result;
use crate::features::categories::models::{Category, CategoryStatus};
use crate::shared::types::{default_page, default_page_size, PaginationQuery, SortDirection};

/// Request DTO for creating a category
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateCategoryDto {
    /// 3-50 characters, stored trimmed and uppercased
    pub name: Option<String>,
    /// 5-255 characters, stored trimmed and uppercased
    pub description: Option<String>,
    /// Ignored: new categories always start ACTIVE
    pub status: Option<String>,
}

/// Request DTO for a partial update.
///
/// Absent or blank fields leave the stored value unchanged. A `DELETED`
/// status is ignored; deletion has its own endpoint.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateCategoryDto {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub status: CategoryStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
            status: c.audit.status,
            created_at: c.audit.created_at,
            updated_at: c.audit.updated_at,
            deleted_at: c.audit.deleted_at,
        }
    }
}

/// Query params for partial-name search
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct SearchCategoriesQuery {
    /// Case-insensitive fragment of the category name
    pub name: Option<String>,
}

/// Filter criteria for paged listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryFilter {
    /// Case-insensitive name fragment
    pub name: Option<String>,
    pub status: Option<CategoryStatus>,
    /// Inclusive lower bound on `created_at`
    pub created_after: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `created_at`
    pub created_before: Option<DateTime<Utc>>,
    /// Ordering by `created_at`
    pub sort: SortDirection,
}

impl CategoryFilter {
    pub fn matches(&self, category: &Category) -> bool {
        let name_ok = self.name.as_deref().is_none_or(|fragment| {
            category
                .name
                .to_lowercase()
                .contains(&fragment.to_lowercase())
        });
        let status_ok = self.status.is_none_or(|s| category.audit.status == s);
        let after_ok = self
            .created_after
            .is_none_or(|after| category.audit.created_at >= after);
        let before_ok = self
            .created_before
            .is_none_or(|before| category.audit.created_at <= before);

        name_ok && status_ok && after_ok && before_ok
    }
}

/// Query params for listing categories
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[validate(schema(function = "validate_created_range"))]
pub struct CategoryQueryParams {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,
    /// Items per page
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
    /// Search in name
    #[validate(length(max = 50))]
    pub name: Option<String>,
    /// Filter by status (ACTIVE, INACTIVE, DELETED)
    pub status: Option<String>,
    /// Only categories created at or after this instant (RFC 3339)
    pub created_after: Option<DateTime<Utc>>,
    /// Only categories created at or before this instant (RFC 3339)
    pub created_before: Option<DateTime<Utc>>,
    /// Sort direction on created_at (default: desc)
    #[serde(default)]
    pub sort: SortDirection,
}

fn validate_created_range(
    params: &CategoryQueryParams,
) -> std::result::Result<(), ValidationError> {
    match (params.created_after, params.created_before) {
        (Some(after), Some(before)) if after > before => {
            let mut err = ValidationError::new("created_range");
            err.message = Some("created_after must not be later than created_before".into());
            Err(err)
        }
        _ => Ok(()),
    }
}

impl CategoryQueryParams {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery::new(self.page, self.page_size)
    }

    /// Build the repository filter; an unknown status is invalid data
    pub fn filter(&self) -> Result<CategoryFilter> {
        let status = self
            .status
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(str::parse::<CategoryStatus>)
            .transpose()?;

        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(CategoryFilter {
            name,
            status,
            created_after: self.created_after,
            created_before: self.created_before,
            sort: self.sort,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::error::CategoryError;
    use chrono::Duration;

    fn params() -> CategoryQueryParams {
        CategoryQueryParams {
            page: 1,
            page_size: 10,
            name: None,
            status: None,
            created_after: None,
            created_before: None,
            sort: SortDirection::Desc,
        }
    }

    #[test]
    fn test_query_params_default_paging() {
        let p: CategoryQueryParams = serde_json::from_value(serde_json::json!({})).unwrap();
        let paging = p.pagination();
        assert_eq!(paging.page(), 1);
        assert_eq!(paging.limit(), crate::shared::constants::DEFAULT_PAGE_SIZE);
        assert_eq!(p.sort, SortDirection::Desc);
    }

    #[test]
    fn test_filter_parses_status_and_trims_name() {
        let mut p = params();
        p.status = Some("inactive".to_string());
        p.name = Some("  elec ".to_string());

        let filter = p.filter().unwrap();
        assert_eq!(filter.status, Some(CategoryStatus::Inactive));
        assert_eq!(filter.name.as_deref(), Some("elec"));
    }

    #[test]
    fn test_filter_rejects_unknown_status() {
        let mut p = params();
        p.status = Some("archived".to_string());
        assert!(matches!(p.filter(), Err(CategoryError::InvalidData(_))));
    }

    #[test]
    fn test_blank_filter_fields_are_ignored() {
        let mut p = params();
        p.status = Some("  ".to_string());
        p.name = Some("".to_string());
        assert_eq!(p.filter().unwrap(), CategoryFilter::default());
    }

    #[test]
    fn test_inverted_created_range_fails_validation() {
        let now = Utc::now();
        let mut p = params();
        p.created_after = Some(now);
        p.created_before = Some(now - Duration::days(1));
        assert!(p.validate().is_err());

        p.created_before = Some(now);
        assert!(p.validate().is_ok());
    }
}
