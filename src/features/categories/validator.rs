//! Structural validation and canonicalization of incoming category data.
//!
//! Everything here is a pure function of its input. Text fields are trimmed
//! and uppercased before they reach storage, which makes name lookups and the
//! uniqueness rule insensitive to case and surrounding whitespace.

use crate::features::categories::dtos::{CreateCategoryDto, UpdateCategoryDto};
use crate::features::categories::error::{CategoryError, Result};
use crate::features::categories::models::{CategoryStatus, NewCategory};
use crate::shared::constants::{
    CATEGORY_DESCRIPTION_MAX_LEN, CATEGORY_DESCRIPTION_MIN_LEN, CATEGORY_NAME_MAX_LEN,
    CATEGORY_NAME_MIN_LEN,
};

/// Normalized changes to merge into a stored category; `None` means unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<CategoryStatus>,
}

impl CategoryPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.status.is_none()
    }
}

/// Trim and uppercase
pub fn normalize(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Returns the non-blank value, if any
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn normalize_bounded(field: &str, raw: &str, min: usize, max: usize) -> Result<String> {
    let normalized = normalize(raw);
    let len = normalized.chars().count();
    if len < min || len > max {
        return Err(CategoryError::InvalidData(format!(
            "Category {} must be between {} and {} characters",
            field, min, max
        )));
    }
    Ok(normalized)
}

pub fn normalize_name(raw: &str) -> Result<String> {
    normalize_bounded("name", raw, CATEGORY_NAME_MIN_LEN, CATEGORY_NAME_MAX_LEN)
}

pub fn normalize_description(raw: &str) -> Result<String> {
    normalize_bounded(
        "description",
        raw,
        CATEGORY_DESCRIPTION_MIN_LEN,
        CATEGORY_DESCRIPTION_MAX_LEN,
    )
}

/// Normalize a lookup key (name or search fragment); blank input is invalid
pub fn normalize_lookup(raw: Option<&str>) -> Result<String> {
    present(raw)
        .map(normalize)
        .ok_or_else(|| CategoryError::InvalidData("Category name cannot be null or empty".into()))
}

/// Validate a create request and produce the normalized insert payload.
///
/// Any caller-supplied status is dropped.
pub fn validate_create(dto: Option<&CreateCategoryDto>) -> Result<NewCategory> {
    let dto =
        dto.ok_or_else(|| CategoryError::InvalidData("Category data cannot be null".into()))?;

    let name = present(dto.name.as_deref()).ok_or_else(|| {
        CategoryError::InvalidData("Category name cannot be null or empty".into())
    })?;
    let description = present(dto.description.as_deref()).ok_or_else(|| {
        CategoryError::InvalidData("Category description cannot be null or empty".into())
    })?;

    Ok(NewCategory {
        name: normalize_name(name)?,
        description: normalize_description(description)?,
    })
}

/// Turn a partial update request into a patch.
///
/// Blank fields are no-ops. A DELETED status is ignored so that deletion only
/// happens through the dedicated operation.
pub fn normalize_patch(dto: &UpdateCategoryDto) -> Result<CategoryPatch> {
    let name = present(dto.name.as_deref())
        .map(normalize_name)
        .transpose()?;
    let description = present(dto.description.as_deref())
        .map(normalize_description)
        .transpose()?;

    let status = match present(dto.status.as_deref()) {
        Some(raw) => match raw.parse::<CategoryStatus>()? {
            CategoryStatus::Deleted => None,
            status => Some(status),
        },
        None => None,
    };

    Ok(CategoryPatch {
        name,
        description,
        status,
    })
}
