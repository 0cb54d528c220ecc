use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::categories::dtos::{
    CategoryQueryParams, CategoryResponseDto, CreateCategoryDto, SearchCategoriesQuery,
    UpdateCategoryDto,
};
use crate::features::categories::models::{Category, CategoryStatus};
use crate::features::categories::services::CategoryService;
use crate::shared::types::{ApiResponse, Meta, Page};

fn to_dtos(categories: Vec<Category>) -> Vec<CategoryResponseDto> {
    categories.into_iter().map(CategoryResponseDto::from).collect()
}

/// Create a category
///
/// Name and description are stored trimmed and uppercased. New categories
/// always start ACTIVE.
#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Malformed JSON body"),
        (status = 409, description = "Name already used by a non-deleted category"),
        (status = 422, description = "Invalid category data")
    ),
    tag = "categories"
)]
pub async fn create_category(
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<Option<CreateCategoryDto>>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponseDto>>)> {
    let category = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(category.into()),
            Some("Category created successfully".to_string()),
            None,
        )),
    ))
}

/// List categories (paginated, filterable)
#[utoipa::path(
    get,
    path = "/api/categories",
    params(CategoryQueryParams),
    responses(
        (status = 200, description = "Page of categories", body = ApiResponse<Page<CategoryResponseDto>>),
        (status = 400, description = "Invalid query parameters"),
        (status = 422, description = "Unknown status filter")
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
    Query(params): Query<CategoryQueryParams>,
) -> Result<Json<ApiResponse<Page<CategoryResponseDto>>>> {
    params
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let filter = params.filter()?;
    let page = service.list_paged(&params.pagination(), &filter).await?;
    let total = page.total_items;

    Ok(Json(ApiResponse::success(
        Some(page.map(CategoryResponseDto::from)),
        None,
        Some(Meta { total }),
    )))
}

/// Search non-deleted categories by partial name
#[utoipa::path(
    get,
    path = "/api/categories/search",
    params(SearchCategoriesQuery),
    responses(
        (status = 200, description = "Matching categories, possibly empty", body = ApiResponse<Vec<CategoryResponseDto>>),
        (status = 422, description = "Missing or blank search term")
    ),
    tag = "categories"
)]
pub async fn search_categories(
    State(service): State<Arc<CategoryService>>,
    Query(query): Query<SearchCategoriesQuery>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let categories = service.search_by_partial_name(query.name.as_deref()).await?;
    let total = categories.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(to_dtos(categories)),
        None,
        Some(Meta { total }),
    )))
}

/// Get a non-deleted category by exact name (case-insensitive)
#[utoipa::path(
    get,
    path = "/api/categories/name/{name}",
    params(
        ("name" = String, Path, description = "Category name")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryResponseDto>),
        (status = 404, description = "Category not found or deleted")
    ),
    tag = "categories"
)]
pub async fn get_category_by_name(
    State(service): State<Arc<CategoryService>>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = service.get_by_name(Some(&name)).await?;
    Ok(Json(ApiResponse::success(Some(category.into()), None, None)))
}

/// List all categories in a status
#[utoipa::path(
    get,
    path = "/api/categories/status/{status}",
    params(
        ("status" = String, Path, description = "ACTIVE, INACTIVE or DELETED")
    ),
    responses(
        (status = 200, description = "Categories in the status", body = ApiResponse<Vec<CategoryResponseDto>>),
        (status = 422, description = "Unknown status")
    ),
    tag = "categories"
)]
pub async fn list_categories_by_status(
    State(service): State<Arc<CategoryService>>,
    Path(status): Path<String>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let status: CategoryStatus = status.parse()?;
    let categories = service.list_by_status(status).await?;
    let total = categories.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(to_dtos(categories)),
        None,
        Some(Meta { total }),
    )))
}

/// Get category by ID, including deleted ones
#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryResponseDto>),
        (status = 404, description = "Category not found"),
        (status = 422, description = "Non-positive ID")
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(category.into()), None, None)))
}

/// Partially update a category
///
/// Blank fields are left unchanged. Setting status to DELETED here is ignored.
#[utoipa::path(
    patch,
    path = "/api/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<CategoryResponseDto>),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Name taken, status change on a deleted category, or status changed concurrently"),
        (status = 422, description = "Invalid category data")
    ),
    tag = "categories"
)]
pub async fn update_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<Option<UpdateCategoryDto>>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(category.into()),
        Some("Category updated successfully".to_string()),
        None,
    )))
}

/// Soft-delete a category
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category deleted", body = ApiResponse<CategoryResponseDto>),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category already deleted")
    ),
    tag = "categories"
)]
pub async fn delete_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        Some(category.into()),
        Some("Category deleted successfully".to_string()),
        None,
    )))
}

/// Disable an ACTIVE category
#[utoipa::path(
    patch,
    path = "/api/categories/{id}/disable",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category disabled", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Category already inactive"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category is deleted")
    ),
    tag = "categories"
)]
pub async fn disable_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = service.disable(id).await?;
    Ok(Json(ApiResponse::success(
        Some(category.into()),
        Some("Category disabled successfully".to_string()),
        None,
    )))
}

/// Enable an INACTIVE category
#[utoipa::path(
    patch,
    path = "/api/categories/{id}/enable",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category enabled", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Category already active"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category is deleted")
    ),
    tag = "categories"
)]
pub async fn enable_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = service.enable(id).await?;
    Ok(Json(ApiResponse::success(
        Some(category.into()),
        Some("Category enabled successfully".to_string()),
        None,
    )))
}
