use utoipa::{Modify, OpenApi};

use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::categories::models::CategoryStatus;
use crate::shared::types::{ApiResponse, Meta, Page, SortDirection};

#[derive(OpenApi)]
#[openapi(
    paths(
        categories_handlers::create_category,
        categories_handlers::list_categories,
        categories_handlers::search_categories,
        categories_handlers::get_category_by_name,
        categories_handlers::list_categories_by_status,
        categories_handlers::get_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        categories_handlers::disable_category,
        categories_handlers::enable_category,
    ),
    components(
        schemas(
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            ApiResponse<Page<categories_dtos::CategoryResponseDto>>,
            Meta,
            SortDirection,
            CategoryStatus,
            categories_dtos::CreateCategoryDto,
            categories_dtos::UpdateCategoryDto,
            categories_dtos::CategoryResponseDto,
        )
    ),
    tags(
        (name = "categories", description = "Category catalog and lifecycle")
    ),
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "API documentation for the category catalog",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
