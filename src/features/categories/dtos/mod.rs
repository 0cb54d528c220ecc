pub mod category_dto;

pub use category_dto::{
    CategoryFilter, CategoryQueryParams, CategoryResponseDto, CreateCategoryDto,
    SearchCategoriesQuery, UpdateCategoryDto,
};
