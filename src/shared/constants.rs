/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// CATEGORY FIELD BOUNDS (characters, after normalization)
// =============================================================================

pub const CATEGORY_NAME_MIN_LEN: usize = 3;
pub const CATEGORY_NAME_MAX_LEN: usize = 50;

pub const CATEGORY_DESCRIPTION_MIN_LEN: usize = 5;
pub const CATEGORY_DESCRIPTION_MAX_LEN: usize = 255;
