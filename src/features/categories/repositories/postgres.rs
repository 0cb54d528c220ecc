use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{CategoryRepository, RepositoryError, RepositoryResult};
use crate::features::categories::dtos::CategoryFilter;
use crate::features::categories::models::{Category, CategoryStatus, NewCategory};
use crate::shared::types::{Page, PaginationQuery};

const CATEGORY_COLUMNS: &str =
    "id, name, description, status, created_at, updated_at, deleted_at";

/// Convert database error, surfacing unique constraint violations
fn handle_db_error(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db_err) = &e {
        // PostgreSQL unique_violation
        if db_err.code().as_deref() == Some("23505") {
            let constraint = db_err.constraint().unwrap_or("unique").to_string();
            return RepositoryError::UniqueViolation(constraint);
        }
    }
    RepositoryError::Database(e)
}

/// Escape `LIKE` metacharacters so user input matches literally
fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for ch in fragment.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn contains_pattern(fragment: &str) -> String {
    format!("%{}%", escape_like(fragment))
}

/// Appends the WHERE clause for a paged listing filter
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &CategoryFilter) {
    builder.push(" WHERE TRUE");
    if let Some(name) = &filter.name {
        builder
            .push(" AND name ILIKE ")
            .push_bind(contains_pattern(name));
    }
    if let Some(status) = filter.status {
        builder.push(" AND status = ").push_bind(status);
    }
    if let Some(after) = filter.created_after {
        builder.push(" AND created_at >= ").push_bind(after);
    }
    if let Some(before) = filter.created_before {
        builder.push(" AND created_at <= ").push_bind(before);
    }
}

/// PostgreSQL-backed category storage
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn exists_by_name(&self, name: &str) -> RepositoryResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM categories
                WHERE name = $1 AND status <> 'DELETED'
            )
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check category name: {:?}", e);
            handle_db_error(e)
        })
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Category>> {
        let query = format!("SELECT {} FROM categories WHERE id = $1", CATEGORY_COLUMNS);
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get category by id: {:?}", e);
                handle_db_error(e)
            })
    }

    async fn find_by_name(&self, name: &str) -> RepositoryResult<Option<Category>> {
        let query = format!(
            r#"
            SELECT {}
            FROM categories
            WHERE name = $1
            ORDER BY (status = 'DELETED'), id DESC
            LIMIT 1
            "#,
            CATEGORY_COLUMNS
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get category by name: {:?}", e);
                handle_db_error(e)
            })
    }

    async fn find_by_name_containing(&self, fragment: &str) -> RepositoryResult<Vec<Category>> {
        let query = format!(
            "SELECT {} FROM categories WHERE name ILIKE $1 ORDER BY name, id",
            CATEGORY_COLUMNS
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(contains_pattern(fragment))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to search categories: {:?}", e);
                handle_db_error(e)
            })
    }

    async fn find_by_status(&self, status: CategoryStatus) -> RepositoryResult<Vec<Category>> {
        let query = format!(
            "SELECT {} FROM categories WHERE status = $1 ORDER BY id",
            CATEGORY_COLUMNS
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(status)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list categories by status: {:?}", e);
                handle_db_error(e)
            })
    }

    async fn find_page(
        &self,
        page: &PaginationQuery,
        filter: &CategoryFilter,
    ) -> RepositoryResult<Page<Category>> {
        // Get total count
        let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM categories");
        push_filter(&mut count_query, filter);
        let total: i64 = count_query
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count categories: {:?}", e);
                handle_db_error(e)
            })?;

        // Get paginated results
        let mut select = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM categories",
            CATEGORY_COLUMNS
        ));
        push_filter(&mut select, filter);
        select
            .push(format!(
                " ORDER BY created_at {0}, id {0}",
                filter.sort.as_sql()
            ))
            .push(" LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        let categories = select
            .build_query_as::<Category>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list categories: {:?}", e);
                handle_db_error(e)
            })?;

        Ok(Page::new(categories, page, total))
    }

    async fn insert(&self, category: NewCategory) -> RepositoryResult<Category> {
        let query = format!(
            r#"
            INSERT INTO categories (name, description, status)
            VALUES ($1, $2, 'ACTIVE')
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&category.name)
            .bind(&category.description)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert category: {:?}", e);
                handle_db_error(e)
            })
    }

    async fn save(
        &self,
        category: &Category,
        expected: CategoryStatus,
    ) -> RepositoryResult<Category> {
        let query = format!(
            r#"
            UPDATE categories
            SET name = $1,
                description = $2,
                status = $3,
                deleted_at = $4,
                updated_at = NOW()
            WHERE id = $5 AND status = $6
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        );
        let saved = sqlx::query_as::<_, Category>(&query)
            .bind(&category.name)
            .bind(&category.description)
            .bind(category.audit.status)
            .bind(category.audit.deleted_at)
            .bind(category.id)
            .bind(expected)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update category {}: {:?}", category.id, e);
                handle_db_error(e)
            })?;

        saved.ok_or_else(|| {
            tracing::warn!(
                "Category {} left status {} before the update was applied",
                category.id,
                expected
            );
            RepositoryError::StatusChanged {
                id: category.id,
                expected,
            }
        })
    }
}
