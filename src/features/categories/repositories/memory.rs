use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{CategoryRepository, RepositoryError, RepositoryResult};
use crate::features::categories::dtos::CategoryFilter;
use crate::features::categories::models::{AuditFields, Category, CategoryStatus, NewCategory};
use crate::shared::types::{Page, PaginationQuery, SortDirection};

const UNIQUE_NAME_INDEX: &str = "categories_name_unique_when_not_deleted";

#[derive(Default)]
struct Store {
    next_id: i64,
    rows: BTreeMap<i64, Category>,
}

impl Store {
    fn name_taken(&self, name: &str, except_id: Option<i64>) -> bool {
        self.rows
            .values()
            .any(|c| c.name == name && !c.is_deleted() && Some(c.id) != except_id)
    }
}

/// In-process storage with the same uniqueness rule as the PostgreSQL schema
#[derive(Default)]
pub struct InMemoryCategoryRepository {
    store: RwLock<Store>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn exists_by_name(&self, name: &str) -> RepositoryResult<bool> {
        Ok(self.store.read().await.name_taken(name, None))
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Category>> {
        Ok(self.store.read().await.rows.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> RepositoryResult<Option<Category>> {
        let store = self.store.read().await;
        let mut matches: Vec<&Category> = store.rows.values().filter(|c| c.name == name).collect();
        matches.sort_by_key(|c| (c.is_deleted(), std::cmp::Reverse(c.id)));
        Ok(matches.first().map(|c| (*c).clone()))
    }

    async fn find_by_name_containing(&self, fragment: &str) -> RepositoryResult<Vec<Category>> {
        let needle = fragment.to_lowercase();
        let store = self.store.read().await;
        let mut found: Vec<Category> = store
            .rows
            .values()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(found)
    }

    async fn find_by_status(&self, status: CategoryStatus) -> RepositoryResult<Vec<Category>> {
        let store = self.store.read().await;
        Ok(store
            .rows
            .values()
            .filter(|c| c.status() == status)
            .cloned()
            .collect())
    }

    async fn find_page(
        &self,
        page: &PaginationQuery,
        filter: &CategoryFilter,
    ) -> RepositoryResult<Page<Category>> {
        let store = self.store.read().await;
        let mut matching: Vec<Category> = store
            .rows
            .values()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect();

        matching.sort_by_key(|c| (c.audit.created_at, c.id));
        if filter.sort == SortDirection::Desc {
            matching.reverse();
        }

        let total = matching.len() as i64;
        let items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();

        Ok(Page::new(items, page, total))
    }

    async fn insert(&self, category: NewCategory) -> RepositoryResult<Category> {
        let mut store = self.store.write().await;
        if store.name_taken(&category.name, None) {
            return Err(RepositoryError::UniqueViolation(UNIQUE_NAME_INDEX.into()));
        }

        store.next_id += 1;
        let now = Utc::now();
        let created = Category {
            id: store.next_id,
            name: category.name,
            description: category.description,
            audit: AuditFields {
                status: CategoryStatus::Active,
                created_at: now,
                updated_at: now,
                deleted_at: None,
            },
        };
        store.rows.insert(created.id, created.clone());
        Ok(created)
    }

    async fn save(
        &self,
        category: &Category,
        expected: CategoryStatus,
    ) -> RepositoryResult<Category> {
        let mut store = self.store.write().await;

        match store.rows.get(&category.id) {
            None => return Err(RepositoryError::Database(sqlx::Error::RowNotFound)),
            Some(row) if row.audit.status != expected => {
                return Err(RepositoryError::StatusChanged {
                    id: category.id,
                    expected,
                })
            }
            Some(_) => {}
        }

        if !category.is_deleted() && store.name_taken(&category.name, Some(category.id)) {
            return Err(RepositoryError::UniqueViolation(UNIQUE_NAME_INDEX.into()));
        }

        let row = store
            .rows
            .get_mut(&category.id)
            .ok_or(RepositoryError::Database(sqlx::Error::RowNotFound))?;

        // created_at is owned by storage and never rewritten
        row.name = category.name.clone();
        row.description = category.description.clone();
        row.audit.status = category.audit.status;
        row.audit.deleted_at = category.audit.deleted_at;
        row.audit.updated_at = Utc::now();

        Ok(row.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_category(name: &str) -> NewCategory {
        NewCategory {
            name: name.to_string(),
            description: "SOME DESCRIPTION".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_enforces_unique_name_among_live_rows() {
        let repo = InMemoryCategoryRepository::new();
        let first = repo.insert(new_category("TECH")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(first.status(), CategoryStatus::Active);

        let err = repo.insert(new_category("TECH")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::UniqueViolation(_)));
    }

    #[tokio::test]
    async fn test_deleted_rows_release_their_name() {
        let repo = InMemoryCategoryRepository::new();
        let mut first = repo.insert(new_category("TECH")).await.unwrap();
        first.audit.status = CategoryStatus::Deleted;
        first.audit.deleted_at = Some(Utc::now());
        repo.save(&first, CategoryStatus::Active).await.unwrap();

        assert!(!repo.exists_by_name("TECH").await.unwrap());
        let second = repo.insert(new_category("TECH")).await.unwrap();

        let found = repo.find_by_name("TECH").await.unwrap().unwrap();
        assert_eq!(found.id, second.id);
    }

    #[tokio::test]
    async fn test_save_refreshes_updated_at_only() {
        let repo = InMemoryCategoryRepository::new();
        let created = repo.insert(new_category("TECH")).await.unwrap();
        let mut changed = created.clone();
        changed.description = "OTHER".to_string();

        let saved = repo.save(&changed, CategoryStatus::Active).await.unwrap();
        assert_eq!(saved.audit.created_at, created.audit.created_at);
        assert!(saved.audit.updated_at >= created.audit.updated_at);
        assert_eq!(saved.description, "OTHER");
    }

    #[tokio::test]
    async fn test_save_refuses_stale_status() {
        let repo = InMemoryCategoryRepository::new();
        let created = repo.insert(new_category("TECH")).await.unwrap();

        let mut deleted = created.clone();
        deleted.audit.status = CategoryStatus::Deleted;
        deleted.audit.deleted_at = Some(Utc::now());
        repo.save(&deleted, CategoryStatus::Active).await.unwrap();

        // a writer still holding the ACTIVE snapshot
        let mut stale = created.clone();
        stale.audit.status = CategoryStatus::Inactive;
        let err = repo.save(&stale, CategoryStatus::Active).await.unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::StatusChanged {
                expected: CategoryStatus::Active,
                ..
            }
        ));

        let stored = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(stored.status(), CategoryStatus::Deleted);
        assert!(stored.audit.deleted_at.is_some());
    }
}
