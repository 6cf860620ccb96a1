use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use fintrack_core::categories::{Category, CategoryRepositoryTrait, NewCategory};
use fintrack_core::{Error, Result};

use super::model::{CategoryDB, NewCategoryDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::categories;

pub struct CategoryRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CategoryRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        CategoryRepository { pool, writer }
    }
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    fn get_by_id(&self, user_id: &str, category_id: &str) -> Result<Category> {
        let mut conn = get_connection(&self.pool)?;
        categories::table
            .filter(categories::id.eq(category_id))
            .filter(categories::user_id.eq(user_id))
            .filter(categories::deleted_at.is_null())
            .select(CategoryDB::as_select())
            .first::<CategoryDB>(&mut conn)
            .optional()
            .into_core()?
            .map(Category::from)
            .ok_or_else(|| Error::not_found(format!("Category {} not found", category_id)))
    }

    fn find_by_name(&self, user_id: &str, name: &str) -> Result<Option<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let row = categories::table
            .filter(categories::user_id.eq(user_id))
            .filter(categories::name.eq(name))
            .filter(categories::deleted_at.is_null())
            .select(CategoryDB::as_select())
            .first::<CategoryDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(Category::from))
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = categories::table
            .filter(categories::user_id.eq(user_id))
            .filter(categories::deleted_at.is_null())
            .order(categories::name.asc())
            .select(CategoryDB::as_select())
            .load::<CategoryDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn insert(&self, new_category: NewCategory) -> Result<Category> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Category> {
                let row = NewCategoryDB::from_domain(
                    Uuid::new_v4().to_string(),
                    new_category,
                    Utc::now().naive_utc(),
                );
                let inserted = diesel::insert_into(categories::table)
                    .values(&row)
                    .returning(CategoryDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Category::from(inserted))
            })
            .await
    }

    async fn rename(&self, category_id: &str, name: &str) -> Result<Category> {
        let category_id = category_id.to_string();
        let name = name.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Category> {
                diesel::update(
                    categories::table
                        .filter(categories::id.eq(category_id.as_str()))
                        .filter(categories::deleted_at.is_null()),
                )
                .set((
                    categories::name.eq(name),
                    categories::updated_at.eq(Utc::now().naive_utc()),
                ))
                .returning(CategoryDB::as_returning())
                .get_result(conn)
                .optional()
                .map_err(StorageError::from)?
                .map(Category::from)
                .ok_or_else(|| Error::not_found(format!("Category {} not found", category_id)))
            })
            .await
    }

    async fn soft_delete(&self, user_id: &str, category_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        let category_id = category_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::update(
                    categories::table
                        .filter(categories::id.eq(category_id))
                        .filter(categories::user_id.eq(user_id))
                        .filter(categories::deleted_at.is_null()),
                )
                .set(categories::deleted_at.eq(Some(Utc::now().naive_utc())))
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }
}
