use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use fintrack_core::users::{NewUser, User, UserRepositoryTrait};
use fintrack_core::{Error, Result};

use super::model::{NewUserDB, UserChangesDB, UserDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::users;

pub struct UserRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        UserRepository { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn get_by_id(&self, user_id: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;
        users::table
            .find(user_id)
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .into_core()?
            .map(User::from)
            .ok_or_else(|| Error::not_found(format!("User {} not found", user_id)))
    }

    fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let email = identifier.to_lowercase();
        let row = users::table
            .filter(users::username.eq(identifier).or(users::email.eq(email.as_str())))
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(User::from))
    }

    fn exists_with_username_or_email(&self, username: &str, email: &str) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        let count: i64 = users::table
            .filter(users::username.eq(username).or(users::email.eq(email)))
            .count()
            .get_result(&mut conn)
            .into_core()?;
        Ok(count > 0)
    }

    async fn insert(&self, new_user: NewUser) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let row = NewUserDB::from_domain(
                    Uuid::new_v4().to_string(),
                    new_user,
                    Utc::now().naive_utc(),
                );
                let inserted = diesel::insert_into(users::table)
                    .values(&row)
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(User::from(inserted))
            })
            .await
    }

    async fn update(&self, user: User) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let user_id = user.id.clone();
                let changes = UserChangesDB::from_domain(user, Utc::now().naive_utc());
                diesel::update(users::table.find(user_id.as_str()))
                    .set(&changes)
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .map(User::from)
                    .ok_or_else(|| Error::not_found(format!("User {} not found", user_id)))
            })
            .await
    }
}
