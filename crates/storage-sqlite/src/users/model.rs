//! Database models for users.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use fintrack_core::users::{NewUser, User};

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub currency: String,
    pub notifications_enabled: bool,
    pub theme: String,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUserDB {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        User {
            id: db.id,
            username: db.username,
            email: db.email,
            password_hash: db.password_hash,
            first_name: db.first_name,
            last_name: db.last_name,
            phone_number: db.phone_number,
            currency: db.currency,
            notifications_enabled: db.notifications_enabled,
            theme: db.theme,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

/// Mutable columns written by a profile edit or password reset.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(treat_none_as_null = true)]
pub struct UserChangesDB {
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub currency: String,
    pub notifications_enabled: bool,
    pub theme: String,
    pub updated_at: NaiveDateTime,
}

impl UserChangesDB {
    pub fn from_domain(user: User, now: NaiveDateTime) -> Self {
        UserChangesDB {
            password_hash: user.password_hash,
            first_name: user.first_name,
            last_name: user.last_name,
            phone_number: user.phone_number,
            currency: user.currency,
            notifications_enabled: user.notifications_enabled,
            theme: user.theme,
            updated_at: now,
        }
    }
}

impl NewUserDB {
    pub fn from_domain(id: String, user: NewUser, now: NaiveDateTime) -> Self {
        NewUserDB {
            id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}
