//! Database models for transactions.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::errors::StorageError;
use crate::utils::parse_amount;
use fintrack_core::transactions::{NewTransaction, Transaction};

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: String,
    pub user_id: String,
    pub category_id: Option<String>,
    pub amount: String,
    pub description: String,
    pub transaction_date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
pub struct NewTransactionDB {
    pub id: String,
    pub user_id: String,
    pub category_id: Option<String>,
    pub amount: String,
    pub description: String,
    pub transaction_date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(treat_none_as_null = true)]
pub struct TransactionChangesDB {
    pub category_id: Option<String>,
    pub amount: String,
    pub description: String,
    pub transaction_date: NaiveDate,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<TransactionDB> for Transaction {
    type Error = StorageError;

    fn try_from(db: TransactionDB) -> Result<Self, Self::Error> {
        Ok(Transaction {
            amount: parse_amount("amount", &db.amount)?,
            id: db.id,
            user_id: db.user_id,
            category_id: db.category_id,
            description: db.description,
            transaction_date: db.transaction_date,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl NewTransactionDB {
    pub fn from_domain(id: String, tx: NewTransaction, now: NaiveDateTime) -> Self {
        NewTransactionDB {
            id,
            user_id: tx.user_id,
            category_id: tx.category_id,
            amount: tx.amount.to_string(),
            description: tx.description,
            transaction_date: tx.transaction_date,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<&Transaction> for TransactionChangesDB {
    fn from(tx: &Transaction) -> Self {
        TransactionChangesDB {
            category_id: tx.category_id.clone(),
            amount: tx.amount.to_string(),
            description: tx.description.clone(),
            transaction_date: tx.transaction_date,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
