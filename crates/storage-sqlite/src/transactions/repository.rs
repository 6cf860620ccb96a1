use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use fintrack_core::transactions::{
    NewTransaction, Transaction, TransactionFilter, TransactionRepositoryTrait,
};
use fintrack_core::{Error, Result};

use super::model::{NewTransactionDB, TransactionChangesDB, TransactionDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::transactions;
use crate::utils::sum_amounts;

pub struct TransactionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TransactionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        TransactionRepository { pool, writer }
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    fn get_by_id(&self, user_id: &str, transaction_id: &str) -> Result<Transaction> {
        let mut conn = get_connection(&self.pool)?;
        let row = transactions::table
            .filter(transactions::id.eq(transaction_id))
            .filter(transactions::user_id.eq(user_id))
            .filter(transactions::deleted_at.is_null())
            .select(TransactionDB::as_select())
            .first::<TransactionDB>(&mut conn)
            .optional()
            .into_core()?
            .ok_or_else(|| Error::not_found(format!("Transaction {} not found", transaction_id)))?;
        Ok(Transaction::try_from(row)?)
    }

    fn list(&self, user_id: &str, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = transactions::table
            .filter(transactions::user_id.eq(user_id))
            .filter(transactions::deleted_at.is_null())
            .into_boxed();
        if let Some(category_id) = &filter.category_id {
            query = query.filter(transactions::category_id.eq(category_id.as_str()));
        }
        if let Some(start) = filter.start_date {
            query = query.filter(transactions::transaction_date.ge(start));
        }
        if let Some(end) = filter.end_date {
            query = query.filter(transactions::transaction_date.le(end));
        }

        let rows = query
            .order((
                transactions::transaction_date.desc(),
                transactions::created_at.desc(),
            ))
            .load::<TransactionDB>(&mut conn)
            .into_core()?;
        rows.into_iter()
            .map(|row| Transaction::try_from(row).map_err(Error::from))
            .collect()
    }

    fn sum_amounts(
        &self,
        user_id: &str,
        category_id: Option<&str>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Decimal> {
        let mut conn = get_connection(&self.pool)?;
        let query = transactions::table
            .select(transactions::amount)
            .filter(transactions::user_id.eq(user_id))
            .filter(transactions::deleted_at.is_null())
            .filter(transactions::transaction_date.ge(start))
            .filter(transactions::transaction_date.le(end))
            .into_boxed();
        let query = match category_id {
            Some(category_id) => query.filter(transactions::category_id.eq(category_id)),
            None => query.filter(transactions::category_id.is_null()),
        };

        let amounts = query
            .load::<String>(&mut conn)
            .into_core()?;
        debug!(
            "Summing {} transaction(s) for user {} in [{}, {}]",
            amounts.len(),
            user_id,
            start,
            end
        );
        Ok(sum_amounts("amount", amounts)?)
    }

    async fn insert(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let row = NewTransactionDB::from_domain(
                    Uuid::new_v4().to_string(),
                    new_transaction,
                    Utc::now().naive_utc(),
                );
                let inserted = diesel::insert_into(transactions::table)
                    .values(&row)
                    .returning(TransactionDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Transaction::try_from(inserted)?)
            })
            .await
    }

    async fn update(&self, transaction: Transaction) -> Result<Transaction> {
        let changes = TransactionChangesDB::from(&transaction);
        let transaction_id = transaction.id;
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let updated = diesel::update(
                    transactions::table
                        .filter(transactions::id.eq(transaction_id.as_str()))
                        .filter(transactions::deleted_at.is_null()),
                )
                .set(&changes)
                .returning(TransactionDB::as_returning())
                .get_result(conn)
                .optional()
                .map_err(StorageError::from)?
                .ok_or_else(|| {
                    Error::not_found(format!("Transaction {} not found", transaction_id))
                })?;
                Ok(Transaction::try_from(updated)?)
            })
            .await
    }

    async fn soft_delete(&self, user_id: &str, transaction_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        let transaction_id = transaction_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::update(
                    transactions::table
                        .filter(transactions::id.eq(transaction_id))
                        .filter(transactions::user_id.eq(user_id))
                        .filter(transactions::deleted_at.is_null()),
                )
                .set(transactions::deleted_at.eq(Some(Utc::now().naive_utc())))
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }
}
