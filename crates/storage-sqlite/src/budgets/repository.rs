use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use fintrack_core::budgets::{Budget, BudgetRepositoryTrait, NewBudget};
use fintrack_core::{Error, Result};

use super::model::{BudgetChangesDB, BudgetDB, NewBudgetDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::budgets;

pub struct BudgetRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl BudgetRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        BudgetRepository { pool, writer }
    }

    /// Active budgets of one user, with a null-safe category predicate.
    fn active_for<'a>(
        user_id: &'a str,
        category_id: Option<&'a str>,
    ) -> budgets::BoxedQuery<'a, Sqlite> {
        let query = budgets::table
            .filter(budgets::user_id.eq(user_id))
            .filter(budgets::deleted_at.is_null())
            .into_boxed();
        match category_id {
            Some(category_id) => query.filter(budgets::category_id.eq(category_id)),
            None => query.filter(budgets::category_id.is_null()),
        }
    }

    fn load(&self, query: budgets::BoxedQuery<'_, Sqlite>) -> Result<Vec<Budget>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = query
            .order((budgets::start_date.asc(), budgets::created_at.asc()))
            .load::<BudgetDB>(&mut conn)
            .into_core()?;
        rows.into_iter()
            .map(|row| Budget::try_from(row).map_err(Error::from))
            .collect()
    }
}

#[async_trait]
impl BudgetRepositoryTrait for BudgetRepository {
    fn get_by_id(&self, user_id: &str, budget_id: &str) -> Result<Budget> {
        let mut conn = get_connection(&self.pool)?;
        let row = budgets::table
            .filter(budgets::id.eq(budget_id))
            .filter(budgets::user_id.eq(user_id))
            .filter(budgets::deleted_at.is_null())
            .select(BudgetDB::as_select())
            .first::<BudgetDB>(&mut conn)
            .optional()
            .into_core()?
            .ok_or_else(|| Error::not_found(format!("Budget {} not found", budget_id)))?;
        Ok(Budget::try_from(row)?)
    }

    fn find_by_key(
        &self,
        user_id: &str,
        category_id: Option<&str>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<Budget>> {
        let query = Self::active_for(user_id, category_id)
            .filter(budgets::start_date.eq(start))
            .filter(budgets::end_date.eq(end));
        Ok(self.load(query)?.into_iter().next())
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<Budget>> {
        let query = budgets::table
            .filter(budgets::user_id.eq(user_id))
            .filter(budgets::deleted_at.is_null())
            .into_boxed();
        self.load(query)
    }

    fn list_all(&self) -> Result<Vec<Budget>> {
        let query = budgets::table
            .filter(budgets::deleted_at.is_null())
            .into_boxed();
        self.load(query)
    }

    fn find_covering(
        &self,
        user_id: &str,
        category_id: Option<&str>,
        date: NaiveDate,
    ) -> Result<Vec<Budget>> {
        let query = Self::active_for(user_id, category_id)
            .filter(budgets::start_date.le(date))
            .filter(budgets::end_date.ge(date));
        self.load(query)
    }

    async fn insert(&self, new_budget: NewBudget) -> Result<Budget> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Budget> {
                let row = NewBudgetDB::from_domain(
                    Uuid::new_v4().to_string(),
                    new_budget,
                    Utc::now().naive_utc(),
                );
                let inserted = diesel::insert_into(budgets::table)
                    .values(&row)
                    .returning(BudgetDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Budget::try_from(inserted)?)
            })
            .await
    }

    async fn update(&self, budget: Budget) -> Result<Budget> {
        let changes = BudgetChangesDB::from(&budget);
        let budget_id = budget.id;
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Budget> {
                let updated = diesel::update(
                    budgets::table
                        .filter(budgets::id.eq(budget_id.as_str()))
                        .filter(budgets::deleted_at.is_null()),
                )
                .set(&changes)
                .returning(BudgetDB::as_returning())
                .get_result(conn)
                .optional()
                .map_err(StorageError::from)?
                .ok_or_else(|| Error::not_found(format!("Budget {} not found", budget_id)))?;
                Ok(Budget::try_from(updated)?)
            })
            .await
    }

    async fn update_remaining(&self, budget_id: &str, remaining_amount: Decimal) -> Result<Budget> {
        let budget_id = budget_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Budget> {
                let updated = diesel::update(
                    budgets::table
                        .filter(budgets::id.eq(budget_id.as_str()))
                        .filter(budgets::deleted_at.is_null()),
                )
                .set((
                    budgets::remaining_amount.eq(remaining_amount.to_string()),
                    budgets::updated_at.eq(Utc::now().naive_utc()),
                ))
                .returning(BudgetDB::as_returning())
                .get_result(conn)
                .optional()
                .map_err(StorageError::from)?
                .ok_or_else(|| Error::not_found(format!("Budget {} not found", budget_id)))?;
                Ok(Budget::try_from(updated)?)
            })
            .await
    }

    async fn soft_delete(&self, user_id: &str, budget_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        let budget_id = budget_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::update(
                    budgets::table
                        .filter(budgets::id.eq(budget_id))
                        .filter(budgets::user_id.eq(user_id))
                        .filter(budgets::deleted_at.is_null()),
                )
                .set(budgets::deleted_at.eq(Some(Utc::now().naive_utc())))
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }
}
