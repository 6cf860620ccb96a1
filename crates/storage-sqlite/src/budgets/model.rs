//! Database models for budgets.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::errors::StorageError;
use crate::utils::parse_amount;
use fintrack_core::budgets::{Budget, NewBudget};

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::budgets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BudgetDB {
    pub id: String,
    pub user_id: String,
    pub category_id: Option<String>,
    pub limit_amount: String,
    pub remaining_amount: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::budgets)]
pub struct NewBudgetDB {
    pub id: String,
    pub user_id: String,
    pub category_id: Option<String>,
    pub limit_amount: String,
    pub remaining_amount: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Editable columns. A `None` category writes NULL.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::budgets)]
#[diesel(treat_none_as_null = true)]
pub struct BudgetChangesDB {
    pub category_id: Option<String>,
    pub limit_amount: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<BudgetDB> for Budget {
    type Error = StorageError;

    fn try_from(db: BudgetDB) -> Result<Self, Self::Error> {
        Ok(Budget {
            limit_amount: parse_amount("limit_amount", &db.limit_amount)?,
            remaining_amount: parse_amount("remaining_amount", &db.remaining_amount)?,
            id: db.id,
            user_id: db.user_id,
            category_id: db.category_id,
            start_date: db.start_date,
            end_date: db.end_date,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl NewBudgetDB {
    /// The remaining amount starts at the limit until the first recalculation.
    pub fn from_domain(id: String, budget: NewBudget, now: NaiveDateTime) -> Self {
        let limit = budget.limit_amount.to_string();
        NewBudgetDB {
            id,
            user_id: budget.user_id,
            category_id: budget.category_id,
            remaining_amount: limit.clone(),
            limit_amount: limit,
            start_date: budget.start_date,
            end_date: budget.end_date,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<&Budget> for BudgetChangesDB {
    fn from(budget: &Budget) -> Self {
        BudgetChangesDB {
            category_id: budget.category_id.clone(),
            limit_amount: budget.limit_amount.to_string(),
            start_date: budget.start_date,
            end_date: budget.end_date,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
