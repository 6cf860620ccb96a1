//! Budget domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::utils::time_utils::parse_calendar_date;

/// A spending limit over an inclusive date window.
///
/// `category_id = None` denotes a global budget. `remaining_amount` is a cached
/// value owned by the recalculation engine: `limit_amount` minus the sum of
/// matching transactions. It may be negative.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub user_id: String,
    pub category_id: Option<String>,
    pub limit_amount: Decimal,
    pub remaining_amount: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Request payload for creating or updating a budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetInput {
    #[serde(default)]
    pub category_id: Option<String>,
    pub limit_amount: Decimal,
    pub start_date: String,
    pub end_date: String,
}

impl BudgetInput {
    /// Validates the limit and the date window, returning the parsed dates.
    pub fn validate(&self) -> Result<(NaiveDate, NaiveDate)> {
        if self.limit_amount <= Decimal::ZERO {
            return Err(Error::invalid_input("Limit amount must be greater than zero"));
        }
        let start = parse_calendar_date("startDate", &self.start_date)?;
        let end = parse_calendar_date("endDate", &self.end_date)?;
        if end < start {
            return Err(Error::invalid_input(
                "End date must not be before start date",
            ));
        }
        Ok((start, end))
    }
}

/// Validated input for inserting a budget.
///
/// The remaining amount starts equal to the limit and is corrected by the
/// recalculation that follows every insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBudget {
    pub user_id: String,
    pub category_id: Option<String>,
    pub limit_amount: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Outcome of a create call: the persisted budget and whether an existing
/// budget with the same key was overwritten in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUpsert {
    pub budget: Budget,
    pub overwritten: bool,
}

/// Outcome of a best-effort recalculation pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecalculationReport {
    pub recalculated: usize,
    pub failed: Vec<String>,
}

impl RecalculationReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}
