//! Transaction domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::utils::time_utils::{parse_calendar_date, parse_optional_date};

/// Domain model representing a spending transaction.
///
/// `category_id = None` marks an uncategorized transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub category_id: Option<String>,
    pub amount: Decimal,
    pub description: String,
    pub transaction_date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Request payload for creating or replacing a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInput {
    #[serde(default)]
    pub category_id: Option<String>,
    pub amount: Decimal,
    #[serde(default)]
    pub description: String,
    pub transaction_date: String,
}

impl TransactionInput {
    /// Checks the amount and parses the date. Runs before any write.
    pub fn validate(&self) -> Result<NaiveDate> {
        if self.amount <= Decimal::ZERO {
            return Err(Error::invalid_input("Amount must be greater than zero"));
        }
        parse_calendar_date("transactionDate", &self.transaction_date)
    }
}

/// Validated input for inserting a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub user_id: String,
    pub category_id: Option<String>,
    pub amount: Decimal,
    pub description: String,
    pub transaction_date: NaiveDate,
}

/// Optional filters for listing a user's transactions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub category_id: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl TransactionFilter {
    /// Builds a filter from raw query-string values.
    pub fn from_query(
        category_id: Option<String>,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Self> {
        Ok(Self {
            category_id: category_id.filter(|c| !c.trim().is_empty()),
            start_date: parse_optional_date("startDate", start_date)?,
            end_date: parse_optional_date("endDate", end_date)?,
        })
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        if let Some(category_id) = &self.category_id {
            if transaction.category_id.as_ref() != Some(category_id) {
                return false;
            }
        }
        if let Some(start) = self.start_date {
            if transaction.transaction_date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if transaction.transaction_date > end {
                return false;
            }
        }
        true
    }
}
