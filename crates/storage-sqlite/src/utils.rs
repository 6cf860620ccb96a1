//! Helpers for money columns.
//!
//! Amounts are stored as decimal strings so SQLite never rounds them through
//! a float. Aggregation happens in Rust over the selected strings.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::errors::StorageError;

/// Parses a stored decimal string.
pub fn parse_amount(column: &'static str, value: &str) -> Result<Decimal, StorageError> {
    Decimal::from_str(value.trim()).map_err(|_| StorageError::InvalidAmount {
        column,
        value: value.to_string(),
    })
}

/// Sums stored decimal strings, failing on the first unparseable value or
/// when the total leaves the `Decimal` range.
pub fn sum_amounts<I, S>(column: &'static str, values: I) -> Result<Decimal, StorageError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values.into_iter().try_fold(Decimal::ZERO, |acc, v| {
        acc.checked_add(parse_amount(column, v.as_ref())?)
            .ok_or(StorageError::AmountOverflow { column })
    })
}
