//! Transaction repository and service traits.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::transactions_model::{NewTransaction, Transaction, TransactionFilter, TransactionInput};
use crate::errors::Result;

/// Persistence contract for transactions.
///
/// Every lookup excludes soft-deleted rows.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    /// Loads a transaction owned by `user_id`. Returns a not-found error otherwise.
    fn get_by_id(&self, user_id: &str, transaction_id: &str) -> Result<Transaction>;

    fn list(&self, user_id: &str, filter: &TransactionFilter) -> Result<Vec<Transaction>>;

    /// Sums `amount` over the user's transactions dated within `[start, end]`
    /// whose category equals `category_id` exactly. `None` only matches
    /// uncategorized rows. Returns zero when nothing matches.
    fn sum_amounts(
        &self,
        user_id: &str,
        category_id: Option<&str>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Decimal>;

    async fn insert(&self, new_transaction: NewTransaction) -> Result<Transaction>;

    /// Persists category, amount, description and date of an existing row.
    async fn update(&self, transaction: Transaction) -> Result<Transaction>;

    /// Marks the row deleted. Returns the number of affected rows.
    async fn soft_delete(&self, user_id: &str, transaction_id: &str) -> Result<usize>;
}

/// Transaction mutation handlers. Every mutation re-triggers budget recalculation.
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    fn get_transactions(&self, user_id: &str, filter: &TransactionFilter)
        -> Result<Vec<Transaction>>;

    fn get_transaction(&self, user_id: &str, transaction_id: &str) -> Result<Transaction>;

    async fn create_transaction(
        &self,
        user_id: &str,
        input: TransactionInput,
    ) -> Result<Transaction>;

    async fn update_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
        input: TransactionInput,
    ) -> Result<Transaction>;

    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<()>;
}
