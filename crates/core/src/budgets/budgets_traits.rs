//! Budget repository, recalculation and service traits.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::budgets_model::{Budget, BudgetInput, BudgetUpsert, NewBudget, RecalculationReport};
use crate::errors::Result;
use crate::transactions::Transaction;

/// Persistence contract for budgets.
///
/// Every lookup excludes soft-deleted rows. Category comparisons are
/// null-safe: `None` matches only rows whose category is null.
#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    /// Loads a budget owned by `user_id`. Returns a not-found error otherwise.
    fn get_by_id(&self, user_id: &str, budget_id: &str) -> Result<Budget>;

    /// Finds the budget keyed by `(user_id, category_id, start, end)`, if any.
    fn find_by_key(
        &self,
        user_id: &str,
        category_id: Option<&str>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<Budget>>;

    fn list_for_user(&self, user_id: &str) -> Result<Vec<Budget>>;

    /// Every active budget regardless of owner.
    fn list_all(&self) -> Result<Vec<Budget>>;

    /// Budgets of `user_id` with exactly `category_id` whose window contains `date`.
    fn find_covering(
        &self,
        user_id: &str,
        category_id: Option<&str>,
        date: NaiveDate,
    ) -> Result<Vec<Budget>>;

    async fn insert(&self, new_budget: NewBudget) -> Result<Budget>;

    /// Persists category, limit and dates of an existing budget.
    async fn update(&self, budget: Budget) -> Result<Budget>;

    /// Writes back the cached remaining amount.
    async fn update_remaining(&self, budget_id: &str, remaining_amount: Decimal) -> Result<Budget>;

    /// Marks the row deleted. Returns the number of affected rows.
    async fn soft_delete(&self, user_id: &str, budget_id: &str) -> Result<usize>;
}

/// The budget recalculation engine.
#[async_trait]
pub trait BudgetRecalculatorTrait: Send + Sync {
    /// Recomputes `remaining = limit - sum(matching transactions)` and persists it.
    async fn recalculate_remaining(&self, budget: &Budget) -> Result<Budget>;

    /// Recalculates every budget whose window and category match `transaction`.
    /// Failures are logged and skipped, never propagated.
    async fn recalculate_affected_budgets(&self, transaction: &Transaction) -> RecalculationReport;

    /// Recalculates every budget in the store, skipping failures.
    async fn recalculate_all(&self) -> Result<RecalculationReport>;
}

/// Budget mutation handlers.
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    fn get_budgets(&self, user_id: &str) -> Result<Vec<Budget>>;

    fn get_budget(&self, user_id: &str, budget_id: &str) -> Result<Budget>;

    /// Creates a budget, or overwrites the one with the same
    /// `(category, start, end)` key in place.
    async fn create_budget(&self, user_id: &str, input: BudgetInput) -> Result<BudgetUpsert>;

    async fn update_budget(
        &self,
        user_id: &str,
        budget_id: &str,
        input: BudgetInput,
    ) -> Result<Budget>;

    async fn delete_budget(&self, user_id: &str, budget_id: &str) -> Result<()>;
}
