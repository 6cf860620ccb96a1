use async_trait::async_trait;
use log::{debug, error, info};
use std::sync::Arc;

use super::budgets_model::{Budget, RecalculationReport};
use super::budgets_traits::{BudgetRecalculatorTrait, BudgetRepositoryTrait};
use crate::errors::{Error, Result};
use crate::transactions::{Transaction, TransactionRepositoryTrait};

/// Keeps each budget's cached `remaining_amount` in line with its transactions.
///
/// There is no in-process locking: two concurrent mutations touching the same
/// window may race on the read-then-write, and the next recalculation of that
/// budget repairs the value.
pub struct BudgetRecalculator {
    budget_repository: Arc<dyn BudgetRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
}

impl BudgetRecalculator {
    pub fn new(
        budget_repository: Arc<dyn BudgetRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    ) -> Self {
        Self {
            budget_repository,
            transaction_repository,
        }
    }

    /// Runs `recalculate_remaining` over `budgets` in order, logging and
    /// skipping the ones that fail.
    async fn recalculate_each(&self, budgets: &[Budget]) -> RecalculationReport {
        let mut report = RecalculationReport::default();
        for budget in budgets {
            match self.recalculate_remaining(budget).await {
                Ok(_) => report.recalculated += 1,
                Err(e) => {
                    error!(
                        "Failed to recalculate budget {} (user {}): {}",
                        budget.id, budget.user_id, e
                    );
                    report.failed.push(budget.id.clone());
                }
            }
        }
        report
    }
}

#[async_trait]
impl BudgetRecalculatorTrait for BudgetRecalculator {
    async fn recalculate_remaining(&self, budget: &Budget) -> Result<Budget> {
        let spent = self.transaction_repository.sum_amounts(
            &budget.user_id,
            budget.category_id.as_deref(),
            budget.start_date,
            budget.end_date,
        )?;
        let remaining = budget.limit_amount.checked_sub(spent).ok_or_else(|| {
            Error::Unexpected(format!("Remaining amount of budget {} is out of range", budget.id))
        })?;
        debug!(
            "Budget {}: limit {} - spent {} = remaining {}",
            budget.id, budget.limit_amount, spent, remaining
        );

        self.budget_repository
            .update_remaining(&budget.id, remaining)
            .await
    }

    async fn recalculate_affected_budgets(&self, transaction: &Transaction) -> RecalculationReport {
        let budgets = match self.budget_repository.find_covering(
            &transaction.user_id,
            transaction.category_id.as_deref(),
            transaction.transaction_date,
        ) {
            Ok(budgets) => budgets,
            Err(e) => {
                error!(
                    "Failed to find budgets affected by transaction {}: {}",
                    transaction.id, e
                );
                return RecalculationReport::default();
            }
        };

        debug!(
            "Transaction {} affects {} budget(s)",
            transaction.id,
            budgets.len()
        );
        self.recalculate_each(&budgets).await
    }

    async fn recalculate_all(&self) -> Result<RecalculationReport> {
        let budgets = self.budget_repository.list_all()?;
        info!("Recalculating remaining amounts for {} budget(s)", budgets.len());

        let report = self.recalculate_each(&budgets).await;
        if report.is_clean() {
            info!("Recalculated all {} budget(s)", report.recalculated);
        } else {
            error!(
                "Recalculated {} budget(s), {} failed: {:?}",
                report.recalculated,
                report.failed.len(),
                report.failed
            );
        }
        Ok(report)
    }
}
