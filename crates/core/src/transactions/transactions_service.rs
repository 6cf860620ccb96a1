use log::{debug, info};
use std::sync::Arc;

use super::transactions_model::{NewTransaction, Transaction, TransactionFilter, TransactionInput};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::budgets::BudgetRecalculatorTrait;
use crate::categories::{ensure_category_usable, CategoryRepositoryTrait};
use crate::errors::{Error, Result};

/// Service for managing transactions.
///
/// Fan-out recalculation is best-effort: once the primary write succeeds the
/// mutation succeeds, whatever happens to the derived budget totals.
pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
    category_repository: Arc<dyn CategoryRepositoryTrait>,
    recalculator: Arc<dyn BudgetRecalculatorTrait>,
}

impl TransactionService {
    pub fn new(
        repository: Arc<dyn TransactionRepositoryTrait>,
        category_repository: Arc<dyn CategoryRepositoryTrait>,
        recalculator: Arc<dyn BudgetRecalculatorTrait>,
    ) -> Self {
        Self {
            repository,
            category_repository,
            recalculator,
        }
    }
}

#[async_trait::async_trait]
impl TransactionServiceTrait for TransactionService {
    fn get_transactions(
        &self,
        user_id: &str,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>> {
        self.repository.list(user_id, filter)
    }

    fn get_transaction(&self, user_id: &str, transaction_id: &str) -> Result<Transaction> {
        self.repository.get_by_id(user_id, transaction_id)
    }

    async fn create_transaction(
        &self,
        user_id: &str,
        input: TransactionInput,
    ) -> Result<Transaction> {
        let transaction_date = input.validate()?;
        ensure_category_usable(
            self.category_repository.as_ref(),
            user_id,
            input.category_id.as_deref(),
        )?;
        let created = self
            .repository
            .insert(NewTransaction {
                user_id: user_id.to_string(),
                category_id: input.category_id,
                amount: input.amount,
                description: input.description,
                transaction_date,
            })
            .await?;
        debug!("Created transaction {} for user {}", created.id, user_id);

        self.recalculator.recalculate_affected_budgets(&created).await;
        Ok(created)
    }

    async fn update_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
        input: TransactionInput,
    ) -> Result<Transaction> {
        let existing = self.repository.get_by_id(user_id, transaction_id)?;
        let transaction_date = input.validate()?;
        ensure_category_usable(
            self.category_repository.as_ref(),
            user_id,
            input.category_id.as_deref(),
        )?;

        let previous = existing.clone();
        let updated = self
            .repository
            .update(Transaction {
                category_id: input.category_id,
                amount: input.amount,
                description: input.description,
                transaction_date,
                ..existing
            })
            .await?;

        // Undo the old contribution first, then apply the new one. The two
        // snapshots may fall into entirely different budget windows.
        self.recalculator.recalculate_affected_budgets(&previous).await;
        self.recalculator.recalculate_affected_budgets(&updated).await;
        Ok(updated)
    }

    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<()> {
        let existing = self.repository.get_by_id(user_id, transaction_id)?;
        let deleted = self.repository.soft_delete(user_id, transaction_id).await?;
        if deleted == 0 {
            return Err(Error::not_found(format!(
                "Transaction {} not found",
                transaction_id
            )));
        }
        info!("Deleted transaction {} for user {}", transaction_id, user_id);

        self.recalculator.recalculate_affected_budgets(&existing).await;
        Ok(())
    }
}
