use log::{debug, info};
use std::sync::Arc;

use super::budgets_model::{Budget, BudgetInput, BudgetUpsert, NewBudget};
use super::budgets_traits::{BudgetRecalculatorTrait, BudgetRepositoryTrait, BudgetServiceTrait};
use crate::categories::{ensure_category_usable, CategoryRepositoryTrait};
use crate::errors::{Error, Result};

/// Service for managing budgets.
pub struct BudgetService {
    repository: Arc<dyn BudgetRepositoryTrait>,
    category_repository: Arc<dyn CategoryRepositoryTrait>,
    recalculator: Arc<dyn BudgetRecalculatorTrait>,
}

impl BudgetService {
    pub fn new(
        repository: Arc<dyn BudgetRepositoryTrait>,
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
impl BudgetServiceTrait for BudgetService {
    fn get_budgets(&self, user_id: &str) -> Result<Vec<Budget>> {
        self.repository.list_for_user(user_id)
    }

    fn get_budget(&self, user_id: &str, budget_id: &str) -> Result<Budget> {
        self.repository.get_by_id(user_id, budget_id)
    }

    async fn create_budget(&self, user_id: &str, input: BudgetInput) -> Result<BudgetUpsert> {
        let (start_date, end_date) = input.validate()?;
        ensure_category_usable(
            self.category_repository.as_ref(),
            user_id,
            input.category_id.as_deref(),
        )?;

        let existing = self.repository.find_by_key(
            user_id,
            input.category_id.as_deref(),
            start_date,
            end_date,
        )?;

        let (saved, overwritten) = match existing {
            Some(existing) => {
                debug!("Overwriting budget {} for user {}", existing.id, user_id);
                let saved = self
                    .repository
                    .update(Budget {
                        limit_amount: input.limit_amount,
                        start_date,
                        end_date,
                        ..existing
                    })
                    .await?;
                (saved, true)
            }
            None => {
                let saved = self
                    .repository
                    .insert(NewBudget {
                        user_id: user_id.to_string(),
                        category_id: input.category_id,
                        limit_amount: input.limit_amount,
                        start_date,
                        end_date,
                    })
                    .await?;
                info!("Created budget {} for user {}", saved.id, user_id);
                (saved, false)
            }
        };

        let budget = self.recalculator.recalculate_remaining(&saved).await?;
        Ok(BudgetUpsert {
            budget,
            overwritten,
        })
    }

    async fn update_budget(
        &self,
        user_id: &str,
        budget_id: &str,
        input: BudgetInput,
    ) -> Result<Budget> {
        let existing = self.repository.get_by_id(user_id, budget_id)?;
        let (start_date, end_date) = input.validate()?;
        ensure_category_usable(
            self.category_repository.as_ref(),
            user_id,
            input.category_id.as_deref(),
        )?;

        let saved = self
            .repository
            .update(Budget {
                category_id: input.category_id,
                limit_amount: input.limit_amount,
                start_date,
                end_date,
                ..existing
            })
            .await?;

        self.recalculator.recalculate_remaining(&saved).await
    }

    async fn delete_budget(&self, user_id: &str, budget_id: &str) -> Result<()> {
        let deleted = self.repository.soft_delete(user_id, budget_id).await?;
        if deleted == 0 {
            return Err(Error::not_found(format!("Budget {} not found", budget_id)));
        }
        info!("Deleted budget {} for user {}", budget_id, user_id);
        Ok(())
    }
}
