//! Budgets module - domain models, the recalculation engine, services, and traits.

mod budget_recalculator;
mod budgets_model;
mod budgets_service;
mod budgets_traits;



pub use budget_recalculator::BudgetRecalculator;
pub use budgets_model::{Budget, BudgetInput, BudgetUpsert, NewBudget, RecalculationReport};
pub use budgets_service::BudgetService;
pub use budgets_traits::{BudgetRecalculatorTrait, BudgetRepositoryTrait, BudgetServiceTrait};
