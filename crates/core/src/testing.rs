//! In-memory repositories shared by the service tests.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::budgets::{Budget, BudgetRepositoryTrait, NewBudget};
use crate::categories::{Category, CategoryRepositoryTrait, NewCategory};
use crate::errors::{DatabaseError, Error, Result};
use crate::gamification::{
    Badge, GamificationRepositoryTrait, NewPointsEntry, PointsEntry, UserBadge,
};
use crate::transactions::{
    NewTransaction, Transaction, TransactionFilter, TransactionRepositoryTrait,
};
use crate::users::{NewUser, User, UserRepositoryTrait, DEFAULT_CURRENCY, DEFAULT_THEME};

#[derive(Clone)]
struct Row<T> {
    value: T,
    deleted: bool,
}

fn live<T: Clone>(rows: &[Row<T>]) -> impl Iterator<Item = &T> {
    rows.iter().filter(|r| !r.deleted).map(|r| &r.value)
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// One store backing every repository trait, so services under test see
/// each other's writes the way they would through a shared database.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    next_id: Arc<AtomicUsize>,
    users: Arc<Mutex<Vec<Row<User>>>>,
    categories: Arc<Mutex<Vec<Row<Category>>>>,
    budgets: Arc<Mutex<Vec<Row<Budget>>>>,
    transactions: Arc<Mutex<Vec<Row<Transaction>>>>,
    badges: Arc<Mutex<Vec<Badge>>>,
    user_badges: Arc<Mutex<Vec<UserBadge>>>,
    points: Arc<Mutex<Vec<PointsEntry>>>,
    failing_budgets: Arc<Mutex<HashSet<String>>>,
    fail_covering_lookup: Arc<AtomicBool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn generate_id(&self, prefix: &str) -> String {
        format!("{}-{}", prefix, self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Makes `update_remaining` fail for `budget_id`.
    pub fn fail_updates_for(&self, budget_id: &str) {
        self.failing_budgets
            .lock()
            .unwrap()
            .insert(budget_id.to_string());
    }

    pub fn fail_covering_lookup(&self) {
        self.fail_covering_lookup.store(true, Ordering::SeqCst);
    }

    pub fn budget(&self, budget_id: &str) -> Budget {
        self.budgets
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.value.id == budget_id)
            .map(|r| r.value.clone())
            .unwrap()
    }

    /// Inserts a budget as-is, with `remaining_amount` left at `limit`.
    pub fn seed_budget(
        &self,
        user_id: &str,
        category_id: Option<&str>,
        limit: Decimal,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Budget {
        let budget = Budget {
            id: self.generate_id("budget"),
            user_id: user_id.to_string(),
            category_id: category_id.map(str::to_string),
            limit_amount: limit,
            remaining_amount: limit,
            start_date: start,
            end_date: end,
            created_at: now(),
            updated_at: now(),
        };
        self.budgets.lock().unwrap().push(Row {
            value: budget.clone(),
            deleted: false,
        });
        budget
    }

    /// Inserts a transaction without triggering any recalculation.
    pub fn seed_transaction(
        &self,
        user_id: &str,
        category_id: Option<&str>,
        amount: Decimal,
        transaction_date: NaiveDate,
    ) -> Transaction {
        let transaction = Transaction {
            id: self.generate_id("tx"),
            user_id: user_id.to_string(),
            category_id: category_id.map(str::to_string),
            amount,
            description: String::new(),
            transaction_date,
            created_at: now(),
            updated_at: now(),
        };
        self.transactions.lock().unwrap().push(Row {
            value: transaction.clone(),
            deleted: false,
        });
        transaction
    }

    pub fn seed_badge(&self, name: &str, threshold: i64) -> Badge {
        let badge = Badge {
            id: self.generate_id("badge"),
            name: name.to_string(),
            description: format!("Reach {} points", threshold),
            image_url: String::new(),
            category: "achievement".to_string(),
            threshold,
        };
        let mut badges = self.badges.lock().unwrap();
        badges.push(badge.clone());
        badges.sort_by_key(|b| b.threshold);
        badge
    }

    pub fn seed_category(&self, user_id: &str, name: &str) -> Category {
        let id = self.generate_id("cat");
        self.seed_category_with_id(user_id, &id, name)
    }

    pub fn seed_category_with_id(&self, user_id: &str, id: &str, name: &str) -> Category {
        let category = Category {
            id: id.to_string(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            created_at: now(),
            updated_at: now(),
        };
        self.categories.lock().unwrap().push(Row {
            value: category.clone(),
            deleted: false,
        });
        category
    }
}

#[async_trait]
impl BudgetRepositoryTrait for InMemoryStore {
    fn get_by_id(&self, user_id: &str, budget_id: &str) -> Result<Budget> {
        let budgets = self.budgets.lock().unwrap();
        let result = live(budgets.as_slice())
            .find(|b| b.id == budget_id && b.user_id == user_id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("Budget {} not found", budget_id)));
        result
    }

    fn find_by_key(
        &self,
        user_id: &str,
        category_id: Option<&str>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<Budget>> {
        let budgets = self.budgets.lock().unwrap();
        let result = Ok(live(budgets.as_slice())
            .find(|b| {
                b.user_id == user_id
                    && b.category_id.as_deref() == category_id
                    && b.start_date == start
                    && b.end_date == end
            })
            .cloned());
        result
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<Budget>> {
        let budgets = self.budgets.lock().unwrap();
        Ok(live(budgets.as_slice())
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect())
    }

    fn list_all(&self) -> Result<Vec<Budget>> {
        let budgets = self.budgets.lock().unwrap();
        Ok(live(budgets.as_slice()).cloned().collect())
    }

    fn find_covering(
        &self,
        user_id: &str,
        category_id: Option<&str>,
        date: NaiveDate,
    ) -> Result<Vec<Budget>> {
        if self.fail_covering_lookup.load(Ordering::SeqCst) {
            return Err(DatabaseError::QueryFailed("covering lookup failed".to_string()).into());
        }
        let budgets = self.budgets.lock().unwrap();
        Ok(live(budgets.as_slice())
            .filter(|b| {
                b.user_id == user_id
                    && b.category_id.as_deref() == category_id
                    && b.start_date <= date
                    && date <= b.end_date
            })
            .cloned()
            .collect())
    }

    async fn insert(&self, new_budget: NewBudget) -> Result<Budget> {
        Ok(self.seed_budget(
            &new_budget.user_id,
            new_budget.category_id.as_deref(),
            new_budget.limit_amount,
            new_budget.start_date,
            new_budget.end_date,
        ))
    }

    async fn update(&self, budget: Budget) -> Result<Budget> {
        let mut budgets = self.budgets.lock().unwrap();
        let row = budgets
            .iter_mut()
            .find(|r| !r.deleted && r.value.id == budget.id)
            .ok_or_else(|| Error::not_found(format!("Budget {} not found", budget.id)))?;
        row.value = Budget {
            updated_at: now(),
            ..budget
        };
        Ok(row.value.clone())
    }

    async fn update_remaining(&self, budget_id: &str, remaining_amount: Decimal) -> Result<Budget> {
        if self.failing_budgets.lock().unwrap().contains(budget_id) {
            return Err(DatabaseError::QueryFailed(format!("write to {} rejected", budget_id)).into());
        }
        let mut budgets = self.budgets.lock().unwrap();
        let row = budgets
            .iter_mut()
            .find(|r| !r.deleted && r.value.id == budget_id)
            .ok_or_else(|| Error::not_found(format!("Budget {} not found", budget_id)))?;
        row.value.remaining_amount = remaining_amount;
        row.value.updated_at = now();
        Ok(row.value.clone())
    }

    async fn soft_delete(&self, user_id: &str, budget_id: &str) -> Result<usize> {
        let mut budgets = self.budgets.lock().unwrap();
        Ok(budgets
            .iter_mut()
            .filter(|r| !r.deleted && r.value.id == budget_id && r.value.user_id == user_id)
            .map(|r| r.deleted = true)
            .count())
    }
}

#[async_trait]
impl TransactionRepositoryTrait for InMemoryStore {
    fn get_by_id(&self, user_id: &str, transaction_id: &str) -> Result<Transaction> {
        let transactions = self.transactions.lock().unwrap();
        let result = live(transactions.as_slice())
            .find(|t| t.id == transaction_id && t.user_id == user_id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("Transaction {} not found", transaction_id)));
        result
    }

    fn list(&self, user_id: &str, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let transactions = self.transactions.lock().unwrap();
        Ok(live(transactions.as_slice())
            .filter(|t| t.user_id == user_id && filter.matches(t))
            .cloned()
            .collect())
    }

    fn sum_amounts(
        &self,
        user_id: &str,
        category_id: Option<&str>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Decimal> {
        let transactions = self.transactions.lock().unwrap();
        let result = Ok(live(transactions.as_slice())
            .filter(|t| {
                t.user_id == user_id
                    && t.category_id.as_deref() == category_id
                    && start <= t.transaction_date
                    && t.transaction_date <= end
            })
            .try_fold(Decimal::ZERO, |acc, t| acc.checked_add(t.amount))
            .ok_or_else(|| Error::Unexpected("Transaction sum is out of range".to_string()))?);
        result
    }

    async fn insert(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        let mut transaction = self.seed_transaction(
            &new_transaction.user_id,
            new_transaction.category_id.as_deref(),
            new_transaction.amount,
            new_transaction.transaction_date,
        );
        let mut transactions = self.transactions.lock().unwrap();
        if let Some(row) = transactions.iter_mut().find(|r| r.value.id == transaction.id) {
            row.value.description = new_transaction.description;
            transaction = row.value.clone();
        }
        Ok(transaction)
    }

    async fn update(&self, transaction: Transaction) -> Result<Transaction> {
        let mut transactions = self.transactions.lock().unwrap();
        let row = transactions
            .iter_mut()
            .find(|r| !r.deleted && r.value.id == transaction.id)
            .ok_or_else(|| {
                Error::not_found(format!("Transaction {} not found", transaction.id))
            })?;
        row.value = Transaction {
            updated_at: now(),
            ..transaction
        };
        Ok(row.value.clone())
    }

    async fn soft_delete(&self, user_id: &str, transaction_id: &str) -> Result<usize> {
        let mut transactions = self.transactions.lock().unwrap();
        Ok(transactions
            .iter_mut()
            .filter(|r| {
                !r.deleted && r.value.id == transaction_id && r.value.user_id == user_id
            })
            .map(|r| r.deleted = true)
            .count())
    }
}

#[async_trait]
impl CategoryRepositoryTrait for InMemoryStore {
    fn get_by_id(&self, user_id: &str, category_id: &str) -> Result<Category> {
        let categories = self.categories.lock().unwrap();
        let result = live(categories.as_slice())
            .find(|c| c.id == category_id && c.user_id == user_id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("Category {} not found", category_id)));
        result
    }

    fn find_by_name(&self, user_id: &str, name: &str) -> Result<Option<Category>> {
        let categories = self.categories.lock().unwrap();
        let result = Ok(live(categories.as_slice())
            .find(|c| c.user_id == user_id && c.name == name)
            .cloned());
        result
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<Category>> {
        let categories = self.categories.lock().unwrap();
        Ok(live(categories.as_slice())
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert(&self, new_category: NewCategory) -> Result<Category> {
        Ok(self.seed_category(&new_category.user_id, &new_category.name))
    }

    async fn rename(&self, category_id: &str, name: &str) -> Result<Category> {
        let mut categories = self.categories.lock().unwrap();
        let row = categories
            .iter_mut()
            .find(|r| !r.deleted && r.value.id == category_id)
            .ok_or_else(|| Error::not_found(format!("Category {} not found", category_id)))?;
        row.value.name = name.to_string();
        row.value.updated_at = now();
        Ok(row.value.clone())
    }

    async fn soft_delete(&self, user_id: &str, category_id: &str) -> Result<usize> {
        let mut categories = self.categories.lock().unwrap();
        Ok(categories
            .iter_mut()
            .filter(|r| !r.deleted && r.value.id == category_id && r.value.user_id == user_id)
            .map(|r| r.deleted = true)
            .count())
    }
}

#[async_trait]
impl UserRepositoryTrait for InMemoryStore {
    fn get_by_id(&self, user_id: &str) -> Result<User> {
        let users = self.users.lock().unwrap();
        let result = live(users.as_slice())
            .find(|u| u.id == user_id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("User {} not found", user_id)));
        result
    }

    fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>> {
        let users = self.users.lock().unwrap();
        let result = Ok(live(users.as_slice())
            .find(|u| u.username == identifier || u.email == identifier)
            .cloned());
        result
    }

    fn exists_with_username_or_email(&self, username: &str, email: &str) -> Result<bool> {
        let users = self.users.lock().unwrap();
        let result = Ok(live(users.as_slice()).any(|u| u.username == username || u.email == email));
        result
    }

    async fn insert(&self, new_user: NewUser) -> Result<User> {
        let user = User {
            id: self.generate_id("user"),
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            first_name: None,
            last_name: None,
            phone_number: None,
            currency: DEFAULT_CURRENCY.to_string(),
            notifications_enabled: true,
            theme: DEFAULT_THEME.to_string(),
            created_at: now(),
            updated_at: now(),
        };
        self.users.lock().unwrap().push(Row {
            value: user.clone(),
            deleted: false,
        });
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User> {
        let mut users = self.users.lock().unwrap();
        let row = users
            .iter_mut()
            .find(|r| !r.deleted && r.value.id == user.id)
            .ok_or_else(|| Error::not_found(format!("User {} not found", user.id)))?;
        row.value = User {
            updated_at: now(),
            ..user
        };
        Ok(row.value.clone())
    }
}

#[async_trait]
impl GamificationRepositoryTrait for InMemoryStore {
    fn list_badges(&self) -> Result<Vec<Badge>> {
        Ok(self.badges.lock().unwrap().clone())
    }

    fn list_user_badges(&self, user_id: &str) -> Result<Vec<UserBadge>> {
        let user_badges = self.user_badges.lock().unwrap();
        Ok(user_badges
            .iter()
            .rev()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect())
    }

    fn recent_points(&self, user_id: &str, limit: i64) -> Result<Vec<PointsEntry>> {
        let points = self.points.lock().unwrap();
        Ok(points
            .iter()
            .rev()
            .filter(|p| p.user_id == user_id)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    fn total_points(&self, user_id: &str) -> Result<i64> {
        let points = self.points.lock().unwrap();
        Ok(points
            .iter()
            .filter(|p| p.user_id == user_id)
            .map(|p| p.points)
            .sum())
    }

    async fn add_points(&self, entry: NewPointsEntry) -> Result<PointsEntry> {
        let entry = PointsEntry {
            id: self.generate_id("points"),
            user_id: entry.user_id,
            points: entry.points,
            reason: entry.reason,
            activity_type: entry.activity_type,
            created_at: now(),
        };
        self.points.lock().unwrap().push(entry.clone());
        Ok(entry)
    }

    async fn award_badge(&self, user_id: &str, badge_id: &str) -> Result<UserBadge> {
        let badge = self
            .badges
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == badge_id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("Badge {} not found", badge_id)))?;
        let mut user_badges = self.user_badges.lock().unwrap();
        if user_badges
            .iter()
            .any(|b| b.user_id == user_id && b.badge_id == badge_id)
        {
            return Err(Error::Database(DatabaseError::UniqueViolation(format!(
                "Badge {} already earned",
                badge_id
            ))));
        }
        let awarded = UserBadge {
            id: self.generate_id("user-badge"),
            user_id: user_id.to_string(),
            badge_id: badge_id.to_string(),
            badge,
            earned_at: now(),
        };
        user_badges.push(awarded.clone());
        Ok(awarded)
    }
}
