//! Gamification domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// An achievement unlocked once a user's point total reaches `threshold`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub category: String,
    pub threshold: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserBadge {
    pub id: String,
    pub user_id: String,
    pub badge_id: String,
    pub badge: Badge,
    pub earned_at: NaiveDateTime,
}

/// One entry of the append-only points ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PointsEntry {
    pub id: String,
    pub user_id: String,
    pub points: i64,
    pub reason: String,
    pub activity_type: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPointsEntry {
    pub user_id: String,
    pub points: i64,
    pub reason: String,
    pub activity_type: String,
}

/// Things a user does that earn points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    BudgetCreated,
    TransactionAdded,
}

impl Activity {
    pub fn points(self) -> i64 {
        match self {
            Activity::BudgetCreated => 10,
            Activity::TransactionAdded => 1,
        }
    }

    pub fn activity_type(self) -> &'static str {
        match self {
            Activity::BudgetCreated => "budget_created",
            Activity::TransactionAdded => "transaction_added",
        }
    }

    pub fn reason(self) -> &'static str {
        match self {
            Activity::BudgetCreated => "Created a budget",
            Activity::TransactionAdded => "Tracked a transaction",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GamificationSummary {
    pub total_points: i64,
    /// Up to three badges, most recently earned first.
    pub recent_badges: Vec<UserBadge>,
    pub all_badges: Vec<UserBadge>,
    /// Up to ten ledger entries, newest first.
    pub recent_points: Vec<PointsEntry>,
    /// Up to three unearned badges within 100 points of the current total.
    pub next_badges: Vec<Badge>,
    pub level: i64,
    pub level_title: String,
    pub points_to_next_level: i64,
}
