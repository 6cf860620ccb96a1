use async_trait::async_trait;

use super::gamification_model::{
    Activity, Badge, GamificationSummary, NewPointsEntry, PointsEntry, UserBadge,
};
use crate::errors::Result;

#[async_trait]
pub trait GamificationRepositoryTrait: Send + Sync {
    /// Every badge, lowest threshold first.
    fn list_badges(&self) -> Result<Vec<Badge>>;

    /// Badges earned by `user_id`, most recent first.
    fn list_user_badges(&self, user_id: &str) -> Result<Vec<UserBadge>>;

    /// The newest `limit` ledger entries of `user_id`.
    fn recent_points(&self, user_id: &str, limit: i64) -> Result<Vec<PointsEntry>>;

    fn total_points(&self, user_id: &str) -> Result<i64>;

    async fn add_points(&self, entry: NewPointsEntry) -> Result<PointsEntry>;

    async fn award_badge(&self, user_id: &str, badge_id: &str) -> Result<UserBadge>;
}

#[async_trait]
pub trait GamificationServiceTrait: Send + Sync {
    fn get_summary(&self, user_id: &str) -> Result<GamificationSummary>;

    /// Credits the points for `activity` and returns any badges it unlocked.
    async fn record_activity(&self, user_id: &str, activity: Activity) -> Result<Vec<UserBadge>>;
}
