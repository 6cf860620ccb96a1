use log::{debug, info};
use std::collections::HashSet;
use std::sync::Arc;

use super::gamification_model::{Activity, GamificationSummary, NewPointsEntry, UserBadge};
use super::gamification_traits::{GamificationRepositoryTrait, GamificationServiceTrait};
use crate::errors::Result;

const RECENT_BADGES: usize = 3;
const RECENT_POINTS: i64 = 10;
const NEXT_BADGES: usize = 3;
/// How far above the current total a badge may sit to be listed as "next".
const NEXT_BADGE_WINDOW: i64 = 100;

const LEVEL_TITLES: [&str; 10] = [
    "Novice Saver",
    "Budget Beginner",
    "Money Manager",
    "Finance Planner",
    "Savings Specialist",
    "Budget Master",
    "Finance Ninja",
    "Economy Expert",
    "Financial Wizard",
    "Money Maestro",
];

/// Level `n` is reached at `(n - 1)² × 100` points: 100 for level 2, 400 for
/// level 3, 900 for level 4.
pub fn level_for_points(points: i64) -> i64 {
    let mut level = 1;
    while points >= next_threshold(level) {
        level += 1;
    }
    level
}

fn next_threshold(level: i64) -> i64 {
    level.saturating_mul(level).saturating_mul(100)
}

pub fn level_title(level: i64) -> &'static str {
    match usize::try_from(level) {
        Ok(n @ 1..=10) => LEVEL_TITLES[n - 1],
        Ok(_) if level > 10 => "Financial Legend",
        _ => LEVEL_TITLES[0],
    }
}

pub fn points_to_next_level(points: i64) -> i64 {
    let needed = next_threshold(level_for_points(points)) - points;
    needed.max(0)
}

pub struct GamificationService {
    repository: Arc<dyn GamificationRepositoryTrait>,
}

impl GamificationService {
    pub fn new(repository: Arc<dyn GamificationRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl GamificationServiceTrait for GamificationService {
    fn get_summary(&self, user_id: &str) -> Result<GamificationSummary> {
        let total_points = self.repository.total_points(user_id)?;
        let all_badges = self.repository.list_user_badges(user_id)?;
        let recent_points = self.repository.recent_points(user_id, RECENT_POINTS)?;

        let earned: HashSet<&str> = all_badges.iter().map(|b| b.badge_id.as_str()).collect();
        let next_badges = self
            .repository
            .list_badges()?
            .into_iter()
            .filter(|b| !earned.contains(b.id.as_str()))
            .filter(|b| b.threshold <= total_points.saturating_add(NEXT_BADGE_WINDOW))
            .take(NEXT_BADGES)
            .collect();

        let level = level_for_points(total_points);
        Ok(GamificationSummary {
            total_points,
            recent_badges: all_badges.iter().take(RECENT_BADGES).cloned().collect(),
            all_badges,
            recent_points,
            next_badges,
            level,
            level_title: level_title(level).to_string(),
            points_to_next_level: points_to_next_level(total_points),
        })
    }

    async fn record_activity(&self, user_id: &str, activity: Activity) -> Result<Vec<UserBadge>> {
        self.repository
            .add_points(NewPointsEntry {
                user_id: user_id.to_string(),
                points: activity.points(),
                reason: activity.reason().to_string(),
                activity_type: activity.activity_type().to_string(),
            })
            .await?;

        let total = self.repository.total_points(user_id)?;
        let earned: HashSet<String> = self
            .repository
            .list_user_badges(user_id)?
            .into_iter()
            .map(|b| b.badge_id)
            .collect();
        debug!(
            "User {} earned {} point(s) for {}, total {}",
            user_id,
            activity.points(),
            activity.activity_type(),
            total
        );

        let mut unlocked = Vec::new();
        for badge in self.repository.list_badges()? {
            if badge.threshold <= total && !earned.contains(&badge.id) {
                let awarded = self.repository.award_badge(user_id, &badge.id).await?;
                info!("User {} earned badge '{}'", user_id, awarded.badge.name);
                unlocked.push(awarded);
            }
        }
        Ok(unlocked)
    }
}
