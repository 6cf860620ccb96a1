//! Points, badges and levels earned through budgeting activity.

mod gamification_model;
mod gamification_service;
mod gamification_traits;

#[cfg(test)]
mod gamification_service_tests;

pub use gamification_model::{
    Activity, Badge, GamificationSummary, NewPointsEntry, PointsEntry, UserBadge,
};
pub use gamification_service::{
    level_for_points, level_title, points_to_next_level, GamificationService,
};
pub use gamification_traits::{GamificationRepositoryTrait, GamificationServiceTrait};
