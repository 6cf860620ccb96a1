//! SQLite storage implementation for points and badges.

mod model;
mod repository;

pub use model::{BadgeDB, NewPointsDB, NewUserBadgeDB, PointsDB, UserBadgeDB};
pub use repository::GamificationRepository;
