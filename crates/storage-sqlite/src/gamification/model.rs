//! Database models for points and badges.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use fintrack_core::gamification::{Badge, NewPointsEntry, PointsEntry, UserBadge};

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::badges)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BadgeDB {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub category: String,
    pub threshold: i32,
}

impl From<BadgeDB> for Badge {
    fn from(db: BadgeDB) -> Self {
        Badge {
            id: db.id,
            name: db.name,
            description: db.description,
            image_url: db.image_url,
            category: db.category,
            threshold: i64::from(db.threshold),
        }
    }
}

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::user_badges)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserBadgeDB {
    pub id: String,
    pub user_id: String,
    pub badge_id: String,
    pub earned_at: NaiveDateTime,
}

impl UserBadgeDB {
    pub fn into_domain(self, badge: BadgeDB) -> UserBadge {
        UserBadge {
            id: self.id,
            user_id: self.user_id,
            badge_id: self.badge_id,
            badge: badge.into(),
            earned_at: self.earned_at,
        }
    }
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::user_badges)]
pub struct NewUserBadgeDB {
    pub id: String,
    pub user_id: String,
    pub badge_id: String,
    pub earned_at: NaiveDateTime,
}

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::user_points)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PointsDB {
    pub id: String,
    pub user_id: String,
    pub points: i32,
    pub reason: String,
    pub activity_type: String,
    pub created_at: NaiveDateTime,
}

impl From<PointsDB> for PointsEntry {
    fn from(db: PointsDB) -> Self {
        PointsEntry {
            id: db.id,
            user_id: db.user_id,
            points: i64::from(db.points),
            reason: db.reason,
            activity_type: db.activity_type,
            created_at: db.created_at,
        }
    }
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::user_points)]
pub struct NewPointsDB {
    pub id: String,
    pub user_id: String,
    pub points: i32,
    pub reason: String,
    pub activity_type: String,
    pub created_at: NaiveDateTime,
}

impl NewPointsDB {
    /// `None` when the point value does not fit the column.
    pub fn from_domain(id: String, entry: NewPointsEntry, now: NaiveDateTime) -> Option<Self> {
        Some(NewPointsDB {
            id,
            user_id: entry.user_id,
            points: i32::try_from(entry.points).ok()?,
            reason: entry.reason,
            activity_type: entry.activity_type,
            created_at: now,
        })
    }
}
