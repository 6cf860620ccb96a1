use async_trait::async_trait;
use chrono::Utc;
use diesel::dsl::sum;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use fintrack_core::gamification::{
    Badge, GamificationRepositoryTrait, NewPointsEntry, PointsEntry, UserBadge,
};
use fintrack_core::{Error, Result};

use super::model::{BadgeDB, NewPointsDB, NewUserBadgeDB, PointsDB, UserBadgeDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::{badges, user_badges, user_points};

pub struct GamificationRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GamificationRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        GamificationRepository { pool, writer }
    }
}

#[async_trait]
impl GamificationRepositoryTrait for GamificationRepository {
    fn list_badges(&self) -> Result<Vec<Badge>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = badges::table
            .order((badges::threshold.asc(), badges::name.asc()))
            .select(BadgeDB::as_select())
            .load::<BadgeDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Badge::from).collect())
    }

    fn list_user_badges(&self, user_id: &str) -> Result<Vec<UserBadge>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = user_badges::table
            .inner_join(badges::table)
            .filter(user_badges::user_id.eq(user_id))
            .order(user_badges::earned_at.desc())
            .select((UserBadgeDB::as_select(), BadgeDB::as_select()))
            .load::<(UserBadgeDB, BadgeDB)>(&mut conn)
            .into_core()?;
        Ok(rows
            .into_iter()
            .map(|(earned, badge)| earned.into_domain(badge))
            .collect())
    }

    fn recent_points(&self, user_id: &str, limit: i64) -> Result<Vec<PointsEntry>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = user_points::table
            .filter(user_points::user_id.eq(user_id))
            .order(user_points::created_at.desc())
            .limit(limit)
            .select(PointsDB::as_select())
            .load::<PointsDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(PointsEntry::from).collect())
    }

    fn total_points(&self, user_id: &str) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        let total: Option<i64> = user_points::table
            .filter(user_points::user_id.eq(user_id))
            .select(sum(user_points::points))
            .first(&mut conn)
            .into_core()?;
        Ok(total.unwrap_or(0))
    }

    async fn add_points(&self, entry: NewPointsEntry) -> Result<PointsEntry> {
        let points = entry.points;
        let row = NewPointsDB::from_domain(Uuid::new_v4().to_string(), entry, Utc::now().naive_utc())
            .ok_or_else(|| Error::invalid_input(format!("{} points is out of range", points)))?;
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<PointsEntry> {
                let inserted = diesel::insert_into(user_points::table)
                    .values(&row)
                    .returning(PointsDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(PointsEntry::from(inserted))
            })
            .await
    }

    async fn award_badge(&self, user_id: &str, badge_id: &str) -> Result<UserBadge> {
        let row = NewUserBadgeDB {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            badge_id: badge_id.to_string(),
            earned_at: Utc::now().naive_utc(),
        };
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<UserBadge> {
                let badge = badges::table
                    .find(row.badge_id.as_str())
                    .select(BadgeDB::as_select())
                    .first::<BadgeDB>(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| Error::not_found(format!("Badge {} not found", row.badge_id)))?;
                let inserted = diesel::insert_into(user_badges::table)
                    .values(&row)
                    .returning(UserBadgeDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(inserted.into_domain(badge))
            })
            .await
    }
}
