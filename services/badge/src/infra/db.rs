use std::future::Future;

use chrono::Utc;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    sea_query::OnConflict,
};

use cackalacky_core::sea_ext::OrderByRandom;

use cackalacky_badge_schema::{events, staff, user_achievements, users};

use crate::domain::repository::{EventRepository, StaffRepository, UnlockRepository, UserRepository};
use crate::domain::types::{BadgeIdentity, BadgeUser, StaffMember};
use crate::error::BadgeServiceError;

/// Attempt budget for transient database failures.
const DB_RETRY_ATTEMPTS: u32 = 3;

fn is_transient(err: &DbErr) -> bool {
    matches!(err, DbErr::Conn(_) | DbErr::ConnectionAcquire(_))
}

/// Run `op` up to [`DB_RETRY_ATTEMPTS`] times, re-executing the whole
/// operation on transient failures (dropped connection, pool exhaustion).
/// Only the operation name is logged; parameter values stay out of the logs.
async fn with_retry<T, F, Fut>(operation: &str, mut op: F) -> Result<T, BadgeServiceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbErr>>,
{
    let mut attempt = 1;
    loop {
        tracing::debug!(operation, attempt, "executing statement");
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < DB_RETRY_ATTEMPTS && is_transient(&err) => {
                tracing::warn!(operation, attempt, error = %err, "transient database failure, retrying");
                attempt += 1;
            }
            Err(err) => {
                return Err(BadgeServiceError::DataAccess(
                    anyhow::Error::new(err).context(format!("database operation `{operation}`")),
                ));
            }
        }
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_device(
        &self,
        identity: &BadgeIdentity,
    ) -> Result<Option<BadgeUser>, BadgeServiceError> {
        let model = with_retry("find user by device", || {
            users::Entity::find()
                .filter(users::Column::DeviceId.eq(&identity.device_id))
                .filter(users::Column::DeviceMac.eq(&identity.device_mac))
                .one(&self.db)
        })
        .await?;
        Ok(model.map(badge_user_from_model))
    }
}

fn badge_user_from_model(model: users::Model) -> BadgeUser {
    BadgeUser {
        id: model.id,
        first_name: model.first_name,
        last_name: model.last_name,
        discord_handle: model.discord_handle,
        discord_user_id: model.discord_user_id,
        device_id: model.device_id,
        device_mac: model.device_mac,
    }
}

// ── Event repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbEventRepository {
    pub db: DatabaseConnection,
}

impl EventRepository for DbEventRepository {
    async fn record(
        &self,
        event_type_id: i32,
        device_id: Option<&str>,
        device_mac: Option<&str>,
    ) -> Result<i64, BadgeServiceError> {
        let result = with_retry("insert event", || {
            events::Entity::insert(events::ActiveModel {
                event_type_id: Set(event_type_id),
                device_id: Set(device_id.map(str::to_owned)),
                device_mac: Set(device_mac.map(str::to_owned)),
                occurred_at: Set(Utc::now()),
                ..Default::default()
            })
            .exec(&self.db)
        })
        .await?;
        Ok(result.last_insert_id)
    }
}

// ── Unlock repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUnlockRepository {
    pub db: DatabaseConnection,
}

impl UnlockRepository for DbUnlockRepository {
    async fn is_unlocked(
        &self,
        user_id: i32,
        achievement_id: i32,
    ) -> Result<bool, BadgeServiceError> {
        use sea_orm::PaginatorTrait;
        let count = with_retry("count unlocks", || {
            user_achievements::Entity::find()
                .filter(user_achievements::Column::UserId.eq(user_id))
                .filter(user_achievements::Column::AchievementId.eq(achievement_id))
                .count(&self.db)
        })
        .await?;
        Ok(count > 0)
    }

    async fn try_record_unlock(
        &self,
        user_id: i32,
        achievement_id: i32,
    ) -> Result<bool, BadgeServiceError> {
        // The unique index on (user_id, achievement_id) arbitrates
        // concurrent attempts; the loser sees rows_affected == 0 instead of
        // racing a prior read.
        let rows = with_retry("insert unlock", || {
            user_achievements::Entity::insert(user_achievements::ActiveModel {
                user_id: Set(user_id),
                achievement_id: Set(achievement_id),
                unlocked_at: Set(Utc::now()),
                ..Default::default()
            })
            .on_conflict(
                OnConflict::columns([
                    user_achievements::Column::UserId,
                    user_achievements::Column::AchievementId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
        })
        .await?;
        Ok(rows > 0)
    }
}

// ── Staff repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbStaffRepository {
    pub db: DatabaseConnection,
}

impl StaffRepository for DbStaffRepository {
    async fn pick_random(&self) -> Result<Option<StaffMember>, BadgeServiceError> {
        let model = with_retry("pick random staff", || {
            staff::Entity::find().order_by_random().one(&self.db)
        })
        .await?;
        Ok(model.map(staff_from_model))
    }
}

fn staff_from_model(model: staff::Model) -> StaffMember {
    StaffMember {
        id: model.id,
        discord_handle: model.discord_handle,
        discord_user_id: model.discord_user_id,
    }
}
