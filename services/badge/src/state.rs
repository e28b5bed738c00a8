use deadpool_redis::Pool as RedisPool;
use sea_orm::DatabaseConnection;

use crate::infra::cache::{RedisBroadcastGate, RedisRegistrationCache};
use crate::infra::db::{DbEventRepository, DbStaffRepository, DbUnlockRepository, DbUserRepository};
use crate::infra::facts::HttpFactSource;
use crate::infra::pubsub::RedisEventPublisher;

/// Shared application state passed to every handler via axum `State`.
///
/// Pool handles are constructed once in `main` and injected here; nothing
/// reaches for ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub redis: RedisPool,
    pub http: reqwest::Client,
    pub fact_api_url: String,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn event_repo(&self) -> DbEventRepository {
        DbEventRepository {
            db: self.db.clone(),
        }
    }

    pub fn unlock_repo(&self) -> DbUnlockRepository {
        DbUnlockRepository {
            db: self.db.clone(),
        }
    }

    pub fn staff_repo(&self) -> DbStaffRepository {
        DbStaffRepository {
            db: self.db.clone(),
        }
    }

    pub fn registration_cache(&self) -> RedisRegistrationCache {
        RedisRegistrationCache {
            pool: self.redis.clone(),
        }
    }

    pub fn broadcast_gate(&self) -> RedisBroadcastGate {
        RedisBroadcastGate {
            pool: self.redis.clone(),
        }
    }

    pub fn publisher(&self) -> RedisEventPublisher {
        RedisEventPublisher {
            pool: self.redis.clone(),
        }
    }

    pub fn fact_source(&self) -> HttpFactSource {
        HttpFactSource {
            client: self.http.clone(),
            url: self.fact_api_url.clone(),
        }
    }
}
