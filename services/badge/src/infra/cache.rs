use deadpool_redis::Pool;
use deadpool_redis::redis::{AsyncCommands, ExistenceCheck, SetExpiry, SetOptions};

use crate::domain::repository::{BroadcastGate, RegistrationCache};
use crate::domain::types::BadgeIdentity;
use crate::error::BadgeServiceError;

/// Bidirectional pairing-code store on Redis (`code -> "id|mac"` and
/// `"id|mac" -> code`, both with the same expiry).
#[derive(Clone)]
pub struct RedisRegistrationCache {
    pub pool: Pool,
}

fn nx_for(ttl_secs: u64) -> SetOptions {
    SetOptions::default()
        .conditional_set(ExistenceCheck::NX)
        .with_expiration(SetExpiry::EX(ttl_secs))
}

impl RegistrationCache for RedisRegistrationCache {
    async fn code_for_identity(
        &self,
        identity: &BadgeIdentity,
    ) -> Result<Option<String>, BadgeServiceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| BadgeServiceError::DataAccess(e.into()))?;
        let code: Option<String> = conn
            .get(identity.cache_key())
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| BadgeServiceError::DataAccess(e.into()))?;
        Ok(code)
    }

    async fn identity_for_code(
        &self,
        code: &str,
    ) -> Result<Option<BadgeIdentity>, BadgeServiceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| BadgeServiceError::DataAccess(e.into()))?;
        let raw: Option<String> = conn
            .get(code)
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| BadgeServiceError::DataAccess(e.into()))?;
        Ok(raw.as_deref().and_then(BadgeIdentity::from_cache_key))
    }

    async fn try_claim_code(
        &self,
        code: &str,
        identity: &BadgeIdentity,
        ttl_secs: u64,
    ) -> Result<bool, BadgeServiceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| BadgeServiceError::DataAccess(e.into()))?;
        // SET NX is the uniqueness check: losing the race reads as a
        // collision, never as an overwrite of the winner's mapping.
        let claimed: bool = conn
            .set_options(code, identity.cache_key(), nx_for(ttl_secs))
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| BadgeServiceError::DataAccess(e.into()))?;
        if !claimed {
            return Ok(false);
        }
        let (): () = conn
            .set_ex(identity.cache_key(), code, ttl_secs)
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| BadgeServiceError::DataAccess(e.into()))?;
        Ok(true)
    }

    async fn refresh_pairing(
        &self,
        code: &str,
        identity: &BadgeIdentity,
        ttl_secs: u64,
    ) -> Result<(), BadgeServiceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| BadgeServiceError::DataAccess(e.into()))?;
        let (): () = conn
            .set_ex(code, identity.cache_key(), ttl_secs)
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| BadgeServiceError::DataAccess(e.into()))?;
        let (): () = conn
            .set_ex(identity.cache_key(), code, ttl_secs)
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| BadgeServiceError::DataAccess(e.into()))?;
        Ok(())
    }
}

/// Expiry-backed broadcast gate (`SET NX EX`); the window closes on its own
/// when the key lapses, no in-process timer involved.
#[derive(Clone)]
pub struct RedisBroadcastGate {
    pub pool: Pool,
}

impl BroadcastGate for RedisBroadcastGate {
    async fn try_acquire(
        &self,
        key: &str,
        value: &str,
        ttl_secs: u64,
    ) -> Result<bool, BadgeServiceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| BadgeServiceError::DataAccess(e.into()))?;
        let acquired: bool = conn
            .set_options(key, value, nx_for(ttl_secs))
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| BadgeServiceError::DataAccess(e.into()))?;
        Ok(acquired)
    }
}
