#![allow(async_fn_in_trait)]

use crate::domain::types::{BadgeIdentity, BadgeUser, Fact, StaffMember};
use crate::error::BadgeServiceError;

/// Read-only lookup of registered badge users.
pub trait UserRepository: Send + Sync {
    /// `Ok(None)` is the normal "not registered yet" outcome, distinct
    /// from a data-access failure.
    async fn find_by_device(
        &self,
        identity: &BadgeIdentity,
    ) -> Result<Option<BadgeUser>, BadgeServiceError>;
}

/// Append-only audit log of raw badge actions.
pub trait EventRepository: Send + Sync {
    /// Record an action. Device columns may be absent for anonymous
    /// triggers. Returns the generated event id.
    async fn record(
        &self,
        event_type_id: i32,
        device_id: Option<&str>,
        device_mac: Option<&str>,
    ) -> Result<i64, BadgeServiceError>;
}

/// Ledger of (user, achievement) unlock facts.
pub trait UnlockRepository: Send + Sync {
    async fn is_unlocked(
        &self,
        user_id: i32,
        achievement_id: i32,
    ) -> Result<bool, BadgeServiceError>;

    /// Atomic insert-or-ignore. Returns `true` iff this call created the
    /// unlock row; of N concurrent callers exactly one observes `true`.
    async fn try_record_unlock(
        &self,
        user_id: i32,
        achievement_id: i32,
    ) -> Result<bool, BadgeServiceError>;
}

pub trait StaffRepository: Send + Sync {
    async fn pick_random(&self) -> Result<Option<StaffMember>, BadgeServiceError>;
}

/// Bidirectional short-lived pairing-code store.
///
/// Both directions expire together; a mapping that has lapsed simply reads
/// back as absent.
pub trait RegistrationCache: Send + Sync {
    async fn code_for_identity(
        &self,
        identity: &BadgeIdentity,
    ) -> Result<Option<String>, BadgeServiceError>;

    async fn identity_for_code(
        &self,
        code: &str,
    ) -> Result<Option<BadgeIdentity>, BadgeServiceError>;

    /// Conditionally claim `code` for `identity`. Returns `false` when a
    /// live mapping for the code already exists; the caller must retry
    /// with a fresh candidate, never overwrite.
    async fn try_claim_code(
        &self,
        code: &str,
        identity: &BadgeIdentity,
        ttl_secs: u64,
    ) -> Result<bool, BadgeServiceError>;

    /// Rewrite both directions of a live pairing, extending its expiry.
    async fn refresh_pairing(
        &self,
        code: &str,
        identity: &BadgeIdentity,
        ttl_secs: u64,
    ) -> Result<(), BadgeServiceError>;
}

/// Expiry-backed gate for low-frequency broadcasts.
pub trait BroadcastGate: Send + Sync {
    /// Take the named slot for `ttl_secs` if it is free. `false` while a
    /// previous acquisition is still live.
    async fn try_acquire(
        &self,
        key: &str,
        value: &str,
        ttl_secs: u64,
    ) -> Result<bool, BadgeServiceError>;
}

/// Fire-and-forget channel publisher. Implementations log and swallow
/// delivery failures; a dead broker must never fail the action that
/// produced the message.
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, channel: &str, payload: &str);
}

/// External fun-fact source.
pub trait FactSource: Send + Sync {
    async fn fetch_random(&self) -> Result<Fact, BadgeServiceError>;
}
