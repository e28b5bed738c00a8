use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use cackalacky_badge::domain::repository::{
    BroadcastGate, EventPublisher, EventRepository, FactSource, RegistrationCache, StaffRepository,
    UnlockRepository, UserRepository,
};
use cackalacky_badge::domain::types::{BadgeIdentity, BadgeUser, Fact, StaffMember};
use cackalacky_badge::error::BadgeServiceError;

// ── MockUserRepo ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockUserRepo {
    pub users: Vec<BadgeUser>,
}

impl MockUserRepo {
    pub fn new(users: Vec<BadgeUser>) -> Self {
        Self { users }
    }

    pub fn empty() -> Self {
        Self { users: vec![] }
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_device(
        &self,
        identity: &BadgeIdentity,
    ) -> Result<Option<BadgeUser>, BadgeServiceError> {
        Ok(self
            .users
            .iter()
            .find(|u| u.device_id == identity.device_id && u.device_mac == identity.device_mac)
            .cloned())
    }
}

// ── MockEventRepo ────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockEventRepo {
    pub recorded: Arc<Mutex<Vec<(i32, Option<String>, Option<String>)>>>,
}

impl EventRepository for MockEventRepo {
    async fn record(
        &self,
        event_type_id: i32,
        device_id: Option<&str>,
        device_mac: Option<&str>,
    ) -> Result<i64, BadgeServiceError> {
        let mut recorded = self.recorded.lock().unwrap();
        recorded.push((
            event_type_id,
            device_id.map(str::to_owned),
            device_mac.map(str::to_owned),
        ));
        Ok(recorded.len() as i64)
    }
}

// ── MockUnlockRepo ───────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockUnlockRepo {
    pub unlocked: Arc<Mutex<HashSet<(i32, i32)>>>,
}

impl MockUnlockRepo {
    pub fn with_unlock(user_id: i32, achievement_id: i32) -> Self {
        let repo = Self::default();
        repo.unlocked.lock().unwrap().insert((user_id, achievement_id));
        repo
    }
}

impl UnlockRepository for MockUnlockRepo {
    async fn is_unlocked(
        &self,
        user_id: i32,
        achievement_id: i32,
    ) -> Result<bool, BadgeServiceError> {
        Ok(self
            .unlocked
            .lock()
            .unwrap()
            .contains(&(user_id, achievement_id)))
    }

    async fn try_record_unlock(
        &self,
        user_id: i32,
        achievement_id: i32,
    ) -> Result<bool, BadgeServiceError> {
        // HashSet::insert has exactly the conditional-insert contract.
        Ok(self
            .unlocked
            .lock()
            .unwrap()
            .insert((user_id, achievement_id)))
    }
}

// ── MockStaffRepo ────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockStaffRepo {
    pub member: Option<StaffMember>,
}

impl StaffRepository for MockStaffRepo {
    async fn pick_random(&self) -> Result<Option<StaffMember>, BadgeServiceError> {
        Ok(self.member.clone())
    }
}

// ── MockFactSource ───────────────────────────────────────────────────────────

/// `text: None` simulates an unreachable fact API.
#[derive(Clone)]
pub struct MockFactSource {
    pub text: Option<String>,
}

impl FactSource for MockFactSource {
    async fn fetch_random(&self) -> Result<Fact, BadgeServiceError> {
        match &self.text {
            Some(text) => Ok(Fact { text: text.clone() }),
            None => Err(BadgeServiceError::DataAccess(anyhow::anyhow!(
                "fact source unreachable"
            ))),
        }
    }
}

// ── MockBroadcastGate ────────────────────────────────────────────────────────

/// Acquired keys never lapse, standing in for "inside the TTL window".
#[derive(Clone, Default)]
pub struct MockBroadcastGate {
    pub held: Arc<Mutex<HashSet<String>>>,
}

impl BroadcastGate for MockBroadcastGate {
    async fn try_acquire(
        &self,
        key: &str,
        _value: &str,
        _ttl_secs: u64,
    ) -> Result<bool, BadgeServiceError> {
        Ok(self.held.lock().unwrap().insert(key.to_owned()))
    }
}

// ── MockPublisher ────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockPublisher {
    pub messages: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockPublisher {
    pub fn on_channel(&self, channel: &str) -> Vec<String> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter(|(c, _)| c == channel)
            .map(|(_, payload)| payload.clone())
            .collect()
    }
}

impl EventPublisher for MockPublisher {
    async fn publish(&self, channel: &str, payload: &str) {
        self.messages
            .lock()
            .unwrap()
            .push((channel.to_owned(), payload.to_owned()));
    }
}

// ── MockRegistrationCache ────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockRegistrationCache {
    /// code -> "device_id|device_mac"
    pub forward: Arc<Mutex<HashMap<String, String>>>,
    /// "device_id|device_mac" -> code
    pub reverse: Arc<Mutex<HashMap<String, String>>>,
    /// TTL extensions observed.
    pub refreshes: Arc<Mutex<u32>>,
    /// Identities reported for the next forward probes regardless of the
    /// queried key, simulating digest collisions deterministically.
    pub probe_overrides: Arc<Mutex<Vec<BadgeIdentity>>>,
}

impl RegistrationCache for MockRegistrationCache {
    async fn code_for_identity(
        &self,
        identity: &BadgeIdentity,
    ) -> Result<Option<String>, BadgeServiceError> {
        Ok(self.reverse.lock().unwrap().get(&identity.cache_key()).cloned())
    }

    async fn identity_for_code(
        &self,
        code: &str,
    ) -> Result<Option<BadgeIdentity>, BadgeServiceError> {
        let mut overrides = self.probe_overrides.lock().unwrap();
        if !overrides.is_empty() {
            return Ok(Some(overrides.remove(0)));
        }
        drop(overrides);
        Ok(self
            .forward
            .lock()
            .unwrap()
            .get(code)
            .and_then(|raw| BadgeIdentity::from_cache_key(raw)))
    }

    async fn try_claim_code(
        &self,
        code: &str,
        identity: &BadgeIdentity,
        _ttl_secs: u64,
    ) -> Result<bool, BadgeServiceError> {
        let mut forward = self.forward.lock().unwrap();
        if forward.contains_key(code) {
            return Ok(false);
        }
        forward.insert(code.to_owned(), identity.cache_key());
        self.reverse
            .lock()
            .unwrap()
            .insert(identity.cache_key(), code.to_owned());
        Ok(true)
    }

    async fn refresh_pairing(
        &self,
        code: &str,
        identity: &BadgeIdentity,
        _ttl_secs: u64,
    ) -> Result<(), BadgeServiceError> {
        self.forward
            .lock()
            .unwrap()
            .insert(code.to_owned(), identity.cache_key());
        self.reverse
            .lock()
            .unwrap()
            .insert(identity.cache_key(), code.to_owned());
        *self.refreshes.lock().unwrap() += 1;
        Ok(())
    }
}

// ── Test fixtures ────────────────────────────────────────────────────────────

pub fn test_identity() -> BadgeIdentity {
    BadgeIdentity::new("badge-0001", "AA:BB:CC:DD:EE:FF")
}

pub fn other_identity() -> BadgeIdentity {
    BadgeIdentity::new("badge-0002", "11:22:33:44:55:66")
}

pub fn test_user() -> BadgeUser {
    BadgeUser {
        id: 1,
        first_name: "Alice".to_owned(),
        last_name: "Anders".to_owned(),
        discord_handle: "alice#1234".to_owned(),
        discord_user_id: "100000000000000001".to_owned(),
        device_id: "badge-0001".to_owned(),
        device_mac: "AA:BB:CC:DD:EE:FF".to_owned(),
    }
}

pub fn test_staff() -> StaffMember {
    StaffMember {
        id: 7,
        discord_handle: "staffer#0007".to_owned(),
        discord_user_id: "200000000000000007".to_owned(),
    }
}
