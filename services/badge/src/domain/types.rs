use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Composite identity of a physical badge. A device id is an opaque string
/// and never assumed unique on its own; every lookup pairs it with the MAC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeIdentity {
    pub device_id: String,
    pub device_mac: String,
}

impl BadgeIdentity {
    pub fn new(device_id: impl Into<String>, device_mac: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            device_mac: device_mac.into(),
        }
    }

    /// Key under which the reverse registration mapping is stored.
    pub fn cache_key(&self) -> String {
        format!("{}|{}", self.device_id, self.device_mac)
    }

    /// Parse the stored `"device_id|device_mac"` form of a forward mapping.
    pub fn from_cache_key(raw: &str) -> Option<Self> {
        let (device_id, device_mac) = raw.split_once('|')?;
        Some(Self::new(device_id, device_mac))
    }
}

/// Registered attendee row (read-only to this service).
#[derive(Debug, Clone)]
pub struct BadgeUser {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub discord_handle: String,
    pub discord_user_id: String,
    pub device_id: String,
    pub device_mac: String,
}

/// Staff member fronting community fact broadcasts.
#[derive(Debug, Clone)]
pub struct StaffMember {
    pub id: i32,
    pub discord_handle: String,
    pub discord_user_id: String,
}

/// Random fact fetched from the external fact source.
#[derive(Debug, Clone, Deserialize)]
pub struct Fact {
    pub text: String,
}

/// Terminal status of a CTF action, as reported back to the badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionStatus {
    Success,
    Error,
}

/// Outcome of a CTF action. "Unregistered badge" surfaces here as an
/// `Error` status with an explanatory message, not as a service error.
#[derive(Debug, Clone)]
pub struct ActionOutcome {
    pub status: ActionStatus,
    pub message: String,
}

impl ActionOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: ActionStatus::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ActionStatus::Error,
            message: message.into(),
        }
    }
}

/// Registration code length in hex characters (short enough to type off a
/// badge screen).
pub const REGISTRATION_CODE_LEN: usize = 8;

/// Registration mapping time-to-live in seconds (15 minutes).
pub const REGISTRATION_CODE_TTL_SECS: u64 = 15 * 60;

/// Upper bound on candidate codes tried before giving up on issuance.
pub const MAX_CODE_ATTEMPTS: usize = 5;

/// Pause between candidate codes after a collision.
pub const COLLISION_BACKOFF: Duration = Duration::from_secs(1);

/// Redis key gating the low-frequency fact broadcast.
pub const FACT_WINDOW_KEY: &str = "last_sent_fact";

/// Fact broadcast window in seconds.
pub const FACT_WINDOW_SECS: u64 = 60;

pub const ACHIEVEMENT_CHANNEL: &str = "achievement";
pub const COMMUNITY_CHANNEL: &str = "community-message";
pub const HIGH_SCORE_CHANNEL: &str = "high-score-processor";
pub const FACT_CHANNEL: &str = "fact";
