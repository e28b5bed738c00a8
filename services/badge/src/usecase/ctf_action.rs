use serde_json::json;

use crate::domain::catalog::Achievement;
use crate::domain::repository::{
    BroadcastGate, EventPublisher, EventRepository, FactSource, StaffRepository, UnlockRepository,
    UserRepository,
};
use crate::domain::types::{
    ACHIEVEMENT_CHANNEL, ActionOutcome, BadgeIdentity, BadgeUser, COMMUNITY_CHANNEL, FACT_CHANNEL,
    FACT_WINDOW_KEY, FACT_WINDOW_SECS,
};
use crate::error::BadgeServiceError;

pub struct CtfActionInput {
    pub device_id: Option<String>,
    pub device_mac: Option<String>,
    pub event_type_id: i32,
    pub achievement: &'static Achievement,
}

impl CtfActionInput {
    fn identity(&self) -> Option<BadgeIdentity> {
        match (self.device_id.as_deref(), self.device_mac.as_deref()) {
            (Some(id), Some(mac)) if !id.is_empty() && !mac.is_empty() => {
                Some(BadgeIdentity::new(id, mac))
            }
            _ => None,
        }
    }
}

/// Orchestrates one trackable badge action: audit log, identity resolution,
/// at-most-once achievement unlock, notification fan-out and the rate-limited
/// fact broadcast.
pub struct CtfActionUseCase<U, E, L, S, F, G, P>
where
    U: UserRepository,
    E: EventRepository,
    L: UnlockRepository,
    S: StaffRepository,
    F: FactSource,
    G: BroadcastGate,
    P: EventPublisher,
{
    pub users: U,
    pub events: E,
    pub unlocks: L,
    pub staff: S,
    pub facts: F,
    pub gate: G,
    pub publisher: P,
}

impl<U, E, L, S, F, G, P> CtfActionUseCase<U, E, L, S, F, G, P>
where
    U: UserRepository,
    E: EventRepository,
    L: UnlockRepository,
    S: StaffRepository,
    F: FactSource,
    G: BroadcastGate,
    P: EventPublisher,
{
    pub async fn execute(&self, input: CtfActionInput) -> Result<ActionOutcome, BadgeServiceError> {
        // 1. Audit trail first; anonymous triggers leave a row too.
        self.events
            .record(
                input.event_type_id,
                input.device_id.as_deref(),
                input.device_mac.as_deref(),
            )
            .await?;

        let Some(identity) = input.identity() else {
            return Ok(self.unregistered(input.achievement).await);
        };

        let Some(user) = self.users.find_by_device(&identity).await? else {
            return Ok(self.unregistered(input.achievement).await);
        };

        let outcome = self.unlock(&user, input.achievement).await?;
        self.broadcast_fact().await;
        Ok(outcome)
    }

    /// Expected outcome for badges that have not paired: nobody to credit,
    /// so nudge the room and tell the badge why.
    async fn unregistered(&self, achievement: &Achievement) -> ActionOutcome {
        let notice = format!(
            "Someone unlocked \"{}\" but we don't know who... they should register their badge!",
            achievement.display_name()
        );
        self.publisher.publish(COMMUNITY_CHANNEL, &notice).await;
        ActionOutcome::error("user device is not registered; they probably haven't paired yet")
    }

    async fn unlock(
        &self,
        user: &BadgeUser,
        achievement: &Achievement,
    ) -> Result<ActionOutcome, BadgeServiceError> {
        // The read keeps the common retrigger path cheap; the conditional
        // insert is what actually guarantees at-most-once, so losing a
        // concurrent race lands in the same branch as a plain retrigger.
        if self.unlocks.is_unlocked(user.id, achievement.id).await?
            || !self
                .unlocks
                .try_record_unlock(user.id, achievement.id)
                .await?
        {
            let message = format!(
                "{} has already unlocked: {}",
                user.discord_handle,
                achievement.display_name()
            );
            self.publisher.publish(COMMUNITY_CHANNEL, &message).await;
            return Ok(ActionOutcome::success(message));
        }

        let payload = json!({
            "handle": user.discord_handle,
            "name": achievement.name,
            "description": achievement.description,
            "points": achievement.points,
        });
        self.publisher
            .publish(ACHIEVEMENT_CHANNEL, &payload.to_string())
            .await;
        Ok(ActionOutcome::success(format!(
            "{} unlocked: {} for {} points!",
            user.discord_handle, achievement.name, achievement.points
        )))
    }

    /// Low-frequency side broadcast. Nothing in here may fail the action
    /// that triggered it: every miss degrades to a log line.
    async fn broadcast_fact(&self) {
        if let Err(err) = self.try_broadcast_fact().await {
            tracing::warn!(error = %err, "fact broadcast skipped");
        }
    }

    async fn try_broadcast_fact(&self) -> Result<(), BadgeServiceError> {
        let Some(staff) = self.staff.pick_random().await? else {
            // no staff configured
            return Ok(());
        };
        let fact = self.facts.fetch_random().await?;
        if self
            .gate
            .try_acquire(FACT_WINDOW_KEY, &fact.text, FACT_WINDOW_SECS)
            .await?
        {
            let payload = json!({
                "fact": fact.text,
                "discord_handle": staff.discord_handle,
                "discord_user_id": staff.discord_user_id,
            });
            self.publisher
                .publish(FACT_CHANNEL, &payload.to_string())
                .await;
        }
        Ok(())
    }
}
