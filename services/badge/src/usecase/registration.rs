use chrono::Utc;
use sha2::{Digest, Sha256};

use crate::domain::repository::RegistrationCache;
use crate::domain::types::{
    BadgeIdentity, COLLISION_BACKOFF, MAX_CODE_ATTEMPTS, REGISTRATION_CODE_LEN,
    REGISTRATION_CODE_TTL_SECS,
};
use crate::error::BadgeServiceError;

/// Derive a human-typeable candidate code from the identity and the current
/// clock. The digest width bounds the collision probability without making
/// it zero, which is why claiming a code stays conditional.
fn derive_code(identity: &BadgeIdentity, timestamp_micros: i64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(identity.device_id.as_bytes());
    hasher.update(identity.device_mac.as_bytes());
    hasher.update(timestamp_micros.to_string().as_bytes());
    let digest = hex::encode(hasher.finalize());
    digest[..REGISTRATION_CODE_LEN].to_owned()
}

pub struct IssueRegistrationCodeUseCase<C: RegistrationCache> {
    pub cache: C,
}

impl<C: RegistrationCache> IssueRegistrationCodeUseCase<C> {
    /// Return the identity's live pairing code, minting one if none exists.
    ///
    /// Re-requesting a live code hands back the same code and extends its
    /// expiry rather than rotating it. Collisions with a different identity
    /// are resolved by regenerating after a short pause, bounded at
    /// [`MAX_CODE_ATTEMPTS`].
    pub async fn issue_or_fetch(
        &self,
        identity: &BadgeIdentity,
    ) -> Result<String, BadgeServiceError> {
        if let Some(code) = self.cache.code_for_identity(identity).await? {
            self.cache
                .refresh_pairing(&code, identity, REGISTRATION_CODE_TTL_SECS)
                .await?;
            return Ok(code);
        }

        let mut attempt = 1;
        loop {
            let candidate = derive_code(identity, Utc::now().timestamp_micros());
            match self.cache.identity_for_code(&candidate).await? {
                Some(owner) if owner == *identity => {
                    // they re-requested their own code; keep it live
                    self.cache
                        .refresh_pairing(&candidate, identity, REGISTRATION_CODE_TTL_SECS)
                        .await?;
                    return Ok(candidate);
                }
                Some(_) => {
                    tracing::warn!(attempt, "registration code collision, regenerating");
                }
                None => {
                    if self
                        .cache
                        .try_claim_code(&candidate, identity, REGISTRATION_CODE_TTL_SECS)
                        .await?
                    {
                        return Ok(candidate);
                    }
                    // a concurrent issuer claimed it between lookup and write
                    tracing::warn!(attempt, "registration code claim lost, regenerating");
                }
            }
            if attempt >= MAX_CODE_ATTEMPTS {
                return Err(BadgeServiceError::CodeIssuanceExhausted);
            }
            attempt += 1;
            tokio::time::sleep(COLLISION_BACKOFF).await;
        }
    }

    /// Current live code for the identity, if any (`None` = unpaired).
    pub async fn current_code(
        &self,
        identity: &BadgeIdentity,
    ) -> Result<Option<String>, BadgeServiceError> {
        self.cache.code_for_identity(identity).await
    }

    /// Identity a staff-entered code resolves to, while the mapping lives.
    pub async fn identity_for(
        &self,
        code: &str,
    ) -> Result<Option<BadgeIdentity>, BadgeServiceError> {
        self.cache.identity_for_code(code).await
    }
}
