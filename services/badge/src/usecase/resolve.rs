use crate::domain::repository::UserRepository;
use crate::domain::types::{BadgeIdentity, BadgeUser};
use crate::error::BadgeServiceError;

/// Resolve a badge's registered user, if any.
pub struct ResolveBadgeUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ResolveBadgeUserUseCase<U> {
    /// `None` is the ordinary "badge not registered yet" outcome.
    pub async fn execute(
        &self,
        identity: &BadgeIdentity,
    ) -> Result<Option<BadgeUser>, BadgeServiceError> {
        self.users.find_by_device(identity).await
    }
}
