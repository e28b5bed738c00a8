use anyhow::Context as _;

use crate::domain::repository::FactSource;
use crate::domain::types::Fact;
use crate::error::BadgeServiceError;

/// HTTP fact source returning `{"text": "..."}` (uselessfacts-style API).
#[derive(Clone)]
pub struct HttpFactSource {
    pub client: reqwest::Client,
    pub url: String,
}

impl FactSource for HttpFactSource {
    async fn fetch_random(&self) -> Result<Fact, BadgeServiceError> {
        let fact = self
            .client
            .get(&self.url)
            .send()
            .await
            .context("request fact")?
            .error_for_status()
            .context("fact source status")?
            .json::<Fact>()
            .await
            .context("decode fact")?;
        Ok(fact)
    }
}
