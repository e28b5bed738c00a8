use deadpool_redis::Pool;
use deadpool_redis::redis::AsyncCommands;

use crate::domain::repository::EventPublisher;

/// Redis `PUBLISH` fan-out to chat bots, overlays and other listeners.
///
/// Strictly best-effort: a dead broker costs a warning, never the action
/// that produced the message.
#[derive(Clone)]
pub struct RedisEventPublisher {
    pub pool: Pool,
}

impl EventPublisher for RedisEventPublisher {
    async fn publish(&self, channel: &str, payload: &str) {
        let mut conn = match self.pool.get().await {
            Ok(conn) => conn,
            Err(err) => {
                tracing::warn!(channel, error = %err, "publish dropped, no redis connection");
                return;
            }
        };
        let delivered: Result<i64, deadpool_redis::redis::RedisError> =
            conn.publish(channel, payload).await;
        if let Err(err) = delivered {
            tracing::warn!(channel, error = %err, "publish failed");
        }
    }
}
