/// Badge service configuration loaded from environment variables.
#[derive(Debug)]
pub struct BadgeConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Redis connection URL.
    pub redis_url: String,
    /// Maximum relational pool size (default 5). Env var: `DB_CONNECTION_LIMIT`.
    pub db_connection_limit: u32,
    /// TCP port to listen on (default 3114). Env var: `BADGE_PORT`.
    pub badge_port: u16,
    /// Fact source endpoint. Env var: `FACT_API_URL` (defaulted).
    pub fact_api_url: String,
}

impl BadgeConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            redis_url: std::env::var("REDIS_URL").expect("REDIS_URL"),
            db_connection_limit: std::env::var("DB_CONNECTION_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            badge_port: std::env::var("BADGE_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3114),
            fact_api_url: std::env::var("FACT_API_URL")
                .unwrap_or_else(|_| "https://uselessfacts.jsph.pl/api/v2/facts/random".to_owned()),
        }
    }
}
