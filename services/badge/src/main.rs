use sea_orm::{ConnectOptions, Database};
use tracing::info;

use cackalacky_badge::config::BadgeConfig;
use cackalacky_badge::router::build_router;
use cackalacky_badge::state::AppState;
use cackalacky_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = BadgeConfig::from_env();

    let mut db_options = ConnectOptions::new(config.database_url.clone());
    db_options.max_connections(config.db_connection_limit);
    let db = Database::connect(db_options)
        .await
        .expect("failed to connect to database");

    let redis_cfg = deadpool_redis::Config::from_url(&config.redis_url);
    let redis = redis_cfg
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .expect("failed to create Redis pool");

    let http = reqwest::Client::new();

    let state = AppState {
        db,
        redis,
        http,
        fact_api_url: config.fact_api_url,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.badge_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("badge service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
