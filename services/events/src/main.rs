use std::sync::Arc;
use std::time::Duration;

use sea_orm::{ConnectOptions, Database};
use tracing::info;

use ovation_core::config::Config;
use ovation_core::tracing::init_tracing;
use ovation_events::config::EventsConfig;
use ovation_events::identity::AdminKey;
use ovation_events::infra::sms::HttpSmsSender;
use ovation_events::router::build_router;
use ovation_events::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = EventsConfig::from_env();
    let admin_phones = config.normalized_admin_phones();

    let timeout = Duration::from_secs(config.db_timeout_secs);
    let mut options = ConnectOptions::new(config.database_url_with_statement_timeout());
    options
        .connect_timeout(timeout)
        .acquire_timeout(timeout)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("failed to connect to database");

    let redis_cfg = deadpool_redis::Config::from_url(&config.redis_url);
    let redis = redis_cfg
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .expect("failed to create Redis pool");

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .expect("failed to build HTTP client");

    let state = AppState {
        db,
        redis,
        sms: HttpSmsSender {
            client,
            gateway_url: config.sms_gateway_url,
            api_key: config.sms_api_key,
            sender_id: config.sms_sender_id,
        },
        admin_key: AdminKey::new(config.admin_key),
        admin_phones: Arc::new(admin_phones),
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.events_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("events service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
