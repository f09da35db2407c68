use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use slotdesk_api::{
    ApiState, Stores, config::ApiConfig, init_tracing, middleware::auth::TokenKeys,
    notifier::notifier_from,
};
use slotdesk_core::clock::SystemClock;
use slotdesk_db::{create_pool, schema::initialize_database};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;
    init_tracing(config.log_level)?;

    // Create database connection pool
    let db_pool = create_pool(&config.database_url).await?;

    // Initialize database schema
    initialize_database(&db_pool).await?;

    let state = ApiState::new(
        config.booking_config(),
        config.notice_config(),
        TokenKeys::new(&config.jwt_secret, config.token_ttl()),
        Stores::postgres(db_pool),
        notifier_from(config.mail_webhook_url.as_deref()),
        Arc::new(SystemClock),
    );

    // Start API server
    slotdesk_api::start_server(config, Arc::new(state)).await?;

    Ok(())
}
