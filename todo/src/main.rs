//! Todo list HTTP server.

use std::sync::Arc;
use todo::config::TodoConfig;
use todo::http;
use todo_core::environment::SystemClock;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if present)
    let _ = dotenvy::dotenv();

    let config = TodoConfig::from_env();
    todo::init_tracing(&config.log_filter);

    info!(
        address = %config.bind_address(),
        seed_items = config.seed.len(),
        cors_origins = config.cors_origins.len(),
        "Configuration loaded"
    );

    let store = http::build_store(&config, Arc::new(SystemClock));
    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;

    http::run(listener, store, &config, http::shutdown_signal()).await
}
