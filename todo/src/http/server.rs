//! Server lifecycle: store construction, serving and graceful shutdown.

use super::{AppState, TodoStore, build_router};
use crate::config::TodoConfig;
use crate::reducer::{TodoEnvironment, TodoReducer};
use crate::types::TodoState;
use anyhow::Context as _;
use std::sync::Arc;
use todo_core::environment::Clock;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};

/// Creates the store, seeded with the configured labels.
#[must_use]
pub fn build_store(config: &TodoConfig, clock: Arc<dyn Clock>) -> Arc<TodoStore> {
    let state = TodoState::with_seed(config.seed.iter().cloned(), clock.now());
    Arc::new(TodoStore::new(
        state,
        TodoReducer::new(),
        TodoEnvironment::new(clock),
    ))
}

/// Serves the API on `listener` until `shutdown` resolves, then drains the store.
///
/// # Errors
///
/// Returns an error if the server fails while running.
pub async fn run<F>(
    listener: TcpListener,
    store: Arc<TodoStore>,
    config: &TodoConfig,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let app = build_router(
        AppState::new(Arc::clone(&store), config.page_title.as_str()),
        &config.cors_origins,
    );

    let address = listener.local_addr().context("listener has no local address")?;
    let items = store.state(TodoState::count).await;
    info!(%address, items, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")?;

    if let Err(error) = store.shutdown(config.shutdown_timeout()).await {
        warn!(%error, "Store did not drain before the shutdown timeout");
    }

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            error!(%error, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                error!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}
