//! Todo list service.
//!
//! An ordered, in-memory list of tasks behind a four-operation HTTP API,
//! plus the client controller that drives a view from that API.
//!
//! - [`types`] and [`reducer`]: the list as a pure reducer (functional core)
//! - [`http`]: Axum router and server lifecycle around the runtime `Store`
//! - [`client`]: API client, controller and views
//! - [`config`]: environment-driven server configuration
//!
//! # Example
//!
//! ```ignore
//! use todo::{config::TodoConfig, http};
//! use todo_core::environment::SystemClock;
//!
//! let config = TodoConfig::from_env();
//! let store = http::build_store(&config, Arc::new(SystemClock));
//! let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
//! http::run(listener, store, &config, http::shutdown_signal()).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod http;
pub mod reducer;
pub mod types;

pub use reducer::{TodoEnvironment, TodoReducer};
pub use types::{TodoAction, TodoError, TodoId, TodoItem, TodoState};

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `fallback`.
pub fn init_tracing(fallback: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
