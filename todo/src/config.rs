//! Configuration management for the todo server.
//!
//! Loads configuration from environment variables with sensible defaults.
//! A `.env` file, when present, is loaded by the binaries before this runs.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default tracing filter when neither `RUST_LOG` nor `TODO_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "todo=info,tower_http=info";

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Tracing filter directives
    pub log_filter: String,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout: u64,
    /// Origins allowed by CORS (empty disables the CORS layer)
    pub cors_origins: Vec<String>,
    /// Title of the server-rendered index page
    pub page_title: String,
    /// Labels the list starts with
    pub seed: Vec<String>,
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            shutdown_timeout: 30,
            cors_origins: Vec::new(),
            page_title: "My Todo List".to_string(),
            seed: Vec::new(),
        }
    }
}

impl TodoConfig {
    /// Load configuration from the process environment.
    ///
    /// Unparseable numeric values fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            host: lookup("TODO_HOST").unwrap_or(defaults.host),
            port: lookup("TODO_PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            log_filter: lookup("TODO_LOG").unwrap_or(defaults.log_filter),
            shutdown_timeout: lookup("TODO_SHUTDOWN_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.shutdown_timeout),
            cors_origins: lookup("TODO_CORS_ORIGINS")
                .map(|s| split_list(&s, ','))
                .unwrap_or(defaults.cors_origins),
            page_title: lookup("TODO_PAGE_TITLE").unwrap_or(defaults.page_title),
            seed: lookup("TODO_SEED")
                .map(|s| split_list(&s, '|'))
                .unwrap_or(defaults.seed),
        }
    }

    /// Address the listener binds to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Graceful shutdown budget
    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout)
    }
}

fn split_list(raw: &str, separator: char) -> Vec<String> {
    raw.split(separator)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(ToString::to_string)
        .collect()
}
