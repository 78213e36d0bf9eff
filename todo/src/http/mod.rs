//! HTTP shell around the todo store.

pub mod handlers;
pub mod router;
pub mod server;

use crate::reducer::{TodoEnvironment, TodoReducer};
use crate::types::{TodoAction, TodoState};
use axum::extract::FromRef;
use std::sync::Arc;
use todo_runtime::Store;

pub use router::build_router;
pub use server::{build_store, run, shutdown_signal};

/// The runtime store driving the todo reducer
pub type TodoStore = Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>;

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// The todo store
    pub store: Arc<TodoStore>,
    /// Title of the server-rendered page
    pub page_title: Arc<str>,
}

impl AppState {
    /// Creates handler state around `store`
    #[must_use]
    pub fn new(store: Arc<TodoStore>, page_title: impl Into<Arc<str>>) -> Self {
        Self {
            store,
            page_title: page_title.into(),
        }
    }
}

impl FromRef<AppState> for Arc<TodoStore> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.store)
    }
}
