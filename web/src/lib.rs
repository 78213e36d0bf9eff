//! Axum web framework integration for the todo service.
//!
//! This crate is the imperative shell around the reducer core:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         Imperative Shell (Axum)         │  ← HTTP, JSON, CORS
//! │  - Request parsing                      │  ← Correlation ids
//! │  - Response serialization               │  ← Error mapping
//! ├─────────────────────────────────────────┤
//! │         Functional Core                 │
//! │  - Pure business logic (reducers)       │  ← Testable at memory speed
//! │  - State transformations                │  ← No I/O, no side effects
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Request Flow
//!
//! 1. **HTTP Request** arrives at an Axum handler
//! 2. **Extract data** from the request (JSON, path params, headers)
//! 3. **Build Action** from the extracted data
//! 4. **Dispatch** the action through the `Store`
//! 5. **Map result** to an HTTP response (or an [`AppError`])
//!
//! # Example
//!
//! ```ignore
//! use todo_web::{AppError, WebResult};
//! use axum::{Router, routing::post, extract::State, Json};
//!
//! async fn add(
//!     State(store): State<Arc<TodoStore>>,
//!     Json(request): Json<NewTodo>,
//! ) -> WebResult<Json<TodoItem>> {
//!     let item = store
//!         .send_and_inspect(TodoAction::AddTodo { .. }, |s| s.items.last().cloned())
//!         .await?;
//!     item.map(Json).ok_or_else(|| AppError::bad_request("rejected"))
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;

pub use error::{AppError, ErrorResponse};
pub use extractors::CorrelationId;
pub use middleware::{CORRELATION_ID_HEADER, CorrelationIdExt, correlation_id_layer};

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
