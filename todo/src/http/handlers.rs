//! Todo API endpoints.
//!
//! - GET /api/todo/ - List every item
//! - POST /api/todo/ - Add an item
//! - PUT|PATCH /api/todo/:id - Toggle an item
//! - DELETE /api/todo/:id - Delete an item
//! - GET / - Server-rendered list

use super::{AppState, TodoStore};
use crate::client::view::{HtmlView, TodoView};
use crate::types::{NewTodo, Remaining, TodoAction, TodoError, TodoId, TodoItem};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::Html,
};
use std::sync::Arc;
use todo_web::{AppError, CorrelationId, WebResult};

impl From<TodoError> for AppError {
    fn from(error: TodoError) -> Self {
        match error {
            TodoError::NotFound(id) => Self::not_found("Todo", id),
            TodoError::EmptyLabel
            | TodoError::LabelTooLong { .. }
            | TodoError::IdUnavailable(_) => {
                Self::bad_request(error.to_string())
            }
        }
    }
}

/// Sends a command and returns the event it produced.
///
/// The event is read under the same lock the reducer ran under, so it is
/// the outcome of this command even when requests race.
async fn dispatch(
    store: &TodoStore,
    correlation_id: CorrelationId,
    command: TodoAction,
) -> WebResult<TodoAction> {
    let command_name = command.action_name();
    let outcome = store
        .send_and_inspect(command, |state| state.last_event.clone())
        .await?;

    match outcome {
        Some(TodoAction::CommandRejected { error }) => {
            tracing::debug!(
                correlation_id = %correlation_id.0,
                command = command_name,
                %error,
                "Command rejected"
            );
            Err(error.into())
        }
        Some(event) => {
            tracing::info!(
                correlation_id = %correlation_id.0,
                command = command_name,
                event = event.event_type(),
                "Command handled"
            );
            Ok(event)
        }
        None => Err(AppError::internal(format!("{command_name} produced no event"))),
    }
}

fn unexpected(event: &TodoAction) -> AppError {
    AppError::internal(format!("unexpected event {}", event.event_type()))
}

/// List every item in insertion order.
pub async fn list_todos(State(store): State<Arc<TodoStore>>) -> Json<Vec<TodoItem>> {
    Json(store.state(|state| state.items.clone()).await)
}

/// Add an item.
///
/// # Errors
///
/// `400 BAD_REQUEST` for an empty or too-long label.
pub async fn add_todo(
    State(store): State<Arc<TodoStore>>,
    correlation_id: CorrelationId,
    Json(request): Json<NewTodo>,
) -> WebResult<(StatusCode, Json<TodoItem>)> {
    let command = TodoAction::AddTodo {
        label: request.label,
        done: request.done,
    };

    match dispatch(&store, correlation_id, command).await? {
        TodoAction::TodoAdded { item } => Ok((StatusCode::CREATED, Json(item))),
        other => Err(unexpected(&other)),
    }
}

/// Flip the completion flag of an item. Any request body is ignored.
///
/// # Errors
///
/// `404 NOT_FOUND` for an unknown id.
pub async fn toggle_todo(
    State(store): State<Arc<TodoStore>>,
    correlation_id: CorrelationId,
    Path(id): Path<u64>,
) -> WebResult<Json<TodoItem>> {
    let command = TodoAction::ToggleTodo {
        id: TodoId::new(id),
    };

    match dispatch(&store, correlation_id, command).await? {
        TodoAction::TodoToggled { item } => Ok(Json(item)),
        other => Err(unexpected(&other)),
    }
}

/// Delete an item, answering with the number of items left.
///
/// # Errors
///
/// `404 NOT_FOUND` for an unknown id.
pub async fn delete_todo(
    State(store): State<Arc<TodoStore>>,
    correlation_id: CorrelationId,
    Path(id): Path<u64>,
) -> WebResult<Json<Remaining>> {
    let command = TodoAction::DeleteTodo {
        id: TodoId::new(id),
    };

    match dispatch(&store, correlation_id, command).await? {
        TodoAction::TodoDeleted { remaining, .. } => Ok(Json(Remaining { remaining })),
        other => Err(unexpected(&other)),
    }
}

/// Server-rendered page with the current list.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let items = state.store.state(|s| s.items.clone()).await;

    let mut view = HtmlView::new();
    if items.is_empty() {
        view.render_empty();
    } else {
        view.render_items(&items);
    }

    Html(view.page(&state.page_title))
}
