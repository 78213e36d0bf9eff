//! Domain types for the todo list.
//!
//! A todo list is an ordered collection of items that can be added, toggled
//! and deleted. The same [`TodoItem`] type is used on both sides of the HTTP
//! API, so the server and the client controller share one wire schema:
//!
//! ```json
//! {"id": 1, "todo": "buy milk", "status": false, "created_at": "2025-01-01T00:00:00Z"}
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use todo_macros::Action;

/// Maximum label length, in characters.
pub const MAX_LABEL_LEN: usize = 500;

/// Identifier assigned by the store. Ids start at 1 and are never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(u64);

impl TodoId {
    /// Creates a `TodoId` from its numeric value
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the numeric value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Unique identifier
    pub id: TodoId,
    /// Text of the task, fixed at creation
    #[serde(rename = "todo")]
    pub label: String,
    /// Whether the task is done
    #[serde(rename = "status")]
    pub done: bool,
    /// When the item was added
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl TodoItem {
    /// Creates a new todo item
    #[must_use]
    pub const fn new(id: TodoId, label: String, done: bool, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            label,
            done,
            created_at: Some(created_at),
        }
    }
}

/// Request body of the add operation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTodo {
    /// Text of the task
    #[serde(rename = "todo")]
    pub label: String,
    /// Initial completion flag
    #[serde(rename = "status", default)]
    pub done: bool,
}

/// Response body of the delete operation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remaining {
    /// Items left after the deletion
    pub remaining: usize,
}

/// Why a command was rejected
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum TodoError {
    /// The label is empty or whitespace only
    #[error("todo label cannot be empty")]
    EmptyLabel,

    /// The label exceeds [`MAX_LABEL_LEN`]
    #[error("todo label too long ({len} characters, max {max})")]
    LabelTooLong {
        /// Length of the rejected label
        len: usize,
        /// Maximum accepted length
        max: usize,
    },

    /// No item carries this id
    #[error("todo with id {0} not found")]
    NotFound(TodoId),

    /// The id was already issued, or no further id can follow it
    #[error("todo id {0} is not available")]
    IdUnavailable(TodoId),
}

/// State of the todo list
///
/// Items are kept in insertion order. Deleting an item never reorders the
/// survivors and never lowers `next_id`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TodoState {
    /// All items, oldest first
    pub items: Vec<TodoItem>,
    /// Id the next added item receives
    pub next_id: u64,
    /// Error of the last rejected command (cleared by the next success)
    pub last_error: Option<TodoError>,
    /// Event produced by the last command
    pub last_event: Option<TodoAction>,
}

impl TodoState {
    /// Creates an empty list whose first item gets id 1
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
            last_error: None,
            last_event: None,
        }
    }

    /// Creates a list pre-populated with `labels`, assigned ids `1..=n`
    #[must_use]
    pub fn with_seed<I, L>(labels: I, created_at: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        let mut state = Self::new();
        for label in labels {
            let item = TodoItem::new(TodoId::new(state.next_id), label.into(), false, created_at);
            state.items.push(item);
            state.next_id += 1;
        }
        state
    }

    /// Returns the number of items
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Returns the number of done items
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|item| item.done).count()
    }

    /// Returns an item by id
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Checks if an item exists
    #[must_use]
    pub fn exists(&self, id: TodoId) -> bool {
        self.get(id).is_some()
    }
}

impl Default for TodoState {
    fn default() -> Self {
        Self::new()
    }
}

/// Commands and events for the todo list
///
/// Commands are validated by the reducer and turned into events, which are
/// then applied to state. A rejected command becomes `CommandRejected`.
#[derive(Action, Clone, Debug, PartialEq, Eq)]
pub enum TodoAction {
    // ========== Commands ==========
    /// Command: Append a new item
    #[command]
    AddTodo {
        /// Text of the task
        label: String,
        /// Initial completion flag
        done: bool,
    },

    /// Command: Flip the completion flag of an item
    #[command]
    ToggleTodo {
        /// Item to toggle
        id: TodoId,
    },

    /// Command: Remove an item
    #[command]
    DeleteTodo {
        /// Item to delete
        id: TodoId,
    },

    // ========== Events ==========
    /// Event: Item was added
    #[event]
    TodoAdded {
        /// The new item
        item: TodoItem,
    },

    /// Event: Item was toggled
    #[event]
    TodoToggled {
        /// The item after toggling
        item: TodoItem,
    },

    /// Event: Item was deleted
    #[event]
    TodoDeleted {
        /// Deleted item
        id: TodoId,
        /// Items left after the deletion
        remaining: usize,
    },

    /// Event: Command validation failed
    #[event]
    CommandRejected {
        /// Why the command was rejected
        error: TodoError,
    },
}
