//! Client side of the todo list: API access, controller and views.

pub mod api;
pub mod controller;
pub mod view;

pub use api::{ApiFuture, ClientError, DEFAULT_TIMEOUT, HttpTodoApi, TodoApi};
pub use controller::{RowPhase, TodoController};
pub use view::{HtmlView, TerminalView, TodoView, escape_html};
