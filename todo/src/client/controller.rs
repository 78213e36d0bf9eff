//! Client controller: keeps a view in sync with the server's list.
//!
//! The controller holds no copy of the list. Every mutation is sent to the
//! server and followed by a full re-fetch and redraw, whether or not the
//! mutation succeeded.

use crate::client::api::{ClientError, TodoApi};
use crate::client::view::TodoView;
use crate::types::TodoId;
use serde::Serialize;

/// Request cycle of a single row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RowPhase {
    /// Drawn from the last fetch
    Rendered,
    /// A toggle or delete for this row is in flight
    RequestSent,
}

/// Wires user interactions to API calls and redraws.
///
/// # Example
///
/// ```ignore
/// let mut controller = TodoController::new(HttpTodoApi::new(url)?, HtmlView::new());
/// controller.load().await?;
/// controller.submit("buy milk").await?;
/// controller.click_row(TodoId::new(1)).await?;
/// ```
pub struct TodoController<A, V> {
    api: A,
    view: V,
}

impl<A, V> TodoController<A, V>
where
    A: TodoApi,
    V: TodoView,
{
    /// Creates a controller drawing into `view`
    pub const fn new(api: A, view: V) -> Self {
        Self { api, view }
    }

    /// The view being drawn into
    pub const fn view(&self) -> &V {
        &self.view
    }

    /// Mutable access to the view, e.g. to fill the input field
    pub const fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Consumes the controller, returning the view
    pub fn into_view(self) -> V {
        self.view
    }

    /// Fetches the list and draws it, or the placeholder when it is empty
    ///
    /// # Errors
    ///
    /// Returns the fetch error; the view is left untouched.
    pub async fn load(&mut self) -> Result<(), ClientError> {
        let items = self.api.list().await?;
        if items.is_empty() {
            self.view.render_empty();
        } else {
            self.view.render_items(&items);
        }
        tracing::debug!(count = items.len(), "list rendered");
        Ok(())
    }

    /// Adds a new, not-done item (the input form's submit)
    ///
    /// The input is cleared after the re-fetch, whether or not it succeeded.
    ///
    /// # Errors
    ///
    /// Only the re-fetch can fail this call; a rejected add is logged.
    pub async fn submit(&mut self, label: impl Into<String>) -> Result<(), ClientError> {
        self.submit_with_status(label, false).await
    }

    /// Adds a new item with an explicit initial completion flag
    ///
    /// # Errors
    ///
    /// Only the re-fetch can fail this call; a rejected add is logged.
    pub async fn submit_with_status(
        &mut self,
        label: impl Into<String>,
        done: bool,
    ) -> Result<(), ClientError> {
        let label = label.into();
        match self.api.add(label, done).await {
            Ok(item) => tracing::info!(id = %item.id, "todo added"),
            Err(error) => tracing::warn!(%error, "add request failed"),
        }

        let reloaded = self.load().await;
        self.view.clear_input();
        reloaded
    }

    /// Toggles the clicked row
    ///
    /// # Errors
    ///
    /// Only the re-fetch can fail this call; a rejected toggle is logged.
    pub async fn click_row(&mut self, id: TodoId) -> Result<(), ClientError> {
        self.view.mark_row(id, RowPhase::RequestSent);
        match self.api.toggle(id).await {
            Ok(item) => tracing::info!(%id, done = item.done, "todo toggled"),
            Err(error) => tracing::warn!(%id, %error, "toggle request failed"),
        }

        self.refresh_row(id).await
    }

    /// Deletes the row whose delete button was clicked
    ///
    /// # Errors
    ///
    /// Only the re-fetch can fail this call; a rejected delete is logged.
    pub async fn click_delete(&mut self, id: TodoId) -> Result<(), ClientError> {
        self.view.mark_row(id, RowPhase::RequestSent);
        match self.api.delete(id).await {
            Ok(remaining) => tracing::info!(%id, remaining, "todo deleted"),
            Err(error) => tracing::warn!(%id, %error, "delete request failed"),
        }

        self.refresh_row(id).await
    }

    async fn refresh_row(&mut self, id: TodoId) -> Result<(), ClientError> {
        self.load().await?;
        self.view.mark_row(id, RowPhase::Rendered);
        Ok(())
    }
}
