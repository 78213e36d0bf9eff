//! Access to the todo HTTP API.
//!
//! [`TodoApi`] is the seam between the controller and the network. It uses
//! explicit `Pin<Box<dyn Future>>` returns so it can be used as a trait
//! object (`Arc<dyn TodoApi>`).

use crate::types::{NewTodo, Remaining, TodoId, TodoItem};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use todo_web::ErrorResponse;

/// Default timeout for a single request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors returned by [`TodoApi`] implementations
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request could not be sent or its response could not be read
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("server returned {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// The base URL is not an absolute http(s) URL
    #[error("invalid base URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// The server's JSON error body, when the failure carries one
    #[must_use]
    pub fn server_error(&self) -> Option<ErrorResponse> {
        match self {
            Self::Status { body, .. } => serde_json::from_str(body).ok(),
            Self::Http(_) | Self::InvalidUrl(_) => None,
        }
    }
}

/// Boxed future returned by [`TodoApi`] methods
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ClientError>> + Send + 'a>>;

/// Client side of the four list operations.
pub trait TodoApi: Send + Sync {
    /// Fetch every item, in order
    fn list(&self) -> ApiFuture<'_, Vec<TodoItem>>;

    /// Add an item and return it as stored
    fn add(&self, label: String, done: bool) -> ApiFuture<'_, TodoItem>;

    /// Flip the completion flag of an item and return it
    fn toggle(&self, id: TodoId) -> ApiFuture<'_, TodoItem>;

    /// Delete an item and return how many remain
    fn delete(&self, id: TodoId) -> ApiFuture<'_, usize>;
}

impl<T: TodoApi + ?Sized> TodoApi for Arc<T> {
    fn list(&self) -> ApiFuture<'_, Vec<TodoItem>> {
        (**self).list()
    }

    fn add(&self, label: String, done: bool) -> ApiFuture<'_, TodoItem> {
        (**self).add(label, done)
    }

    fn toggle(&self, id: TodoId) -> ApiFuture<'_, TodoItem> {
        (**self).toggle(id)
    }

    fn delete(&self, id: TodoId) -> ApiFuture<'_, usize> {
        (**self).delete(id)
    }
}

/// [`TodoApi`] over HTTP with `reqwest`
#[derive(Debug, Clone)]
pub struct HttpTodoApi {
    client: Client,
    collection: Url,
}

impl HttpTodoApi {
    /// Creates a client for the server at `base_url` with [`DEFAULT_TIMEOUT`]
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` is not an http(s)
    /// URL, or [`ClientError::Http`] if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Creates a client with a custom per-request timeout
    ///
    /// # Errors
    ///
    /// Same as [`HttpTodoApi::new`].
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base = Url::parse(base_url).map_err(|_| ClientError::InvalidUrl(base_url.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") || base.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }

        let collection = base
            .join(&format!("{}/api/todo/", base.path().trim_end_matches('/')))
            .map_err(|_| ClientError::InvalidUrl(base_url.to_string()))?;

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client, collection })
    }

    /// URL of the item collection (`.../api/todo/`)
    #[must_use]
    pub const fn collection_url(&self) -> &Url {
        &self.collection
    }

    fn item_url(&self, id: TodoId) -> Result<Url, ClientError> {
        self.collection
            .join(&id.to_string())
            .map_err(|_| ClientError::InvalidUrl(self.collection.to_string()))
    }
}

/// Decodes a success body, or turns the response into [`ClientError::Status`]
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.json().await?)
}

impl TodoApi for HttpTodoApi {
    fn list(&self) -> ApiFuture<'_, Vec<TodoItem>> {
        Box::pin(async move {
            let response = self.client.get(self.collection.clone()).send().await?;
            decode(response).await
        })
    }

    fn add(&self, label: String, done: bool) -> ApiFuture<'_, TodoItem> {
        Box::pin(async move {
            let body = NewTodo { label, done };
            let response = self
                .client
                .post(self.collection.clone())
                .json(&body)
                .send()
                .await?;
            decode(response).await
        })
    }

    fn toggle(&self, id: TodoId) -> ApiFuture<'_, TodoItem> {
        Box::pin(async move {
            let response = self.client.put(self.item_url(id)?).send().await?;
            decode(response).await
        })
    }

    fn delete(&self, id: TodoId) -> ApiFuture<'_, usize> {
        Box::pin(async move {
            let response = self.client.delete(self.item_url(id)?).send().await?;
            let Remaining { remaining } = decode(response).await?;
            Ok(remaining)
        })
    }
}
