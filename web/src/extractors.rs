//! Custom Axum extractors.
//!
//! # Example
//!
//! ```ignore
//! use todo_web::extractors::CorrelationId;
//!
//! async fn handler(correlation_id: CorrelationId) -> String {
//!     tracing::info!(correlation_id = %correlation_id.0, "Processing request");
//!     format!("Request ID: {}", correlation_id.0)
//! }
//! ```

use crate::middleware::CORRELATION_ID_HEADER;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

/// Correlation ID for request tracing.
///
/// Resolution order:
/// 1. The id stored in request extensions by [`crate::correlation_id_layer`]
/// 2. A valid UUID in the `X-Correlation-ID` header
/// 3. A freshly generated UUID v4
///
/// With the layer installed, the handler therefore sees the same id that is
/// recorded on the request span and echoed in the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrelationId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(id) = parts.extensions.get::<Uuid>() {
            return Ok(Self(*id));
        }

        let correlation_id = parts
            .headers
            .get(CORRELATION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::new_v4);

        Ok(Self(correlation_id))
    }
}
