//! Router configuration for the todo service.

use super::AppState;
use super::handlers::{add_todo, delete_todo, index, list_todos, toggle_todo};
use crate::reducer::{TodoEnvironment, TodoReducer};
use crate::types::{TodoAction, TodoState};
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, put},
};
use todo_web::handlers::{health_check, health_check_with_store};
use todo_web::correlation_id_layer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the complete Axum router.
///
/// Both `/api/todo` and `/api/todo/` serve the collection. Requests carry
/// an `X-Correlation-ID` and are traced. A CORS layer is added only when
/// `cors_origins` is non-empty.
pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    let api_routes = Router::new()
        .route("/todo", get(list_todos).post(add_todo))
        .route("/todo/", get(list_todos).post(add_todo))
        .route(
            "/todo/:id",
            put(toggle_todo).patch(toggle_todo).delete(delete_todo),
        );

    let mut router = Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route(
            "/health/ready",
            get(health_check_with_store::<TodoState, TodoAction, TodoEnvironment, TodoReducer>),
        )
        .nest("/api", api_routes)
        .with_state(state)
        .layer(correlation_id_layer());

    if let Some(cors) = cors_layer(cors_origins) {
        router = router.layer(cors);
    }

    router.layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
            ])
            .allow_headers([header::CONTENT_TYPE]),
    )
}
