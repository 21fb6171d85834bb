//! HTTP request surface
//!
//! A single method-routed resource at `/streams` drives the whole
//! lifecycle: `POST` starts a stream, `GET` dispatches on the `action`
//! query parameter (`status` by default, `list`, `stream`), `DELETE` stops.
//! Unsupported methods get a 405 from the method router. `/health` reports
//! process liveness.

pub mod error;
pub mod handlers;
pub mod models;

use std::sync::Arc;
use std::time::Instant;

use axum::routing::get;
use axum::Router;

use crate::query::StreamQueryService;
use crate::supervisor::StreamSupervisor;

pub use error::ApiError;

/// Shared state of the HTTP handlers
#[derive(Clone)]
pub struct ApiState {
    pub supervisor: Arc<StreamSupervisor>,
    pub query: StreamQueryService,
    pub started_at: Instant,
}

impl ApiState {
    pub fn new(supervisor: Arc<StreamSupervisor>) -> Self {
        Self {
            query: StreamQueryService::new(Arc::clone(&supervisor)),
            supervisor,
            started_at: Instant::now(),
        }
    }
}

/// Build the application router
pub fn router(state: ApiState) -> Router {
    Router::new()
        .route(
            "/streams",
            get(handlers::get_streams)
                .post(handlers::start_stream)
                .delete(handlers::stop_stream)
                .options(handlers::preflight),
        )
        .route("/health", get(handlers::health))
        .with_state(state)
}
