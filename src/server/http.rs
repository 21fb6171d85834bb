//! HTTP server runtime
//!
//! Binds a TCP listener, serves the API router, and on shutdown drains the
//! supervisor so producer tasks are not abandoned mid-frame.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::api::{self, ApiState};
use crate::supervisor::StreamSupervisor;

use super::config::ServerConfig;

/// HTTP server serving the stream API
pub struct HttpServer {
    config: ServerConfig,
    supervisor: Arc<StreamSupervisor>,
}

impl HttpServer {
    /// Create a new server with the given configuration and supervisor
    pub fn new(config: ServerConfig, supervisor: Arc<StreamSupervisor>) -> Self {
        Self { config, supervisor }
    }

    /// Get a reference to the supervisor
    pub fn supervisor(&self) -> &Arc<StreamSupervisor> {
        &self.supervisor
    }

    /// Get the bind address
    pub fn bind_addr(&self) -> std::net::SocketAddr {
        self.config.bind_addr
    }

    /// Build the application router, with CORS when configured
    pub fn router(&self) -> Router {
        let router = api::router(ApiState::new(Arc::clone(&self.supervisor)));

        if self.config.permissive_cors {
            router.layer(CorsLayer::permissive())
        } else {
            router
        }
    }

    /// Run the server
    ///
    /// This method blocks until the process is stopped.
    pub async fn run(&self) -> std::io::Result<()> {
        self.run_until(std::future::pending()).await
    }

    /// Run the server with graceful shutdown
    ///
    /// Serves until `shutdown` resolves, then drains the supervisor (unless
    /// disabled) before returning.
    pub async fn run_until<F>(&self, shutdown: F) -> std::io::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        tracing::info!(addr = %self.config.bind_addr, "HTTP server listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Listener stopped");

        if self.config.drain_on_shutdown {
            self.supervisor.shutdown().await;
        }

        Ok(())
    }
}
