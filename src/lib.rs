//! Live camera stream lifecycle manager with bounded frame buffering.
//!
//! `camring` manages a registry of independent live streams. Each stream is
//! backed by a producer task that generates frames at a target rate and a
//! fixed-capacity sliding window that retains only the most recent 60
//! seconds of frames. Callers start streams, poll status, fetch the latest
//! frame, list everything, and stop streams; the HTTP layer exposes the
//! same operations as a JSON API.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use camring::source::TestPatternSource;
//! use camring::server::{HttpServer, ServerConfig};
//! use camring::supervisor::StreamSupervisor;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let supervisor = Arc::new(StreamSupervisor::new(Arc::new(TestPatternSource::new())));
//!     let server = HttpServer::new(ServerConfig::default(), supervisor);
//!     server.run().await
//! }
//! ```
//!
//! # Architecture
//!
//! - [`buffer`]: per-stream sliding window of timestamped frames
//! - [`source`]: pluggable frame producer trait plus two synthetic variants
//! - [`supervisor`]: stream registry, lifecycle state machine, producer tasks
//! - [`query`]: read-only status/frame/listing projections
//! - [`api`]: axum handlers mapping the JSON surface onto the above
//! - [`server`]: listener, graceful shutdown, supervisor drain

pub mod api;
pub mod buffer;
pub mod query;
pub mod server;
pub mod source;
pub mod supervisor;

pub use buffer::{Frame, FrameBuffer};
pub use query::StreamQueryService;
pub use server::{HttpServer, ServerConfig};
pub use source::{FrameSource, SourceError, SourceFrame, StreamConfig};
pub use supervisor::{StreamRecord, StreamState, StreamSupervisor, SupervisorConfig, SupervisorError};
