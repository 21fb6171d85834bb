//! Stream lifecycle management
//!
//! The supervisor owns the registry of active streams and runs one producer
//! task per stream.
//!
//! # Architecture
//!
//! ```text
//!                       Arc<StreamSupervisor>
//!                 ┌──────────────────────────────┐
//!                 │ streams: HashMap<camera_id,  │
//!                 │   Arc<StreamRecord> {        │
//!                 │     buffer: Mutex<...>,      │
//!                 │     lifecycle: RwLock<...>,  │
//!                 │     cancel: Token,           │
//!                 │   }                          │
//!                 │ >                            │
//!                 └──────────────┬───────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!      [producer task]     [producer task]     [query/API reads]
//!      tick → produce      tick → produce      status / latest
//!            │                   │
//!            └──► buffer.push() under the record's own mutex
//! ```
//!
//! The registry lock covers only structural changes (insert/remove); every
//! record's buffer and lifecycle are synchronized independently, so one
//! stream's churn never blocks another's frame pushes.

pub mod config;
pub mod error;
pub mod record;
pub mod registry;

pub use config::SupervisorConfig;
pub use error::SupervisorError;
pub use record::{Lifecycle, StreamRecord, StreamState};
pub use registry::{StopSummary, StreamSupervisor};
