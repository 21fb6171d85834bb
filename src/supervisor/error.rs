//! Supervisor error types

use thiserror::Error;

/// Error type for stream lifecycle operations
#[derive(Debug, Clone, Error)]
pub enum SupervisorError {
    /// A stream is already registered for this camera
    #[error("Stream already active for camera {0}")]
    AlreadyActive(String),

    /// No stream registered for this camera
    #[error("Camera stream {0} not found")]
    NotFound(String),

    /// Rejected stream configuration
    #[error("Invalid stream configuration: {0}")]
    InvalidConfig(String),
}
