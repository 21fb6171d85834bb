//! Server configuration

use std::net::SocketAddr;

/// HTTP server configuration options
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to
    pub bind_addr: SocketAddr,

    /// Attach a permissive CORS layer (browser clients hit the API directly)
    pub permissive_cors: bool,

    /// Drain the supervisor after the listener shuts down
    pub drain_on_shutdown: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            permissive_cors: true,
            drain_on_shutdown: true,
        }
    }
}

impl ServerConfig {
    /// Create a new config with a custom bind address
    pub fn with_addr(addr: SocketAddr) -> Self {
        Self {
            bind_addr: addr,
            ..Default::default()
        }
    }

    /// Set the bind address
    pub fn bind(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Disable the permissive CORS layer
    pub fn disable_cors(mut self) -> Self {
        self.permissive_cors = false;
        self
    }

    /// Leave producers running when the listener shuts down
    pub fn disable_drain(mut self) -> Self {
        self.drain_on_shutdown = false;
        self
    }
}
