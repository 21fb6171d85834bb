//! HTTP server runtime

pub mod config;
pub mod http;

pub use config::ServerConfig;
pub use http::HttpServer;
