//! camring daemon
//!
//! Run with: camringd [BIND_ADDR] [--placeholder]
//!
//! Examples:
//!   camringd                      # binds to 0.0.0.0:8080
//!   camringd localhost            # binds to 127.0.0.1:8080
//!   camringd 127.0.0.1:9000       # binds to 127.0.0.1:9000
//!   camringd --placeholder        # text frames instead of the test pattern
//!
//! Start a stream:
//!   curl -X POST localhost:8080/streams \
//!     -d '{"camera_id":"cam1","source_descriptor":"rtsp://example/stream","fps":10}'
//!
//! Fetch the latest frame:
//!   curl 'localhost:8080/streams?camera_id=cam1&action=stream'

use std::net::SocketAddr;
use std::sync::Arc;

use camring::server::{HttpServer, ServerConfig};
use camring::source::{FrameSource, TestPatternSource, TextPlaceholderSource};
use camring::supervisor::StreamSupervisor;

/// Parse bind address from command line argument.
///
/// Accepts "localhost", "127.0.0.1", "127.0.0.1:9000" and similar; a bare
/// host gets the default port 8080.
fn parse_bind_addr(arg: &str) -> Result<SocketAddr, String> {
    const DEFAULT_PORT: u16 = 8080;

    let normalized = arg.replace("localhost", "127.0.0.1");

    if let Ok(addr) = normalized.parse::<SocketAddr>() {
        return Ok(addr);
    }

    if let Ok(ip) = normalized.parse::<std::net::IpAddr>() {
        return Ok(SocketAddr::new(ip, DEFAULT_PORT));
    }

    Err(format!(
        "Invalid bind address: '{}'. Expected format: IP:PORT or IP or 'localhost'",
        arg
    ))
}

fn print_usage() {
    eprintln!("Usage: camringd [BIND_ADDR] [--placeholder]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  BIND_ADDR      Address to bind to (default: 0.0.0.0:8080)");
    eprintln!("  --placeholder  Emit text placeholder frames instead of the test pattern");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  camringd                      # binds to 0.0.0.0:8080");
    eprintln!("  camringd localhost            # binds to 127.0.0.1:8080");
    eprintln!("  camringd 127.0.0.1:9000       # binds to 127.0.0.1:9000");
}

async fn shutdown_signal() {
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received SIGINT, shutting down");
        }
        _ = async {
            #[cfg(unix)]
            {
                use tokio::signal::unix::{signal, SignalKind};
                match signal(SignalKind::terminate()) {
                    Ok(mut sigterm) => { sigterm.recv().await; }
                    Err(_) => std::future::pending::<()>().await,
                }
            }
            #[cfg(not(unix))]
            {
                std::future::pending::<()>().await;
            }
        } => {
            tracing::info!("Received SIGTERM, shutting down");
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }

    let placeholder = args.iter().any(|a| a == "--placeholder");

    let bind_addr = match args.iter().skip(1).find(|a| !a.starts_with("--")) {
        Some(addr_str) => match parse_bind_addr(addr_str) {
            Ok(addr) => addr,
            Err(e) => {
                eprintln!("Error: {}", e);
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        },
        None => "0.0.0.0:8080".parse().unwrap(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("camring=info".parse()?),
        )
        .init();

    let source: Arc<dyn FrameSource> = if placeholder {
        Arc::new(TextPlaceholderSource::new())
    } else {
        Arc::new(TestPatternSource::new())
    };

    tracing::info!(addr = %bind_addr, source = source.kind(), "Starting camringd");

    let supervisor = Arc::new(StreamSupervisor::new(source));
    let server = HttpServer::new(ServerConfig::with_addr(bind_addr), supervisor);

    server.run_until(shutdown_signal()).await?;

    Ok(())
}
