mod detect;
mod session;

use glint_common::config::Config;
use session::Session;
use std::path::PathBuf;
use tokio::net::TcpStream;
use tracing::{error, info};

#[derive(Debug, thiserror::Error)]
pub enum DetectorError {
    #[error("protocol I/O failed: {0}")]
    Protocol(#[from] std::io::Error),
    #[error("frame payload length {got} outside accepted range 1..={max}")]
    PayloadSize { got: u32, max: u32 },
    #[error("frame decode failed: {0}")]
    Frame(#[from] glint_common::frame::FrameError),
    #[error("scan worker failed: {0}")]
    Worker(String),
}

#[tokio::main]
async fn main() {
    let mut args = std::env::args().skip(1);
    let port = match args.next().map(|raw| raw.parse::<u16>()) {
        Some(Ok(port)) => port,
        _ => {
            eprintln!("usage: glint-detector <port> [config.toml]");
            std::process::exit(1);
        }
    };
    let config = match args.next().map(PathBuf::from) {
        Some(path) => match Config::load(&path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("failed to load config from {}: {e}", path.display());
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.parse().unwrap_or_default()),
        )
        .init();

    let addr = format!("{}:{}", config.connection.host, port);
    info!(
        addr = %addr,
        threshold = config.detection.threshold,
        capacity = config.detection.capacity,
        workers = config.detection.workers,
        "starting glint detector"
    );

    let stream = match TcpStream::connect(&addr).await {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, addr = %addr, "connection failed");
            std::process::exit(1);
        }
    };
    info!(addr = %addr, "connected, waiting for requests");

    let mut session = Session::new(stream, config.detection);
    match session.run().await {
        Ok(()) => info!("session ended cleanly"),
        Err(e) => {
            error!(error = %e, "session terminated");
            std::process::exit(1);
        }
    }
}
