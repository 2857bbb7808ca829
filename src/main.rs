//! Dynamic routing gateway.
//!
//! Runs the dynamic routing stage behind an HTTP listener. Each request is
//! routed against the configured rules and answered with the decision:
//! the resolved endpoint on success, 400 when no rule matches, 500 when a
//! rule or the path is invalid.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use dynamic_router::config::watcher::ConfigWatcher;
use dynamic_router::config::{load_config, GatewayConfig};
use dynamic_router::observability::logging;
use dynamic_router::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "dynamic-router")]
#[command(about = "API gateway dynamic routing stage", long_about = None)]
struct Args {
    /// Gateway configuration file (.toml or .json).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reload routing rules when the configuration file changes.
    #[arg(short, long, requires = "config")]
    watch: bool,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.observability)?;
    tracing::info!("dynamic-router v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        context_path = %config.routing.context_path,
        rules = config.routing.rules.as_ref().map_or(0, Vec::len),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    // The watcher handle must outlive the server; dropping it stops the watch.
    let (_watcher, updates) = match (&args.config, args.watch) {
        (Some(path), true) => {
            let (watcher, rx) = ConfigWatcher::new(path);
            (Some(watcher.run()?), Some(rx))
        }
        _ => (None, None),
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config);
    server.run(listener, updates, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
