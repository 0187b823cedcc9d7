//! Music app router shell.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │               ROUTER SHELL                   │
//!                    │                                              │
//!   GET /chords      │  ┌─────────┐    ┌────────────┐    ┌───────┐  │
//!   ─────────────────┼─▶│  http   │───▶│  routing   │───▶│ table │  │
//!                    │  │ server  │    │  Router    │    │ match │  │
//!                    │  └─────────┘    └─────┬──────┘    └───────┘  │
//!                    │                       │                      │
//!   200 / 308 / 404  │  ┌─────────┐    ┌─────▼──────┐               │
//!   ◀────────────────┼──│response │◀───│active-route│               │
//!                    │  │ mapping │    │   slot     │               │
//!                    │  └─────────┘    └────────────┘               │
//!                    │                                              │
//!                    │  config · observability · lifecycle          │
//!                    └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use music_app_router::config::loader::{default_config, load_config};
use music_app_router::observability::init_logging;
use music_app_router::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "music-app-router")]
#[command(about = "Serves the music app in history mode, resolving every location through its route table", long_about = None)]
struct Cli {
    /// TOML configuration; the built-in route table is used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => default_config()?,
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    init_logging(&config.observability);

    tracing::info!("music-app-router v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config = ?cli.config,
        bind_address = %config.listener.bind_address,
        base_path = %config.router.base_path,
        routes = config.routes.len(),
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
