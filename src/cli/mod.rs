use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use crate::config::Config;
use crate::crypto::AesQueryEncryptor;
use crate::server::{router, AppState};
use crate::upstream::InnertubeClient;

#[derive(Parser)]
#[command(name = "tube-companion")]
#[command(about = "Invidious-compatible player metadata API")]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Bind host (overrides the config file)
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port (overrides the config file)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub async fn run(&self) -> Result<()> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }

        if self.verbose {
            info!("Configuration: {:?}", config);
        }

        let config = Arc::new(config);
        let client = Arc::new(InnertubeClient::new(&config.youtube));
        let encryptor = Arc::new(AesQueryEncryptor::new(&config.server.query_secret));

        let state = AppState::new(config.clone(), client, encryptor);
        if config.youtube.po_token_enabled {
            // Requests 503 until the external session job marks the minter ready.
            warn!("po_token_enabled is set; waiting for the token minter");
        } else {
            state.mark_minter_ready();
        }

        let app = router(state);
        let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .context("parsing bind address")?;
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("binding to {}", addr))?;
        info!("Listening on http://{}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("running API server")?;

        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {}", err);
    }
}
