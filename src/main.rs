//! contact-relay - Portfolio contact form relay
//!
//! Serves `POST /api/contact` and forwards each submission to the configured
//! Telegram chat and email provider.

use anyhow::Result;
use clap::Parser;
use contact_relay::{app::App, channels::ChannelConfig, cli::Cli, config::Config};
use tokio::sync::watch;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration by layering sources: defaults, file, environment, and CLI args.
    let config = Config::load(&cli).unwrap_or_else(|err| {
        // Minimal logger for this specific error
        tracing_subscriber::fmt().init();
        error!("Failed to load configuration: {:#}", err);
        std::process::exit(1);
    });

    // RUST_LOG takes precedence over the configured level.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("contact-relay starting up...");

    let channels = ChannelConfig::resolve(&config);
    info!("-------------------- Configuration --------------------");
    info!("Log Level: {}", config.log_level);
    info!("Listen Address: {}", config.server.listen_address);
    info!("Outbound HTTP Timeout: {}s", config.http.timeout_seconds);
    info!(
        "Telegram: {}",
        if channels.chat.is_some() { "Enabled" } else { "Disabled" }
    );
    info!(
        "Email Provider: {}",
        channels
            .email
            .as_ref()
            .map(|provider| provider.channel_name())
            .unwrap_or("Disabled")
    );
    info!(
        "Metrics: {}",
        if config.metrics.enabled {
            config.metrics.listen_address.to_string()
        } else {
            "Disabled".to_string()
        }
    );
    info!("-------------------------------------------------------");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let app = App::builder(config).build(shutdown_rx).await?;
    info!(address = %app.local_addr(), "Listening for contact submissions");

    let app_handle = tokio::spawn(app.run());

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received. Shutting down gracefully...");
    if shutdown_tx.send(true).is_err() {
        warn!("Server stopped before the shutdown signal could be delivered.");
    }

    match app_handle.await {
        Ok(result) => result?,
        Err(e) => error!("Server task panicked: {:?}", e),
    }

    info!("Exiting.");
    Ok(())
}
