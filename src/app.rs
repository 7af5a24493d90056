//! The main application logic, decoupled from the entry point.

use crate::{
    channels::{ChannelConfig, EmailProvider},
    config::Config,
    core::{ChatNotifier, EmailNotifier},
    dispatch::Dispatcher,
    internal_metrics::{server::MetricsServer, MetricsBuilder},
    notification::{build_email_notifier, TelegramClient},
    server::{router, AppState},
};
use anyhow::{Context, Result};
use axum::Router;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{debug, error, info, instrument, warn};

/// A fully wired application, ready to serve.
pub struct App {
    listener: TcpListener,
    local_addr: SocketAddr,
    router: Router,
    metrics_server: Option<MetricsServer>,
    metrics_addr: Option<SocketAddr>,
    shutdown_rx: watch::Receiver<bool>,
}

impl App {
    /// Creates a new `AppBuilder` to construct an `App`.
    pub fn builder(config: Config) -> AppBuilder {
        AppBuilder::new(config)
    }

    /// The address the contact endpoint is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn metrics_addr(&self) -> Option<SocketAddr> {
        self.metrics_addr
    }

    /// Serves requests until the shutdown signal is received, then drains
    /// in-flight requests and stops the metrics server.
    pub async fn run(self) -> Result<()> {
        let metrics_task = self.metrics_server.map(|server| tokio::spawn(server.run()));

        let mut shutdown_rx = self.shutdown_rx;
        let shutdown = async move {
            let _ = shutdown_rx.wait_for(|stop| *stop).await;
            info!("Shutdown signal received. Waiting for in-flight requests to complete...");
        };

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
            .context("contact server failed")?;

        if let Some(handle) = metrics_task {
            if let Err(e) = handle.await {
                error!("Metrics server task panicked: {:?}", e);
            }
        }

        info!("Server shut down.");
        Ok(())
    }
}

/// Builder for the main application.
///
/// Separates constructing the components from running them, and lets tests
/// replace the channel adapters.
pub struct AppBuilder {
    config: Config,
    chat_override: Option<Arc<dyn ChatNotifier>>,
    email_override: Option<Arc<dyn EmailNotifier>>,
}

impl AppBuilder {
    /// Creates a new `AppBuilder` with the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            chat_override: None,
            email_override: None,
        }
    }

    /// Overrides the chat notifier, regardless of configured credentials.
    pub fn chat_notifier_override(mut self, notifier: Arc<dyn ChatNotifier>) -> Self {
        self.chat_override = Some(notifier);
        self
    }

    /// Overrides the email notifier, regardless of configured credentials.
    pub fn email_notifier_override(mut self, notifier: Arc<dyn EmailNotifier>) -> Self {
        self.email_override = Some(notifier);
        self
    }

    /// Resolves channels, builds the notifiers and binds the listeners.
    #[instrument(skip_all)]
    pub async fn build(self, shutdown_rx: watch::Receiver<bool>) -> Result<App> {
        let config = self.config;

        // =========================================================================
        // 1. Initialize Metrics
        // =========================================================================
        let (metrics, metrics_server_info) = MetricsBuilder::new(config.metrics.clone())
            .build(shutdown_rx.clone())
            .await;
        let (metrics_server, metrics_addr) = match metrics_server_info {
            Some((server, addr)) => {
                info!(address = %addr, "Metrics server enabled");
                (Some(server), Some(addr))
            }
            None => (None, None),
        };

        // =========================================================================
        // 2. Resolve Channels
        // =========================================================================
        let channels = ChannelConfig::resolve(&config);
        debug!(?channels, "Resolved notification channels");
        warn_about_channels(&channels);

        // =========================================================================
        // 3. Instantiate Notifiers
        // =========================================================================
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http.timeout_seconds))
            .build()
            .context("failed to build HTTP client")?;

        let chat = match self.chat_override {
            Some(notifier) => Some(notifier),
            None => channels.chat.clone().map(|credentials| {
                Arc::new(TelegramClient::new(
                    http.clone(),
                    &config.telegram.api_base_url,
                    credentials,
                )) as Arc<dyn ChatNotifier>
            }),
        };

        let email = match self.email_override {
            Some(notifier) => Some(notifier),
            None => match &channels.email {
                Some(provider) => {
                    match build_email_notifier(provider, &http, &config.email.api_base_url) {
                        Ok(notifier) => Some(notifier),
                        Err(e) => {
                            error!(error = %e, "Failed to initialize the email provider. Emails will be skipped.");
                            None
                        }
                    }
                }
                None => None,
            },
        };

        let dispatcher = Arc::new(Dispatcher::new(chat, email, metrics));
        let state = AppState {
            dispatcher,
            profile: Arc::new(config.profile.clone()),
        };

        // =========================================================================
        // 4. Bind the Contact Listener
        // =========================================================================
        let listener = TcpListener::bind(config.server.listen_address)
            .await
            .with_context(|| format!("failed to bind {}", config.server.listen_address))?;
        let local_addr = listener.local_addr()?;

        Ok(App {
            listener,
            local_addr,
            router: router(state),
            metrics_server,
            metrics_addr,
            shutdown_rx,
        })
    }
}

fn warn_about_channels(channels: &ChannelConfig) {
    if channels.chat.is_none() {
        info!("Telegram credentials not configured: TELEGRAM_BOT_TOKEN or TELEGRAM_CHAT_ID missing. Telegram notifications will be skipped.");
    }
    match &channels.email {
        None => warn!("Email credentials not configured: RESEND_API_KEY, or EMAIL_ADDRESS and GMAIL_PASSKEY, missing. Emails will be skipped."),
        Some(EmailProvider::Api { to: None, .. }) => {
            warn!("Resend API key configured without EMAIL_ADDRESS; email notifications will fail.")
        }
        Some(_) => {}
    }
    if channels.configured_channels().is_empty() {
        warn!("No notification channel is configured; every contact submission will be reported as failed.");
    }
}
