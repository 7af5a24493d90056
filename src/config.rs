//! Configuration management for contact-relay
//!
//! This module defines the main `Config` struct and its sub-structs. It uses
//! the `figment` crate to layer defaults, an optional `contact-relay.toml`
//! file, `RELAY_`-prefixed environment variables, the portfolio's plain
//! credential variables (`TELEGRAM_BOT_TOKEN` and friends) and finally the
//! command-line arguments.

use crate::cli::Cli;
use crate::notification::resend::DEFAULT_RESEND_API_BASE;
use crate::notification::telegram::DEFAULT_TELEGRAM_API_BASE;
use crate::profile::PersonalData;
use anyhow::{bail, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Deserializer, Serialize};
use std::net::SocketAddr;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "contact-relay.toml";

/// Plain environment variable names and the config keys they populate.
const PORTFOLIO_ENV_KEYS: &[(&str, &str)] = &[
    ("TELEGRAM_BOT_TOKEN", "telegram.bot_token"),
    ("TELEGRAM_CHAT_ID", "telegram.chat_id"),
    ("EMAIL_ADDRESS", "email.address"),
    ("GMAIL_PASSKEY", "email.smtp_password"),
    ("RESEND_API_KEY", "email.api_key"),
];

/// The main configuration struct for the application.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// The logging level for the application.
    pub log_level: String,
    /// Configuration for the HTTP listener.
    pub server: ServerConfig,
    /// Settings for outbound HTTP calls.
    pub http: HttpConfig,
    /// Telegram chat channel.
    pub telegram: TelegramConfig,
    /// Email channel (Resend API or SMTP relay).
    pub email: EmailConfig,
    /// Prometheus metrics exporter.
    pub metrics: MetricsConfig,
    /// Personal data served to the site's UI.
    pub profile: PersonalData,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    /// The address the contact endpoint listens on.
    pub listen_address: SocketAddr,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HttpConfig {
    /// Timeout applied by the HTTP client to each outbound request.
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TelegramConfig {
    #[serde(default, deserialize_with = "lenient_string")]
    pub bot_token: Option<String>,
    /// Numeric chat ids are accepted from the environment as well as strings.
    #[serde(default, deserialize_with = "lenient_string")]
    pub chat_id: Option<String>,
    pub api_base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EmailConfig {
    /// The operator's own address; recipient of every notification.
    #[serde(default)]
    pub address: Option<String>,
    /// Sender used by the API provider.
    pub from_address: String,
    /// Resend API key. When present, the API provider is used exclusively.
    #[serde(default, deserialize_with = "lenient_string")]
    pub api_key: Option<String>,
    pub api_base_url: String,
    /// SMTP login. Falls back to `address` when unset.
    #[serde(default)]
    pub smtp_username: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub smtp_password: Option<String>,
    pub smtp_host: String,
    pub smtp_port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MetricsConfig {
    /// Whether the Prometheus exporter is started.
    pub enabled: bool,
    pub listen_address: SocketAddr,
}

impl Config {
    /// Loads the application configuration for the given command line.
    pub fn load(cli: &Cli) -> Result<Self> {
        let config: Config = Self::figment(cli)?.extract()?;
        Ok(config)
    }

    /// Builds the layered configuration sources, lowest precedence first.
    pub fn figment(cli: &Cli) -> Result<Figment> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        figment = match &cli.config {
            Some(path) => {
                if !path.exists() {
                    bail!("Config file not found at specified path: {}", path.display());
                }
                figment.merge(Toml::file(path))
            }
            None => figment.merge(Toml::file(DEFAULT_CONFIG_FILE)),
        };

        Ok(figment
            // e.g., RELAY_SERVER__LISTEN_ADDRESS=0.0.0.0:8080
            .merge(Env::prefixed("RELAY_").split("__"))
            .merge(portfolio_env())
            .merge(cli.clone()))
    }
}

/// Maps the portfolio's plain credential variables onto config keys.
fn portfolio_env() -> Env {
    Env::raw().filter_map(|key| {
        PORTFOLIO_ENV_KEYS
            .iter()
            .find(|(name, _)| key.as_str().eq_ignore_ascii_case(name))
            .map(|(_, path)| (*path).into())
    })
}

/// Accepts strings, numbers and booleans for secret-like values.
///
/// Environment values are parsed by figment, so `TELEGRAM_CHAT_ID=-100123`
/// arrives as an integer.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient {
        Text(String),
        Signed(i64),
        Unsigned(u64),
        Float(f64),
        Flag(bool),
    }

    Ok(Option::<Lenient>::deserialize(deserializer)?.map(|value| match value {
        Lenient::Text(s) => s,
        Lenient::Signed(n) => n.to_string(),
        Lenient::Unsigned(n) => n.to_string(),
        Lenient::Float(n) => n.to_string(),
        Lenient::Flag(b) => b.to_string(),
    }))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            server: ServerConfig {
                listen_address: SocketAddr::from(([127, 0, 0, 1], 3000)),
            },
            http: HttpConfig { timeout_seconds: 10 },
            telegram: TelegramConfig {
                bot_token: None,
                chat_id: None,
                api_base_url: DEFAULT_TELEGRAM_API_BASE.to_string(),
            },
            email: EmailConfig {
                address: None,
                from_address: "Portfolio <onboarding@resend.dev>".to_string(),
                api_key: None,
                api_base_url: DEFAULT_RESEND_API_BASE.to_string(),
                smtp_username: None,
                smtp_password: None,
                smtp_host: "smtp.gmail.com".to_string(),
                smtp_port: 587,
            },
            metrics: MetricsConfig {
                enabled: false,
                listen_address: SocketAddr::from(([127, 0, 0, 1], 9090)),
            },
            profile: PersonalData::default(),
        }
    }
}
