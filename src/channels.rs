//! Resolution of notification channels from configuration.
//!
//! Channels are resolved once at startup into a [`ChannelConfig`] and never
//! re-checked per request. A credential counts as present only when it is
//! set and non-blank.

use crate::config::Config;
use std::fmt;

/// Credentials for the chat channel.
#[derive(Clone, PartialEq, Eq)]
pub struct ChatCredentials {
    pub token: String,
    pub chat_id: String,
}

impl fmt::Debug for ChatCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatCredentials")
            .field("token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

/// The email strategy selected at startup.
#[derive(Clone, PartialEq, Eq)]
pub enum EmailProvider {
    /// Transactional email HTTP API (Resend).
    Api {
        api_key: String,
        from: String,
        to: Option<String>,
    },
    /// Authenticated SMTP relay.
    Smtp {
        user: String,
        password: String,
        host: String,
        port: u16,
        to: String,
    },
}

impl EmailProvider {
    /// The channel label reported in dispatch results.
    pub fn channel_name(&self) -> &'static str {
        match self {
            EmailProvider::Api { .. } => "email(resend)",
            EmailProvider::Smtp { .. } => "email(smtp)",
        }
    }
}

impl fmt::Debug for EmailProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmailProvider::Api { from, to, .. } => f
                .debug_struct("Api")
                .field("api_key", &"<redacted>")
                .field("from", from)
                .field("to", to)
                .finish(),
            EmailProvider::Smtp {
                user,
                host,
                port,
                to,
                ..
            } => f
                .debug_struct("Smtp")
                .field("user", user)
                .field("password", &"<redacted>")
                .field("host", host)
                .field("port", port)
                .field("to", to)
                .finish(),
        }
    }
}

/// The set of channels active for this process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelConfig {
    pub chat: Option<ChatCredentials>,
    pub email: Option<EmailProvider>,
}

impl ChannelConfig {
    /// Resolves the active channels from the loaded configuration.
    ///
    /// Email precedence: an API key selects the API provider exclusively;
    /// otherwise SMTP is selected when both user and password are present.
    pub fn resolve(config: &Config) -> Self {
        let telegram = &config.telegram;
        let chat = match (present(&telegram.bot_token), present(&telegram.chat_id)) {
            (Some(token), Some(chat_id)) => Some(ChatCredentials { token, chat_id }),
            _ => None,
        };

        let email_config = &config.email;
        let operator = present(&email_config.address);
        let smtp_user = present(&email_config.smtp_username).or_else(|| operator.clone());

        let email = if let Some(api_key) = present(&email_config.api_key) {
            Some(EmailProvider::Api {
                api_key,
                from: email_config.from_address.clone(),
                to: operator,
            })
        } else if let (Some(user), Some(password)) = (smtp_user, present(&email_config.smtp_password)) {
            Some(EmailProvider::Smtp {
                to: operator.unwrap_or_else(|| user.clone()),
                user,
                password,
                host: email_config.smtp_host.clone(),
                port: email_config.smtp_port,
            })
        } else {
            None
        };

        Self { chat, email }
    }

    /// Labels of the configured channels, in dispatch order.
    pub fn configured_channels(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.chat.is_some() {
            names.push("telegram");
        }
        if let Some(provider) = &self.email {
            names.push(provider.channel_name());
        }
        names
    }
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
