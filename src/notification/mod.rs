//! Notification channel adapters.
//!
//! Each adapter implements one of the service traits in [`crate::core`] and
//! reports failures as a [`NotifyError`] instead of logging and swallowing
//! them, so the dispatcher decides how a failure is recorded.
pub mod resend;
pub mod smtp;
pub mod telegram;

use crate::channels::EmailProvider;
use crate::core::EmailNotifier;
use std::sync::Arc;
use thiserror::Error;

pub use resend::ResendClient;
pub use smtp::SmtpMailer;
pub use telegram::TelegramClient;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider rejected the request: status {status}, body: {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Telegram API returned ok=false: {0}")]
    NotOk(String),

    #[error("SMTP delivery failed: {0}")]
    Smtp(Box<dyn std::error::Error + Send + Sync>),

    #[error("failed to render email template: {0}")]
    Template(#[from] askama::Error),

    #[error("failed to build email message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("no operator address configured for email delivery")]
    MissingRecipient,

    #[error("email delivery task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<lettre::transport::smtp::Error> for NotifyError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        NotifyError::Smtp(Box::new(err))
    }
}

/// Builds the email notifier for the resolved provider.
///
/// `http` is shared with the other HTTP adapters; `resend_api_base` is only
/// used by the API provider.
pub fn build_email_notifier(
    provider: &EmailProvider,
    http: &reqwest::Client,
    resend_api_base: &str,
) -> Result<Arc<dyn EmailNotifier>, NotifyError> {
    let notifier: Arc<dyn EmailNotifier> = match provider {
        EmailProvider::Api { api_key, from, to } => Arc::new(ResendClient::new(
            http.clone(),
            resend_api_base,
            api_key.clone(),
            from.clone(),
            to.clone(),
        )),
        EmailProvider::Smtp {
            user,
            password,
            host,
            port,
            to,
        } => Arc::new(SmtpMailer::new(host, *port, user, password, to)?),
    };
    Ok(notifier)
}
