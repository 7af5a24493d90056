//! Email delivery through an authenticated SMTP relay using lettre.

use crate::core::{EmailNotifier, Submission};
use crate::formatting::{email_subject, render_html};
use crate::notification::NotifyError;
use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, Message, SmtpTransport, Transport};
use tokio::task;
use tracing::{error, info, instrument, warn};

/// Sends contact submissions to the operator's own mailbox over SMTP.
///
/// The operator address is parsed per message, so a bad address fails the
/// send instead of startup.
#[derive(Clone)]
pub struct SmtpMailer<T = SmtpTransport> {
    transport: T,
    operator: String,
}

impl SmtpMailer {
    /// Creates a mailer for `host:port` using STARTTLS and the given credentials.
    ///
    /// No connection is opened until the first message is sent.
    pub fn new(
        host: &str,
        port: u16,
        user: &str,
        password: &str,
        operator_address: &str,
    ) -> Result<Self, NotifyError> {
        let credentials = Credentials::new(user.to_string(), password.to_string());
        // Port 587 relays expect a plaintext connection upgraded with STARTTLS.
        let transport = SmtpTransport::starttls_relay(host)?
            .port(port)
            .credentials(credentials)
            .build();

        info!(smtp_host = %host, smtp_port = port, "SMTP email provider initialized");
        Ok(Self::with_transport(transport, operator_address))
    }
}

impl<T> SmtpMailer<T> {
    /// Creates a mailer over an already configured transport.
    pub fn with_transport(transport: T, operator_address: impl Into<String>) -> Self {
        Self {
            transport,
            operator: operator_address.into(),
        }
    }

    /// Builds the message sent for a submission.
    pub fn build_message(
        &self,
        submission: &Submission,
        fallback_text: &str,
    ) -> Result<Message, NotifyError> {
        let operator: Address = self.operator.parse()?;
        let from = Mailbox::new(
            Some(format!("{} via Portfolio", submission.name)),
            operator.clone(),
        );
        let mut builder = Message::builder()
            .from(from)
            .to(Mailbox::new(None, operator))
            .subject(email_subject(submission));

        match submission.email.parse::<Mailbox>() {
            Ok(reply_to) => builder = builder.reply_to(reply_to),
            Err(e) => warn!(error = %e, "Submitter address is not a valid mailbox; omitting Reply-To"),
        }

        let message = builder.multipart(MultiPart::alternative_plain_html(
            fallback_text.to_string(),
            render_html(submission)?,
        ))?;
        Ok(message)
    }
}

#[async_trait]
impl<T> EmailNotifier for SmtpMailer<T>
where
    T: Transport + Clone + Send + Sync + 'static,
    T::Ok: Send,
    T::Error: std::error::Error + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        "email(smtp)"
    }

    #[instrument(skip_all, fields(reply_to = %submission.email))]
    async fn send(&self, submission: &Submission, fallback_text: &str) -> Result<(), NotifyError> {
        let message = self.build_message(submission, fallback_text).map_err(|e| {
            error!(error = %e, "Could not build the email message");
            e
        })?;

        // lettre's SmtpTransport is blocking.
        let transport = self.transport.clone();
        let result = task::spawn_blocking(move || transport.send(&message)).await;

        match result {
            Ok(Ok(_)) => {
                info!("Successfully sent email via SMTP.");
                Ok(())
            }
            Ok(Err(e)) => {
                error!(error = %e, "SMTP relay refused the message");
                Err(NotifyError::Smtp(Box::new(e)))
            }
            Err(e) => {
                error!(error = %e, "SMTP delivery task failed");
                Err(e.into())
            }
        }
    }
}
