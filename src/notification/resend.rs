//! A client for the Resend transactional email API.

use crate::core::{EmailNotifier, Submission};
use crate::formatting::{email_subject, render_html};
use crate::notification::NotifyError;
use async_trait::async_trait;
use serde::Serialize;
use tracing::{error, info, instrument};

pub const DEFAULT_RESEND_API_BASE: &str = "https://api.resend.com";

/// Request body for `POST /emails`.
#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    reply_to: &'a str,
    subject: String,
    html: String,
    text: &'a str,
}

/// Sends contact submissions to the operator through Resend.
pub struct ResendClient {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
    from: String,
    to: Option<String>,
}

impl ResendClient {
    pub fn new(
        http: reqwest::Client,
        api_base: &str,
        api_key: String,
        from: String,
        to: Option<String>,
    ) -> Self {
        Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key,
            from,
            to,
        }
    }
}

#[async_trait]
impl EmailNotifier for ResendClient {
    fn name(&self) -> &str {
        "email(resend)"
    }

    #[instrument(skip_all, fields(reply_to = %submission.email))]
    async fn send(&self, submission: &Submission, fallback_text: &str) -> Result<(), NotifyError> {
        let to = self.to.as_deref().ok_or(NotifyError::MissingRecipient)?;
        let request = SendEmailRequest {
            from: &self.from,
            to: [to],
            reply_to: &submission.email,
            subject: email_subject(submission),
            html: render_html(submission)?,
            text: fallback_text,
        };

        let response = self
            .http
            .post(format!("{}/emails", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "HTTP request to Resend failed");
                e
            })?;

        let status = response.status();
        if status.is_success() {
            info!("Successfully sent email via Resend.");
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Failed to send email via Resend");
            Err(NotifyError::Rejected { status, body })
        }
    }
}
