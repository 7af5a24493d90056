//! The notification dispatcher: one best-effort attempt per configured channel.

use crate::core::{ChatNotifier, DispatchResult, EmailNotifier, Submission};
use crate::formatting::compose_text;
use crate::internal_metrics::Metrics;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument, warn};

/// Fans a submission out to the configured channels.
///
/// Channels are attempted sequentially, chat first, and a failure in one
/// never prevents the next from being attempted.
pub struct Dispatcher {
    chat: Option<Arc<dyn ChatNotifier>>,
    email: Option<Arc<dyn EmailNotifier>>,
    metrics: Metrics,
}

impl Dispatcher {
    pub fn new(
        chat: Option<Arc<dyn ChatNotifier>>,
        email: Option<Arc<dyn EmailNotifier>>,
        metrics: Metrics,
    ) -> Self {
        Self {
            chat,
            email,
            metrics,
        }
    }

    /// Labels of the channels this dispatcher will attempt, in order.
    pub fn configured_channels(&self) -> Vec<String> {
        self.chat
            .iter()
            .map(|c| c.name().to_string())
            .chain(self.email.iter().map(|e| e.name().to_string()))
            .collect()
    }

    /// Attempts delivery on every configured channel and aggregates the outcome.
    #[instrument(skip_all)]
    pub async fn dispatch(&self, submission: &Submission) -> DispatchResult {
        let start = Instant::now();
        self.metrics.submissions_total.increment(1);

        let text = compose_text(submission);
        let mut result = DispatchResult::default();

        match &self.chat {
            Some(chat) => {
                let outcome = chat.send(&text).await;
                self.metrics.record_delivery(chat.name(), outcome.is_ok());
                result.record(chat.name(), outcome);
            }
            None => info!("Telegram not configured; skipping Telegram notification."),
        }

        match &self.email {
            Some(email) => {
                let outcome = email.send(submission, &text).await;
                self.metrics.record_delivery(email.name(), outcome.is_ok());
                result.record(email.name(), outcome);
            }
            None => info!("Email provider not configured; skipping email notification."),
        }

        self.metrics
            .dispatch_duration_seconds
            .record(start.elapsed().as_secs_f64());

        if result.overall_success {
            info!(detail = ?result.detail(), "Contact submission delivered");
        } else {
            warn!(detail = ?result.detail(), errors = ?result.errors, "Contact submission was not delivered");
        }
        result
    }
}
