//! Core domain types and service traits for contact-relay
//!
//! This module defines the submission and dispatch-outcome types, and the
//! trait contracts the dispatcher uses to talk to notification channels.

use crate::notification::NotifyError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A contact-form submission as posted by the portfolio site.
///
/// Missing fields deserialize to empty strings and are passed through to the
/// notifiers unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Submission {
    /// The sender's name
    pub name: String,
    /// The sender's email address, used as the reply-to address
    pub email: String,
    /// The free-form message body
    pub message: String,
}

impl Submission {
    pub fn new(name: &str, email: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }
}

/// The outcome of one attempted channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelResult {
    /// Channel label, e.g. `telegram` or `email(resend)`
    pub channel: String,
    pub succeeded: bool,
}

impl ChannelResult {
    /// Renders the result as a `"<channel>:<true|false>"` detail entry.
    pub fn detail(&self) -> String {
        format!("{}:{}", self.channel, self.succeeded)
    }
}

/// Aggregate outcome of dispatching one submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DispatchResult {
    /// Attempted channels, in attempt order. Unconfigured channels are absent.
    pub channel_results: Vec<ChannelResult>,
    /// True iff at least one attempted channel succeeded.
    pub overall_success: bool,
    /// Error messages collected from failed channels.
    pub errors: Vec<String>,
}

impl DispatchResult {
    /// Records the outcome of a channel attempt and updates the overall flag.
    pub fn record(&mut self, channel: &str, outcome: Result<(), NotifyError>) {
        let succeeded = match outcome {
            Ok(()) => true,
            Err(e) => {
                self.errors.push(format!("{}: {}", channel, e));
                false
            }
        };
        self.channel_results.push(ChannelResult {
            channel: channel.to_string(),
            succeeded,
        });
        self.overall_success = self.channel_results.iter().any(|r| r.succeeded);
    }

    /// The `detail` list reported to the caller.
    pub fn detail(&self) -> Vec<String> {
        self.channel_results.iter().map(ChannelResult::detail).collect()
    }
}

// =============================================================================
// Service Traits
// =============================================================================

/// Sends a preformatted text message to a chat-bot API.
#[async_trait]
pub trait ChatNotifier: Send + Sync {
    /// The channel label used in dispatch results (e.g., "telegram").
    fn name(&self) -> &str;

    /// Sends `text` to the configured chat.
    ///
    /// # Returns
    /// * `Ok(())` if the provider acknowledged the message
    /// * `Err` on transport failure or a negative acknowledgement
    async fn send(&self, text: &str) -> Result<(), NotifyError>;
}

/// Sends a contact submission by email.
#[async_trait]
pub trait EmailNotifier: Send + Sync {
    /// The channel label used in dispatch results (e.g., "email(smtp)").
    fn name(&self) -> &str;

    /// Sends the submission as an HTML email, with `fallback_text` as the
    /// plain-text alternative.
    async fn send(&self, submission: &Submission, fallback_text: &str) -> Result<(), NotifyError>;
}
