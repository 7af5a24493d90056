#![allow(dead_code)]
//! Recording notifiers for driving the dispatcher from integration tests.

use async_trait::async_trait;
use contact_relay::core::{ChatNotifier, EmailNotifier, Submission};
use contact_relay::notification::NotifyError;
use std::sync::{Arc, Mutex};

/// A chat notifier that records every text and succeeds or fails on demand.
#[derive(Clone, Debug)]
pub struct MockChat {
    pub succeed: bool,
    pub sent: Arc<Mutex<Vec<String>>>,
}

impl MockChat {
    pub fn new(succeed: bool) -> Self {
        Self {
            succeed,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatNotifier for MockChat {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(text.to_string());
        if self.succeed {
            Ok(())
        } else {
            Err(NotifyError::NotOk("Forbidden: bot was blocked by the user".to_string()))
        }
    }
}

/// An email notifier that records every submission and succeeds or fails on demand.
#[derive(Clone, Debug)]
pub struct MockEmail {
    pub succeed: bool,
    pub sent: Arc<Mutex<Vec<Submission>>>,
}

impl MockEmail {
    pub fn new(succeed: bool) -> Self {
        Self {
            succeed,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn sent(&self) -> Vec<Submission> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailNotifier for MockEmail {
    fn name(&self) -> &str {
        "email(smtp)"
    }

    async fn send(&self, submission: &Submission, _fallback_text: &str) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(submission.clone());
        if self.succeed {
            Ok(())
        } else {
            Err(NotifyError::MissingRecipient)
        }
    }
}
