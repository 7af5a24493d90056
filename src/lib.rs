/// contact-relay - Contact form relay for a personal portfolio site
///
/// This library provides the HTTP endpoint and notification plumbing that
/// forwards contact-form submissions to Telegram and email.
pub mod notification;

pub mod app;
pub mod channels;
pub mod cli;
pub mod config;
pub mod core;
pub mod dispatch;
pub mod formatting;
pub mod internal_metrics;
pub mod profile;
pub mod server;

// Re-export core types for convenience
pub use crate::core::*;
