//! Message bodies built from a submission: the shared plain text, the email
//! subject and the HTML email.

use crate::core::Submission;
use askama::Template;

/// Composes the plain-text notification body shared by all channels.
pub fn compose_text(submission: &Submission) -> String {
    format!(
        "New message from {}\n\nEmail: {}\n\nMessage:\n\n{}\n\n",
        submission.name, submission.email, submission.message
    )
}

/// Subject line for email notifications.
pub fn email_subject(submission: &Submission) -> String {
    format!("New Message From {}", submission.name)
}

/// HTML email body. Askama escapes every field.
#[derive(Template)]
#[template(path = "emails/contact.html")]
struct ContactHtmlTemplate<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
}

/// Renders the HTML email body for a submission.
pub fn render_html(submission: &Submission) -> Result<String, askama::Error> {
    ContactHtmlTemplate {
        name: &submission.name,
        email: &submission.email,
        message: &submission.message,
    }
    .render()
}
