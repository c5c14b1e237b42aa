//! Contact inquiry email template

use askama::Template;
use chrono::{DateTime, Utc};

use crate::domain::{
    communication::rendering::{format_timestamp, lines},
    contact::ContactSubmission,
};

const RULE_WIDTH: usize = 50;

/// Notification sent to the site administrator for a contact form submission
#[derive(Debug, Template)]
#[template(path = "emails/contact/inquiry.html")]
pub struct ContactInquiryEmail {
    /// Submitter's name
    pub name: String,

    /// Submitter's email address
    pub email: String,

    /// Submitter's company, if given
    pub company: Option<String>,

    /// Subject chosen by the submitter
    pub subject: String,

    /// Message body
    pub message: String,

    /// Message body split into lines for the HTML version
    pub message_lines: Vec<String>,

    /// When the form was submitted
    pub sent_at: String,
}

impl ContactInquiryEmail {
    /// Creates a new `ContactInquiryEmail`
    pub fn new(submission: &ContactSubmission, submitted_at: &DateTime<Utc>) -> Self {
        Self {
            name: submission.name().to_string(),
            email: submission.email().to_string(),
            company: submission.company().map(str::to_string),
            subject: submission.subject().to_string(),
            message: submission.message().to_string(),
            message_lines: lines(submission.message()),
            sent_at: format_timestamp(submitted_at),
        }
    }

    /// Renders the plain text version of the email
    pub fn render_plain(&self) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let company = self
            .company
            .as_ref()
            .map(|company| format!("Company: {company}\n"))
            .unwrap_or_default();

        format!(
            "NEW CONTACT FORM SUBMISSION\n\
             {rule}\n\
             \n\
             From: {name}\n\
             Email: {email}\n\
             {company}\
             \n\
             Subject: {subject}\n\
             \n\
             Message:\n\
             {message}\n\
             \n\
             {rule}\n\
             Sent: {sent_at}",
            name = self.name,
            email = self.email,
            subject = self.subject,
            message = self.message,
            sent_at = self.sent_at,
        )
    }
}
