//! Contact submission

use chrono::{DateTime, Utc};

use crate::domain::communication::{
    email_addresses::EmailAddress,
    mailer::Message,
    rendering::{present, render_html, RenderError},
};

use super::{emails::contact_inquiry::ContactInquiryEmail, ContactSubmissionError};

const MIN_NAME_LENGTH: usize = 2;
const MIN_SUBJECT_LENGTH: usize = 3;
const MIN_MESSAGE_LENGTH: usize = 10;

/// A validated contact form submission
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactSubmission {
    name: String,
    email: EmailAddress,
    company: Option<String>,
    subject: String,
    message: String,
}

impl ContactSubmission {
    /// Validates the raw form fields.
    ///
    /// Lengths are counted in characters after trimming surrounding
    /// whitespace. The message text itself is kept exactly as submitted.
    pub fn new(
        name: Option<&str>,
        email: Option<&str>,
        company: Option<&str>,
        subject: Option<&str>,
        message: Option<&str>,
    ) -> Result<Self, ContactSubmissionError> {
        let (Some(name), Some(email), Some(subject), Some(message)) = (
            provided(name),
            provided(email),
            provided(subject),
            provided(message),
        ) else {
            return Err(ContactSubmissionError::MissingFields);
        };

        let email = EmailAddress::new(email).map_err(|_| ContactSubmissionError::InvalidEmail)?;

        if char_len(name) < MIN_NAME_LENGTH {
            return Err(ContactSubmissionError::NameTooShort);
        }

        if char_len(subject) < MIN_SUBJECT_LENGTH {
            return Err(ContactSubmissionError::SubjectTooShort);
        }

        if char_len(message) < MIN_MESSAGE_LENGTH {
            return Err(ContactSubmissionError::MessageTooShort);
        }

        Ok(Self {
            name: name.trim().to_string(),
            email,
            company: present(company),
            subject: subject.trim().to_string(),
            message: message.to_string(),
        })
    }

    /// The submitter's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The submitter's email address
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// The submitter's company, if given
    pub fn company(&self) -> Option<&str> {
        self.company.as_deref()
    }

    /// The subject line the submitter chose
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// The message body
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Builds the notification email for `recipient`.
    ///
    /// The submitter's lowercased address is used as sender and reply-to, so
    /// the recipient can answer directly.
    pub fn to_message(
        &self,
        recipient: &str,
        submitted_at: &DateTime<Utc>,
    ) -> Result<Message, RenderError> {
        let template = ContactInquiryEmail::new(self, submitted_at);
        let html = render_html(&template)?;
        let plain = template.render_plain();
        let sender = self.email.to_lowercase();

        Ok(Message::new(
            recipient,
            sender.as_str(),
            &format!("New Contact Form: {}", self.subject),
            &html,
        )
        .with_plain_body(&plain)
        .with_reply_to(sender.as_str()))
    }
}

fn provided(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

fn char_len(value: &str) -> usize {
    value.trim().chars().count()
}
