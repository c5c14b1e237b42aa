//! Email message

use base64::{engine::general_purpose::STANDARD, Engine as _};
use uuid::Uuid;

/// A binary file attached to a message, carried as base64 text
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attachment {
    /// The file name shown to the recipient
    pub filename: String,

    /// Base64-encoded file content
    pub content: String,

    /// MIME type of the decoded content
    pub content_type: String,
}

impl Attachment {
    /// Create a new attachment from base64 content
    pub fn new(filename: &str, content: &str, content_type: &str) -> Self {
        Self {
            filename: filename.to_string(),
            content: content.to_string(),
            content_type: content_type.to_string(),
        }
    }

    /// Decodes the base64 content into raw bytes
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        let compact: String = self
            .content
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();

        STANDARD.decode(compact)
    }
}

/// An outbound email envelope.
///
/// Required parts are given to [`Message::new`]; optional parts are added with
/// the consuming `with_*` methods. There are no setters, so a message handed
/// to a dispatcher stays the same across every delivery attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    id: Uuid,
    to: String,
    from: String,
    subject: String,
    html_body: String,
    plain_body: Option<String>,
    reply_to: Option<String>,
    attachments: Vec<Attachment>,
}

impl Message {
    /// Create a new message with an HTML body
    pub fn new(to: &str, from: &str, subject: &str, html_body: &str) -> Self {
        Self {
            id: Uuid::now_v7(),
            to: to.to_string(),
            from: from.to_string(),
            subject: subject.to_string(),
            html_body: html_body.to_string(),
            plain_body: None,
            reply_to: None,
            attachments: Vec::new(),
        }
    }

    /// Adds a plain text alternative body
    pub fn with_plain_body(mut self, plain_body: &str) -> Self {
        self.plain_body = Some(plain_body.to_string());
        self
    }

    /// Sets the address replies should go to
    pub fn with_reply_to(mut self, reply_to: &str) -> Self {
        self.reply_to = Some(reply_to.to_string());
        self
    }

    /// Adds an attachment
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Unique identifier of this message, stable across delivery attempts
    pub fn id(&self) -> &Uuid {
        &self.id
    }

    /// The recipient
    pub fn to(&self) -> &str {
        &self.to
    }

    /// The sender
    pub fn from(&self) -> &str {
        &self.from
    }

    /// The subject
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// The HTML body
    pub fn html_body(&self) -> &str {
        &self.html_body
    }

    /// The plain text body, if any
    pub fn plain_body(&self) -> Option<&str> {
        self.plain_body.as_deref()
    }

    /// The reply-to address, falling back to the sender
    pub fn reply_to(&self) -> &str {
        self.reply_to.as_deref().unwrap_or(&self.from)
    }

    /// Whether a reply-to address was set explicitly
    pub fn has_explicit_reply_to(&self) -> bool {
        self.reply_to.is_some()
    }

    /// The attachments
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }
}
