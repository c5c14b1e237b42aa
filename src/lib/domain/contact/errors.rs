//! Contact submission errors

use thiserror::Error;

/// Reasons a contact form submission is rejected
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactSubmissionError {
    /// One of name, email, subject or message was not provided
    #[error("Missing required fields")]
    MissingFields,

    /// The email address is not shaped like one
    #[error("Invalid email address")]
    InvalidEmail,

    /// Name shorter than two characters
    #[error("Name must be at least 2 characters")]
    NameTooShort,

    /// Subject shorter than three characters
    #[error("Subject must be at least 3 characters")]
    SubjectTooShort,

    /// Message shorter than ten characters
    #[error("Message must be at least 10 characters")]
    MessageTooShort,
}
