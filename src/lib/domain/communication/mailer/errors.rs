//! Mailer errors

use thiserror::Error;

/// How a delivery failure should be treated by the caller
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// The message itself is malformed; sending it again cannot succeed
    Validation,

    /// The relay or the connection to it failed; a later attempt may succeed
    Transient,

    /// A local, deterministic failure while assembling the message
    Fatal,
}

/// Mailer errors
#[derive(Debug, Error)]
pub enum MailerError {
    /// The message failed envelope validation
    #[error("{0}")]
    Validation(String),

    /// The relay could not be reached or did not accept the message
    #[error(transparent)]
    Transient(anyhow::Error),

    /// The message could not be assembled
    #[error(transparent)]
    Fatal(anyhow::Error),
}

impl MailerError {
    /// The kind of failure, set where the error was raised
    pub fn kind(&self) -> FailureKind {
        match self {
            MailerError::Validation(_) => FailureKind::Validation,
            MailerError::Transient(_) => FailureKind::Transient,
            MailerError::Fatal(_) => FailureKind::Fatal,
        }
    }

    /// Whether another attempt with the same message may succeed
    pub fn is_retryable(&self) -> bool {
        self.kind() == FailureKind::Transient
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::*;

    #[test]
    fn test_only_transient_errors_are_retryable() {
        assert!(MailerError::Transient(anyhow!("connection reset")).is_retryable());
        assert!(!MailerError::Fatal(anyhow!("bad attachment")).is_retryable());
        assert!(!MailerError::Validation("Invalid sender email: x".to_string()).is_retryable());
    }

    #[test]
    fn test_error_messages_are_passed_through() {
        let error = MailerError::Transient(anyhow!("connection reset"));
        assert_eq!(error.to_string(), "connection reset");

        let error = MailerError::Validation("Invalid sender email: x".to_string());
        assert_eq!(error.to_string(), "Invalid sender email: x");
    }
}
