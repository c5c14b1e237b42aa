//! Mail transport abstraction

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

mod errors;
mod message;

pub use errors::{FailureKind, MailerError};
pub use message::{Attachment, Message};

/// A transport that hands a single message to a mail relay
#[async_trait]
pub trait Mailer: Clone + Send + Sync + 'static {
    /// Makes one delivery attempt.
    ///
    /// # Arguments
    /// * `message` - The [`Message`] to deliver.
    ///
    /// # Returns
    /// - [`Ok`] with the message identifier accepted by the relay.
    /// - [`Err`] containing a [`MailerError`] whose kind tells the caller whether
    ///   trying again makes sense.
    async fn send_email(&self, message: &Message) -> Result<String, MailerError>;

    /// Checks that the relay is reachable and accepts our credentials.
    async fn verify(&self) -> Result<(), MailerError>;
}

#[cfg(test)]
mock! {
    pub Mailer {}

    impl Clone for Mailer {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl Mailer for Mailer {
        async fn send_email(&self, message: &Message) -> Result<String, MailerError>;
        async fn verify(&self) -> Result<(), MailerError>;
    }
}

#[cfg(test)]
pub mod tests {
    pub use super::MockMailer;
}
