//! Email dispatch with envelope validation and retries

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

#[cfg(test)]
use mockall::mock;

use crate::domain::communication::{
    email_addresses::EmailAddress,
    mailer::{Mailer, MailerError, Message},
};

mod retry;

pub use retry::{RetryPolicy, Sleeper, TokioSleeper, DEFAULT_BASE_DELAY, DEFAULT_MAX_ATTEMPTS};

/// The final outcome of sending one message, retries included
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SendResult {
    /// Whether the relay accepted the message
    pub success: bool,

    /// The identifier of the accepted message
    pub message_id: Option<String>,

    /// The error of the last failed attempt
    pub error: Option<String>,
}

impl SendResult {
    /// A successful delivery
    pub fn sent(message_id: String) -> Self {
        Self {
            success: true,
            message_id: Some(message_id),
            error: None,
        }
    }

    /// A failed delivery
    pub fn failed(error: &MailerError) -> Self {
        Self {
            success: false,
            message_id: None,
            error: Some(error.to_string()),
        }
    }
}

/// Delivers messages
#[async_trait]
pub trait DispatchService: Clone + Send + Sync + 'static {
    /// Validates and sends a message, retrying transient failures.
    ///
    /// # Arguments
    /// * `message` - The [`Message`] to deliver.
    ///
    /// # Returns
    /// A [`SendResult`] describing the terminal outcome. Intermediate failures
    /// that were retried are not reported.
    async fn send(&self, message: &Message) -> SendResult;
}

#[cfg(test)]
mock! {
    pub DispatchService {}

    impl Clone for DispatchService {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl DispatchService for DispatchService {
        async fn send(&self, message: &Message) -> SendResult;
    }
}

/// Dispatcher backed by a [`Mailer`], waiting on a [`Sleeper`] between attempts
#[derive(Debug, Clone)]
pub struct EmailDispatcher<M, S = TokioSleeper>
where
    M: Mailer,
    S: Sleeper,
{
    mailer: Arc<M>,
    sleeper: S,
    policy: RetryPolicy,
}

impl<M> EmailDispatcher<M, TokioSleeper>
where
    M: Mailer,
{
    /// Creates a dispatcher that waits on the tokio timer
    pub fn new(mailer: Arc<M>, policy: RetryPolicy) -> Self {
        Self::with_sleeper(mailer, policy, TokioSleeper)
    }
}

impl<M, S> EmailDispatcher<M, S>
where
    M: Mailer,
    S: Sleeper,
{
    /// Creates a dispatcher with a custom clock
    pub fn with_sleeper(mailer: Arc<M>, policy: RetryPolicy, sleeper: S) -> Self {
        Self {
            mailer,
            sleeper,
            policy,
        }
    }

    /// Sends `message` with an explicit attempt budget.
    pub async fn send_with_attempts(&self, message: &Message, max_attempts: u32) -> SendResult {
        let policy = RetryPolicy::new(max_attempts, self.policy.base_delay);

        match self.deliver(message, policy).await {
            Ok(message_id) => SendResult::sent(message_id),
            Err(err) => SendResult::failed(&err),
        }
    }

    async fn deliver(&self, message: &Message, policy: RetryPolicy) -> Result<String, MailerError> {
        validate(message)?;

        let attempts = policy.attempts();
        let mut attempt = 1;

        loop {
            debug!(id = %message.id(), attempt, attempts, "sending email");

            match self.mailer.send_email(message).await {
                Ok(message_id) => {
                    info!(id = %message.id(), %message_id, attempt, "email sent");

                    return Ok(message_id);
                }
                Err(err) if !err.is_retryable() || attempt >= attempts => {
                    warn!(id = %message.id(), attempt, kind = ?err.kind(), error = %err, "giving up on email");

                    return Err(err);
                }
                Err(err) => {
                    let delay = policy.delay_after(attempt);

                    warn!(
                        id = %message.id(),
                        attempt,
                        attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "email send failed, retrying"
                    );

                    self.sleeper.sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

#[async_trait]
impl<M, S> DispatchService for EmailDispatcher<M, S>
where
    M: Mailer,
    S: Sleeper,
{
    async fn send(&self, message: &Message) -> SendResult {
        self.send_with_attempts(message, self.policy.max_attempts)
            .await
    }
}

/// Checks the envelope before any delivery attempt
fn validate(message: &Message) -> Result<(), MailerError> {
    if message.to().trim().is_empty()
        || message.from().trim().is_empty()
        || message.subject().trim().is_empty()
        || message.html_body().trim().is_empty()
    {
        return Err(MailerError::Validation(
            "Missing required email fields: to, from, subject, html".to_string(),
        ));
    }

    if EmailAddress::new(message.to()).is_err() {
        return Err(MailerError::Validation(format!(
            "Invalid recipient email: {}",
            message.to()
        )));
    }

    if EmailAddress::new(message.from()).is_err() {
        return Err(MailerError::Validation(format!(
            "Invalid sender email: {}",
            message.from()
        )));
    }

    if message.has_explicit_reply_to() && EmailAddress::new(message.reply_to()).is_err() {
        return Err(MailerError::Validation(format!(
            "Invalid reply-to email: {}",
            message.reply_to()
        )));
    }

    Ok(())
}
