//! Application state module

use std::{fmt, sync::Arc};

use chrono::{DateTime, Utc};
use clap::Parser;

use crate::domain::communication::dispatcher::{
    DispatchService, DEFAULT_BASE_DELAY, DEFAULT_MAX_ATTEMPTS,
};

/// Mail delivery configuration
#[derive(Clone, Debug, PartialEq, Eq, Parser)]
pub struct MailConfig {
    /// The address form submissions are sent to
    #[arg(long, env = "ADMIN_EMAIL")]
    pub admin_email: String,

    /// Delivery attempts per message, the first one included
    #[arg(long, env = "EMAIL_MAX_ATTEMPTS", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,

    /// Delay before the first retry, in milliseconds; doubles on each retry
    #[arg(long, env = "EMAIL_RETRY_BASE_DELAY_MS", default_value_t = DEFAULT_BASE_DELAY.as_millis() as u64)]
    pub retry_base_delay_ms: u64,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// The address form submissions are sent to
    pub admin_email: String,
}

/// Global application state
#[derive(Clone)]
pub struct AppState<D: DispatchService> {
    /// The time the server started
    pub start_time: DateTime<Utc>,

    /// The application configuration
    pub config: AppConfig,

    /// Email dispatcher
    pub dispatcher: Arc<D>,
}

impl<D> AppState<D>
where
    D: DispatchService,
{
    /// Create a new application state
    pub fn new(config: AppConfig, dispatcher: D) -> Self {
        Self {
            start_time: Utc::now(),
            config,
            dispatcher: Arc::new(dispatcher),
        }
    }
}

impl<D> fmt::Debug for AppState<D>
where
    D: DispatchService,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("start_time", &self.start_time)
            .field("config", &self.config)
            .field("dispatcher", &"DispatchService")
            .finish()
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::domain::communication::dispatcher::tests::MockDispatchService;

    pub const ADMIN_EMAIL: &str = "admin@example.com";

    pub fn test_state(dispatcher: Option<MockDispatchService>) -> AppState<MockDispatchService> {
        let dispatcher = dispatcher.unwrap_or_else(|| {
            let mut dispatcher = MockDispatchService::new();
            dispatcher.expect_send().times(0);
            dispatcher
        });

        let config = AppConfig {
            admin_email: ADMIN_EMAIL.to_string(),
        };

        AppState::new(config, dispatcher)
    }
}
