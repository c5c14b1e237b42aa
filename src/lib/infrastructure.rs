//! Adapters to the outside world: SMTP and HTTP.

pub mod email;
pub mod http;
