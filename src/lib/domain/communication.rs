//! Outbound email: addresses, message envelopes, rendering, transports and dispatch.

pub mod dispatcher;
pub mod email_addresses;
pub mod mailer;
pub mod rendering;
