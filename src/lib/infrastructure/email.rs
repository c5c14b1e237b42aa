//! Email transport implementations.

pub mod smtp;
