//! Plain HTTP and HTTPS servers for the application router

pub mod http;
pub mod https;
