//! Careers emails.

pub mod job_application;
