//! Job application errors

use thiserror::Error;

/// Reasons a job application is rejected
#[derive(Debug, Error, PartialEq, Eq)]
pub enum JobApplicationError {
    /// One of name, email, phone, resume or position title was not provided
    #[error("Missing required fields")]
    MissingFields,
}
