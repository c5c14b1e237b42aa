//! Contact form submissions.

pub mod emails;
mod errors;
mod submission;

pub use errors::ContactSubmissionError;
pub use submission::ContactSubmission;
