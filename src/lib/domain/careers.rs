//! Job applications submitted from the careers page.

mod application;
pub mod emails;
mod errors;
mod resume;

pub use application::JobApplication;
pub use errors::JobApplicationError;
pub use resume::{Resume, ResumeFormat};
