//! Contact emails.

pub mod contact_inquiry;
