//! Domain logic: submissions, email composition and dispatch.

pub mod careers;
pub mod communication;
pub mod contact;
