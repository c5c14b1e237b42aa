#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Form mailer library: turns website form submissions into notification
//! emails and delivers them through an SMTP relay.

pub mod domain;
pub mod infrastructure;
