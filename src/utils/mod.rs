//! Utility functions for shortcut generation and URL handling.
//!
//! - [`slug`] - Random slug primitive and candidate sources
//! - [`reserved`] - Shortcuts that must never be allocated
//! - [`url_validation`] - Validation of submitted original URLs
//! - [`short_url`] - Resolve paths and absolute shortened URLs

pub mod reserved;
pub mod short_url;
pub mod slug;
pub mod url_validation;
