//! Core domain entities.
//!
//! - [`ShortenedUrl`] - A persisted shortcut mapping with usage metadata
//! - [`NewShortenedUrl`] - Insert input for a new mapping
//! - [`UsageSummary`] - Aggregate counts used by administrative tooling

pub mod shortened_url;

pub use shortened_url::{NewShortenedUrl, ShortenedUrl, UsageSummary};
