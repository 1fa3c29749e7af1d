//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::shortcut_generator::ShortcutGenerator`] - Adaptive-length shortcut allocation
//! - [`services::usage_recorder::UsageRecorder`] - Atomic hit recording on resolution
//! - [`services::url_service::UrlService`] - Creation, lookup and resolution

pub mod services;
