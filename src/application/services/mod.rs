//! Business logic services for the application layer.

pub mod shortcut_generator;
pub mod url_service;
pub mod usage_recorder;

pub use shortcut_generator::{
    GenerationError, SAME_LENGTH_ATTEMPTS, ShortcutGenerator, ShortcutPolicy,
};
pub use url_service::UrlService;
pub use usage_recorder::UsageRecorder;
