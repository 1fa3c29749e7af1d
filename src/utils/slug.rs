//! Random slug primitive used for shortcut candidates.
//!
//! Slugs are drawn uniformly from the 62 ASCII alphanumerics using the
//! thread-local CSPRNG, so consecutive shortcuts are not guessable.

use rand::Rng;
use rand::distr::Alphanumeric;

/// The alphabet shortcuts are drawn from: `A-Z`, `a-z`, `0-9`.
pub const CHARSET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Returns a random string of exactly `length` characters from [`CHARSET`].
///
/// A length of zero yields an empty string.
///
/// # Examples
///
/// ```ignore
/// let slug = random_slug(8);
/// assert_eq!(slug.len(), 8);
/// assert!(slug.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn random_slug(length: usize) -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Source of shortcut candidates.
///
/// Production code uses [`RandomSlugs`]; tests substitute scripted sequences.
#[cfg_attr(test, mockall::automock)]
pub trait SlugSource: Send + Sync {
    /// Produces a candidate of exactly `length` characters.
    fn slug(&self, length: usize) -> String;
}

/// [`SlugSource`] backed by [`random_slug`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSlugs;

impl SlugSource for RandomSlugs {
    fn slug(&self, length: usize) -> String {
        random_slug(length)
    }
}
