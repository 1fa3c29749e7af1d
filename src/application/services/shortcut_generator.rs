//! Adaptive-length shortcut generation.
//!
//! Candidates start at the minimum length. After [`SAME_LENGTH_ATTEMPTS`]
//! consecutive collisions at one length the generator moves to the next
//! length, and gives up once the maximum length tier is exhausted.
//!
//! The worst case is `SAME_LENGTH_ATTEMPTS * (max - min + 1)` existence
//! checks.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, warn};

use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::reserved::ReservedShortcuts;
use crate::utils::slug::{RandomSlugs, SlugSource};

/// Number of candidates tried at one length before moving to the next.
pub const SAME_LENGTH_ATTEMPTS: usize = 10;

/// Default minimum shortcut length.
pub const DEFAULT_MIN_SHORTCUT_LENGTH: usize = 5;

/// Default maximum shortcut length.
pub const DEFAULT_MAX_SHORTCUT_LENGTH: usize = 10;

/// Bounds and exclusions applied to generated shortcuts.
#[derive(Debug, Clone)]
pub struct ShortcutPolicy {
    pub min_length: usize,
    pub max_length: usize,
    pub reserved: ReservedShortcuts,
}

impl ShortcutPolicy {
    pub fn new(min_length: usize, max_length: usize, reserved: ReservedShortcuts) -> Self {
        Self {
            min_length,
            max_length,
            reserved,
        }
    }

    /// Upper bound on existence checks performed by one generation.
    pub fn max_checks(&self) -> usize {
        if self.max_length < self.min_length {
            return 0;
        }
        SAME_LENGTH_ATTEMPTS * (self.max_length - self.min_length + 1)
    }

    /// Returns true if `shortcut` has an allowed length and is not reserved.
    pub fn allows(&self, shortcut: &str) -> bool {
        let len = shortcut.chars().count();
        len >= self.min_length && len <= self.max_length && !self.reserved.contains(shortcut)
    }
}

impl Default for ShortcutPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_MIN_SHORTCUT_LENGTH,
            DEFAULT_MAX_SHORTCUT_LENGTH,
            ReservedShortcuts::default(),
        )
    }
}

/// Errors returned by [`ShortcutGenerator::generate`].
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Every length tier was tried without finding a free shortcut.
    #[error("Failed to find a unique shortcut. Try again.")]
    Exhausted { attempts: usize },

    /// The record store failed while checking a candidate.
    #[error(transparent)]
    Store(#[from] AppError),
}

impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        let message = err.to_string();
        match err {
            GenerationError::Exhausted { attempts } => {
                AppError::internal(message, json!({ "attempts": attempts }))
            }
            GenerationError::Store(e) => e,
        }
    }
}

/// Produces random, currently unused shortcuts.
///
/// Performs exactly one existence check per candidate and never writes. The
/// caller inserts the returned shortcut and must handle a uniqueness
/// violation if another writer takes it first.
pub struct ShortcutGenerator<R: UrlRepository + ?Sized, S: SlugSource = RandomSlugs> {
    repository: Arc<R>,
    slugs: S,
    policy: ShortcutPolicy,
}

impl<R: UrlRepository + ?Sized> ShortcutGenerator<R> {
    /// Creates a generator drawing candidates from the system CSPRNG.
    pub fn new(repository: Arc<R>, policy: ShortcutPolicy) -> Self {
        Self::with_source(repository, policy, RandomSlugs)
    }
}

impl<R: UrlRepository + ?Sized, S: SlugSource> ShortcutGenerator<R, S> {
    /// Creates a generator with a custom candidate source.
    pub fn with_source(repository: Arc<R>, policy: ShortcutPolicy, slugs: S) -> Self {
        Self {
            repository,
            slugs,
            policy,
        }
    }

    pub fn policy(&self) -> &ShortcutPolicy {
        &self.policy
    }

    /// Generates a shortcut that is neither stored nor reserved.
    ///
    /// Duplicate draws within a tier are not filtered; they count as
    /// ordinary collisions.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Exhausted`] after
    /// [`ShortcutPolicy::max_checks`] failed candidates.
    /// Returns [`GenerationError::Store`] if an existence check fails.
    pub async fn generate(&self) -> Result<String, GenerationError> {
        let mut length = self.policy.min_length;
        let mut attempt = 1;
        let mut checks = 0;

        while length <= self.policy.max_length {
            let candidate = self.slugs.slug(length);
            checks += 1;

            let taken = self.repository.exists(&candidate).await?;
            if !taken && !self.policy.reserved.contains(&candidate) {
                return Ok(candidate);
            }

            metrics::counter!("shortcut_collisions_total").increment(1);

            if attempt >= SAME_LENGTH_ATTEMPTS {
                length += 1;
                attempt = 1;
                debug!(length, "Shortcut tier saturated, increasing length");
            } else {
                attempt += 1;
            }
        }

        metrics::counter!("shortcut_generation_failures_total").increment(1);
        warn!(
            attempts = checks,
            min_length = self.policy.min_length,
            max_length = self.policy.max_length,
            "Shortcut generation exhausted all length tiers"
        );

        Err(GenerationError::Exhausted { attempts: checks })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUrlRepository;
    use crate::utils::slug::MockSlugSource;
    use mockall::Sequence;
    use std::sync::Mutex;

    fn policy(min: usize, max: usize) -> ShortcutPolicy {
        ShortcutPolicy::new(min, max, ReservedShortcuts::default())
    }

    #[tokio::test]
    async fn test_generate_empty_store_succeeds_first_attempt() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo
            .expect_exists()
            .times(1)
            .returning(|_| Ok(false));

        let generator = ShortcutGenerator::new(Arc::new(mock_repo), policy(5, 10));

        let shortcut = generator.generate().await.unwrap();

        assert_eq!(shortcut.len(), 5);
        assert!(shortcut.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[tokio::test]
    async fn test_generate_returns_first_free_candidate() {
        let mut mock_repo = MockUrlRepository::new();
        let mut mock_slugs = MockSlugSource::new();
        let mut seq = Sequence::new();

        for candidate in ["takn1", "takn2", "takn3", "fresh"] {
            mock_slugs
                .expect_slug()
                .with(mockall::predicate::eq(5))
                .times(1)
                .in_sequence(&mut seq)
                .return_const(candidate.to_string());
        }

        mock_repo
            .expect_exists()
            .times(4)
            .returning(|shortcut| Ok(shortcut.starts_with("takn")));

        let generator =
            ShortcutGenerator::with_source(Arc::new(mock_repo), policy(5, 10), mock_slugs);

        let shortcut = generator.generate().await.unwrap();

        assert_eq!(shortcut, "fresh");
    }

    #[tokio::test]
    async fn test_generate_escalates_length_after_tier_is_saturated() {
        let mut mock_repo = MockUrlRepository::new();
        let mut mock_slugs = MockSlugSource::new();

        mock_slugs
            .expect_slug()
            .times(SAME_LENGTH_ATTEMPTS + 1)
            .returning(|length| "x".repeat(length));

        mock_repo
            .expect_exists()
            .times(SAME_LENGTH_ATTEMPTS + 1)
            .returning(|shortcut| Ok(shortcut.len() == 5));

        let generator =
            ShortcutGenerator::with_source(Arc::new(mock_repo), policy(5, 10), mock_slugs);

        let shortcut = generator.generate().await.unwrap();

        assert_eq!(shortcut.len(), 6);
    }

    #[tokio::test]
    async fn test_generate_fails_after_exact_bound_of_checks() {
        let mut mock_repo = MockUrlRepository::new();
        let mut mock_slugs = MockSlugSource::new();
        let policy = policy(5, 10);
        let bound = policy.max_checks();
        assert_eq!(bound, 60);

        let lengths = Arc::new(Mutex::new(Vec::new()));
        let recorded = lengths.clone();
        mock_slugs
            .expect_slug()
            .times(bound)
            .returning(move |length| {
                recorded.lock().unwrap().push(length);
                "y".repeat(length)
            });

        mock_repo
            .expect_exists()
            .times(bound)
            .returning(|_| Ok(true));

        let generator = ShortcutGenerator::with_source(Arc::new(mock_repo), policy, mock_slugs);

        let result = generator.generate().await;

        assert!(matches!(
            result,
            Err(GenerationError::Exhausted { attempts: 60 })
        ));

        let lengths = lengths.lock().unwrap();
        for length in 5..=10 {
            let per_tier = lengths.iter().filter(|&&l| l == length).count();
            assert_eq!(per_tier, SAME_LENGTH_ATTEMPTS, "tier {} attempts", length);
        }
        assert!(lengths.windows(2).all(|w| w[0] <= w[1]));
    }

    #[tokio::test]
    async fn test_generate_skips_reserved_candidates() {
        let mut mock_repo = MockUrlRepository::new();
        let mut mock_slugs = MockSlugSource::new();
        let mut seq = Sequence::new();

        for candidate in ["admin", "abcde"] {
            mock_slugs
                .expect_slug()
                .times(1)
                .in_sequence(&mut seq)
                .return_const(candidate.to_string());
        }

        mock_repo
            .expect_exists()
            .times(2)
            .returning(|_| Ok(false));

        let policy = ShortcutPolicy::new(5, 5, ReservedShortcuts::new(["admin"]));
        let generator = ShortcutGenerator::with_source(Arc::new(mock_repo), policy, mock_slugs);

        assert_eq!(generator.generate().await.unwrap(), "abcde");
    }

    #[tokio::test]
    async fn test_generate_propagates_store_errors() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo
            .expect_exists()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let generator = ShortcutGenerator::new(Arc::new(mock_repo), policy(5, 10));

        let result = generator.generate().await;

        assert!(matches!(
            result,
            Err(GenerationError::Store(AppError::Internal { .. }))
        ));
    }

    #[test]
    fn test_exhausted_maps_to_internal_error() {
        let err: AppError = GenerationError::Exhausted { attempts: 60 }.into();

        assert!(matches!(err, AppError::Internal { .. }));
        assert_eq!(err.to_string(), "Failed to find a unique shortcut. Try again.");
    }

    #[test]
    fn test_policy_allows() {
        let policy = ShortcutPolicy::new(5, 10, ReservedShortcuts::new(["reserved"]));

        assert!(policy.allows("abcde"));
        assert!(!policy.allows("abcd"));
        assert!(!policy.allows("abcdefghijk"));
        assert!(!policy.allows("reserved"));
    }

    #[test]
    fn test_default_policy_rejects_builtin_reserved_names() {
        let policy = ShortcutPolicy::default();

        assert!(policy.allows("abcde"));
        assert!(!policy.allows("admin"));
        assert!(!policy.allows("health"));
        assert!(!policy.allows("static"));
    }

    #[tokio::test]
    async fn test_default_policy_never_returns_builtin_reserved_name() {
        let mut mock_repo = MockUrlRepository::new();
        let mut mock_slugs = MockSlugSource::new();
        let mut seq = Sequence::new();

        for candidate in ["admin", "health", "fresh"] {
            mock_slugs
                .expect_slug()
                .times(1)
                .in_sequence(&mut seq)
                .return_const(candidate.to_string());
        }

        mock_repo
            .expect_exists()
            .times(3)
            .returning(|_| Ok(false));

        let generator = ShortcutGenerator::with_source(
            Arc::new(mock_repo),
            ShortcutPolicy::default(),
            mock_slugs,
        );

        assert_eq!(generator.generate().await.unwrap(), "fresh");
    }

    #[test]
    fn test_policy_max_checks_for_inverted_bounds() {
        assert_eq!(policy(6, 5).max_checks(), 0);
    }
}
