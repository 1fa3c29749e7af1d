//! Construction of the public, fully-qualified shortened URL.

use url::Url;

/// Builds resolve paths and absolute shortened URLs.
///
/// The resolve route is `/{prefix}/{shortcut}/` (or `/{shortcut}/` without a
/// prefix). The absolute URL is the configured site URL joined with that path
/// using URL reference resolution, so any path on the site URL is replaced.
#[derive(Debug, Clone)]
pub struct ShortUrlBuilder {
    site_url: Url,
    prefix: String,
}

impl ShortUrlBuilder {
    /// Creates a builder. Leading and trailing slashes of `prefix` are ignored.
    pub fn new(site_url: Url, prefix: &str) -> Self {
        Self {
            site_url,
            prefix: prefix.trim_matches('/').to_string(),
        }
    }

    /// Parses `site_url` and creates a builder.
    ///
    /// # Errors
    ///
    /// Returns a parse error if `site_url` is not an absolute URL.
    pub fn parse(site_url: &str, prefix: &str) -> Result<Self, url::ParseError> {
        Ok(Self::new(Url::parse(site_url)?, prefix))
    }

    pub fn site_url(&self) -> &Url {
        &self.site_url
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Router pattern for the resolve endpoint, e.g. `/resolve/{shortcut}`.
    pub fn route_pattern(&self) -> String {
        if self.prefix.is_empty() {
            "/{shortcut}".to_string()
        } else {
            format!("/{}/{{shortcut}}", self.prefix)
        }
    }

    /// Absolute path of the resolve endpoint for `shortcut`.
    pub fn resolve_path(&self, shortcut: &str) -> String {
        if self.prefix.is_empty() {
            format!("/{}/", shortcut)
        } else {
            format!("/{}/{}/", self.prefix, shortcut)
        }
    }

    /// Full URL a visitor follows to be redirected to the original URL.
    pub fn shortened_url(&self, shortcut: &str) -> String {
        let path = self.resolve_path(shortcut);
        match self.site_url.join(&path) {
            Ok(url) => url.to_string(),
            Err(_) => format!(
                "{}{}",
                self.site_url.as_str().trim_end_matches('/'),
                path
            ),
        }
    }
}
