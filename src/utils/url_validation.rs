//! Validation of user-supplied original URLs.
//!
//! Original URLs are stored exactly as submitted; they are only checked here.

use url::Url;

/// Errors that can occur during URL validation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only http, https, ftp and ftps URLs are allowed")]
    UnsupportedProtocol,

    #[error("URL must contain a host")]
    MissingHost,
}

/// Checks that `input` is an absolute URL the service can redirect to.
///
/// # Rules
///
/// 1. Must parse as an absolute URL (relative references are rejected)
/// 2. Scheme must be `http`, `https`, `ftp` or `ftps`
/// 3. Must contain a host
///
/// # Errors
///
/// Returns the first rule that is violated.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_original_url("https://example.com/").is_ok());
/// assert!(validate_original_url("invalid_url").is_err());
/// assert!(validate_original_url("javascript:alert(1)").is_err());
/// ```
pub fn validate_original_url(input: &str) -> Result<(), UrlValidationError> {
    let url = Url::parse(input.trim())
        .map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" | "ftp" | "ftps" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(UrlValidationError::MissingHost),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_absolute_http_urls() {
        assert!(validate_original_url("https://example.com/").is_ok());
        assert!(validate_original_url("http://example.com").is_ok());
        assert!(validate_original_url("https://example.com/path?q=1#frag").is_ok());
        assert!(validate_original_url("ftp://files.example.com/pub").is_ok());
    }

    #[test]
    fn test_rejects_relative_input() {
        assert!(matches!(
            validate_original_url("invalid_url"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
        assert!(validate_original_url("/just/a/path").is_err());
        assert!(validate_original_url("").is_err());
    }

    #[test]
    fn test_rejects_dangerous_schemes() {
        assert_eq!(
            validate_original_url("javascript:alert(1)"),
            Err(UrlValidationError::UnsupportedProtocol)
        );
        assert_eq!(
            validate_original_url("data:text/html,hello"),
            Err(UrlValidationError::UnsupportedProtocol)
        );
        assert_eq!(
            validate_original_url("file:///etc/passwd"),
            Err(UrlValidationError::UnsupportedProtocol)
        );
    }
}
