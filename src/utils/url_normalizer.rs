//! URL validation before storage.
//!
//! Accepts anything that parses as an absolute URL and repairs the common case
//! of a bare host (`example.com`) by assuming HTTPS. Purely syntactic: nothing
//! is resolved or fetched.

use url::Url;

/// Scheme prepended to inputs that do not parse on their own.
const DEFAULT_SCHEME_PREFIX: &str = "https://";

/// Errors that can occur during URL normalization.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("invalid url")]
    Invalid,
}

/// Normalizes a user-supplied URL string.
///
/// # Rules
///
/// 1. If `raw` parses as an absolute URL it is returned unchanged.
/// 2. Otherwise `https://` is prepended; if that parses, the prefixed string is returned.
/// 3. Otherwise the input is rejected.
///
/// Already-absolute inputs such as `http://x` are never prefixed a second time.
///
/// # Errors
///
/// Returns [`UrlNormalizationError::Invalid`] for empty, whitespace-only or
/// otherwise unparseable input.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_url("https://example.com").unwrap(), "https://example.com");
/// assert_eq!(normalize_url("example.com").unwrap(), "https://example.com");
/// assert!(normalize_url("").is_err());
/// ```
pub fn normalize_url(raw: &str) -> Result<String, UrlNormalizationError> {
    if Url::parse(raw).is_ok() {
        return Ok(raw.to_string());
    }

    let prefixed = format!("{DEFAULT_SCHEME_PREFIX}{raw}");
    if Url::parse(&prefixed).is_ok() {
        return Ok(prefixed);
    }

    Err(UrlNormalizationError::Invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_absolute_https_unchanged() {
        assert_eq!(
            normalize_url("https://example.com").unwrap(),
            "https://example.com"
        );
    }

    #[test]
    fn test_normalize_absolute_http_not_double_prefixed() {
        assert_eq!(normalize_url("http://x").unwrap(), "http://x");
    }

    #[test]
    fn test_normalize_preserves_path_query_and_fragment() {
        let input = "https://Example.com:443/Path?q=Rust#top";
        assert_eq!(normalize_url(input).unwrap(), input);
    }

    #[test]
    fn test_normalize_bare_host_gets_https() {
        assert_eq!(
            normalize_url("example.com").unwrap(),
            "https://example.com"
        );
    }

    #[test]
    fn test_normalize_bare_host_with_path() {
        assert_eq!(
            normalize_url("example.com/docs?page=2").unwrap(),
            "https://example.com/docs?page=2"
        );
    }

    #[test]
    fn test_normalize_subdomain_without_scheme() {
        assert_eq!(
            normalize_url("www.rust-lang.org").unwrap(),
            "https://www.rust-lang.org"
        );
    }

    #[test]
    fn test_normalize_non_http_scheme_accepted() {
        assert_eq!(
            normalize_url("ftp://files.example.com/a.txt").unwrap(),
            "ftp://files.example.com/a.txt"
        );
    }

    #[test]
    fn test_normalize_empty_string() {
        assert_eq!(normalize_url(""), Err(UrlNormalizationError::Invalid));
    }

    #[test]
    fn test_normalize_whitespace_only() {
        assert_eq!(normalize_url("   "), Err(UrlNormalizationError::Invalid));
        assert_eq!(normalize_url("\t"), Err(UrlNormalizationError::Invalid));
    }

    #[test]
    fn test_normalize_inner_spaces_rejected() {
        assert_eq!(
            normalize_url("not a valid url"),
            Err(UrlNormalizationError::Invalid)
        );
    }

    #[test]
    fn test_normalize_unterminated_ipv6_rejected() {
        assert_eq!(normalize_url("[::1"), Err(UrlNormalizationError::Invalid));
    }

    #[test]
    fn test_error_message() {
        assert_eq!(UrlNormalizationError::Invalid.to_string(), "invalid url");
    }
}
