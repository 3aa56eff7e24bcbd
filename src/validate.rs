//! Syntactic URL validation.
//!
//! Only the shape of a URL is checked: it must be absolute, use the `http`
//! or `https` scheme and carry a host. Nothing is fetched.
//!
//! The `url` parser repairs special-scheme URLs that lack `//` (for example
//! `http:/example.com`), so the authority is checked on the raw input
//! before parsing.

use tracing::debug;
use url::Url;

/// Decide whether `url` is an absolute HTTP(S) URL with a non-empty host.
///
/// Accepts either a `&str` or an `Option<&str>`; `None` and the empty
/// string are invalid. Parse failures are reported as `false`.
///
/// # Examples
///
/// ```ignore
/// assert!(is_valid_url("https://example.com"));
/// assert!(!is_valid_url("ftp://example.com"));
/// assert!(!is_valid_url(None));
/// ```
pub fn is_valid_url<'a>(url: impl Into<Option<&'a str>>) -> bool {
    let Some(raw) = url.into() else {
        return false;
    };
    if raw.is_empty() || !has_authority(raw) {
        return false;
    }

    match Url::parse(raw) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https")
                && parsed.host_str().is_some_and(|h| !h.is_empty())
        }
        Err(e) => {
            debug!(url = %raw, error = %e, "URL failed to parse");
            false
        }
    }
}

/// The input spells out a non-empty authority: `scheme://` followed by at
/// least one character before the path, query or fragment.
fn has_authority(raw: &str) -> bool {
    let Some((_, rest)) = raw.split_once(':') else {
        return false;
    };
    let Some(after) = rest.strip_prefix("//") else {
        return false;
    };
    after
        .split(['/', '?', '#'])
        .next()
        .is_some_and(|authority| !authority.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(is_valid_url("https://example.com"));
        assert!(is_valid_url("http://example.com/path?q=1#frag"));
        assert!(is_valid_url("https://sub.example.co.uk:8443/"));
    }

    #[test]
    fn test_scheme_is_case_insensitive_on_input() {
        // The parser lowercases the scheme before we compare it.
        assert!(is_valid_url("HTTPS://example.com"));
    }

    #[test]
    fn test_rejects_empty_and_absent() {
        assert!(!is_valid_url(""));
        assert!(!is_valid_url(None));
    }

    #[test]
    fn test_rejects_other_schemes() {
        assert!(!is_valid_url("ftp://x.com"));
        assert!(!is_valid_url("mailto:someone@example.com"));
        assert!(!is_valid_url("javascript:void(0)"));
    }

    #[test]
    fn test_rejects_relative_and_fragments() {
        assert!(!is_valid_url("/relative/path"));
        assert!(!is_valid_url("#contents"));
        assert!(!is_valid_url("docs/README.md"));
    }

    #[test]
    fn test_rejects_missing_host() {
        assert!(!is_valid_url("http://"));
        assert!(!is_valid_url("http://?q=1"));
    }

    #[test]
    fn test_rejects_inputs_without_literal_authority() {
        assert!(!is_valid_url("https:example.com"));
        assert!(!is_valid_url("http:/example.com"));
        assert!(!is_valid_url("http:///example.com"));
        assert!(!is_valid_url("https:\\\\example.com"));
        assert!(!is_valid_url("http:/github.com/x"));
    }
}
