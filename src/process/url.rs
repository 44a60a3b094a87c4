use once_cell::sync::Lazy;
use regex::Regex;

/// Stand-in for a link that was never provided.
pub const NOT_AVAILABLE: &str = "Not Available";
/// Stand-in for a link that was provided but is malformed.
pub const INVALID_URL: &str = "Invalid URL";

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").expect("valid url regex"));

pub fn is_sentinel(value: &str) -> bool {
    value == NOT_AVAILABLE || value == INVALID_URL
}

/// Whether `url` looks like an absolute http(s) link. Sentinels are never valid.
pub fn is_valid_url(url: Option<&str>) -> bool {
    match url {
        None => false,
        Some(u) if u.is_empty() || is_sentinel(u) => false,
        Some(u) => URL_RE.is_match(u.trim()),
    }
}

/// The value a link cell holds after validation: the trimmed URL when valid,
/// sentinels untouched, `Invalid URL` for everything else.
pub fn rewrite_url(url: Option<&str>) -> String {
    match url {
        Some(u) if is_valid_url(Some(u)) => u.trim().to_string(),
        Some(u) if is_sentinel(u) => u.to_string(),
        Some(u) if u.is_empty() => NOT_AVAILABLE.to_string(),
        None => NOT_AVAILABLE.to_string(),
        Some(_) => INVALID_URL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_sentinels_and_junk() {
        for bad in ["", "Not Available", "Invalid URL", "ftp://x.com", "not a url"] {
            assert!(!is_valid_url(Some(bad)), "{bad:?}");
        }
        assert!(!is_valid_url(None));
    }

    #[test]
    fn accepts_http_and_https() {
        assert!(is_valid_url(Some("http://example.com")));
        assert!(is_valid_url(Some("https://www.politifact.com/factchecks/2020/jun/19/x/")));
        assert!(is_valid_url(Some("  https://example.com/a?b=c  ")));
    }

    #[test]
    fn rejects_bad_hosts_and_embedded_spaces() {
        assert!(!is_valid_url(Some("http://")));
        assert!(!is_valid_url(Some("http:///path")));
        assert!(!is_valid_url(Some("https://.example.com")));
        assert!(!is_valid_url(Some("http://x")));
        assert!(!is_valid_url(Some("http://exa mple.com")));
        assert!(!is_valid_url(Some("HTTP://example.com")));
    }

    #[test]
    fn rewrite_policy() {
        assert_eq!(rewrite_url(Some(" https://a.com/x ")), "https://a.com/x");
        assert_eq!(rewrite_url(Some("Not Available")), "Not Available");
        assert_eq!(rewrite_url(Some("Invalid URL")), "Invalid URL");
        assert_eq!(rewrite_url(Some("www.a.com")), "Invalid URL");
        assert_eq!(rewrite_url(None), "Not Available");
    }
}
