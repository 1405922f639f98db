use crate::results::LinkClassification;
use regex::Regex;
use std::sync::LazyLock;
use url::{ParseError, Url};

/// Characters that can never appear in a relative reference
#[allow(clippy::expect_used)]
static INVALID_REFERENCE_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[\s\x00-\x1f\x7f<>"{}|\\^`]"#).expect("valid regex")
});

/// Split links into those on the base URL's host and everything else
///
/// A link with an empty host (relative references, `mailto:` and friends)
/// counts as internal. Hosts are compared exactly as written, case
/// included, with only the port and userinfo set aside. Links that cannot be
/// parsed are dropped from both sides. Input order and duplicates are kept.
pub fn categorize_links<S: AsRef<str>>(links: &[S], base_url: &str) -> LinkClassification {
    let base_host = Url::parse(base_url)
        .map(|url| written_host(base_url, &url))
        .unwrap_or_default();

    let mut internal = Vec::new();
    let mut external = Vec::new();

    for link in links {
        let link = link.as_ref();
        match link_host(link) {
            Some(host) if host.is_empty() || host == base_host => internal.push(link.to_string()),
            Some(_) => external.push(link.to_string()),
            None => ::log::trace!("Dropping unparseable link: {:?}", link),
        }
    }

    ::log::debug!(
        "Classified links for {}: {} internal, {} external",
        base_url,
        internal.len(),
        external.len()
    );

    LinkClassification::new(internal, external)
}

/// Host component of a link, empty when it has none, `None` when unparseable
fn link_host(link: &str) -> Option<String> {
    match Url::parse(link) {
        Ok(url) => Some(written_host(link, &url)),
        Err(ParseError::RelativeUrlWithoutBase) if link.starts_with("//") => {
            // scheme-relative: the authority is still there
            Url::parse(&format!("http:{}", link))
                .ok()
                .map(|url| written_host(link, &url))
        }
        Err(ParseError::RelativeUrlWithoutBase) if is_relative_reference(link) => {
            Some(String::new())
        }
        Err(_) => None,
    }
}

/// The host of an already-validated URL as it appears in `raw`.
///
/// `Url` lowercases and punycodes hosts, so it only decides whether a host
/// exists; the text itself comes from the authority in `raw`.
fn written_host(raw: &str, parsed: &Url) -> String {
    let Some(normalized) = parsed.host_str() else {
        return String::new();
    };

    raw_authority_host(raw).unwrap_or(normalized).to_string()
}

fn raw_authority_host(raw: &str) -> Option<&str> {
    let start = raw.find("//")? + 2;
    let authority = raw[start..].split(['/', '?', '#']).next()?;
    let host_port = authority.rsplit('@').next()?;

    let host = if host_port.starts_with('[') {
        let end = host_port.find(']')?;
        &host_port[..=end]
    } else {
        host_port.split(':').next()?
    };

    (!host.is_empty()).then_some(host)
}

fn is_relative_reference(link: &str) -> bool {
    !INVALID_REFERENCE_CHARS.is_match(link)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_links() {
        let links = ["/a", "https://example.com/b", "https://other.com/c", "not a url"];
        let result = categorize_links(&links, "https://example.com/page");

        assert_eq!(result.internal, vec!["/a", "https://example.com/b"]);
        assert_eq!(result.external, vec!["https://other.com/c"]);
        assert_eq!(result.internal_count, 2);
        assert_eq!(result.external_count, 1);
    }

    #[test]
    fn test_subdomains_are_external() {
        let links = ["https://blog.example.com/x", "https://example.com:8080/y"];
        let result = categorize_links(&links, "https://example.com/");
        assert_eq!(result.internal, vec!["https://example.com:8080/y"]);
        assert_eq!(result.external, vec!["https://blog.example.com/x"]);
    }

    #[test]
    fn test_host_case_is_significant() {
        let links = [
            "https://EXAMPLE.com/b",
            "https://example.com/c",
            "//Example.com/d",
            "https://user@example.com:8443/e",
        ];
        let result = categorize_links(&links, "https://example.com/page");
        assert_eq!(
            result.internal,
            vec!["https://example.com/c", "https://user@example.com:8443/e"]
        );
        assert_eq!(result.external, vec!["https://EXAMPLE.com/b", "//Example.com/d"]);

        let upper_base = categorize_links(&["https://Example.com/x"], "https://Example.com/");
        assert_eq!(upper_base.internal, vec!["https://Example.com/x"]);
    }

    #[test]
    fn test_hostless_schemes_are_internal() {
        let links = ["mailto:someone@example.org", "#section", "page.html?x=1"];
        let result = categorize_links(&links, "https://example.com/");
        assert_eq!(result.internal.len(), 3);
        assert!(result.external.is_empty());
    }

    #[test]
    fn test_scheme_relative_links() {
        let links = ["//example.com/local", "//cdn.other.net/lib.js"];
        let result = categorize_links(&links, "https://example.com/");
        assert_eq!(result.internal, vec!["//example.com/local"]);
        assert_eq!(result.external, vec!["//cdn.other.net/lib.js"]);
    }

    #[test]
    fn test_duplicates_and_order_preserved() {
        let links = vec![
            "https://other.com/1".to_string(),
            "/x".to_string(),
            "https://other.com/1".to_string(),
            "/x".to_string(),
        ];
        let result = categorize_links(&links, "https://example.com/");
        assert_eq!(result.internal, vec!["/x", "/x"]);
        assert_eq!(result.external, vec!["https://other.com/1", "https://other.com/1"]);
    }

    #[test]
    fn test_malformed_links_dropped() {
        let links = ["https://exa mple.com/", "http://[::1", "/ok", "/bad<tag>"];
        let result = categorize_links(&links, "https://example.com/");
        assert_eq!(result.internal, vec!["/ok"]);
        assert!(result.external.is_empty());
    }

    #[test]
    fn test_unparseable_base_treats_hosted_links_as_external() {
        let links = ["/a", "https://example.com/b"];
        let result = categorize_links(&links, "not a base");
        assert_eq!(result.internal, vec!["/a"]);
        assert_eq!(result.external, vec!["https://example.com/b"]);
    }
}
