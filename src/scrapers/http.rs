use crate::config::ScraperConfig;
use crate::error::FetchError;
use crate::parsers::html;
use crate::scrapers::fetcher::{FetchResult, Fetcher};
use async_trait::async_trait;
use regex::Regex;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, redirect};
use std::sync::LazyLock;
use url::Url;

/// Phrases that give away bot walls and rate-limit pages
#[allow(clippy::expect_used)]
static BLOCKING_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)captcha|access denied|blocked|too many requests|rate limit|suspicious activity",
    )
    .expect("valid regex")
});

/// Fetches pages over plain HTTP(S); no JavaScript is executed
pub struct HttpFetcher {
    client: Client,
    reject_blocked_pages: bool,
}

impl HttpFetcher {
    /// Build a fetcher with browser-like default headers
    pub fn new(config: &ScraperConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(header::DNT, HeaderValue::from_static("1"));
        headers.insert(header::UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            // the whole fetch is bounded by the batch runner's timeout
            .connect_timeout(config.fetch_timeout())
            .redirect(redirect::Policy::limited(10))
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            reject_blocked_pages: config.reject_blocked_pages,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResult, FetchError> {
        let parsed = validate_url(url)?;

        ::log::debug!("GET {}", parsed);
        let response = self.client.get(parsed).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let final_url = response.url().clone();
        let html = response.text().await?;
        if html.trim().is_empty() {
            return Err(FetchError::EmptyBody(url.to_string()));
        }

        if self.reject_blocked_pages {
            if let Some(keyword) = find_blocking_keyword(&html) {
                return Err(FetchError::Blocked {
                    url: url.to_string(),
                    keyword,
                });
            }
        }

        let summary = html::summarize(&html, &final_url)?;

        Ok(FetchResult {
            url: url.to_string(),
            html,
            title: summary.title,
            description: summary.description,
            keywords: summary.keywords,
            links: summary.links,
            images: summary.images,
        })
    }
}

/// Accept only absolute http(s) URLs
fn validate_url(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(FetchError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{}'", scheme),
        }),
    }
}

/// First blocking phrase in `body`, lowercased
fn find_blocking_keyword(body: &str) -> Option<String> {
    BLOCKING_KEYWORDS
        .find(body)
        .map(|m| m.as_str().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::scrape_url;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://example.com/page").is_ok());
        assert!(validate_url("http://example.com").is_ok());
        assert!(matches!(
            validate_url("ftp://example.com/file"),
            Err(FetchError::InvalidUrl { .. })
        ));
        assert!(matches!(
            validate_url("not a url"),
            Err(FetchError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_find_blocking_keyword() {
        assert_eq!(
            find_blocking_keyword("<h1>Please solve the CAPTCHA</h1>").as_deref(),
            Some("captcha")
        );
        assert_eq!(
            find_blocking_keyword("<p>Access Denied</p>").as_deref(),
            Some("access denied")
        );
        assert_eq!(find_blocking_keyword("<p>A normal article</p>"), None);
    }

    #[tokio::test]
    async fn test_stalled_server_reports_fetch_timeout() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        // accept connections and never answer
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let config = ScraperConfig::default().with_fetch_timeout(1);
        let fetcher = HttpFetcher::new(&config).unwrap();
        let url = format!("http://{}/", addr);
        let result = scrape_url(&fetcher, &url, config.fetch_timeout()).await;

        assert_eq!(result.error(), Some("Fetch timed out after 1s"));
    }

    #[tokio::test]
    async fn test_fetch_rejects_invalid_url_without_network() {
        let fetcher = HttpFetcher::new(&ScraperConfig::default()).unwrap();
        let err = fetcher.fetch("mailto:someone@example.com").await.unwrap_err();
        assert!(err.to_string().contains("unsupported scheme 'mailto'"));
    }
}
