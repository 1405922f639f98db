use thiserror::Error;

/// Failures at the fetcher boundary
#[derive(Error, Debug)]
pub enum FetchError {
    /// URL could not be parsed or uses an unsupported scheme
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Transport-level failure (DNS, TLS, connection reset, ...)
    #[error("Request failed: {0}")]
    Request(String),

    /// Server answered with a non-success status
    #[error("HTTP error {status} for {url}")]
    HttpStatus { status: u16, url: String },

    /// Response carried no document text
    #[error("Empty response body for {0}")]
    EmptyBody(String),

    /// Response looks like a bot-wall or rate-limit page
    #[error("Blocked on {url} by '{keyword}'")]
    Blocked { url: String, keyword: String },

    /// Fetch did not finish within the configured timeout
    #[error("Fetch timed out after {0}s")]
    Timeout(u64),

    /// Page summary could not be derived from the document
    #[error("Failed to summarize page: {0}")]
    Summary(#[from] ExtractionError),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Request(err.to_string())
    }
}

/// Failures inside the HTML extractors
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A built-in CSS selector failed to compile
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// Document could not be processed
    #[error("Content parsing failed: {0}")]
    ParsingFailed(String),
}

/// Everything that can go wrong while scraping a single URL
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// The worker pool could not run the task to completion
    #[error("Executor error: {0}")]
    Dispatch(String),
}

/// Configuration loading failures
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}
