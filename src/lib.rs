// Re-export modules
pub mod config;
pub mod error;
pub mod links;
pub mod parsers;
pub mod results;
pub mod scrapers;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::ScraperConfig;
pub use error::{ConfigError, ExtractionError, FetchError, ScrapeError};
pub use links::categorize_links;
pub use results::{Headers, ImageRecord, LinkClassification, Metadata, PageData, ScrapeResult};
pub use scrapers::{FetchResult, Fetcher, HttpFetcher};

use std::sync::Arc;

/// Main builder for batch scrapes
pub struct Scraper<F: Fetcher + ?Sized> {
    fetcher: Arc<F>,
    config: ScraperConfig,
}

impl<F: Fetcher + ?Sized + 'static> Scraper<F> {
    /// Create a new Scraper around a fetcher with default settings
    pub fn new(fetcher: Arc<F>) -> Self {
        Self {
            fetcher,
            config: ScraperConfig::default(),
        }
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: ScraperConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the maximum number of concurrent workers
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.config.max_workers = max_workers;
        self
    }

    /// Set the per-fetch timeout
    pub fn with_fetch_timeout(mut self, timeout_seconds: u64) -> Self {
        self.config.fetch_timeout_secs = timeout_seconds;
        self
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Scrape every URL; the output holds exactly one result per input URL
    pub async fn scrape_all(&self, urls: &[String]) -> Vec<ScrapeResult> {
        scrapers::scrape_all(urls, Arc::clone(&self.fetcher), &self.config).await
    }
}

impl Scraper<HttpFetcher> {
    /// Scraper backed by the HTTP fetcher built from `config`
    pub fn http(config: ScraperConfig) -> Result<Self, FetchError> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self::new(Arc::new(fetcher)).with_config(config))
    }
}
