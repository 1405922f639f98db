use clap::Parser;
use harvest_page::{ConfigError, ScraperConfig};

#[derive(Parser, Debug)]
#[command(name = "harvest-page")]
#[command(about = "Fetches a batch of URLs and prints extracted content and metadata as JSON")]
#[command(version)]
pub struct Args {
    /// JSON array of URLs to scrape, e.g. '["https://example.com"]'
    pub urls: String,

    /// Number of concurrent workers (overrides SCRAPER_MAX_WORKERS)
    #[arg(short, long)]
    pub concurrency: Option<usize>,

    /// Per-fetch timeout in seconds (overrides SCRAPER_FETCH_TIMEOUT_SECS)
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Path to a JSON configuration file
    #[arg(long)]
    pub config_file: Option<String>,

    /// Treat captcha and rate-limit pages as errors
    #[arg(long)]
    pub reject_blocked: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl Args {
    /// Decode the positional URL list
    pub fn url_list(&self) -> Result<Vec<String>, serde_json::Error> {
        serde_json::from_str(&self.urls)
    }

    /// Resolve configuration: file (or defaults), then environment, then flags
    pub fn resolve_config(&self) -> Result<ScraperConfig, ConfigError> {
        let mut config = match &self.config_file {
            Some(path) => ScraperConfig::from_file(path)?.with_process_env(),
            None => ScraperConfig::from_env(),
        };

        if let Some(concurrency) = self.concurrency {
            config.max_workers = concurrency;
        }
        if let Some(timeout) = self.timeout {
            config.fetch_timeout_secs = timeout;
        }
        if self.reject_blocked {
            config.reject_blocked_pages = true;
        }

        config.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let args = Args::parse_from([
            "harvest-page",
            r#"["https://a.example","https://b.example"]"#,
            "-c",
            "3",
            "--pretty",
        ]);
        assert_eq!(args.url_list().unwrap().len(), 2);
        assert_eq!(args.concurrency, Some(3));
        assert!(args.pretty);
        assert!(!args.reject_blocked);
    }

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from(["harvest-page", "[]", "--concurrency", "2", "--timeout", "5"]);
        let config = args.resolve_config().unwrap();
        assert_eq!(config.max_workers, 2);
        assert_eq!(config.fetch_timeout_secs, 5);
    }

    #[test]
    fn test_without_flags_config_comes_from_env() {
        let args = Args::parse_from(["harvest-page", "[]"]);
        let config = args.resolve_config().unwrap();
        assert_eq!(config, ScraperConfig::from_env());
    }

    #[test]
    fn test_zero_concurrency_is_rejected() {
        let args = Args::parse_from(["harvest-page", "[]", "-c", "0"]);
        assert!(args.resolve_config().is_err());
    }

    #[test]
    fn test_url_list_must_be_string_array() {
        let args = Args::parse_from(["harvest-page", r#"{"url": "x"}"#]);
        assert!(args.url_list().is_err());
    }
}
