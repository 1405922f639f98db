use crate::error::FetchError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Raw document plus the convenience fields a fetcher derives on the way
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchResult {
    /// URL that was requested
    pub url: String,
    /// Document text, never empty on success
    pub html: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Vec<String>,
    pub links: Vec<String>,
    pub images: Vec<String>,
}

// Define a base trait for fetchers
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Retrieve a single URL; exactly one attempt, no retries
    async fn fetch(&self, url: &str) -> Result<FetchResult, FetchError>;
}
