use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Header outline of a page, one list per level in document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headers {
    pub h1: Vec<String>,
    pub h2: Vec<String>,
    pub h3: Vec<String>,
}

/// Structured metadata pulled from a page's markup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub author: Option<String>,

    /// Raw date text, not normalized
    pub published: Option<String>,

    pub modified: Option<String>,

    pub canonical: Option<String>,

    pub language: Option<String>,

    /// `og:*` properties with the prefix stripped; `None` when the page has none
    pub open_graph: Option<BTreeMap<String, String>>,

    /// `twitter:*` names with the prefix stripped; `None` when the page has none
    pub twitter_card: Option<BTreeMap<String, String>>,

    pub headers: Headers,

    /// Whitespace-delimited tokens longer than two characters
    pub word_count: usize,
}

/// Links split by whether they stay on the page's host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkClassification {
    pub internal: Vec<String>,
    pub external: Vec<String>,
    pub internal_count: usize,
    pub external_count: usize,
}

impl LinkClassification {
    pub fn new(internal: Vec<String>, external: Vec<String>) -> Self {
        Self {
            internal_count: internal.len(),
            external_count: external.len(),
            internal,
            external,
        }
    }
}

/// An `<img>` with a usable source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub src: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub title: String,
}

/// Everything gathered for a successfully scraped page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData {
    /// URL of the page as requested
    pub url: String,

    pub title: Option<String>,

    pub description: Option<String>,

    /// Denoised main-content text
    pub content: String,

    pub keywords: Vec<String>,

    #[serde(flatten)]
    pub metadata: Metadata,

    /// Every link the fetcher found, unclassified
    pub links: Vec<String>,

    pub internal_links: Vec<String>,

    pub external_links: Vec<String>,

    pub internal_link_count: usize,

    pub external_link_count: usize,

    /// Image URLs as reported by the fetcher
    pub images: Vec<String>,

    /// Per-image detail taken from the markup
    pub image_data: Vec<ImageRecord>,
}

/// Per-URL output envelope: the full record or the reason there is none
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScrapeResult {
    Failure { url: String, error: String },
    Success(Box<PageData>),
}

impl ScrapeResult {
    /// Create an error record for a URL
    pub fn failure(url: impl Into<String>, error: impl ToString) -> Self {
        ScrapeResult::Failure {
            url: url.into(),
            error: error.to_string(),
        }
    }

    pub fn url(&self) -> &str {
        match self {
            ScrapeResult::Success(page) => &page.url,
            ScrapeResult::Failure { url, .. } => url,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ScrapeResult::Success(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ScrapeResult::Success(_) => None,
            ScrapeResult::Failure { error, .. } => Some(error),
        }
    }
}
