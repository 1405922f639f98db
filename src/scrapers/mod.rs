pub mod batch;
pub mod fetcher;
pub mod http;

pub use batch::{scrape_all, scrape_url};
pub use fetcher::{FetchResult, Fetcher};
pub use http::HttpFetcher;
