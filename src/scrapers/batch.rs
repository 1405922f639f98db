use crate::config::ScraperConfig;
use crate::error::{FetchError, ScrapeError};
use crate::links::categorize_links;
use crate::parsers::{extract_image_data, extract_main_content, extract_metadata_from_document};
use crate::results::{PageData, ScrapeResult};
use crate::scrapers::fetcher::{FetchResult, Fetcher};
use futures::stream::{FuturesUnordered, StreamExt};
use scraper::Html;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

/// Scrapes every URL and returns one result per URL in completion order.
///
/// # Arguments
///
/// * `urls` - URLs to visit, each exactly once
/// * `fetcher` - Retrieval capability shared by all tasks
/// * `config` - Pool size and per-fetch timeout
pub async fn scrape_all<F>(
    urls: &[String],
    fetcher: Arc<F>,
    config: &ScraperConfig,
) -> Vec<ScrapeResult>
where
    F: Fetcher + ?Sized + 'static,
{
    let fetch_timeout = config.fetch_timeout();

    match urls {
        [] => Vec::new(),
        // a lone URL skips the pool but still runs as its own task
        [url] => {
            let task_url = url.clone();
            let handle = tokio::spawn(async move {
                scrape_url(fetcher.as_ref(), &task_url, fetch_timeout).await
            });
            vec![supervise(url.clone(), handle).await]
        }
        _ => scrape_pooled(urls, fetcher, config.max_workers, fetch_timeout).await,
    }
}

/// Runs one task per URL with at most `max_workers` in flight
async fn scrape_pooled<F>(
    urls: &[String],
    fetcher: Arc<F>,
    max_workers: usize,
    fetch_timeout: Duration,
) -> Vec<ScrapeResult>
where
    F: Fetcher + ?Sized + 'static,
{
    ::log::info!(
        "Scraping {} URLs with {} workers",
        urls.len(),
        max_workers
    );
    let started = Instant::now();

    let semaphore = Arc::new(Semaphore::new(max_workers.max(1)));
    let mut pending = FuturesUnordered::new();

    for url in urls {
        let handle = tokio::spawn(run_task(
            Arc::clone(&fetcher),
            Arc::clone(&semaphore),
            url.clone(),
            fetch_timeout,
        ));

        pending.push(supervise(url.clone(), handle));
    }

    let mut results = Vec::with_capacity(urls.len());
    while let Some(result) = pending.next().await {
        results.push(result);
    }

    let failed = results.iter().filter(|r| !r.is_success()).count();
    ::log::info!(
        "Scraped {} URLs ({} failed) in {:.2} seconds",
        results.len(),
        failed,
        started.elapsed().as_secs_f64()
    );

    results
}

/// Awaits a scrape task; a panicked or cancelled task still yields a record for `url`
async fn supervise(url: String, handle: JoinHandle<ScrapeResult>) -> ScrapeResult {
    match handle.await {
        Ok(result) => result,
        Err(e) => {
            ::log::error!("Task for {} did not complete: {}", url, e);
            ScrapeResult::failure(url, ScrapeError::Dispatch(e.to_string()))
        }
    }
}

/// Waits for a worker slot, then scrapes one URL
async fn run_task<F>(
    fetcher: Arc<F>,
    semaphore: Arc<Semaphore>,
    url: String,
    fetch_timeout: Duration,
) -> ScrapeResult
where
    F: Fetcher + ?Sized,
{
    let _permit = match semaphore.acquire_owned().await {
        Ok(permit) => permit,
        Err(e) => return ScrapeResult::failure(url, ScrapeError::Dispatch(e.to_string())),
    };
    ::log::trace!("Acquired worker slot for {}", url);

    scrape_url(fetcher.as_ref(), &url, fetch_timeout).await
}

/// Fetches and extracts a single URL, turning any failure into an error record
pub async fn scrape_url<F>(fetcher: &F, url: &str, fetch_timeout: Duration) -> ScrapeResult
where
    F: Fetcher + ?Sized,
{
    let started = Instant::now();

    let outcome = match fetch_with_timeout(fetcher, url, fetch_timeout).await {
        Ok(fetched) => build_page(url, fetched),
        Err(e) => Err(e.into()),
    };

    match outcome {
        Ok(page) => {
            ::log::debug!(
                "Processed {} in {:.2} seconds",
                url,
                started.elapsed().as_secs_f64()
            );
            ScrapeResult::Success(Box::new(page))
        }
        Err(e) => {
            ::log::warn!("Failed to scrape {}: {}", url, e);
            ScrapeResult::failure(url, e)
        }
    }
}

async fn fetch_with_timeout<F>(
    fetcher: &F,
    url: &str,
    fetch_timeout: Duration,
) -> Result<FetchResult, FetchError>
where
    F: Fetcher + ?Sized,
{
    match tokio::time::timeout(fetch_timeout, fetcher.fetch(url)).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout(fetch_timeout.as_secs())),
    }
}

/// Runs every extractor over a fetched document and assembles the record
fn build_page(url: &str, fetched: FetchResult) -> Result<PageData, ScrapeError> {
    let content = extract_main_content(&fetched.html)?;

    let document = Html::parse_document(&fetched.html);
    let metadata = extract_metadata_from_document(&document, url)?;
    let image_data = extract_image_data(&document)?;

    let links = categorize_links(&fetched.links, url);

    Ok(PageData {
        url: url.to_string(),
        title: fetched.title,
        description: fetched.description,
        content,
        keywords: fetched.keywords,
        metadata,
        links: fetched.links,
        internal_links: links.internal,
        external_links: links.external,
        internal_link_count: links.internal_count,
        external_link_count: links.external_count,
        images: fetched.images,
        image_data,
    })
}
