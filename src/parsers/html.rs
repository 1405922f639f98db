use crate::error::ExtractionError;
use crate::parsers::{element_text, selector};
use scraper::Html;
use std::collections::HashSet;
use url::Url;

/// Convenience fields a fetcher reports next to the raw document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSummary {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Vec<String>,
    /// Absolute link targets, first occurrence order
    pub links: Vec<String>,
    /// Absolute image sources, first occurrence order
    pub images: Vec<String>,
}

/// Parses HTML content to extract title, description, keywords, links and images
///
/// Relative links and image sources are resolved against `page_url`.
pub fn summarize(html: &str, page_url: &Url) -> Result<PageSummary, ExtractionError> {
    let doc = Html::parse_document(html);

    let title = doc
        .select(&selector("title")?)
        .next()
        .map(element_text)
        .filter(|title| !title.is_empty());

    let description = doc
        .select(&selector(r#"meta[name="description"]"#)?)
        .filter_map(|e| e.value().attr("content"))
        .map(str::trim)
        .find(|d| !d.is_empty())
        .map(String::from);

    let keywords = doc
        .select(&selector(r#"meta[name="keywords"]"#)?)
        .next()
        .and_then(|e| e.value().attr("content"))
        .map(split_keywords)
        .unwrap_or_default();

    let link_selector = selector("a[href]")?;
    let hrefs = doc
        .select(&link_selector)
        .filter_map(|e| e.value().attr("href"));
    let links = resolve_unique(hrefs, page_url);

    let image_selector = selector("img[src]")?;
    let srcs = doc
        .select(&image_selector)
        .filter_map(|e| e.value().attr("src"));
    let images = resolve_unique(srcs, page_url);

    // Log the number of links found
    ::log::debug!("HTML parser found {} links", links.len());
    if !links.is_empty() {
        ::log::trace!(
            "First few links: {:?}",
            links.iter().take(5).collect::<Vec<_>>()
        );
    }

    Ok(PageSummary {
        title,
        description,
        keywords,
        links,
        images,
    })
}

fn split_keywords(content: &str) -> Vec<String> {
    content
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect()
}

/// Resolve references against `base`, keeping http(s) targets once each
fn resolve_unique<'a>(refs: impl Iterator<Item = &'a str>, base: &Url) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut resolved = Vec::new();

    for raw in refs {
        let raw = raw.trim();
        if raw.is_empty() || raw.starts_with('#') {
            continue;
        }

        let Ok(mut url) = base.join(raw) else {
            ::log::trace!("Skipping unresolvable reference: {}", raw);
            continue;
        };
        if !matches!(url.scheme(), "http" | "https") {
            continue;
        }

        url.set_fragment(None);
        let url = url.to_string();
        if seen.insert(url.clone()) {
            resolved.push(url);
        }
    }

    resolved
}
