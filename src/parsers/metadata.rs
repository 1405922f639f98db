//! Page metadata extraction
//!
//! Every scalar field is resolved through a fixed, ordered list of source
//! locations following common web metadata conventions. The first element
//! that yields a non-empty value wins; when none does the field is `None`.

use crate::error::ExtractionError;
use crate::parsers::{element_text, selector};
use crate::results::{Headers, Metadata};
use crate::utils::count_words;
use scraper::{ElementRef, Html};
use std::collections::BTreeMap;

const AUTHOR_SOURCES: [&str; 3] = [
    r#"meta[name="author"]"#,
    r#"meta[property="article:author"]"#,
    r#"meta[property="og:author"]"#,
];

const PUBLISHED_SOURCES: [&str; 5] = [
    r#"meta[property="article:published_time"]"#,
    r#"meta[name="publish_date"]"#,
    r#"meta[name="date"]"#,
    r#"time[itemprop="datePublished"]"#,
    r#"time[class="published"]"#,
];

const MODIFIED_SOURCES: [&str; 3] = [
    r#"meta[property="article:modified_time"]"#,
    r#"meta[name="last-modified"]"#,
    r#"time[itemprop="dateModified"]"#,
];

const CANONICAL_SOURCES: [&str; 2] = [r#"link[rel="canonical"]"#, r#"meta[property="og:url"]"#];

const LANGUAGE_SOURCES: [&str; 2] = [
    r#"meta[http-equiv="content-language"]"#,
    r#"meta[name="language"]"#,
];

/// Extracts the metadata record of a raw HTML document
pub fn extract_metadata(html: &str, base_url: &str) -> Result<Metadata, ExtractionError> {
    let document = Html::parse_document(html);
    extract_metadata_from_document(&document, base_url)
}

/// Extracts the metadata record of an already parsed document
///
/// Values are reported as they appear in the markup; `base_url` is only
/// used for diagnostics.
pub fn extract_metadata_from_document(
    document: &Html,
    base_url: &str,
) -> Result<Metadata, ExtractionError> {
    ::log::trace!("Extracting metadata for {}", base_url);

    let metadata = Metadata {
        author: first_value(document, &AUTHOR_SOURCES, |el| attribute(el, &["content"]))?,
        published: first_value(document, &PUBLISHED_SOURCES, date_value)?,
        modified: first_value(document, &MODIFIED_SOURCES, date_value)?,
        canonical: first_value(document, &CANONICAL_SOURCES, |el| {
            attribute(el, &["href", "content"])
        })?,
        language: language(document)?,
        open_graph: prefixed_map(document, r#"meta[property^="og:"]"#, "property", "og:")?,
        twitter_card: prefixed_map(document, r#"meta[name^="twitter:"]"#, "name", "twitter:")?,
        headers: headers(document)?,
        word_count: word_count(document),
    };

    ::log::debug!(
        "Metadata for {}: {} words, {} headers",
        base_url,
        metadata.word_count,
        metadata.headers.h1.len() + metadata.headers.h2.len() + metadata.headers.h3.len()
    );

    Ok(metadata)
}

/// Walk `sources` in order and return the first value `read` produces
fn first_value<F>(
    document: &Html,
    sources: &[&str],
    read: F,
) -> Result<Option<String>, ExtractionError>
where
    F: Fn(ElementRef<'_>) -> Option<String>,
{
    for css in sources {
        let sel = selector(css)?;
        if let Some(value) = document.select(&sel).find_map(&read) {
            return Ok(Some(value));
        }
    }
    Ok(None)
}

/// First non-blank attribute among `names`, returned as written
fn attribute(element: ElementRef<'_>, names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| element.value().attr(name))
        .find(|value| !value.trim().is_empty())
        .map(String::from)
}

/// `content`, else `datetime`, else the element's own text
fn date_value(element: ElementRef<'_>) -> Option<String> {
    attribute(element, &["content", "datetime"]).or_else(|| {
        let text = element_text(element);
        (!text.is_empty()).then_some(text)
    })
}

fn language(document: &Html) -> Result<Option<String>, ExtractionError> {
    let lang = document
        .root_element()
        .value()
        .attr("lang")
        .map(str::trim)
        .filter(|lang| !lang.is_empty());

    match lang {
        Some(lang) => Ok(Some(lang.to_string())),
        None => first_value(document, &LANGUAGE_SOURCES, |el| attribute(el, &["content"])),
    }
}

/// Collect `content` values of elements whose `attr` starts with `prefix`,
/// keyed by the remainder of the attribute
fn prefixed_map(
    document: &Html,
    css: &str,
    attr: &str,
    prefix: &str,
) -> Result<Option<BTreeMap<String, String>>, ExtractionError> {
    let sel = selector(css)?;
    let mut map = BTreeMap::new();

    for element in document.select(&sel) {
        let Some(name) = element.value().attr(attr) else {
            continue;
        };
        let key = name.strip_prefix(prefix).unwrap_or(name).trim();
        let value = element.value().attr("content").unwrap_or("").trim();
        if key.is_empty() || value.is_empty() {
            continue;
        }
        map.insert(key.to_string(), value.to_string());
    }

    Ok((!map.is_empty()).then_some(map))
}

fn headers(document: &Html) -> Result<Headers, ExtractionError> {
    let texts = |css: &str| -> Result<Vec<String>, ExtractionError> {
        let sel = selector(css)?;
        Ok(document.select(&sel).map(element_text).collect())
    };

    Ok(Headers {
        h1: texts("h1")?,
        h2: texts("h2")?,
        h3: texts("h3")?,
    })
}

/// Word count over every text node in the document
fn word_count(document: &Html) -> usize {
    let text = document.root_element().text().collect::<Vec<_>>().join(" ");
    count_words(&text)
}
