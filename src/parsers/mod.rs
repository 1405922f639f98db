//! HTML extractors: main content, metadata, images and the page summary
//! a fetcher reports alongside the raw document.

pub mod content;
pub mod html;
pub mod images;
pub mod metadata;
pub mod text;


pub use content::extract_main_content;
pub use html::{PageSummary, summarize};
pub use images::{extract_image_data, extract_image_data_from_html};
pub use metadata::{extract_metadata, extract_metadata_from_document};

use crate::error::ExtractionError;
use scraper::{ElementRef, Selector};

/// Compile one of the extractors' built-in selectors
pub(crate) fn selector(css: &str) -> Result<Selector, ExtractionError> {
    Selector::parse(css).map_err(|e| ExtractionError::InvalidSelector {
        selector: css.to_string(),
        reason: e.to_string(),
    })
}

/// Concatenated text of an element, trimmed
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
