use crate::error::ExtractionError;
use crate::parsers::selector;
use crate::results::ImageRecord;
use scraper::Html;

/// Collect every `<img>` with a usable `src`, in document order
pub fn extract_image_data(document: &Html) -> Result<Vec<ImageRecord>, ExtractionError> {
    let sel = selector("img")?;

    let images = document
        .select(&sel)
        .filter_map(|img| {
            let attrs = img.value();
            let src = attrs.attr("src").filter(|src| !src.trim().is_empty())?;
            Some(ImageRecord {
                src: src.to_string(),
                alt: attrs.attr("alt").unwrap_or_default().to_string(),
                title: attrs.attr("title").unwrap_or_default().to_string(),
            })
        })
        .collect::<Vec<_>>();

    ::log::debug!("Image extractor found {} images", images.len());
    Ok(images)
}

/// Parse `html` and collect its images
pub fn extract_image_data_from_html(html: &str) -> Result<Vec<ImageRecord>, ExtractionError> {
    extract_image_data(&Html::parse_document(html))
}
