use crate::error::ExtractionError;
use crate::parsers::{selector, text};
use scraper::{ElementRef, Html};

/// Structural tags that never carry article text
const NOISE_TAGS: &str = "script, style, nav, footer, header, link, meta, noscript, iframe";

/// Boilerplate containers, removed in this order after the noise tags
const NOISE_SELECTORS: [&str; 11] = [
    ".ad",
    ".advertisement",
    ".sidebar",
    ".comments",
    ".navigation",
    ".header",
    ".footer",
    r#"[id*="ad"]"#,
    r#"[class*="ad"]"#,
    r#"[class*="sidebar"]"#,
    r#"[class*="widget"]"#,
];

/// Candidates for the main content node, highest priority first
const MAIN_CONTENT_SELECTORS: [&str; 11] = [
    "main",
    r#"[role="main"]"#,
    ".main-content",
    ".content",
    ".post-content",
    ".article-content",
    ".page-content",
    ".products-wrap",
    "#content",
    ".container",
    "article",
];

/// Extracts the readable main-content text of a document
///
/// Noise is detached from the tree before the main node is chosen, so
/// removed subtrees never contribute text. The result is a newline-joined
/// list of cleaned lines and may be empty.
pub fn extract_main_content(html: &str) -> Result<String, ExtractionError> {
    let mut document = Html::parse_document(html);

    let mut removed = remove_matching(&mut document, NOISE_TAGS)?;
    for css in NOISE_SELECTORS {
        removed += remove_matching(&mut document, css)?;
    }
    ::log::trace!("Removed {} noise nodes", removed);

    let raw = match find_main_node(&document)? {
        Some(main) => join_fragments(main.text()),
        None => {
            // <body> itself was removed; whatever is still attached is the page
            ::log::debug!("No attached <body>, using the whole document");
            join_fragments(
                document
                    .tree
                    .root()
                    .descendants()
                    .filter_map(|node| node.value().as_text())
                    .map(|text| &**text),
            )
        }
    };

    Ok(text::clean_lines(&raw))
}

/// Detach every node matching `css`, returning how many were removed
fn remove_matching(document: &mut Html, css: &str) -> Result<usize, ExtractionError> {
    let sel = selector(css)?;
    let ids: Vec<_> = {
        let current: &Html = document;
        current
            .select(&sel)
            .filter(|element| is_attached(current, *element))
            .map(|element| element.id())
            .collect()
    };

    for id in &ids {
        if let Some(mut node) = document.tree.get_mut(*id) {
            node.detach();
        }
    }

    Ok(ids.len())
}

/// Pick the main content node by fixed priority, falling back to `<body>`.
///
/// `None` means no attached `<body>` is left.
fn find_main_node(document: &Html) -> Result<Option<ElementRef<'_>>, ExtractionError> {
    for css in MAIN_CONTENT_SELECTORS {
        let sel = selector(css)?;
        let candidate = document
            .select(&sel)
            .find(|element| is_attached(document, *element));
        if let Some(candidate) = candidate {
            if candidate.has_children() {
                ::log::debug!("Main content selected by '{}'", css);
                return Ok(Some(candidate));
            }
        }
    }

    let body_sel = selector("body")?;
    let body = document
        .select(&body_sel)
        .find(|element| is_attached(document, *element));
    if body.is_some() {
        ::log::debug!("No main content container, using <body>");
    }
    Ok(body)
}

/// Whether `element` is still reachable from the document root.
///
/// `Html::select` walks every node in the arena, detached ones included.
fn is_attached(document: &Html, element: ElementRef<'_>) -> bool {
    element
        .ancestors()
        .last()
        .is_some_and(|top| top.id() == document.tree.root().id())
}

/// Trimmed text fragments joined with newlines
fn join_fragments<'a>(fragments: impl Iterator<Item = &'a str>) -> String {
    fragments
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
