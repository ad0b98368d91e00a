//! HTML metadata extraction
//!
//! Pulls page metadata out of parsed HTML using precompiled CSS selectors.
//! Extraction is tolerant of missing tags; it only fails when the document
//! contains nothing extractable at all.

use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::{Error, Result};
use crate::models::{OpenGraphData, PageMetadata};

// Helper macro to parse selectors safely at compile time
macro_rules! parse_selector {
    ($s:expr) => {
        Selector::parse($s).expect(concat!("Invalid CSS selector: ", $s))
    };
}

lazy_static! {
    static ref TITLE: Selector = parse_selector!("head title, title");
    static ref DESCRIPTION: Selector = parse_selector!(r#"meta[name="description"]"#);
    static ref KEYWORDS: Selector = parse_selector!(r#"meta[name="keywords"]"#);
    static ref ICON: Selector = parse_selector!(r#"link[rel~="icon"]"#);
    static ref OG_TITLE: Selector = parse_selector!(r#"meta[property="og:title"]"#);
    static ref OG_DESCRIPTION: Selector = parse_selector!(r#"meta[property="og:description"]"#);
    static ref OG_IMAGE: Selector = parse_selector!(r#"meta[property="og:image"]"#);
    static ref OG_URL: Selector = parse_selector!(r#"meta[property="og:url"]"#);
}

/// Extract page metadata from an HTML document
///
/// `base` is the URL the document was retrieved from (after redirects) and
/// is used to resolve relative favicon references.
///
/// # Errors
///
/// Returns `Error::ExtractionFailed` when the document yields no title, no
/// description, no keywords, no favicon and no Open Graph fields.
pub fn extract_metadata(html: &str, base: &Url) -> Result<PageMetadata> {
    let document = Html::parse_document(html);

    let metadata = PageMetadata {
        title: first_text(&document, &TITLE),
        description: first_content(&document, &DESCRIPTION),
        keywords: split_keywords(first_content(&document, &KEYWORDS)),
        favicon: favicon_url(&document, base),
        open_graph: OpenGraphData {
            title: first_content(&document, &OG_TITLE),
            description: first_content(&document, &OG_DESCRIPTION),
            image: first_content(&document, &OG_IMAGE),
            url: first_content(&document, &OG_URL),
        },
    };

    if metadata.is_empty() {
        return Err(Error::extraction_failed(
            base.as_str(),
            "no extractable metadata in document",
        ));
    }

    Ok(metadata)
}

/// Text content of the first element matching `selector`, trimmed
fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .map(|element| element.text().collect::<String>())
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// `content` attribute of the first element matching `selector`, trimmed
fn first_content(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|element| attr_value(element, "content"))
}

fn attr_value(element: ElementRef<'_>, name: &str) -> Option<String> {
    element
        .value()
        .attr(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Comma-separated keywords, order preserved, duplicates kept
fn split_keywords(raw: Option<String>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|keyword| !keyword.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Favicon href resolved against the page URL
fn favicon_url(document: &Html, base: &Url) -> Option<String> {
    let href = document
        .select(&ICON)
        .next()
        .and_then(|element| attr_value(element, "href"))?;

    base.join(&href).ok().map(String::from)
}
