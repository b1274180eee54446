//! HTML link extraction
//!
//! Pulls raw href strings out of `<a>` tags; resolving them against the
//! source page is the filter pipeline's job, so the values returned here
//! are exactly what the markup contained.

use scraper::{Html, Selector};

/// Extracts the raw hrefs from a page
///
/// **Skipped:** empty hrefs, fragment-only anchors, and `javascript:`,
/// `mailto:`, `tel:` and `data:` links, none of which can become crawlable
/// URLs.
///
/// # Example
///
/// ```
/// use spindle::crawler::extract_hrefs;
///
/// let html = r#"<html><body><a href="/page">Link</a></body></html>"#;
/// assert_eq!(extract_hrefs(html), vec!["/page".to_string()]);
/// ```
pub fn extract_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(_) => return Vec::new(),
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty() && !is_uncrawlable(href))
        .map(str::to_string)
        .collect()
}

fn is_uncrawlable(href: &str) -> bool {
    href.starts_with('#')
        || href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
}
