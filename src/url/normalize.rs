use crate::{UrlError, UrlResult};
use url::Url;

/// Resolves a raw href against its source page into a canonical absolute URL
///
/// # Resolution Steps
///
/// 1. Join the href against the base URL using standard relative-URL
///    resolution (handles `/abs/path`, `./rel`, `../rel`, bare query and
///    fragment forms)
/// 2. Reject anything that is not `http` or `https` after resolution
/// 3. Require a host component
/// 4. Remove the fragment: the canonical form used as a frontier key is
///    `scheme://host/path[?query]`
///
/// The `url` crate is permissive about messy hrefs; an href it still cannot
/// resolve yields `UrlError::Resolve` and the caller drops the link.
///
/// # Arguments
///
/// * `href` - The raw href as found in the page
/// * `base` - The URL of the page the href was found on
///
/// # Examples
///
/// ```
/// use spindle::resolve;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/dir/page").unwrap();
/// let url = resolve("../other", &base).unwrap();
/// assert_eq!(url.as_str(), "https://example.com/other");
/// ```
pub fn resolve(href: &str, base: &Url) -> UrlResult<Url> {
    let mut url = base
        .join(href)
        .map_err(|e| UrlError::Resolve(format!("{}: {}", href, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    url.set_fragment(None);

    Ok(url)
}

/// Reduces a URL to `scheme://host/path`, discarding query and fragment
///
/// Used by the StripQuery pipeline stage so that syntactically different
/// links to the same resource collapse during deduplication.
pub fn strip_query(url: &Url) -> Url {
    let mut stripped = url.clone();
    stripped.set_query(None);
    stripped.set_fragment(None);
    stripped
}
