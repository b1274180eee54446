use url::Url;

/// Extracts the host from a URL
///
/// Returns the lowercase host portion, or None for URLs without a host
/// (which resolution already rejects for discovered links).
///
/// # Examples
///
/// ```
/// use url::Url;
/// use spindle::extract_host;
///
/// let url = Url::parse("https://Example.COM/path").unwrap();
/// assert_eq!(extract_host(&url), Some("example.com".to_string()));
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}
