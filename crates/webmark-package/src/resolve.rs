//! Resolving image references against the page they were found on.

use tracing::warn;
use url::Url;

/// Resolve `url` against `page_url`.
///
/// `http://` and `https://` URLs are kept as written. Anything else is joined
/// onto the page URL; when that fails the reference is returned unchanged.
pub fn resolve_url(url: &str, page_url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        return url.to_string();
    }

    match Url::parse(page_url).and_then(|base| base.join(url)) {
        Ok(resolved) => resolved.to_string(),
        Err(err) => {
            warn!(%url, %page_url, %err, "could not resolve image url");
            url.to_string()
        }
    }
}
