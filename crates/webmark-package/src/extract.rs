//! Finding `![alt](url)` references in Markdown text.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").expect("image pattern is valid"));

/// One image reference found in the Markdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    /// Text between the brackets
    pub alt: String,
    /// Target between the parentheses, as written
    pub url: String,
    /// The exact `![alt](url)` substring that was matched
    pub span: String,
}

/// Scan left to right for image references worth downloading.
///
/// Data URIs are already inline and `.svg` targets are left remote.
pub fn extract_image_refs(markdown: &str) -> Vec<ImageRef> {
    IMAGE_RE
        .captures_iter(markdown)
        .filter_map(|caps| image_ref(&caps))
        .collect()
}

/// Rebuild `markdown`, letting `replace` substitute each packable reference.
///
/// `replace` returns `None` to keep a reference as written. All other text is
/// copied verbatim, so the result does not depend on the order in which
/// replacements were decided.
pub fn rewrite_image_refs<F>(markdown: &str, mut replace: F) -> String
where
    F: FnMut(&ImageRef) -> Option<String>,
{
    let mut result = String::with_capacity(markdown.len());
    let mut last_match_end = 0;

    for caps in IMAGE_RE.captures_iter(markdown) {
        let Some(m) = caps.get(0) else { continue };
        let Some(replacement) = image_ref(&caps).and_then(|image| replace(&image)) else {
            continue;
        };

        result.push_str(&markdown[last_match_end..m.start()]);
        result.push_str(&replacement);
        last_match_end = m.end();
    }

    result.push_str(&markdown[last_match_end..]);
    result
}

fn image_ref(caps: &Captures<'_>) -> Option<ImageRef> {
    let span = caps.get(0)?.as_str();
    let alt = caps.get(1)?.as_str();
    let url = caps.get(2)?.as_str();

    if url.starts_with("data:") || url.ends_with(".svg") {
        return None;
    }

    Some(ImageRef {
        alt: alt.to_string(),
        url: url.to_string(),
        span: span.to_string(),
    })
}
