//! Local file names for downloaded images and exported documents.

use std::collections::HashSet;

use url::Url;

const DEFAULT_EXTENSION: &str = "jpg";
const MAX_BASE_NAME_LEN: usize = 50;

/// Derive the local file name for an image from its resolved URL.
///
/// `index` is only used when the URL has no usable last path segment.
pub fn image_filename(resolved_url: &str, index: usize) -> String {
    let segment = Url::parse(resolved_url)
        .ok()
        .and_then(|url| {
            url.path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
        })
        .filter(|segment| !segment.is_empty());

    let Some(segment) = segment else {
        return format!("image-{index}.{DEFAULT_EXTENSION}");
    };

    let name = if has_extension(&segment) {
        segment
    } else {
        format!("{segment}.{DEFAULT_EXTENSION}")
    };
    sanitize_filename(&name)
}

/// Replace every character outside `[A-Za-z0-9._-]` with `_`.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Turn a page title into an archive base name.
pub fn base_name_from_title(title: &str) -> String {
    let name: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .take(MAX_BASE_NAME_LEN)
        .collect();

    if name.is_empty() {
        "export".to_string()
    } else {
        name
    }
}

fn has_extension(segment: &str) -> bool {
    segment
        .rfind('.')
        .is_some_and(|dot| dot > 0 && dot + 1 < segment.len())
}

/// Hands out unique file names, adding `-1`, `-2`, ... before the extension.
#[derive(Debug, Default)]
pub struct FilenameAllocator {
    taken: HashSet<String>,
}

impl FilenameAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `name`, or the first free suffixed variant of it.
    pub fn allocate(&mut self, name: &str) -> String {
        if self.taken.insert(name.to_string()) {
            return name.to_string();
        }

        let (stem, extension) = match name.rfind('.') {
            Some(dot) if dot > 0 => name.split_at(dot),
            _ => (name, ""),
        };

        let mut suffix = 1;
        loop {
            let candidate = format!("{stem}-{suffix}{extension}");
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
            suffix += 1;
        }
    }
}
