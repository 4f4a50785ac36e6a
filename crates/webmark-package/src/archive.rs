//! Writing a bundle out as a ZIP archive.

use std::io::{Cursor, Write};

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::bundle::PackageBundle;
use crate::error::Result;

/// Build the archive for `bundle`.
///
/// Layout: `{base_name}.md` and `README.md` at the root, downloaded images
/// flat under `images/`.
pub fn create_zip(bundle: &PackageBundle, base_name: &str) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let opt = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file(format!("{base_name}.md"), opt)?;
    zip.write_all(bundle.markdown.as_bytes())?;

    zip.start_file("README.md", opt)?;
    let readme = render_readme(base_name, bundle.images.len(), Utc::now());
    zip.write_all(readme.as_bytes())?;

    if bundle.has_images() {
        zip.add_directory("images/", opt)?;
        for image in &bundle.images {
            zip.start_file(format!("images/{}", image.filename), opt)?;
            zip.write_all(&image.content)?;
        }
    }

    let bytes = zip.finish()?.into_inner();
    debug!(base_name, images = bundle.images.len(), size = bytes.len(), "wrote archive");
    Ok(bytes)
}

/// The `README.md` placed next to the exported document.
pub fn render_readme(base_name: &str, image_count: usize, generated_at: DateTime<Utc>) -> String {
    let timestamp = generated_at.to_rfc3339_opts(SecondsFormat::Millis, true);
    format!(
        "# Markdown Export

This package was created by webmark.

## Contents
- {base_name}.md - Main markdown content
- images/ - Downloaded images ({image_count} files)

## Usage
1. Extract this ZIP file
2. Open {base_name}.md in any Markdown editor or notes app
3. Images are loaded from the images/ folder next to it

Generated on: {timestamp}
"
    )
}
