//! The packaging run: extract, resolve, fetch, name, rewrite.

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;
use futures::stream::{self, StreamExt};
use indexmap::IndexMap;
use tracing::{info, warn};

use crate::error::{FetchError, PackageError};
use crate::extract::{extract_image_refs, rewrite_image_refs};
use crate::fetch::{HttpFetcher, ImageFetcher};
use crate::naming::{image_filename, FilenameAllocator};
use crate::resolve::resolve_url;

/// Knobs for a packaging run.
#[derive(Debug, Clone)]
pub struct PackageOptions {
    /// Upper bound for a single image download
    pub timeout: Duration,
    /// Downloads in flight at once
    pub concurrency: usize,
    pub user_agent: String,
}

impl Default for PackageOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            concurrency: 4,
            user_agent: concat!("webmark/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// An image that made it into the bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedImage {
    /// Name under `images/`, unique within the bundle
    pub filename: String,
    pub content: Bytes,
    pub alt: String,
    /// Resolved URL the bytes came from
    pub source_url: String,
}

/// Rewritten Markdown plus the images it now points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageBundle {
    pub markdown: String,
    pub images: Vec<DownloadedImage>,
    /// References whose image was downloaded
    pub success_count: usize,
    /// References found in the Markdown
    pub total_images: usize,
    pub base_name: String,
}

impl PackageBundle {
    pub fn has_images(&self) -> bool {
        !self.images.is_empty()
    }
}

/// Runs the packaging pipeline with a given fetcher.
pub struct Packager<F> {
    fetcher: F,
    options: PackageOptions,
}

impl Packager<HttpFetcher> {
    /// Packager that downloads over HTTP(S).
    pub fn http(options: PackageOptions) -> Result<Self, PackageError> {
        let fetcher = HttpFetcher::new(&options)?;
        Ok(Self::new(fetcher, options))
    }
}

impl<F: ImageFetcher> Packager<F> {
    pub fn new(fetcher: F, options: PackageOptions) -> Self {
        Self { fetcher, options }
    }

    pub fn options(&self) -> &PackageOptions {
        &self.options
    }

    /// Download every image referenced by `markdown` and point the
    /// references at the local copies.
    ///
    /// Never fails: an image that cannot be resolved or downloaded keeps its
    /// original reference and only shows up in the counts.
    pub async fn create_package(
        &self,
        markdown: &str,
        page_url: &str,
        base_name: &str,
    ) -> PackageBundle {
        let refs = extract_image_refs(markdown);
        if refs.is_empty() {
            return PackageBundle {
                markdown: markdown.to_string(),
                images: Vec::new(),
                success_count: 0,
                total_images: 0,
                base_name: base_name.to_string(),
            };
        }

        let resolved: Vec<String> = refs.iter().map(|r| resolve_url(&r.url, page_url)).collect();

        // Resolved URL -> index of its first reference
        let mut unique: IndexMap<&str, usize> = IndexMap::new();
        for (index, url) in resolved.iter().enumerate() {
            unique.entry(url.as_str()).or_insert(index);
        }

        let mut downloaded = self.fetch_all(unique.keys().copied()).await;

        let mut names = FilenameAllocator::new();
        let mut filenames: HashMap<&str, String> = HashMap::new();
        let mut images = Vec::new();
        for (&url, &first) in &unique {
            let Some(content) = downloaded.remove(url) else {
                continue;
            };
            let filename = names.allocate(&image_filename(url, first));
            filenames.insert(url, filename.clone());
            images.push(DownloadedImage {
                filename,
                content,
                alt: refs[first].alt.clone(),
                source_url: url.to_string(),
            });
        }

        let mut local_paths: HashMap<&str, &str> = HashMap::new();
        let mut success_count = 0;
        for (image, url) in refs.iter().zip(&resolved) {
            if let Some(filename) = filenames.get(url.as_str()) {
                local_paths.insert(image.span.as_str(), filename.as_str());
                success_count += 1;
            }
        }

        let markdown = rewrite_image_refs(markdown, |image| {
            local_paths
                .get(image.span.as_str())
                .map(|filename| format!("![{}](./images/{})", image.alt, filename))
        });

        info!(
            success = success_count,
            total = refs.len(),
            files = images.len(),
            "packaged images"
        );

        PackageBundle {
            markdown,
            images,
            success_count,
            total_images: refs.len(),
            base_name: base_name.to_string(),
        }
    }

    /// Fetch each URL once, keeping only the successes.
    async fn fetch_all<'u>(
        &self,
        urls: impl Iterator<Item = &'u str>,
    ) -> HashMap<&'u str, Bytes> {
        let timeout = self.options.timeout;
        let fetcher = &self.fetcher;

        stream::iter(urls)
            .map(|url| async move {
                let result = match tokio::time::timeout(timeout, fetcher.fetch(url)).await {
                    Ok(result) => result,
                    Err(_) => Err(FetchError::Timeout {
                        url: url.to_string(),
                        after: timeout,
                    }),
                };
                (url, result)
            })
            .buffer_unordered(self.options.concurrency.max(1))
            .filter_map(|(url, result)| async move {
                match result {
                    Ok(content) => Some((url, content)),
                    Err(err) => {
                        warn!(%url, %err, "image download failed");
                        None
                    }
                }
            })
            .collect()
            .await
    }
}
