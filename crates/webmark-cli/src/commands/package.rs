//! `webmark package` command implementation.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use tracing::info;
use webmark::select_first;
use webmark_package::{base_name_from_title, create_zip, sanitize_filename, Packager};

use super::{read_html, select_region, table_region};
use crate::config::{Loader, WebmarkConfig};
use crate::error::CliError;

/// Arguments for the package command.
#[derive(Args)]
pub(crate) struct PackageArgs {
    /// HTML file to convert.
    file: PathBuf,

    /// URL the page was saved from; relative image paths resolve against it.
    #[arg(short, long)]
    url: String,

    /// CSS selector of the element to convert (default: the document body).
    #[arg(short, long, conflicts_with = "table")]
    selector: Option<String>,

    /// Convert the N-th detected table instead of an element.
    #[arg(short, long)]
    table: Option<usize>,

    /// Archive base name, used as given apart from file-name sanitizing.
    #[arg(short, long, conflicts_with = "title")]
    name: Option<String>,

    /// Derive the base name from this title (default: the page's <title>).
    #[arg(long)]
    title: Option<String>,

    /// Seconds to wait for each image (overrides config).
    #[arg(long)]
    timeout: Option<u64>,

    /// Parallel image downloads (overrides config).
    #[arg(long)]
    concurrency: Option<usize>,

    /// Archive path (default: `<base name>.zip` in the current directory).
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl PackageArgs {
    /// Execute the package command.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read, the configuration is
    /// invalid or the archive cannot be written. Failed image downloads are
    /// only reported in the summary.
    pub(crate) async fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let config = self.load_config(config_path)?;
        let html = read_html(&self.file)?;

        let region = match self.table {
            Some(index) => table_region(&html, index)?,
            None => select_region(&html, self.selector.as_deref())?,
        };
        let markdown = webmark::convert(Some(&region));
        let base_name = self.base_name(&html, &config)?;

        let packager = Packager::http(config.fetch.package_options())?;
        let bundle = packager.create_package(&markdown, &self.url, &base_name).await;
        let archive = create_zip(&bundle, &bundle.base_name)?;

        let output = self
            .output
            .unwrap_or_else(|| PathBuf::from(format!("{base_name}.zip")));
        fs::write(&output, &archive).map_err(|source| CliError::Write {
            path: output.clone(),
            source,
        })?;

        info!(path = %output.display(), bytes = archive.len(), "archive written");
        println!(
            "wrote {} (downloaded {}/{} images)",
            output.display(),
            bundle.success_count,
            bundle.total_images
        );
        Ok(())
    }

    fn load_config(&self, config_path: Option<&Path>) -> Result<WebmarkConfig, CliError> {
        let mut loader = Loader::new();
        if let Some(path) = config_path {
            loader = loader.with_file(path);
        }
        if let Some(timeout) = self.timeout {
            loader = loader.set_override("fetch.timeout_secs", timeout)?;
        }
        if let Some(concurrency) = self.concurrency {
            loader = loader.set_override("fetch.concurrency", concurrency as u64)?;
        }
        Ok(loader.build()?)
    }

    fn base_name(&self, html: &str, config: &WebmarkConfig) -> Result<String, CliError> {
        if let Some(name) = &self.name {
            return Ok(sanitize_filename(name));
        }
        if let Some(title) = &self.title {
            return Ok(base_name_from_title(title));
        }

        let page_title = select_first(html, "title")?
            .map(|title| title.text_content().trim().to_string())
            .filter(|title| !title.is_empty());
        Ok(match page_title {
            Some(title) => base_name_from_title(&title),
            None => config.export.default_name.clone(),
        })
    }
}
