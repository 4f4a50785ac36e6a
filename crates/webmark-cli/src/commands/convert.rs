//! `webmark convert` command implementation.

use std::path::PathBuf;

use clap::Args;

use super::{emit, read_html, select_region};
use crate::error::CliError;

/// Arguments for the convert command.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// HTML file to convert.
    file: PathBuf,

    /// CSS selector of the element to convert (default: the document body).
    #[arg(short, long)]
    selector: Option<String>,

    /// Write Markdown to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl ConvertArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let html = read_html(&self.file)?;
        let region = select_region(&html, self.selector.as_deref())?;
        let markdown = webmark::convert(Some(&region));
        emit(&markdown, self.output.as_ref())
    }
}
