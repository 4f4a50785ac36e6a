//! CLI command implementations.

pub(crate) mod convert;
pub(crate) mod package;
pub(crate) mod tables;

pub(crate) use convert::ConvertArgs;
pub(crate) use package::PackageArgs;
pub(crate) use tables::TablesArgs;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use webmark::{detect_tables, parse_document, select_first, Node};

use crate::error::CliError;

pub(crate) fn read_html(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Pick the element to convert: the first selector match, else the `<body>`.
pub(crate) fn select_region(html: &str, selector: Option<&str>) -> Result<Node, CliError> {
    match selector {
        Some(selector) => {
            select_first(html, selector)?.ok_or_else(|| CliError::NoMatch(selector.to_string()))
        }
        None => Ok(select_first(html, "body")?.unwrap_or_else(|| parse_document(html))),
    }
}

/// The `index`-th detected table, largest first.
pub(crate) fn table_region(html: &str, index: usize) -> Result<Node, CliError> {
    let document = parse_document(html);
    let tables = detect_tables(&document);
    debug!(count = tables.len(), "detected tables");

    tables
        .get(index)
        .map(|table| (*table).clone())
        .ok_or(CliError::NoTable {
            index,
            count: tables.len(),
        })
}

/// Print to stdout, or write to `output` when given.
pub(crate) fn emit(markdown: &str, output: Option<&PathBuf>) -> Result<(), CliError> {
    match output {
        Some(path) => fs::write(path, format!("{markdown}\n")).map_err(|source| CliError::Write {
            path: path.clone(),
            source,
        }),
        None => {
            println!("{markdown}");
            Ok(())
        }
    }
}
