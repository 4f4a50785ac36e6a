//! `webmark tables` command implementation.

use std::path::PathBuf;

use clap::Args;
use webmark::{detect_tables, parse_document, Node};

use super::{emit, read_html, table_region};
use crate::error::CliError;

/// Arguments for the tables command.
#[derive(Args)]
pub(crate) struct TablesArgs {
    /// HTML file to scan.
    file: PathBuf,

    /// Print this table as Markdown instead of listing them.
    #[arg(short, long)]
    index: Option<usize>,

    /// Write Markdown to this file instead of stdout.
    #[arg(short, long, requires = "index")]
    output: Option<PathBuf>,
}

impl TablesArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let html = read_html(&self.file)?;

        let Some(index) = self.index else {
            let document = parse_document(&html);
            for (index, table) in detect_tables(&document).iter().enumerate() {
                println!("{}", describe(index, table));
            }
            return Ok(());
        };

        let table = table_region(&html, index)?;
        emit(&webmark::convert(Some(&table)), self.output.as_ref())
    }
}

/// One listing line: `#index rows×cells`.
fn describe(index: usize, table: &Node) -> String {
    let rows = table.descendants().filter(|n| n.is_tag("tr")).count();
    let cells = table
        .descendants()
        .filter(|n| n.is_tag("td") || n.is_tag("th"))
        .count();
    format!("#{index} {rows}×{cells}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use webmark::parse_html;

    #[test]
    fn describes_rows_and_cells() {
        let html = "<table><tr><th>a</th><th>b</th></tr><tr><td>1</td><td>2</td></tr>\
                    <tr><td>3</td><td>4</td></tr></table>";
        let node = parse_html(html);
        let table = node.find_descendant("table").unwrap();
        assert_eq!(describe(2, table), "#2 3×6");
    }
}
