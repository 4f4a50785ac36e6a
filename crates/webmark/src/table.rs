//! Table transducer: `<table>` to a pipe table, plus table detection.

use crate::node::Node;
use crate::utilities::clean_cell_text;

/// Convert a `<table>` element to a Markdown table.
///
/// Any other node yields an empty string, as does a table without rows.
/// Rows keep their own cell count; short rows are not padded.
pub fn table_to_markdown(table: &Node) -> String {
    if !table.is_tag("table") {
        return String::new();
    }

    let rows: Vec<&Node> = table.descendants().filter(|n| n.is_tag("tr")).collect();
    let Some(first_row) = rows.first() else {
        return String::new();
    };

    // A first row of plain <td> cells still acts as header when more rows follow.
    let has_header = first_row.descendants().any(|n| n.is_tag("th"));
    let wants_separator = has_header || rows.len() > 1;

    let mut markdown = String::new();
    for (index, row) in rows.iter().enumerate() {
        let cells: Vec<String> = cells(row)
            .map(|cell| clean_cell_text(&cell.text_content()))
            .collect();
        if cells.is_empty() {
            continue;
        }

        push_row(&mut markdown, cells.iter().map(String::as_str));

        if index == 0 && wants_separator {
            push_row(&mut markdown, cells.iter().map(|_| "---"));
        }
    }

    markdown.push('\n');
    markdown
}

/// Find the tables worth extracting under `root` (root included).
///
/// Tables with fewer than two rows or two cells are treated as layout and
/// skipped. The rest are ordered by cell count, largest first; equal sizes
/// keep document order.
pub fn detect_tables(root: &Node) -> Vec<&Node> {
    let mut tables: Vec<(usize, &Node)> = std::iter::once(root)
        .chain(root.descendants())
        .filter(|n| n.is_tag("table"))
        .filter_map(|table| {
            let rows = table.descendants().filter(|n| n.is_tag("tr")).count();
            let cell_count = cells(table).count();
            (rows >= 2 && cell_count >= 2).then_some((cell_count, table))
        })
        .collect();

    tables.sort_by(|a, b| b.0.cmp(&a.0));
    tables.into_iter().map(|(_, table)| table).collect()
}

fn cells(node: &Node) -> impl Iterator<Item = &Node> {
    node.descendants()
        .filter(|n| n.is_tag("td") || n.is_tag("th"))
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>) {
    out.push_str("| ");
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            out.push_str(" | ");
        }
        out.push_str(cell);
    }
    out.push_str(" |\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cell(tag: &str, text: &str) -> Node {
        Node::element(tag).with_child(Node::text(text))
    }

    fn row(tag: &str, texts: &[&str]) -> Node {
        texts
            .iter()
            .fold(Node::element("tr"), |tr, t| tr.with_child(cell(tag, t)))
    }

    #[test]
    fn test_not_a_table() {
        assert_eq!(table_to_markdown(&Node::element("div")), "");
        assert_eq!(table_to_markdown(&Node::text("table")), "");
    }

    #[test]
    fn test_table_without_rows() {
        let table = Node::element("table").with_child(Node::element("caption"));
        assert_eq!(table_to_markdown(&table), "");
    }

    #[test]
    fn test_header_and_body_sections() {
        let table = Node::element("table")
            .with_child(Node::element("thead").with_child(row("th", &["Name", "Age"])))
            .with_child(
                Node::element("tbody")
                    .with_child(row("td", &["Ann", "31"]))
                    .with_child(row("td", &["Bob", "27"])),
            );

        assert_eq!(
            table_to_markdown(&table),
            "| Name | Age |\n| --- | --- |\n| Ann | 31 |\n| Bob | 27 |\n\n"
        );
    }

    #[test]
    fn test_table_shape() {
        let n = 3;
        let m = 4;
        let mut table = Node::element("table").with_child(row("th", &["a", "b", "c"]));
        for _ in 0..m {
            table.add_child(row("td", &["1", "2", "3"]));
        }

        let markdown = table_to_markdown(&table);
        let lines: Vec<&str> = markdown
            .lines()
            .filter(|l| l.starts_with('|') && l.ends_with('|'))
            .collect();
        assert_eq!(lines.len(), m + 2);
        assert_eq!(lines[1], format!("| {} |", vec!["---"; n].join(" | ")));
    }

    #[test]
    fn test_first_row_becomes_pseudo_header() {
        let table = Node::element("table")
            .with_child(row("td", &["x", "y"]))
            .with_child(row("td", &["1", "2"]));
        assert_eq!(
            table_to_markdown(&table),
            "| x | y |\n| --- | --- |\n| 1 | 2 |\n\n"
        );
    }

    #[test]
    fn test_single_plain_row_has_no_separator() {
        let table = Node::element("table").with_child(row("td", &["only"]));
        assert_eq!(table_to_markdown(&table), "| only |\n\n");
    }

    #[test]
    fn test_single_header_row_keeps_separator() {
        let table = Node::element("table").with_child(row("th", &["H1", "H2"]));
        assert_eq!(table_to_markdown(&table), "| H1 | H2 |\n| --- | --- |\n\n");
    }

    #[test]
    fn test_short_rows_are_not_padded() {
        let table = Node::element("table")
            .with_child(row("th", &["a", "b", "c"]))
            .with_child(row("td", &["1"]))
            .with_child(Node::element("tr"))
            .with_child(row("td", &["2", "3"]));
        assert_eq!(
            table_to_markdown(&table),
            "| a | b | c |\n| --- | --- | --- |\n| 1 |\n| 2 | 3 |\n\n"
        );
    }

    #[test]
    fn test_cell_escaping() {
        let table = Node::element("table")
            .with_child(row("th", &["h"]))
            .with_child(row("td", &["a|b\nc"]));
        assert!(table_to_markdown(&table).contains("| a\\|b c |"));
    }

    #[test]
    fn test_cell_flattens_markup() {
        let td = Node::element("td")
            .with_child(Node::element("b").with_child(Node::text(" bold ")))
            .with_child(Node::text("\n  tail  "));
        let table = Node::element("table")
            .with_child(row("th", &["h"]))
            .with_child(Node::element("tr").with_child(td));
        assert!(table_to_markdown(&table).ends_with("| bold tail |\n\n"));
    }

    #[test]
    fn test_detect_tables_filters_and_orders() {
        let layout = Node::element("table").with_child(row("td", &["nav"]));
        let small = Node::element("table")
            .with_child(row("th", &["a", "b"]))
            .with_child(row("td", &["1", "2"]));
        let large = Node::element("table")
            .with_child(row("th", &["a", "b", "c"]))
            .with_child(row("td", &["1", "2", "3"]));
        let page = Node::element("body")
            .with_child(layout)
            .with_child(small.clone())
            .with_child(Node::element("div").with_child(large.clone()));

        let found = detect_tables(&page);
        assert_eq!(found, vec![&large, &small]);
    }

    #[test]
    fn test_detect_tables_includes_root() {
        let table = Node::element("table")
            .with_child(row("td", &["1", "2"]))
            .with_child(row("td", &["3", "4"]));
        assert_eq!(detect_tables(&table).len(), 1);
    }
}
