//! Strict extractor for the generation-1 HTML status pages.
//!
//! The pages are static markup: every data table carries a caption, every
//! data row starts with a `td.title` label cell, and per-channel tables put
//! their values in `th` cells zipped against the header columns. Captions
//! and labels are the only identity signals the firmware gives us, so an
//! unknown caption or label fails the whole call rather than being skipped;
//! tolerating them would silently corrupt results when the layout drifts.

use scraper::{ElementRef, Html, Selector};

use super::{PageRecords, Record};
use crate::error::CollectError;
use crate::fieldmap::PageSpec;

/// Extract every mapped table of one status page document.
///
/// Returns no partial result: any caption, label, or column-count mismatch
/// aborts the call.
pub fn parse_page(spec: &PageSpec, html: &str) -> Result<PageRecords, CollectError> {
    let doc = Html::parse_document(html);

    let tables = selector("table");
    let captions = selector("caption");
    let header_cells = selector("thead th");
    let rows = selector("tr");
    let title_cells = selector("td.title");

    let mut page = PageRecords::default();

    for table in doc.select(&tables) {
        // Captionless tables are layout chrome, not data.
        let Some(caption) = table.select(&captions).next() else {
            continue;
        };
        let caption_text = text_of(&caption);

        let row_spec = spec
            .rows(&caption_text)
            .ok_or_else(|| CollectError::UnexpectedTable {
                caption: caption_text.clone(),
            })?;

        // Non-blank header cells are column labels; the padding cell (a
        // lone non-breaking space) sits above the label column.
        let columns: Vec<String> = table
            .select(&header_cells)
            .map(|cell| text_of(&cell))
            .filter(|label| !label.is_empty())
            .collect();

        let mut column_records: Vec<(String, Record)> = columns
            .iter()
            .map(|label| (label.clone(), Record::new()))
            .collect();

        for row in table.select(&rows) {
            let Some(title) = row.select(&title_cells).next() else {
                continue;
            };
            let label = text_of(&title);

            let field = *row_spec
                .get(label.as_str())
                .ok_or_else(|| CollectError::UnexpectedField {
                    label: label.clone(),
                })?;

            if columns.is_empty() {
                // Single-row table: one td value cell after the label.
                if let Some(cell) = following_cells(title, "td").next() {
                    let value = text_of(&cell);
                    if !value.is_empty() {
                        page.fields.insert(field, value);
                    }
                }
            } else {
                let cells: Vec<ElementRef> = following_cells(title, "th").collect();
                if cells.len() != columns.len() {
                    return Err(CollectError::ColumnMismatch {
                        label,
                        cells: cells.len(),
                        columns: columns.len(),
                    });
                }

                // Positional zip; an empty cell consumes its column but
                // writes nothing, so later values stay aligned.
                for (cell, (_, record)) in cells.iter().zip(column_records.iter_mut()) {
                    let value = text_of(cell);
                    if !value.is_empty() {
                        record.insert(field, value);
                    }
                }
            }
        }

        page.columns.append(&mut column_records);
    }

    Ok(page)
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

/// Concatenated descendant text, stripped of surrounding whitespace
/// (including non-breaking spaces).
fn text_of(el: &ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Sibling elements of the given name after a cell, in row order.
fn following_cells<'a>(
    cell: ElementRef<'a>,
    name: &'static str,
) -> impl Iterator<Item = ElementRef<'a>> {
    cell.next_siblings()
        .filter_map(ElementRef::wrap)
        .filter(move |el| el.value().name() == name)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn spec(tables: &[(&'static str, &[(&'static str, &'static str)])]) -> PageSpec {
        PageSpec::new(
            tables
                .iter()
                .map(|(caption, rows)| (*caption, rows.iter().copied().collect()))
                .collect::<HashMap<_, _>>(),
        )
    }

    fn info_spec() -> PageSpec {
        spec(&[("Information", &[("Cable Modem", "type")])])
    }

    fn channel_spec() -> PageSpec {
        spec(&[(
            "Downstream",
            &[
                ("Channel ID", "chanid"),
                ("Power Level (dBmV)", "power"),
            ],
        )])
    }

    #[test]
    fn test_single_row_page() {
        let html = r#"
            <html><body><table>
                <caption>Information</caption>
                <tr><td class="title">Cable Modem</td><td>DOCSIS 3.0</td></tr>
            </table></body></html>
        "#;

        let page = parse_page(&info_spec(), html).expect("should parse");
        assert_eq!(page.field("type").expect("type"), "DOCSIS 3.0");
        assert_eq!(page.fields.len(), 1);
        assert!(page.columns.is_empty());
    }

    #[test]
    fn test_values_are_whitespace_stripped() {
        let html = r#"
            <table>
                <caption>Information</caption>
                <tr><td class="title"> Cable Modem </td><td>
                    DOCSIS 3.0
                </td></tr>
            </table>
        "#;

        let page = parse_page(&info_spec(), html).expect("should parse");
        assert_eq!(page.field("type").expect("type"), "DOCSIS 3.0");
    }

    #[test]
    fn test_empty_cell_leaves_field_absent() {
        let html = r#"
            <table>
                <caption>Information</caption>
                <tr><td class="title">Cable Modem</td><td>  </td></tr>
            </table>
        "#;

        let page = parse_page(&info_spec(), html).expect("should parse");
        assert!(page.fields.is_empty());
    }

    #[test]
    fn test_row_without_data_cell_is_skipped() {
        let html = r#"
            <table>
                <caption>Information</caption>
                <tr><td class="title">Cable Modem</td></tr>
            </table>
        "#;

        let page = parse_page(&info_spec(), html).expect("should parse");
        assert!(page.fields.is_empty());
    }

    #[test]
    fn test_row_without_title_cell_is_skipped() {
        let html = r#"
            <table>
                <caption>Information</caption>
                <tr><td>decorative</td><td>banner</td></tr>
                <tr><td class="title">Cable Modem</td><td>DOCSIS 3.0</td></tr>
            </table>
        "#;

        let page = parse_page(&info_spec(), html).expect("should parse");
        assert_eq!(page.field("type").expect("type"), "DOCSIS 3.0");
    }

    #[test]
    fn test_captionless_table_is_skipped() {
        let html = r#"
            <table><tr><td class="title">Unmapped Label</td><td>x</td></tr></table>
            <table>
                <caption>Information</caption>
                <tr><td class="title">Cable Modem</td><td>DOCSIS 3.0</td></tr>
            </table>
        "#;

        let page = parse_page(&info_spec(), html).expect("should parse");
        assert_eq!(page.field("type").expect("type"), "DOCSIS 3.0");
    }

    #[test]
    fn test_single_row_tables_merge_into_one_record() {
        let html = r#"
            <table>
                <caption>General</caption>
                <tr><td class="title">Network Access</td><td>Allowed</td></tr>
            </table>
            <table>
                <caption>Flow</caption>
                <tr><td class="title">Max Traffic Rate</td><td>228789000 bps</td></tr>
            </table>
        "#;
        let spec = spec(&[
            ("General", &[("Network Access", "access")]),
            ("Flow", &[("Max Traffic Rate", "down_maxrate")]),
        ]);

        let page = parse_page(&spec, html).expect("should parse");
        assert_eq!(page.field("access").expect("access"), "Allowed");
        assert_eq!(
            page.field("down_maxrate").expect("rate"),
            "228789000 bps"
        );
    }

    #[test]
    fn test_multi_column_table() {
        let html = r#"
            <table>
                <caption>Downstream</caption>
                <thead><tr><th>&nbsp;</th><th>1</th><th>2</th></tr></thead>
                <tr><td class="title">Channel ID</td><th>3</th><th>4</th></tr>
                <tr><td class="title">Power Level (dBmV)</td><th>7.5 dBmV</th><th>N/A</th></tr>
            </table>
        "#;

        let page = parse_page(&channel_spec(), html).expect("should parse");
        assert!(page.fields.is_empty());
        assert_eq!(page.columns.len(), 2);

        let (label, first) = &page.columns[0];
        assert_eq!(label, "1");
        assert_eq!(first.get("chanid").expect("chanid"), "3");
        assert_eq!(first.get("power").expect("power"), "7.5 dBmV");

        let (label, second) = &page.columns[1];
        assert_eq!(label, "2");
        assert_eq!(second.get("chanid").expect("chanid"), "4");
        assert_eq!(second.get("power").expect("power"), "N/A");
    }

    #[test]
    fn test_nbsp_header_cell_is_not_a_column() {
        let html = r#"
            <table>
                <caption>Downstream</caption>
                <thead><tr><th>&nbsp;</th><th>1</th></tr></thead>
                <tr><td class="title">Channel ID</td><th>3</th></tr>
            </table>
        "#;

        let page = parse_page(&channel_spec(), html).expect("should parse");
        assert_eq!(page.columns.len(), 1);
        assert_eq!(page.columns[0].0, "1");
    }

    #[test]
    fn test_empty_column_cell_keeps_later_values_aligned() {
        let html = r#"
            <table>
                <caption>Downstream</caption>
                <thead><tr><th>&nbsp;</th><th>1</th><th>2</th><th>3</th></tr></thead>
                <tr><td class="title">Channel ID</td><th>5</th><th></th><th>7</th></tr>
            </table>
        "#;

        let page = parse_page(&channel_spec(), html).expect("should parse");
        assert_eq!(page.columns[0].1.get("chanid").expect("col 1"), "5");
        assert!(page.columns[1].1.get("chanid").is_none());
        assert_eq!(page.columns[2].1.get("chanid").expect("col 3"), "7");
    }

    // -- Error cases --

    #[test]
    fn test_unknown_caption_is_fatal() {
        let html = r#"
            <table>
                <caption>Brand New Table</caption>
                <tr><td class="title">Cable Modem</td><td>DOCSIS 3.0</td></tr>
            </table>
        "#;

        let err = parse_page(&info_spec(), html).unwrap_err();
        assert!(matches!(err, CollectError::UnexpectedTable { .. }));
        assert!(err.to_string().contains("Brand New Table"));
    }

    #[test]
    fn test_unknown_row_label_is_fatal() {
        let html = r#"
            <table>
                <caption>Information</caption>
                <tr><td class="title">Cable Modem</td><td>DOCSIS 3.0</td></tr>
                <tr><td class="title">Firmware Build</td><td>9.1.1811</td></tr>
            </table>
        "#;

        let err = parse_page(&info_spec(), html).unwrap_err();
        assert!(matches!(err, CollectError::UnexpectedField { .. }));
        assert!(err.to_string().contains("Firmware Build"));
    }

    #[test]
    fn test_short_row_is_a_column_mismatch() {
        let html = r#"
            <table>
                <caption>Downstream</caption>
                <thead><tr><th>&nbsp;</th><th>1</th><th>2</th></tr></thead>
                <tr><td class="title">Channel ID</td><th>3</th></tr>
            </table>
        "#;

        let err = parse_page(&channel_spec(), html).unwrap_err();
        assert!(matches!(
            err,
            CollectError::ColumnMismatch {
                cells: 1,
                columns: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_long_row_is_a_column_mismatch() {
        let html = r#"
            <table>
                <caption>Downstream</caption>
                <thead><tr><th>&nbsp;</th><th>1</th></tr></thead>
                <tr><td class="title">Channel ID</td><th>3</th><th>4</th></tr>
            </table>
        "#;

        let err = parse_page(&channel_spec(), html).unwrap_err();
        assert!(matches!(err, CollectError::ColumnMismatch { .. }));
    }

    #[test]
    fn test_failed_parse_returns_no_partial_result() {
        // First table is fine, second has an unknown label; the good rows
        // must not leak out.
        let html = r#"
            <table>
                <caption>Information</caption>
                <tr><td class="title">Cable Modem</td><td>DOCSIS 3.0</td></tr>
            </table>
            <table>
                <caption>Information</caption>
                <tr><td class="title">Mystery</td><td>?</td></tr>
            </table>
        "#;

        assert!(parse_page(&info_spec(), html).is_err());
    }
}
