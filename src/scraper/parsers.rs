use crate::error::EtlError;
use scraper::{Html, Selector};

/// Stand-in text for a `<td>` with no content. Keeps the flat cell sequence
/// at the table's true width so downstream chunking stays aligned; the date
/// filter rejects it wherever it lands in a date position.
pub const EMPTY_CELL: &str = "(empty)";

/// Extract the text of every quote-table cell, in document order.
///
/// The source page carries its quotes in the first (and only) table shaped
/// `table > tbody > tr > td`. A document with no `<table>` at all is a parse
/// failure; a table with no body cells yields an empty sequence, which the
/// caller reports as a validation problem rather than a parse one.
pub fn extract_cells(html: &str, url: &str) -> Result<Vec<String>, EtlError> {
    let doc = Html::parse_document(html);

    // Selector literals are known-good; parse cannot fail at runtime.
    let table_sel = Selector::parse("table").expect("static selector");
    let cell_sel = Selector::parse("table > tbody > tr > td").expect("static selector");

    if doc.select(&table_sel).next().is_none() {
        return Err(EtlError::Parse {
            url: url.to_string(),
        });
    }

    let cells = doc
        .select(&cell_sel)
        .map(|td| {
            let text = td.text().collect::<String>().trim().to_string();
            if text.is_empty() {
                EMPTY_CELL.to_string()
            } else {
                text
            }
        })
        .collect();

    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_cells_in_document_order() {
        let html = r#"
            <html><body>
              <table><tbody>
                <tr><td>31/07/2024</td><td>7 500,12</td></tr>
                <tr><td>30/07/2024</td><td>7 480,00</td></tr>
              </tbody></table>
            </body></html>"#;

        let cells = extract_cells(html, "http://example.test").unwrap();
        assert_eq!(
            cells,
            vec!["31/07/2024", "7 500,12", "30/07/2024", "7 480,00"]
        );
    }

    #[test]
    fn empty_cell_becomes_placeholder() {
        let html = "<table><tbody><tr><td>31/07/2024</td><td></td></tr></tbody></table>";
        let cells = extract_cells(html, "http://example.test").unwrap();
        assert_eq!(cells, vec!["31/07/2024", EMPTY_CELL]);
    }

    #[test]
    fn missing_table_is_a_parse_error() {
        let html = "<html><body><p>maintenance</p></body></html>";
        let err = extract_cells(html, "http://example.test").unwrap_err();
        assert!(matches!(err, EtlError::Parse { .. }));
    }

    #[test]
    fn table_without_cells_yields_empty_sequence() {
        let html = "<table><thead><tr><th>Date</th></tr></thead><tbody></tbody></table>";
        let cells = extract_cells(html, "http://example.test").unwrap();
        assert!(cells.is_empty());
    }
}
