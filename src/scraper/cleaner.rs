use crate::models::{NumberLocale, QuoteRecord, StockSeries};
use chrono::NaiveDate;
use tracing::warn;

/// Column count of a logical row on the source page. The last two columns
/// (volume, change) are never used downstream.
const ROW_WIDTH: usize = 7;

/// Fields kept per row: date, closing, opening, higher, lower.
const KEPT_FIELDS: usize = 5;

// ── Date normalization ────────────────────────────────────────────────────────

/// Parse a raw date cell. The site serves either `31/07/2024` or the
/// three-letter-month form `Jul 31, 2024`, depending on the instrument page.
/// Anything else marks the row as a header/footer artifact.
pub fn parse_quote_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    if let Ok(d) = NaiveDate::parse_from_str(s, "%d/%m/%Y") {
        return Some(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%b %d, %Y") {
        return Some(d);
    }

    None
}

// ── Number normalization ──────────────────────────────────────────────────────

/// Parse a price cell under the instrument's locale convention.
/// Returns `None` for anything that does not yield a finite float.
pub fn parse_price(s: &str, locale: NumberLocale) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let canonical = match locale {
        // "1.234,56" → "1234.56"
        NumberLocale::EuropeanDecimalComma => s.replace('.', "").replace(',', "."),
        NumberLocale::StandardDecimalPoint => s.to_string(),
    };

    canonical.parse::<f64>().ok().filter(|v| v.is_finite())
}

// ── Record assembly ───────────────────────────────────────────────────────────

/// Turn the flat cell sequence into quote records, page order preserved.
///
/// Cells are chunked into rows of 7, trimmed to their first 5 fields, then
/// kept only when the first field is a valid date — the site's header and
/// footer rows fail that check and drop out silently. A trailing group too
/// short to supply 5 fields cannot form a record and is dropped with a
/// warning (the table layout has changed if this ever fires).
pub fn assemble_records(cells: &[String], locale: NumberLocale) -> StockSeries {
    let mut records = Vec::new();

    for chunk in cells.chunks(ROW_WIDTH) {
        if chunk.len() < KEPT_FIELDS {
            warn!(
                "Dropping trailing partial row of {} cells: {:?}",
                chunk.len(),
                chunk
            );
            continue;
        }

        let row = &chunk[..KEPT_FIELDS];

        let Some(date) = parse_quote_date(&row[0]) else {
            continue;
        };

        let prices: Vec<f64> = row[1..]
            .iter()
            .filter_map(|cell| parse_price(cell, locale))
            .collect();

        if prices.len() != KEPT_FIELDS - 1 {
            warn!("Dropping row dated {}: unparseable price cell in {:?}", date, row);
            continue;
        }

        records.push(QuoteRecord {
            date,
            closing: prices[0],
            opening: prices[1],
            higher: prices[2],
            lower: prices[3],
        });
    }

    records
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_quote_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 7, 31).unwrap();
        assert_eq!(parse_quote_date("31/07/2024"), Some(expected));
        assert_eq!(parse_quote_date("Jul 31, 2024"), Some(expected));
        assert_eq!(parse_quote_date("Highest: 7512"), None);
        assert_eq!(parse_quote_date("(empty)"), None);
    }

    #[test]
    fn test_parse_price_locales() {
        assert_eq!(
            parse_price("1.234,56", NumberLocale::EuropeanDecimalComma),
            Some(1234.56)
        );
        assert_eq!(
            parse_price("1234.56", NumberLocale::StandardDecimalPoint),
            Some(1234.56)
        );
        assert_eq!(parse_price("", NumberLocale::StandardDecimalPoint), None);
        assert_eq!(parse_price("n/a", NumberLocale::EuropeanDecimalComma), None);
    }

    #[test]
    fn seven_cell_groups_become_one_record_each() {
        let input = cells(&[
            "31/07/2024", "7500.12", "7480.00", "7512.50", "7470.30", "1200000", "+0.4%",
            "30/07/2024", "7480.00", "7455.10", "7490.00", "7450.00", "980000", "-0.1%",
        ]);

        let records = assemble_records(&input, NumberLocale::StandardDecimalPoint);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].closing, 7500.12);
        assert_eq!(records[1].lower, 7450.00);
        // Page order (newest first) survives assembly.
        assert!(records[0].date > records[1].date);
    }

    #[test]
    fn textual_month_dates_are_canonicalized() {
        let input = cells(&[
            "Jul 31, 2024", "7500.12", "7480.00", "7512.50", "7470.30", "-", "-",
        ]);

        let records = assemble_records(&input, NumberLocale::StandardDecimalPoint);
        assert_eq!(records.len(), 1);
        assert_eq!(
            serde_json::to_value(&records[0]).unwrap()["createdAt"],
            "31/07/2024"
        );
    }

    #[test]
    fn garbage_date_row_is_dropped() {
        // Two 7-cell groups, one valid, one header artifact.
        let input = cells(&[
            "31/07/2024", "7500.12", "7480.00", "7512.50", "7470.30", "-", "-",
            "Date", "Close", "Open", "High", "Low", "Vol.", "Chg.",
        ]);

        let records = assemble_records(&input, NumberLocale::StandardDecimalPoint);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2024, 7, 31).unwrap());
    }

    #[test]
    fn european_locale_rows_parse_grouped_thousands() {
        let input = cells(&[
            "31/07/2024", "7.500,12", "7.480,00", "7.512,50", "7.470,30", "-", "-",
        ]);

        let records = assemble_records(&input, NumberLocale::EuropeanDecimalComma);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].closing, 7500.12);
        assert_eq!(records[0].higher, 7512.50);
    }

    #[test]
    fn trailing_partial_group_cannot_form_a_record() {
        let mut input = cells(&[
            "31/07/2024", "7500.12", "7480.00", "7512.50", "7470.30", "-", "-",
        ]);
        // Three stray cells left over after a layout change.
        input.extend(cells(&["30/07/2024", "7480.00", "7455.10"]));

        let records = assemble_records(&input, NumberLocale::StandardDecimalPoint);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn assembly_is_pure_and_idempotent() {
        let input = cells(&[
            "31/07/2024", "7500.12", "7480.00", "7512.50", "7470.30", "-", "-",
            "garbage", "x", "y", "z", "w", "-", "-",
        ]);

        let first = assemble_records(&input, NumberLocale::StandardDecimalPoint);
        let second = assemble_records(&input, NumberLocale::StandardDecimalPoint);
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
    }
}
