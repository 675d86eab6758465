use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ── Quote record ──────────────────────────────────────────────────────────────

/// One trading day's figures for a symbol, in the exact wire shape the
/// persistence API expects: the date travels under the `createdAt` key as
/// `dd/mm/yyyy`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRecord {
    #[serde(rename = "createdAt", with = "wire_date")]
    pub date: NaiveDate,
    pub closing: f64,
    pub opening: f64,
    pub higher: f64,
    pub lower: f64,
}

/// Full series for one symbol, page order (newest first) preserved.
/// Index 0 is the record the market-hours gate drops on open days.
pub type StockSeries = Vec<QuoteRecord>;

/// `dd/mm/yyyy` codec for the API wire format.
mod wire_date {
    use chrono::NaiveDate;
    use serde::{self, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%d/%m/%Y";

    pub fn serialize<S: Serializer>(date: &NaiveDate, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<NaiveDate, D::Error> {
        let s = String::deserialize(de)?;
        NaiveDate::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

// ── Numeric locale ────────────────────────────────────────────────────────────

/// How the source site formats a given instrument's numbers. Carried in each
/// symbol's config entry so adding instruments never touches code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum NumberLocale {
    /// `1.234,56` — dot as thousands separator, comma as decimal mark.
    EuropeanDecimalComma,
    /// `1234.56` — plain decimal numeral.
    #[default]
    StandardDecimalPoint,
}

// ── Auth token ────────────────────────────────────────────────────────────────

/// Opaque bearer credential. Obtained once at startup, read-only for the
/// rest of the run, never refreshed.
#[derive(Clone)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

// ── Submission outcome ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// 201 — the API persisted the submitted rows.
    Success,
    /// 200 — the API accepted the call but persisted nothing new.
    Warning,
    /// Anything else.
    Failure,
}

/// Per-symbol classification of the API's answer, used only for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionOutcome {
    pub symbol: String,
    pub status: u16,
    pub severity: Severity,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_record_serializes_to_wire_shape() {
        let record = QuoteRecord {
            date: NaiveDate::from_ymd_opt(2024, 7, 31).unwrap(),
            closing: 7500.12,
            opening: 7480.0,
            higher: 7512.5,
            lower: 7470.3,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["createdAt"], "31/07/2024");
        assert_eq!(json["closing"], 7500.12);
        assert!(json.get("date").is_none());
    }

    #[test]
    fn auth_token_debug_is_redacted() {
        let token = AuthToken::new("secret-jwt");
        assert_eq!(format!("{:?}", token), "AuthToken(***)");
    }
}
