use crate::models::{Severity, SubmissionOutcome};
use serde_json::Value;

/// Message used when a failure body carries no `error` field.
pub const NO_ERROR_MESSAGE: &str = "(no error message)";

/// Classify the API's answer to one symbol's submission.
///
/// The API's contract: `201` means rows were persisted; `200` means the call
/// was accepted but nothing new was written (typically "no new rows"), which
/// callers surface as a warning; anything else is a failure whose body may
/// carry an `error` field. No status is ever retried.
pub fn interpret(symbol: &str, status: u16, body: &str) -> SubmissionOutcome {
    let (severity, message) = match status {
        201 => (
            Severity::Success,
            format!("{} quotes submitted successfully", symbol),
        ),
        200 => (Severity::Warning, decode_body_message(body)),
        _ => (Severity::Failure, decode_error_message(body)),
    };

    SubmissionOutcome {
        symbol: symbol.to_string(),
        status,
        severity,
        message,
    }
}

/// Decoded JSON body for the 200 warning path; raw body text when the
/// payload is not JSON.
fn decode_body_message(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::String(s)) => s,
        Ok(value) => value.to_string(),
        Err(_) => body.to_string(),
    }
}

/// `error` field of a failure body, with a sentinel fallback.
fn decode_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(String::from))
        .unwrap_or_else(|| NO_ERROR_MESSAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_is_success() {
        let outcome = interpret("cac", 201, "");
        assert_eq!(outcome.severity, Severity::Success);
        assert_eq!(outcome.status, 201);
        assert!(outcome.message.contains("cac"));
    }

    #[test]
    fn ok_is_a_warning_with_decoded_body() {
        let outcome = interpret("cac", 200, r#""no new rows to persist""#);
        assert_eq!(outcome.severity, Severity::Warning);
        assert_eq!(outcome.message, "no new rows to persist");
    }

    #[test]
    fn ok_with_non_json_body_falls_back_to_raw_text() {
        let outcome = interpret("lvc", 200, "plain text answer");
        assert_eq!(outcome.severity, Severity::Warning);
        assert_eq!(outcome.message, "plain text answer");
    }

    #[test]
    fn server_error_reports_the_error_field() {
        let outcome = interpret("cac", 500, r#"{"error":"db down"}"#);
        assert_eq!(outcome.severity, Severity::Failure);
        assert_eq!(outcome.message, "db down");
    }

    #[test]
    fn server_error_without_field_uses_sentinel() {
        let outcome = interpret("cac", 500, r#"{"detail":"boom"}"#);
        assert_eq!(outcome.severity, Severity::Failure);
        assert_eq!(outcome.message, NO_ERROR_MESSAGE);
    }

    #[test]
    fn client_error_is_a_failure_too() {
        let outcome = interpret("lvc", 403, "");
        assert_eq!(outcome.severity, Severity::Failure);
        assert_eq!(outcome.message, NO_ERROR_MESSAGE);
    }
}
