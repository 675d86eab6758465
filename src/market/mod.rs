use crate::config::MarketConfig;
use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc};

/// Exchange operating hours against a configured UTC offset.
///
/// A fixed offset does not track DST: with the Paris default (+1) the gate
/// runs an hour early in summer. Accepted drift — the evening runs this
/// guards sit well inside the window either way.
pub struct MarketHours {
    offset: FixedOffset,
    close_hour: u32,
}

impl MarketHours {
    pub fn new(config: &MarketConfig) -> Result<Self> {
        let offset = FixedOffset::east_opt(config.utc_offset_hours * 3600)
            .with_context(|| format!("Invalid UTC offset {}h", config.utc_offset_hours))?;

        Ok(Self {
            offset,
            close_hour: config.close_hour,
        })
    }

    /// True when the exchange is (or was earlier today) trading: a weekday,
    /// before the close hour has fully passed. While true, the newest scraped
    /// row is today's provisional quote and must not be submitted.
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        let local = now.with_timezone(&self.offset);
        let weekday = local.weekday().number_from_monday();

        (1..=5).contains(&weekday) && local.hour() <= self.close_hour
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn paris_gate() -> MarketHours {
        MarketHours::new(&MarketConfig {
            utc_offset_hours: 1,
            close_hour: 18,
        })
        .unwrap()
    }

    fn paris_instant(y: i32, m: u32, d: u32, hour: u32) -> DateTime<Utc> {
        // Build the local wall-clock time, then shift back to UTC.
        FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(y, m, d, hour, 0, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn tuesday_morning_is_open() {
        // 2024-07-30 was a Tuesday.
        assert!(paris_gate().is_open(paris_instant(2024, 7, 30, 10)));
    }

    #[test]
    fn saturday_is_closed() {
        // 2024-07-27 was a Saturday.
        assert!(!paris_gate().is_open(paris_instant(2024, 7, 27, 10)));
    }

    #[test]
    fn weekday_evening_past_close_is_closed() {
        assert!(!paris_gate().is_open(paris_instant(2024, 7, 30, 19)));
    }

    #[test]
    fn close_hour_itself_still_counts_as_open() {
        assert!(paris_gate().is_open(paris_instant(2024, 7, 30, 18)));
    }
}
