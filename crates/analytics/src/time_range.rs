// In crates/analytics/src/time_range.rs

use chrono::{DateTime, Days, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// A symbolic dashboard range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeToken {
    Today,
    Yesterday,
    /// Today plus the given number of days before it.
    LastDays(u32),
}

impl RangeToken {
    /// Parses a range token. Anything unrecognised, including the empty string,
    /// means "all time" and yields `None`.
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim() {
            "today" => Some(RangeToken::Today),
            "yesterday" => Some(RangeToken::Yesterday),
            "3days" => Some(RangeToken::LastDays(3)),
            "7days" => Some(RangeToken::LastDays(7)),
            "30days" => Some(RangeToken::LastDays(30)),
            "60days" => Some(RangeToken::LastDays(60)),
            _ => None,
        }
    }

    /// The inclusive date interval this token covers when today is `today`.
    pub fn resolve_on(&self, today: NaiveDate) -> TimeRange {
        match *self {
            RangeToken::Today => TimeRange { start: today, end: today },
            RangeToken::Yesterday => {
                let yesterday = today - Days::new(1);
                TimeRange { start: yesterday, end: yesterday }
            }
            RangeToken::LastDays(n) => TimeRange {
                start: today - Days::new(u64::from(n)),
                end: today,
            },
        }
    }
}

/// An inclusive calendar interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TimeRange {
    /// Whether a trade entered at `ts` falls in the range, judged by the
    /// calendar date of `ts` in its own offset.
    pub fn contains(&self, ts: &DateTime<FixedOffset>) -> bool {
        let day = ts.date_naive();
        self.start <= day && day <= self.end
    }

    /// The first instant of the range (start of the first day).
    pub fn starts_at(&self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::MIN)
    }

    /// The first instant after the range (start of the day after `end`).
    pub fn ends_before(&self) -> NaiveDateTime {
        (self.end + Days::new(1)).and_time(NaiveTime::MIN)
    }
}

/// Resolves a range token against the UTC clock.
///
/// Stores compare entry dates in UTC, so the calendar days here are UTC days too.
pub fn resolve(token: &str) -> Option<TimeRange> {
    resolve_at(token, Utc::now().naive_utc())
}

/// Resolves a range token against a fixed "now". Only the date of `now` matters.
pub fn resolve_at(token: &str, now: NaiveDateTime) -> Option<TimeRange> {
    RangeToken::parse(token).map(|t| t.resolve_on(now.date()))
}
