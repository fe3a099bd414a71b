//! The lookback window used when fetching transactions from Plaid.

use std::fmt::Display;

use time::{
    Date, Duration, OffsetDateTime, UtcOffset, format_description::BorrowedFormatItem,
    macros::format_description,
};

/// How far back the transaction window reaches from the reference date.
pub const LOOKBACK_DAYS: i64 = 30;

const PLAID_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// A closed range of calendar dates, `start` to `end` inclusive, in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    /// The first day of the window.
    pub start: Date,
    /// The last day of the window.
    pub end: Date,
}

impl DateWindow {
    /// The window ending on the UTC calendar date of `reference` and starting
    /// [LOOKBACK_DAYS] days earlier.
    ///
    /// The offset of `reference` does not matter, only the instant it refers to.
    pub fn ending_at(reference: OffsetDateTime) -> Self {
        let end = reference.to_offset(UtcOffset::UTC).date();

        Self {
            start: end - Duration::days(LOOKBACK_DAYS),
            end,
        }
    }

    /// The window ending today (UTC).
    pub fn last_30_days() -> Self {
        Self::ending_at(OffsetDateTime::now_utc())
    }

    /// The start date in the `YYYY-MM-DD` form Plaid expects.
    pub fn start_string(&self) -> String {
        format_plaid_date(self.start)
    }

    /// The end date in the `YYYY-MM-DD` form Plaid expects.
    pub fn end_string(&self) -> String {
        format_plaid_date(self.end)
    }
}

impl Display for DateWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start_string(), self.end_string())
    }
}

/// Render `date` as `YYYY-MM-DD`.
pub fn format_plaid_date(date: Date) -> String {
    // A date always carries every component the description asks for.
    date.format(PLAID_DATE_FORMAT).unwrap_or_else(|_| date.to_string())
}
