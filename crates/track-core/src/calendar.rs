//! Calendar periods used to filter entries.
//!
//! All comparisons happen in local time. A week runs from Monday 00:00:00
//! through the following Sunday 23:59:59.

use std::fmt;

use chrono::{DateTime, Datelike, Days, Local, NaiveDate, Utc};
use serde::Serialize;

/// Calendar range an entry's start must fall into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Day,
    Week,
    Month,
    Year,
    All,
}

impl Period {
    /// Returns true if `ts` falls in the period containing `now`.
    pub fn contains(self, ts: DateTime<Utc>, now: DateTime<Local>) -> bool {
        let ts = ts.with_timezone(&Local);
        match self {
            Self::Day => ts.date_naive() == now.date_naive(),
            Self::Week => week_start(ts.date_naive()) == week_start(now.date_naive()),
            Self::Month => ts.year() == now.year() && ts.month() == now.month(),
            Self::Year => ts.year() == now.year(),
            Self::All => true,
        }
    }

    /// Human-readable description, e.g. "this week".
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Day => "today",
            Self::Week => "this week",
            Self::Month => "this month",
            Self::Year => "this year",
            Self::All => "all time",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Monday of the week containing `date`.
fn week_start(date: NaiveDate) -> NaiveDate {
    let days_since_monday = u64::from(date.weekday().num_days_from_monday());
    date - Days::new(days_since_monday)
}

/// Whether `ts` falls on the current local date.
pub fn is_today(ts: DateTime<Utc>) -> bool {
    is_today_at(ts, Local::now())
}

/// Whether `ts` falls in the current local Monday-to-Sunday week.
pub fn is_this_week(ts: DateTime<Utc>) -> bool {
    is_this_week_at(ts, Local::now())
}

/// Whether `ts` falls in the current local calendar month.
pub fn is_this_month(ts: DateTime<Utc>) -> bool {
    is_this_month_at(ts, Local::now())
}

/// Whether `ts` falls in the current local calendar year.
pub fn is_this_year(ts: DateTime<Utc>) -> bool {
    is_this_year_at(ts, Local::now())
}

/// Whether `ts` falls on the local date of `now`.
pub fn is_today_at(ts: DateTime<Utc>, now: DateTime<Local>) -> bool {
    Period::Day.contains(ts, now)
}

/// Whether `ts` falls in the Monday-to-Sunday week containing `now`.
pub fn is_this_week_at(ts: DateTime<Utc>, now: DateTime<Local>) -> bool {
    Period::Week.contains(ts, now)
}

/// Whether `ts` falls in the calendar month of `now`.
pub fn is_this_month_at(ts: DateTime<Utc>, now: DateTime<Local>) -> bool {
    Period::Month.contains(ts, now)
}

/// Whether `ts` falls in the calendar year of `now`.
pub fn is_this_year_at(ts: DateTime<Utc>, now: DateTime<Local>) -> bool {
    Period::Year.contains(ts, now)
}
