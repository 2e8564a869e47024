//! List command for printing recorded entries.
//!
//! This module implements `track list` with calendar filters
//! (--day, --week, --month, --year, --all) and output formats (table, JSON).

use std::fmt::Write;

use anyhow::Result;
use chrono::{DateTime, Duration, Local, SecondsFormat, Utc};
use serde::Serialize;
use track_core::{
    Period, TimeEntry, format_duration_between, format_elapsed, format_timestamp, format_total,
};
use track_store::EntryStore;

/// Width of a rendered `YYYY-MM-DD HH:MM:SS` timestamp.
const DATE_WIDTH: usize = 19;
const DURATION_WIDTH: usize = 8;
const SEPARATOR: &str = " | ";

/// Counts and totals over a set of entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub entries: usize,
    pub completed: usize,
    /// Sum over completed entries only.
    pub tracked: Duration,
}

impl Summary {
    pub fn of(entries: &[TimeEntry]) -> Self {
        let completed: Vec<Duration> = entries.iter().filter_map(TimeEntry::duration).collect();
        Self {
            entries: entries.len(),
            completed: completed.len(),
            tracked: completed.into_iter().fold(Duration::zero(), |acc, d| acc + d),
        }
    }
}

/// Keeps entries whose start falls in `period`, preserving order.
pub fn filter_entries(entries: Vec<TimeEntry>, period: Period, now: DateTime<Local>) -> Vec<TimeEntry> {
    entries
        .into_iter()
        .filter(|e| period.contains(e.start, now))
        .collect()
}

/// Live or final duration of an entry.
fn entry_duration(entry: &TimeEntry, now: DateTime<Utc>) -> String {
    match entry.end {
        Some(end) => format_duration_between(entry.start, end),
        None => format_elapsed(entry.start, now),
    }
}

// ========== Table Output ==========

/// Formats entries as a table followed by a summary line.
pub fn format_table(entries: &[TimeEntry], now: DateTime<Utc>) -> String {
    let mut output = String::new();

    if entries.is_empty() {
        writeln!(output, "No time entries found").unwrap();
        return output;
    }

    let user_width = entries
        .iter()
        .map(|e| e.user.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);
    let title_width = entries
        .iter()
        .map(|e| e.title.chars().count())
        .max()
        .unwrap_or(0)
        .max(5);

    let header = [
        format!("{:<user_width$}", "User"),
        format!("{:<title_width$}", "Title"),
        format!("{:<DATE_WIDTH$}", "Start"),
        format!("{:<DATE_WIDTH$}", "End"),
        format!("{:<DURATION_WIDTH$}", "Duration"),
    ]
    .join(SEPARATOR);
    let separator = "-".repeat(header.chars().count());

    writeln!(output, "{header}").unwrap();
    writeln!(output, "{separator}").unwrap();

    for entry in entries {
        let end = entry
            .end
            .map_or_else(|| "In progress".to_string(), format_timestamp);
        let row = [
            format!("{:<user_width$}", entry.user),
            format!("{:<title_width$}", entry.title),
            format!("{:<DATE_WIDTH$}", format_timestamp(entry.start)),
            format!("{end:<DATE_WIDTH$}"),
            entry_duration(entry, now),
        ]
        .join(SEPARATOR);
        writeln!(output, "{row}").unwrap();
    }

    let summary = Summary::of(entries);
    writeln!(output, "{separator}").unwrap();
    writeln!(
        output,
        "Total: {} entries, {} completed, {} tracked",
        summary.entries,
        summary.completed,
        format_total(summary.tracked)
    )
    .unwrap();

    output
}

// ========== JSON Output ==========

/// JSON list structure.
#[derive(Debug, Serialize)]
pub struct JsonList {
    pub generated_at: String,
    pub timezone: String,
    pub period: Period,
    pub entries: Vec<JsonEntry>,
    pub totals: JsonTotals,
}

#[derive(Debug, Serialize)]
pub struct JsonEntry {
    pub user: String,
    pub title: String,
    pub start: String,
    pub end: Option<String>,
    pub running: bool,
    /// Final duration, or elapsed time so far for a running entry.
    pub duration_secs: i64,
}

#[derive(Debug, Serialize)]
pub struct JsonTotals {
    pub entries: usize,
    pub completed: usize,
    pub tracked_secs: i64,
}

fn rfc3339(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Formats entries as JSON.
pub fn format_json(entries: &[TimeEntry], period: Period, now: DateTime<Utc>) -> Result<String> {
    let timezone = iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string());
    let summary = Summary::of(entries);

    let list = JsonList {
        generated_at: rfc3339(now),
        timezone,
        period,
        entries: entries
            .iter()
            .map(|e| JsonEntry {
                user: e.user.clone(),
                title: e.title.clone(),
                start: rfc3339(e.start),
                end: e.end.map(rfc3339),
                running: e.is_running(),
                duration_secs: (e.end.unwrap_or(now) - e.start).num_seconds().max(0),
            })
            .collect(),
        totals: JsonTotals {
            entries: summary.entries,
            completed: summary.completed,
            tracked_secs: summary.tracked.num_seconds(),
        },
    };

    Ok(serde_json::to_string_pretty(&list)?)
}

// ========== Public Interface ==========

/// Runs the list command.
pub fn run<W: std::io::Write>(
    writer: &mut W,
    store: &EntryStore,
    period: Period,
    json: bool,
    now: DateTime<Local>,
) -> Result<()> {
    let entries = filter_entries(store.read_all()?, period, now);
    tracing::debug!(%period, count = entries.len(), "listing entries");

    let now = now.with_timezone(&Utc);
    if json {
        writeln!(writer, "{}", format_json(&entries, period, now)?)?;
    } else {
        write!(writer, "{}", format_table(&entries, now))?;
    }
    Ok(())
}
