//! Core domain logic for the time tracker.
//!
//! This crate contains the fundamental types and pure logic for:
//! - Entries: the recorded work sessions
//! - Duration formatting: elapsed and total time rendering
//! - Calendar periods: bucketing entries by today/this week/this month/this year

pub mod calendar;
pub mod duration;
pub mod entry;

pub use calendar::{Period, is_this_month, is_this_week, is_this_year, is_today};
pub use duration::{
    format_duration_between, format_elapsed, format_seconds, format_timestamp, format_total,
};
pub use entry::{EntryPatch, TimeEntry};
