//! CLI subcommand implementations.

pub mod list;
pub mod start;
pub mod status;
pub mod stop;
pub mod util;
pub mod watch;

use thiserror::Error;

/// A command that does not fit the current tracking state.
///
/// No data is mutated when one of these is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateConflict {
    #[error("A timer is already running{}", parenthesized(.title))]
    AlreadyRunning { title: String },
    #[error("No active timer to stop")]
    NothingToStop,
}

fn parenthesized(title: &str) -> String {
    if title.is_empty() {
        String::new()
    } else {
        format!(" ({title})")
    }
}
