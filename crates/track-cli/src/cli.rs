//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use track_core::Period;

/// Simple time tracking CLI.
///
/// Records work sessions to `timetrack.csv` in the current directory.
#[derive(Debug, Parser)]
#[command(name = "track", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start tracking time.
    Start {
        /// Optional title for the task.
        title: Option<String>,

        /// Keep displaying the running timer, refreshing every SECS seconds.
        #[arg(long, value_name = "SECS", num_args = 0..=1, value_parser = parse_interval)]
        watch: Option<Option<f64>>,
    },

    /// Stop tracking time.
    Stop,

    /// Show current tracking status.
    Status {
        /// Continuously refresh the status every SECS seconds.
        #[arg(long, value_name = "SECS", num_args = 0..=1, value_parser = parse_interval)]
        watch: Option<Option<f64>>,
    },

    /// List time entries (defaults to today).
    List {
        #[command(flatten)]
        range: RangeArgs,

        /// Print entries as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Mutually exclusive calendar range for `list`.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct RangeArgs {
    /// Show entries for today.
    #[arg(short, long, group = "range")]
    pub day: bool,

    /// Show entries for this week.
    #[arg(short, long, group = "range")]
    pub week: bool,

    /// Show entries for this month.
    #[arg(short, long, group = "range")]
    pub month: bool,

    /// Show entries for this year.
    #[arg(short, long, group = "range")]
    pub year: bool,

    /// Show all entries.
    #[arg(short, long, group = "range")]
    pub all: bool,
}

impl RangeArgs {
    /// Resolves the selected flag to a period, defaulting to today.
    pub const fn period(self) -> Period {
        if self.all {
            Period::All
        } else if self.year {
            Period::Year
        } else if self.month {
            Period::Month
        } else if self.week {
            Period::Week
        } else {
            Period::Day
        }
    }
}

fn parse_interval(s: &str) -> Result<f64, String> {
    let secs: f64 = s
        .parse()
        .map_err(|_| format!("invalid interval: {s}"))?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err(format!("interval must be a positive number of seconds, got {s}"));
    }
    std::time::Duration::try_from_secs_f64(secs)
        .map_err(|e| format!("interval out of range: {s} ({e})"))?;
    Ok(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("track").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_start_with_title() {
        let cli = parse(&["start", "design review"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Start { title: Some(ref t), watch: None }) if t == "design review"
        ));
    }

    #[test]
    fn test_watch_without_value_uses_default() {
        let cli = parse(&["status", "--watch"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Status { watch: Some(None) })));
    }

    #[test]
    fn test_watch_with_value() {
        let cli = parse(&["status", "--watch", "2.5"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Status { watch: Some(Some(s)) }) if (s - 2.5).abs() < f64::EPSILON));
    }

    #[test]
    fn test_watch_rejects_non_positive() {
        assert!(parse(&["status", "--watch", "0"]).is_err());
        assert!(parse(&["status", "--watch", "-1"]).is_err());
        assert!(parse(&["status", "--watch", "soon"]).is_err());
    }

    #[test]
    fn test_watch_rejects_out_of_range() {
        assert!(parse(&["status", "--watch", "1e300"]).is_err());
        assert!(parse(&["start", "--watch", "1e300"]).is_err());
    }

    #[test]
    fn test_list_defaults_to_day() {
        let cli = parse(&["list"]).unwrap();
        let Some(Commands::List { range, json }) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(range.period(), Period::Day);
        assert!(!json);
    }

    #[test]
    fn test_list_range_flags() {
        for (flag, period) in [
            ("-d", Period::Day),
            ("--week", Period::Week),
            ("-m", Period::Month),
            ("--year", Period::Year),
            ("-a", Period::All),
        ] {
            let cli = parse(&["list", flag]).unwrap();
            let Some(Commands::List { range, .. }) = cli.command else {
                panic!("expected list");
            };
            assert_eq!(range.period(), period, "flag {flag}");
        }
    }

    #[test]
    fn test_list_range_flags_are_exclusive() {
        assert!(parse(&["list", "--week", "--all"]).is_err());
    }
}
