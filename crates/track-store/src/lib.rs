//! Storage layer for the time tracker.
//!
//! Entries live in a single CSV file with the header `user,title,start,end`
//! and one row per entry in append order.
//!
//! # Format
//!
//! - A field is quoted when it contains a comma, a quote or a newline, and
//!   embedded quotes are doubled. Files written by earlier versions of the
//!   tool read back unchanged.
//! - Timestamps are RFC 3339 UTC with millisecond precision
//!   (e.g., `2025-01-29T09:00:00.000Z`).
//! - An empty `end` marks a running entry.
//! - Rows are read by position. Missing trailing fields read as empty and extra
//!   fields are ignored; field counts are not validated.
//!
//! # Unreadable rows
//!
//! A row whose `start` or `end` is not a timestamp (typically a row with a
//! shifted field count) is skipped by [`EntryStore::read_all`] with a warning.
//! [`EntryStore::append`] and [`EntryStore::patch`] keep such rows in place, so
//! they survive every mutation unchanged. Entry indices count readable rows
//! only.
//!
//! # Concurrency
//!
//! Every mutation reads the whole file and rewrites it. There is no locking, so
//! two processes mutating the same file at once can lose an update (the last
//! writer wins). The rewrite goes through a sibling temporary file and a rename,
//! so readers never see a partially written file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use thiserror::Error;
use track_core::{EntryPatch, TimeEntry};

/// Default file name, resolved against the working directory.
pub const DEFAULT_FILE_NAME: &str = "timetrack.csv";

const HEADER: [&str; 4] = ["user", "title", "start", "end"];

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The log exists but could not be read.
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The log could not be written.
    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The CSV layer rejected the content.
    #[error("malformed csv in {}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// One persisted row.
#[derive(Debug, Clone)]
enum Row {
    Entry(TimeEntry),
    /// A row that does not decode to an entry, kept verbatim.
    Unreadable(StringRecord),
}

impl Row {
    fn into_entry(self) -> Option<TimeEntry> {
        match self {
            Self::Entry(entry) => Some(entry),
            Self::Unreadable(_) => None,
        }
    }
}

/// Flat-file entry log.
#[derive(Debug, Clone)]
pub struct EntryStore {
    path: PathBuf,
}

impl EntryStore {
    /// Creates a store backed by the file at `path`.
    ///
    /// The file is not touched until the first read or write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every readable entry in append order.
    ///
    /// A missing file, an empty file or a header-only file all yield no entries.
    pub fn read_all(&self) -> Result<Vec<TimeEntry>, StoreError> {
        let entries: Vec<_> = self
            .read_rows()?
            .into_iter()
            .filter_map(Row::into_entry)
            .collect();
        tracing::debug!(path = %self.path.display(), count = entries.len(), "read entries");
        Ok(entries)
    }

    /// Replaces the file content with the header and `entries`.
    pub fn write_all(&self, entries: &[TimeEntry]) -> Result<(), StoreError> {
        let rows: Vec<_> = entries.iter().cloned().map(Row::Entry).collect();
        self.write_rows(&rows)
    }

    /// Appends `entry` and returns its index.
    pub fn append(&self, entry: TimeEntry) -> Result<usize, StoreError> {
        let mut rows = self.read_rows()?;
        let index = rows.iter().filter(|r| matches!(r, Row::Entry(_))).count();
        rows.push(Row::Entry(entry));
        self.write_rows(&rows)?;
        Ok(index)
    }

    /// Applies `patch` to the entry at `index`.
    ///
    /// An out-of-range index leaves the file untouched and returns `false`.
    pub fn patch(&self, index: usize, patch: EntryPatch) -> Result<bool, StoreError> {
        let mut rows = self.read_rows()?;
        let target = rows
            .iter_mut()
            .filter_map(|row| match row {
                Row::Entry(entry) => Some(entry),
                Row::Unreadable(_) => None,
            })
            .nth(index);
        let Some(entry) = target else {
            tracing::debug!(index, "patch index out of range, ignoring");
            return Ok(false);
        };
        patch.apply(entry);
        self.write_rows(&rows)?;
        Ok(true)
    }

    fn read_rows(&self) -> Result<Vec<Row>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "entry log does not exist yet");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        decode(&content).map_err(|source| StoreError::Csv {
            path: self.path.clone(),
            source,
        })
    }

    fn write_rows(&self, rows: &[Row]) -> Result<(), StoreError> {
        let bytes = encode(rows).map_err(|source| StoreError::Csv {
            path: self.path.clone(),
            source,
        })?;

        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let tmp = self.tmp_path();
        if let Err(e) = fs::write(&tmp, bytes).and_then(|()| fs::rename(&tmp, &self.path)) {
            let _ = fs::remove_file(&tmp);
            return Err(write_err(e));
        }

        tracing::debug!(path = %self.path.display(), count = rows.len(), "wrote rows");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Finds the active entry: the last one, by position, that has no end.
///
/// Earlier unterminated entries are tolerated and ignored.
pub fn find_active(entries: &[TimeEntry]) -> Option<(usize, &TimeEntry)> {
    let (index, entry) = entries
        .iter()
        .enumerate()
        .rev()
        .find(|(_, entry)| entry.is_running())?;

    if entries[..index].iter().any(TimeEntry::is_running) {
        tracing::debug!(index, "earlier unterminated entries exist; using the most recent");
    }
    Some((index, entry))
}

fn decode(content: &str) -> Result<Vec<Row>, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        match decode_record(&record) {
            Ok(entry) => rows.push(Row::Entry(entry)),
            Err(e) => {
                tracing::warn!(row = i + 1, error = %e, "skipping unreadable row");
                rows.push(Row::Unreadable(record));
            }
        }
    }
    Ok(rows)
}

fn decode_record(record: &StringRecord) -> Result<TimeEntry, chrono::ParseError> {
    let field = |i: usize| record.get(i).unwrap_or_default();

    let start = parse_timestamp(field(2))?;
    let end = match field(3) {
        "" => None,
        value => Some(parse_timestamp(value)?),
    };

    Ok(TimeEntry {
        user: field(0).to_string(),
        title: field(1).to_string(),
        start,
        end,
    })
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value).map(|dt| dt.with_timezone(&Utc))
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn encode(rows: &[Row]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for row in rows {
        match row {
            Row::Entry(entry) => {
                let start = format_timestamp(entry.start);
                let end = entry.end.map(format_timestamp).unwrap_or_default();
                writer.write_record([
                    entry.user.as_str(),
                    entry.title.as_str(),
                    start.as_str(),
                    end.as_str(),
                ])?;
            }
            Row::Unreadable(record) => writer.write_record(record)?,
        }
    }

    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}
