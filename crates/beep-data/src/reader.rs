//! CSV loading for the beep log.
//!
//! The file starts with two header lines, followed by rows of
//! `date,time,observer,notes...`. There is no quoting; notes are ignored.

use std::io::Read;
use std::path::Path;

use beep_core::dates::RawDate;
use beep_core::error::{BeepError, Result};
use beep_core::models::{DayKey, Dataset, Observation, ReadOptions, RawDataset};
use beep_core::observers::normalize_observer;
use beep_core::time_utils::{ClockTime, TimeOfDay};
use csv::StringRecord;
use tracing::{debug, warn};

/// Lines at the top of the file that never carry data.
const HEADER_LINES: u64 = 2;

/// date, time and observer.
const REQUIRED_FIELDS: usize = 3;

// ── Public API ────────────────────────────────────────────────────────────────

/// Read the beep log at `path` and apply `options`.
pub fn read_data(path: &Path, options: &ReadOptions) -> Result<Dataset<DayKey, TimeOfDay>> {
    let raw = read_beeps(path)?;
    options.apply(raw)
}

/// Read the beep log at `path` into a dataset keyed by `D/M/YY` strings.
pub fn read_beeps(path: &Path) -> Result<RawDataset> {
    let file = std::fs::File::open(path).map_err(|source| BeepError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let data = parse_beeps(file).map_err(|e| match e {
        BeepError::Io(source) => BeepError::FileRead {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;

    debug!(
        "File {}: {} days, {} beeps",
        path.display(),
        data.len(),
        data.observation_count()
    );

    Ok(data)
}

/// Parse beep rows from any byte source.
pub fn parse_beeps<R: Read>(reader: R) -> Result<RawDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let mut data = RawDataset::new();
    let mut skipped = 0u64;
    let mut unknown = 0u64;

    for result in reader.records() {
        let record = result.map_err(|e| BeepError::Io(e.into()))?;
        let line = record.position().map_or(0, |p| p.line());
        if line <= HEADER_LINES {
            continue;
        }

        let date = RawDate::new(record.get(0).unwrap_or_default());
        if date.is_blank() {
            skipped += 1;
            continue;
        }

        let (Some(time), Some(observer_field)) = (record.get(1), observer_cell(&record)) else {
            return Err(BeepError::MalformedRow {
                line: line as usize,
                fields: record.len(),
            });
        };

        let observer = normalize_observer(observer_field);
        if observer.is_unknown() {
            unknown += 1;
            warn!("Line {}: unrecognised observer {:?}", line, observer_field);
        }

        let key = date.normalize()?;
        data.push(key, Observation::new(ClockTime::new(time), observer));
    }

    debug!(
        "Parsed {} beeps, {} blank rows skipped, {} unknown observers",
        data.observation_count(),
        skipped,
        unknown
    );

    Ok(data)
}

/// The observer cell, without the trailing whitespace of the line when it
/// is the last cell.
fn observer_cell(record: &StringRecord) -> Option<&str> {
    let cell = record.get(REQUIRED_FIELDS - 1)?;
    if record.len() == REQUIRED_FIELDS {
        Some(cell.trim_end())
    } else {
        Some(cell)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
