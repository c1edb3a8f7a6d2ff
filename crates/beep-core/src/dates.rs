//! Date handling for the beep log.
//!
//! The log mixes two spellings for the same day: ordinal forms such as
//! `9th May` and slash forms such as `10/5/22`. Everything is funnelled into
//! [`CanonicalDate`] (`D/M/YY`) and, on request, into a [`DayOffset`] counted
//! from a [`ReferenceDate`].

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::error::{BeepError, Result};

/// Marker for dates written out with a month name.
const MAY_MARKER: &str = "May";

/// Ordinal suffixes in match priority. `nd` is deliberately absent.
const ORDINAL_SUFFIXES: [&str; 3] = ["th", "st", "rd"];

/// Month and year every `May` date in the log belongs to.
const MAY_SUFFIX: &str = "/5/22";

// ── RawDate ───────────────────────────────────────────────────────────────────

/// The date column exactly as written in the file, minus surrounding spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDate(String);

impl RawDate {
    pub fn new(field: &str) -> Self {
        Self(field.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Blank date cells mark placeholder rows.
    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }

    pub fn normalize(&self) -> Result<CanonicalDate> {
        normalize_date(self)
    }
}

// ── CanonicalDate ─────────────────────────────────────────────────────────────

/// A `D/M/YY` day key. Not validated until it is converted to an offset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CanonicalDate(String);

impl CanonicalDate {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse `D/M/YY`, reading the two-digit year as `20YY`.
    pub fn to_naive_date(&self) -> Result<NaiveDate> {
        let invalid = || BeepError::DateParse(self.0.clone());

        let mut parts = self.0.split('/');
        let (Some(day), Some(month), Some(year), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        let year = year.trim();
        if year.len() != 2 {
            return Err(invalid());
        }

        let day: u32 = day.trim().parse().map_err(|_| invalid())?;
        let month: u32 = month.trim().parse().map_err(|_| invalid())?;
        let year: i32 = year.parse().map_err(|_| invalid())?;

        NaiveDate::from_ymd_opt(2000 + year, month, day).ok_or_else(invalid)
    }

    pub fn to_day_offset(&self, reference: &ReferenceDate) -> Result<DayOffset> {
        Ok(reference.offset_of(self.to_naive_date()?))
    }
}

impl fmt::Display for CanonicalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rewrite a raw date cell into `D/M/YY`.
///
/// Cells mentioning `May` take the text before the first matching ordinal
/// suffix as the day. Anything else is assumed to be canonical already and is
/// returned unchanged.
///
/// A `May` cell with none of the suffixes (such as `2nd May`) is a hard
/// error rather than a row that silently borrows the previous day, so it
/// aborts the read.
pub fn normalize_date(raw: &RawDate) -> Result<CanonicalDate> {
    let text = raw.as_str();
    if !text.contains(MAY_MARKER) {
        return Ok(CanonicalDate::new(text));
    }

    let day = ORDINAL_SUFFIXES
        .iter()
        .find_map(|suffix| text.find(suffix).map(|idx| &text[..idx]))
        .ok_or_else(|| BeepError::UnrecognizedOrdinal(text.to_string()))?;

    Ok(CanonicalDate::new(format!("{day}{MAY_SUFFIX}")))
}

// ── DayOffset ─────────────────────────────────────────────────────────────────

/// Whole days elapsed since the reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DayOffset(i64);

impl DayOffset {
    pub fn new(days: i64) -> Self {
        Self(days)
    }

    pub fn days(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for DayOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── ReferenceDate ─────────────────────────────────────────────────────────────

/// The date that maps to day offset zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceDate(NaiveDate);

impl ReferenceDate {
    /// Date of the first beep in the log.
    pub const FIRST_BEEP: NaiveDate = match NaiveDate::from_ymd_opt(2022, 5, 9) {
        Some(date) => date,
        None => NaiveDate::MIN,
    };

    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn offset_of(&self, date: NaiveDate) -> DayOffset {
        DayOffset((date - self.0).num_days())
    }

    pub fn date_at(&self, offset: DayOffset) -> NaiveDate {
        self.0 + Duration::days(offset.0)
    }

    /// Offset of the first day of the month containing `offset`.
    pub fn month_start(&self, offset: DayOffset) -> DayOffset {
        let date = self.date_at(offset);
        self.offset_of(date - Duration::days(i64::from(date.day0())))
    }
}

impl Default for ReferenceDate {
    fn default() -> Self {
        Self(Self::FIRST_BEEP)
    }
}

impl FromStr for ReferenceDate {
    type Err = BeepError;

    fn from_str(s: &str) -> Result<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|_| BeepError::DateParse(s.to_string()))
    }
}

impl fmt::Display for ReferenceDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
