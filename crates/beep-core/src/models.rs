use std::fmt;
use std::hash::Hash;

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::dates::{CanonicalDate, DayOffset, ReferenceDate};
use crate::error::{BeepError, Result};
use crate::time_utils::{ClockTime, SecondsPastMidnight, TimeOfDay};

/// Sentinel rendered for observers that could not be reconciled.
pub const UNKNOWN_OBSERVER: &str = "unknown";

// ── Observer ──────────────────────────────────────────────────────────────────

/// Who logged a beep.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Observer {
    /// A canonical observer code, e.g. `"DR"`.
    Code(String),
    /// The source field could not be matched to anyone.
    Unknown,
}

impl Observer {
    pub fn as_str(&self) -> &str {
        match self {
            Observer::Code(code) => code,
            Observer::Unknown => UNKNOWN_OBSERVER,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Observer::Unknown)
    }
}

impl fmt::Display for Observer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Observer {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ── Observation ───────────────────────────────────────────────────────────────

/// A single beep: when it happened during the day and who heard it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Observation<T> {
    pub time: T,
    pub observer: Observer,
}

impl<T> Observation<T> {
    pub fn new(time: T, observer: Observer) -> Self {
        Self { time, observer }
    }
}

// ── DayKey ────────────────────────────────────────────────────────────────────

/// A day-key whose representation was chosen at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DayKey {
    Calendar(CanonicalDate),
    Offset(DayOffset),
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayKey::Calendar(date) => date.fmt(f),
            DayKey::Offset(offset) => offset.fmt(f),
        }
    }
}

impl Serialize for DayKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            DayKey::Calendar(date) => serializer.serialize_str(date.as_str()),
            DayKey::Offset(offset) => serializer.serialize_i64(offset.days()),
        }
    }
}

impl From<CanonicalDate> for DayKey {
    fn from(date: CanonicalDate) -> Self {
        DayKey::Calendar(date)
    }
}

impl From<DayOffset> for DayKey {
    fn from(offset: DayOffset) -> Self {
        DayKey::Offset(offset)
    }
}

// ── Dataset ───────────────────────────────────────────────────────────────────

/// Beeps grouped by day.
///
/// Iteration follows insertion order, which for a parsed file is file order.
/// A key is only present once at least one observation was recorded for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Dataset<K: Hash + Eq, T> {
    days: IndexMap<K, Vec<Observation<T>>>,
}

/// Dataset as read from the file: calendar date keys and clock strings.
pub type RawDataset = Dataset<CanonicalDate, ClockTime>;

/// Dataset keyed by day offset from the reference date.
pub type AbsoluteDataset<T = ClockTime> = Dataset<DayOffset, T>;

impl<K: Hash + Eq, T> Default for Dataset<K, T> {
    fn default() -> Self {
        Self {
            days: IndexMap::new(),
        }
    }
}

impl<K: Hash + Eq, T> Dataset<K, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an observation to `key`, creating the day on first sight.
    pub fn push(&mut self, key: K, observation: Observation<T>) {
        self.days.entry(key).or_default().push(observation);
    }

    pub fn get(&self, key: &K) -> Option<&[Observation<T>]> {
        self.days.get(key).map(Vec::as_slice)
    }

    /// Number of distinct days.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Total number of observations across all days.
    pub fn observation_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.days.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &[Observation<T>])> {
        self.days.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Re-key every day, keeping observation lists and order intact.
    ///
    /// Two keys mapping to the same new key is an error: nothing is merged.
    pub fn try_map_keys<K2, F>(self, mut f: F) -> Result<Dataset<K2, T>>
    where
        K: fmt::Display,
        K2: Hash + Eq + fmt::Display,
        F: FnMut(&K) -> Result<K2>,
    {
        let mut days: IndexMap<K2, (String, Vec<Observation<T>>)> =
            IndexMap::with_capacity(self.days.len());

        for (key, observations) in self.days {
            let new_key = f(&key)?;
            match days.entry(new_key) {
                Entry::Occupied(slot) => {
                    return Err(BeepError::DuplicateDay {
                        first: slot.get().0.clone(),
                        second: key.to_string(),
                        day: slot.key().to_string(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert((key.to_string(), observations));
                }
            }
        }

        Ok(Dataset {
            days: days
                .into_iter()
                .map(|(k, (_, observations))| (k, observations))
                .collect(),
        })
    }

    /// Infallible one-to-one re-keying, e.g. into [`DayKey`].
    pub fn map_keys<K2, F>(self, mut f: F) -> Dataset<K2, T>
    where
        K2: Hash + Eq,
        F: FnMut(K) -> K2,
    {
        Dataset {
            days: self.days.into_iter().map(|(k, v)| (f(k), v)).collect(),
        }
    }

    /// Rewrite every observation's time, keeping days and observers.
    pub fn try_map_times<T2, F>(self, mut f: F) -> Result<Dataset<K, T2>>
    where
        F: FnMut(&T) -> Result<T2>,
    {
        let mut days = IndexMap::with_capacity(self.days.len());
        for (key, observations) in self.days {
            let converted = observations
                .into_iter()
                .map(|obs| {
                    Ok(Observation {
                        time: f(&obs.time)?,
                        observer: obs.observer,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            days.insert(key, converted);
        }
        Ok(Dataset { days })
    }

    pub fn map_times<T2, F>(self, mut f: F) -> Dataset<K, T2>
    where
        F: FnMut(T) -> T2,
    {
        Dataset {
            days: self
                .days
                .into_iter()
                .map(|(k, v)| {
                    let v = v
                        .into_iter()
                        .map(|obs| Observation::new(f(obs.time), obs.observer))
                        .collect();
                    (k, v)
                })
                .collect(),
        }
    }
}

impl<T> Dataset<CanonicalDate, T> {
    /// Re-key by whole days elapsed since `reference`.
    pub fn to_absolute_dates(self, reference: &ReferenceDate) -> Result<Dataset<DayOffset, T>> {
        self.try_map_keys(|date| date.to_day_offset(reference))
    }
}

impl<K: Hash + Eq> Dataset<K, ClockTime> {
    /// Rewrite every `"HH:MM"` time as seconds past midnight.
    pub fn to_absolute_times(self) -> Result<Dataset<K, SecondsPastMidnight>> {
        self.try_map_times(ClockTime::to_seconds)
    }
}

impl<K: Hash + Eq, T> IntoIterator for Dataset<K, T> {
    type Item = (K, Vec<Observation<T>>);
    type IntoIter = indexmap::map::IntoIter<K, Vec<Observation<T>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.days.into_iter()
    }
}

// ── ReadOptions ───────────────────────────────────────────────────────────────

/// Post-processing applied after the file has been parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// Key days by offset from `reference` instead of `D/M/YY` strings.
    pub absolute_dates: bool,
    /// Express times as seconds past midnight instead of `"HH:MM"`.
    pub absolute_times: bool,
    pub reference: ReferenceDate,
}

impl ReadOptions {
    /// Apply the selected conversions to a freshly parsed dataset.
    pub fn apply(&self, raw: RawDataset) -> Result<Dataset<DayKey, TimeOfDay>> {
        let keyed: Dataset<DayKey, ClockTime> = if self.absolute_dates {
            raw.to_absolute_dates(&self.reference)?
                .map_keys(DayKey::from)
        } else {
            raw.map_keys(DayKey::from)
        };

        if self.absolute_times {
            Ok(keyed.to_absolute_times()?.map_times(TimeOfDay::from))
        } else {
            Ok(keyed.map_times(TimeOfDay::from))
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
