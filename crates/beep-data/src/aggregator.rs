//! Cumulative beep counts over time, overall and per observer.

use indexmap::IndexMap;

use beep_core::dates::DayOffset;
use beep_core::models::{AbsoluteDataset, Observer};

// ── DailyCount ────────────────────────────────────────────────────────────────

/// Beeps recorded on one day and the running total up to and including it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyCount {
    pub day: DayOffset,
    pub count: u32,
    pub cumulative: u32,
}

/// Turn `(day, count)` pairs into running totals, preserving order.
fn accumulate(counts: impl IntoIterator<Item = (DayOffset, u32)>) -> Vec<DailyCount> {
    let mut total = 0u32;
    counts
        .into_iter()
        .map(|(day, count)| {
            total += count;
            DailyCount {
                day,
                count,
                cumulative: total,
            }
        })
        .collect()
}

// ── ObserverSeries ────────────────────────────────────────────────────────────

/// Cumulative counts for a single observer, on the days they logged a beep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObserverSeries {
    pub observer: String,
    pub days: Vec<DailyCount>,
}

impl ObserverSeries {
    pub fn total(&self) -> u32 {
        self.days.last().map(|d| d.cumulative).unwrap_or(0)
    }
}

// ── DatasetSummary ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetSummary {
    pub days: usize,
    pub beeps: usize,
    pub unknown_beeps: usize,
    pub observers: usize,
    pub first_day: Option<DayOffset>,
    pub last_day: Option<DayOffset>,
}

// ── BeepAggregator ────────────────────────────────────────────────────────────

/// Stateless helper that folds a day-offset dataset into cumulative counts.
pub struct BeepAggregator;

impl BeepAggregator {
    /// Running total of beeps per day, in dataset order.
    pub fn daily_cumulative<T>(data: &AbsoluteDataset<T>) -> Vec<DailyCount> {
        accumulate(
            data.iter()
                .map(|(day, observations)| (*day, observations.len() as u32)),
        )
    }

    /// Running totals per observer, largest total first.
    ///
    /// Unknown observers are left out. Observers with equal totals keep the
    /// order in which they first appear in the data.
    pub fn per_observer_cumulative<T>(data: &AbsoluteDataset<T>) -> Vec<ObserverSeries> {
        let mut per_observer: IndexMap<&str, IndexMap<DayOffset, u32>> = IndexMap::new();

        for (day, observations) in data.iter() {
            for obs in observations {
                if let Observer::Code(code) = &obs.observer {
                    *per_observer
                        .entry(code.as_str())
                        .or_default()
                        .entry(*day)
                        .or_default() += 1;
                }
            }
        }

        let mut series: Vec<ObserverSeries> = per_observer
            .into_iter()
            .map(|(observer, days)| ObserverSeries {
                observer: observer.to_string(),
                days: accumulate(days),
            })
            .collect();

        // Stable sort keeps first-appearance order on ties.
        series.sort_by(|a, b| b.total().cmp(&a.total()));
        series
    }

    /// Headline numbers used for logging.
    pub fn summarize<T>(data: &AbsoluteDataset<T>) -> DatasetSummary {
        let mut observers: Vec<&str> = Vec::new();
        let mut unknown_beeps = 0;

        for (_, observations) in data.iter() {
            for obs in observations {
                match &obs.observer {
                    Observer::Code(code) => {
                        if !observers.contains(&code.as_str()) {
                            observers.push(code);
                        }
                    }
                    Observer::Unknown => unknown_beeps += 1,
                }
            }
        }

        DatasetSummary {
            days: data.len(),
            beeps: data.observation_count(),
            unknown_beeps,
            observers: observers.len(),
            first_day: data.keys().min().copied(),
            last_day: data.keys().max().copied(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use beep_core::models::Observation;
    use beep_core::time_utils::ClockTime;

    fn dataset(rows: &[(i64, &str)]) -> AbsoluteDataset {
        let mut data = AbsoluteDataset::new();
        for (day, observer) in rows {
            let observer = if *observer == "unknown" {
                Observer::Unknown
            } else {
                Observer::Code(observer.to_string())
            };
            data.push(
                DayOffset::new(*day),
                Observation::new(ClockTime::new("12:00"), observer),
            );
        }
        data
    }

    fn cumulative(counts: &[DailyCount]) -> Vec<(i64, u32)> {
        counts.iter().map(|c| (c.day.days(), c.cumulative)).collect()
    }

    // ── daily_cumulative ──────────────────────────────────────────────────────

    #[test]
    fn test_daily_cumulative_running_total() {
        let data = dataset(&[(0, "AB"), (0, "CD"), (1, "AB"), (4, "unknown"), (4, "AB"), (4, "CD")]);
        let daily = BeepAggregator::daily_cumulative(&data);

        assert_eq!(cumulative(&daily), vec![(0, 2), (1, 3), (4, 6)]);
        assert_eq!(daily[2].count, 3);
    }

    #[test]
    fn test_daily_cumulative_empty() {
        let data = AbsoluteDataset::<ClockTime>::new();
        assert!(BeepAggregator::daily_cumulative(&data).is_empty());
    }

    // ── per_observer_cumulative ───────────────────────────────────────────────

    #[test]
    fn test_per_observer_excludes_unknown() {
        let data = dataset(&[(0, "AB"), (0, "unknown"), (1, "unknown")]);
        let series = BeepAggregator::per_observer_cumulative(&data);

        assert_eq!(series.len(), 1);
        assert_eq!(series[0].observer, "AB");
    }

    #[test]
    fn test_per_observer_without_unknown_entries() {
        let data = dataset(&[(0, "AB"), (1, "CD")]);
        let series = BeepAggregator::per_observer_cumulative(&data);
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn test_per_observer_sorted_by_total_descending() {
        let data = dataset(&[
            (0, "AB"),
            (0, "CD"),
            (1, "CD"),
            (2, "EF"),
            (2, "CD"),
            (3, "EF"),
        ]);
        let series = BeepAggregator::per_observer_cumulative(&data);

        let order: Vec<(&str, u32)> = series
            .iter()
            .map(|s| (s.observer.as_str(), s.total()))
            .collect();
        assert_eq!(order, vec![("CD", 3), ("EF", 2), ("AB", 1)]);
    }

    #[test]
    fn test_per_observer_ties_keep_first_appearance() {
        let data = dataset(&[(0, "ZZ"), (1, "AA"), (2, "MM")]);
        let series = BeepAggregator::per_observer_cumulative(&data);

        let names: Vec<&str> = series.iter().map(|s| s.observer.as_str()).collect();
        assert_eq!(names, vec!["ZZ", "AA", "MM"]);
    }

    #[test]
    fn test_per_observer_days_and_running_totals() {
        let data = dataset(&[(0, "AB"), (0, "AB"), (2, "CD"), (5, "AB")]);
        let series = BeepAggregator::per_observer_cumulative(&data);

        let ab = series.iter().find(|s| s.observer == "AB").unwrap();
        assert_eq!(cumulative(&ab.days), vec![(0, 2), (5, 3)]);
        assert_eq!(ab.days[0].count, 2);
    }

    // ── summarize ─────────────────────────────────────────────────────────────

    #[test]
    fn test_summarize() {
        let data = dataset(&[(0, "AB"), (0, "unknown"), (3, "CD"), (7, "AB")]);
        let summary = BeepAggregator::summarize(&data);

        assert_eq!(summary.days, 3);
        assert_eq!(summary.beeps, 4);
        assert_eq!(summary.unknown_beeps, 1);
        assert_eq!(summary.observers, 2);
        assert_eq!(summary.first_day, Some(DayOffset::new(0)));
        assert_eq!(summary.last_day, Some(DayOffset::new(7)));
    }

    #[test]
    fn test_summarize_empty() {
        let summary = BeepAggregator::summarize(&AbsoluteDataset::<ClockTime>::new());
        assert_eq!(summary, DatasetSummary::default());
    }
}
