//! Axis scaling and tick placement.

use beep_core::dates::{DayOffset, ReferenceDate};
use chrono::Datelike;

/// A labelled x-axis position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthTick {
    pub day: DayOffset,
    pub label: String,
}

/// One tick at the first day seen of each calendar month in `from..=to`.
///
/// The first tick sits at `from` itself unless `from` happens to be the 1st.
pub fn month_ticks(reference: &ReferenceDate, from: DayOffset, to: DayOffset) -> Vec<MonthTick> {
    let mut ticks = Vec::new();
    let mut current: Option<(i32, u32)> = None;

    for day in from.days()..=to.days() {
        let offset = DayOffset::new(day);
        let date = reference.date_at(offset);
        let month = (date.year(), date.month());
        if current != Some(month) {
            current = Some(month);
            ticks.push(MonthTick {
                day: offset,
                label: date.format("%b").to_string(),
            });
        }
    }

    ticks
}

/// Drop the leading tick when it marks a partial month.
pub fn drop_partial_first(reference: &ReferenceDate, mut ticks: Vec<MonthTick>) -> Vec<MonthTick> {
    if let Some(first) = ticks.first() {
        if reference.month_start(first.day) != first.day {
            ticks.remove(0);
        }
    }
    ticks
}

/// Move the leading tick back to the 1st of its month.
pub fn snap_first_to_month_start(
    reference: &ReferenceDate,
    mut ticks: Vec<MonthTick>,
) -> Vec<MonthTick> {
    if let Some(first) = ticks.first_mut() {
        first.day = reference.month_start(first.day);
    }
    ticks
}

/// A round step giving roughly `target` intervals up to `max`.
pub fn nice_step(max: f64, target: f64) -> f64 {
    let raw = (max / target).max(1.0);
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let nice = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}
