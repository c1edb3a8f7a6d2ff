//! The two published figures: overall and per-observer cumulative counts.

use std::path::{Path, PathBuf};

use beep_core::dates::{DayOffset, ReferenceDate};
use beep_core::error::Result;
use beep_core::models::AbsoluteDataset;
use beep_data::aggregator::{BeepAggregator, DailyCount, ObserverSeries};
use tracing::{debug, info};

use crate::axis::{drop_partial_first, month_ticks, snap_first_to_month_start};
use crate::chart::StepChart;
use crate::color::{generate_palette, BLACK};
use crate::series::StepSeries;

pub const CUMULATIVE_FIGURE: &str = "cumulative_beep_count.png";
pub const PER_OBSERVER_FIGURE: &str = "cumulative_beep_count_per_obs.png";

/// Overall cumulative count as a single black staircase.
pub fn cumulative_chart(daily: &[DailyCount], reference: &ReferenceDate) -> StepChart {
    let mut chart = StepChart::new("Cumulative beep count");
    chart.series.push(StepSeries::from_counts(daily, BLACK));

    if let (Some(first), Some(last)) = (daily.first(), daily.last()) {
        let ticks = month_ticks(reference, first.day, last.day);
        chart.ticks = drop_partial_first(reference, ticks);
    }

    chart
}

/// One staircase per observer, each carried flat to `last_day`.
pub fn per_observer_chart(
    series: &[ObserverSeries],
    last_day: DayOffset,
    reference: &ReferenceDate,
) -> StepChart {
    let mut chart = StepChart::new("Cumulative beep count (per observer)");
    chart.legend = true;

    let colors = generate_palette(series.len());
    for (observer, color) in series.iter().zip(colors) {
        chart.series.push(
            StepSeries::from_counts(&observer.days, color)
                .with_label(observer.observer.as_str())
                .extended_to(last_day),
        );
    }

    let first_day = series
        .iter()
        .filter_map(|s| s.days.first().map(|d| d.day))
        .min();
    if let Some(first_day) = first_day {
        let ticks = month_ticks(reference, first_day, last_day);
        chart.ticks = snap_first_to_month_start(reference, ticks);
    }

    chart
}

/// Render both figures into `out_dir` and return the written paths.
pub fn write_figures<T>(
    out_dir: &Path,
    data: &AbsoluteDataset<T>,
    reference: &ReferenceDate,
) -> Result<Vec<PathBuf>> {
    let daily = BeepAggregator::daily_cumulative(data);
    let per_observer = BeepAggregator::per_observer_cumulative(data);
    let last_day = data.keys().max().copied().unwrap_or(DayOffset::new(0));

    debug!(
        "Plotting {} days, {} observers",
        daily.len(),
        per_observer.len()
    );

    let figures = [
        (CUMULATIVE_FIGURE, cumulative_chart(&daily, reference)),
        (
            PER_OBSERVER_FIGURE,
            per_observer_chart(&per_observer, last_day, reference),
        ),
    ];

    let mut written = Vec::with_capacity(figures.len());
    for (name, chart) in figures {
        let path = out_dir.join(name);
        chart.render().save(&path)?;
        info!("Wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}
