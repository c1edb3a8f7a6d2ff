//! Step-chart figures for cumulative beep counts, rendered to PNG.

pub mod axis;
pub mod canvas;
pub mod chart;
pub mod color;
pub mod figures;
pub mod font;
pub mod series;

pub use figures::{write_figures, CUMULATIVE_FIGURE, PER_OBSERVER_FIGURE};
