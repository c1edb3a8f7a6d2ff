//! Step-chart layout and rasterization.

use crate::axis::{nice_step, MonthTick};
use crate::canvas::Canvas;
use crate::color::{BLACK, GRID, LEGEND_BORDER, WHITE};
use crate::font::{text_width, GLYPH_HEIGHT};
use crate::series::{Segment, StepSeries};

const WIDTH: u32 = 1200;
const HEIGHT: u32 = 800;

const MARGIN_LEFT: i64 = 120;
const MARGIN_RIGHT: i64 = 40;
const MARGIN_TOP: i64 = 40;
const MARGIN_BOTTOM: i64 = 80;

const LINE_THICKNESS: i64 = 3;
const TEXT_SCALE: i64 = 2;
const TICK_LENGTH: i64 = 8;
const Y_TICK_TARGET: f64 = 6.0;

/// Fraction of the data span left blank on each side of the x axis.
const X_PADDING: f64 = 0.03;

/// Maps data coordinates onto the plot rectangle.
#[derive(Debug, Clone, Copy)]
struct PlotArea {
    left: i64,
    top: i64,
    width: i64,
    height: i64,
    x_min: f64,
    x_max: f64,
    y_max: f64,
}

impl PlotArea {
    fn x(&self, day: f64) -> i64 {
        let span = (self.x_max - self.x_min).max(f64::EPSILON);
        self.left + ((day - self.x_min) / span * self.width as f64).round() as i64
    }

    fn y(&self, value: f64) -> i64 {
        self.top + self.height - (value / self.y_max * self.height as f64).round() as i64
    }

    fn bottom(&self) -> i64 {
        self.top + self.height
    }
}

/// Everything needed to draw one figure.
#[derive(Debug, Clone)]
pub struct StepChart {
    pub y_label: String,
    pub series: Vec<StepSeries>,
    pub ticks: Vec<MonthTick>,
    pub legend: bool,
}

impl StepChart {
    pub fn new(y_label: impl Into<String>) -> Self {
        Self {
            y_label: y_label.into(),
            series: Vec::new(),
            ticks: Vec::new(),
            legend: false,
        }
    }

    /// Day range covered by data, series extensions and ticks.
    pub fn x_extent(&self) -> Option<(i64, i64)> {
        let days = self
            .series
            .iter()
            .flat_map(|s| {
                s.points
                    .iter()
                    .map(|(d, _)| d.days())
                    .chain(s.extend_to.map(|d| d.days()))
            })
            .chain(self.ticks.iter().map(|t| t.day.days()));

        days.fold(None, |acc, d| match acc {
            None => Some((d, d)),
            Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
        })
    }

    fn area(&self) -> PlotArea {
        let (lo, hi) = self.x_extent().unwrap_or((0, 1));
        let pad = ((hi - lo) as f64 * X_PADDING).max(1.0);
        let top_level = self.series.iter().map(StepSeries::max_level).max().unwrap_or(0);

        PlotArea {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            width: i64::from(WIDTH) - MARGIN_LEFT - MARGIN_RIGHT,
            height: i64::from(HEIGHT) - MARGIN_TOP - MARGIN_BOTTOM,
            x_min: lo as f64 - pad,
            x_max: hi as f64 + pad,
            y_max: (f64::from(top_level) * 1.05).max(1.0),
        }
    }

    pub fn render(&self) -> Canvas {
        let mut canvas = Canvas::new(WIDTH, HEIGHT, WHITE);
        let area = self.area();

        self.draw_y_axis(&mut canvas, &area);
        for series in &self.series {
            draw_series(&mut canvas, &area, series);
        }
        canvas.outline(area.left, area.top, area.width, area.height, BLACK);
        self.draw_x_axis(&mut canvas, &area);
        if self.legend {
            self.draw_legend(&mut canvas, &area);
        }

        canvas
    }

    /// Horizontal grid, y tick labels and the rotated axis title.
    fn draw_y_axis(&self, canvas: &mut Canvas, area: &PlotArea) {
        let step = nice_step(area.y_max, Y_TICK_TARGET);
        let mut value = 0.0;
        while value <= area.y_max {
            let y = area.y(value);
            canvas.hline(area.left, area.left + area.width, y, 1, GRID);
            canvas.hline(area.left - TICK_LENGTH, area.left, y, 1, BLACK);

            let label = format!("{}", value as u64);
            let w = text_width(&label, TEXT_SCALE);
            canvas.text(
                area.left - TICK_LENGTH - 6 - w,
                y - GLYPH_HEIGHT * TEXT_SCALE / 2,
                &label,
                TEXT_SCALE,
                BLACK,
            );
            value += step;
        }

        let title_width = text_width(&self.y_label, TEXT_SCALE);
        canvas.text_up(
            16,
            area.top + area.height / 2 + title_width / 2,
            &self.y_label,
            TEXT_SCALE,
            BLACK,
        );
    }

    fn draw_x_axis(&self, canvas: &mut Canvas, area: &PlotArea) {
        for tick in &self.ticks {
            let day = tick.day.days() as f64;
            if day < area.x_min || day > area.x_max {
                continue;
            }
            let x = area.x(day);
            canvas.vline(x, area.bottom(), area.bottom() + TICK_LENGTH, 1, BLACK);

            let w = text_width(&tick.label, TEXT_SCALE);
            canvas.text(
                x - w / 2,
                area.bottom() + TICK_LENGTH + 8,
                &tick.label,
                TEXT_SCALE,
                BLACK,
            );
        }
    }

    fn draw_legend(&self, canvas: &mut Canvas, area: &PlotArea) {
        let entries: Vec<(&str, _)> = self
            .series
            .iter()
            .filter_map(|s| s.label.as_deref().map(|l| (l, s.color)))
            .collect();
        if entries.is_empty() {
            return;
        }

        let swatch = 30;
        let row_height = GLYPH_HEIGHT * TEXT_SCALE + 10;
        let label_width = entries
            .iter()
            .map(|(l, _)| text_width(l, TEXT_SCALE))
            .max()
            .unwrap_or(0);
        let box_w = 10 + swatch + 10 + label_width + 10;
        let box_h = 6 + row_height * entries.len() as i64;
        let x = area.left + 12;
        let y = area.top + 12;

        canvas.fill_rect(x, y, box_w, box_h, WHITE);
        canvas.outline(x, y, box_w, box_h, LEGEND_BORDER);

        for (i, (label, color)) in entries.iter().enumerate() {
            let row_y = y + 8 + i as i64 * row_height;
            let mid = row_y + GLYPH_HEIGHT * TEXT_SCALE / 2;
            canvas.hline(x + 10, x + 10 + swatch, mid, LINE_THICKNESS, *color);
            canvas.text(x + 20 + swatch, row_y, label, TEXT_SCALE, BLACK);
        }
    }
}

fn draw_series(canvas: &mut Canvas, area: &PlotArea, series: &StepSeries) {
    for segment in series.segments() {
        match segment {
            Segment::Horizontal { from, to, level } => {
                let y = area.y(f64::from(level));
                canvas.hline(
                    area.x(from as f64),
                    area.x(to as f64),
                    y,
                    LINE_THICKNESS,
                    series.color,
                );
            }
            Segment::Vertical { at, from, to } => {
                canvas.vline(
                    area.x(at as f64),
                    area.y(f64::from(from)),
                    area.y(f64::from(to)),
                    LINE_THICKNESS,
                    series.color,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beep_core::dates::DayOffset;
    use image::Rgb;

    const RED: Rgb<u8> = Rgb([200, 0, 0]);

    fn series(points: &[(i64, u32)], color: Rgb<u8>) -> StepSeries {
        StepSeries {
            label: None,
            color,
            points: points.iter().map(|&(d, c)| (DayOffset::new(d), c)).collect(),
            extend_to: None,
        }
    }

    #[test]
    fn test_x_extent_covers_ticks_and_extensions() {
        let mut chart = StepChart::new("count");
        chart.series.push(series(&[(3, 1), (10, 2)], RED).extended_to(DayOffset::new(20)));
        chart.ticks.push(MonthTick {
            day: DayOffset::new(-8),
            label: "May".to_string(),
        });
        assert_eq!(chart.x_extent(), Some((-8, 20)));
    }

    #[test]
    fn test_x_extent_empty() {
        assert_eq!(StepChart::new("count").x_extent(), None);
    }

    #[test]
    fn test_render_dimensions_and_series_colour() {
        let mut chart = StepChart::new("Cumulative beep count");
        chart.series.push(series(&[(0, 1), (5, 4), (9, 10)], RED));
        let canvas = chart.render();

        assert_eq!(canvas.image().dimensions(), (WIDTH, HEIGHT));
        assert!(canvas.image().pixels().any(|p| *p == RED));
    }

    #[test]
    fn test_render_empty_chart() {
        let canvas = StepChart::new("nothing").render();
        assert_eq!(canvas.image().dimensions(), (WIDTH, HEIGHT));
    }

    #[test]
    fn test_series_stays_inside_plot_area() {
        let mut chart = StepChart::new("count");
        chart.series.push(series(&[(0, 3), (30, 50)], RED));
        let canvas = chart.render();
        let area = chart.area();

        for (x, y, p) in canvas.image().enumerate_pixels() {
            if *p == RED {
                let (x, y) = (i64::from(x), i64::from(y));
                assert!(x >= area.left - LINE_THICKNESS && x <= area.left + area.width + LINE_THICKNESS);
                assert!(y >= area.top - LINE_THICKNESS && y <= area.bottom() + LINE_THICKNESS);
            }
        }
    }

    #[test]
    fn test_legend_draws_swatch() {
        let mut chart = StepChart::new("count");
        chart.series.push(series(&[(0, 3)], RED).with_label("AB"));
        chart.legend = true;
        let canvas = chart.render();
        let area = chart.area();

        // Swatch sits in the top-left corner of the plot area.
        let swatch_x = (area.left + 12 + 10 + 5) as u32;
        let swatch_y = (area.top + 12 + 8 + GLYPH_HEIGHT * TEXT_SCALE / 2) as u32;
        assert_eq!(*canvas.image().get_pixel(swatch_x, swatch_y), RED);
    }
}
