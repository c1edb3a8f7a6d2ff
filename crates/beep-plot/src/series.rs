use beep_core::dates::DayOffset;
use beep_data::aggregator::DailyCount;
use image::Rgb;

/// One straight piece of a step curve, in data coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Horizontal { from: i64, to: i64, level: u32 },
    Vertical { at: i64, from: u32, to: u32 },
}

/// A cumulative count drawn as a staircase.
#[derive(Debug, Clone)]
pub struct StepSeries {
    pub label: Option<String>,
    pub color: Rgb<u8>,
    pub points: Vec<(DayOffset, u32)>,
    /// Continue the final level flat until this day.
    pub extend_to: Option<DayOffset>,
}

impl StepSeries {
    pub fn from_counts(counts: &[DailyCount], color: Rgb<u8>) -> Self {
        Self {
            label: None,
            color,
            points: counts.iter().map(|c| (c.day, c.cumulative)).collect(),
            extend_to: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn extended_to(mut self, day: DayOffset) -> Self {
        self.extend_to = Some(day);
        self
    }

    pub fn max_level(&self) -> u32 {
        self.points.iter().map(|&(_, c)| c).max().unwrap_or(0)
    }

    /// Rise from zero at the first day, then alternate flat runs and rises.
    pub fn segments(&self) -> Vec<Segment> {
        let mut out = Vec::with_capacity(self.points.len() * 2 + 1);
        let Some(&(first_day, first_level)) = self.points.first() else {
            return out;
        };

        out.push(Segment::Vertical {
            at: first_day.days(),
            from: 0,
            to: first_level,
        });

        for pair in self.points.windows(2) {
            let (d0, c0) = pair[0];
            let (d1, c1) = pair[1];
            out.push(Segment::Horizontal {
                from: d0.days(),
                to: d1.days(),
                level: c0,
            });
            out.push(Segment::Vertical {
                at: d1.days(),
                from: c0,
                to: c1,
            });
        }

        if let (Some(end), Some(&(last_day, last_level))) = (self.extend_to, self.points.last()) {
            if end > last_day {
                out.push(Segment::Horizontal {
                    from: last_day.days(),
                    to: end.days(),
                    level: last_level,
                });
            }
        }

        out
    }
}
