//! Axis scales and tick placement.
//!
//! Charts are drawn on a linear coordinate in *projected* space: a log axis
//! projects every value through `log10` first, so ticks supplied as data
//! values land at logarithmic positions.

use std::ops::Range;

use plotters::coord::ranged1d::{KeyPointHint, NoDefaultFormatting, Ranged, ValueFormatter};

use crate::utils::error::{ReportError, Result};

/// Fraction of the data span added on each side (matplotlib's default margin).
pub const AXIS_MARGIN: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisScale {
    Linear,
    Log10,
}

impl AxisScale {
    /// Maps a data value into drawing space.
    pub fn project(&self, value: f64) -> Result<f64> {
        match self {
            AxisScale::Linear => Ok(value),
            AxisScale::Log10 if value > 0.0 => Ok(value.log10()),
            AxisScale::Log10 => Err(ReportError::NonPositiveLog(value)),
        }
    }

    /// Maps a drawing-space coordinate back to a data value.
    pub fn unproject(&self, coord: f64) -> f64 {
        match self {
            AxisScale::Linear => coord,
            AxisScale::Log10 => 10f64.powf(coord),
        }
    }

    /// Projected span covering `values`, widened by [`AXIS_MARGIN`] on both sides.
    pub fn padded_range(&self, values: &[f64]) -> Result<Range<f64>> {
        let projected = values
            .iter()
            .map(|&v| self.project(v))
            .collect::<Result<Vec<f64>>>()?;
        let (lo, hi) = min_max(&projected)
            .ok_or_else(|| ReportError::EmptyDataset("no values on axis".to_string()))?;
        Ok(pad(lo, hi, AXIS_MARGIN))
    }

    /// Tick label for a projected coordinate.
    pub fn tick_label(&self, coord: f64) -> String {
        format_value(self.unproject(coord))
    }
}

/// Plotting coordinate in projected space whose ticks are pinned to given
/// data values and labelled with the unprojected value.
#[derive(Debug, Clone)]
pub struct TickedAxis {
    scale: AxisScale,
    range: Range<f64>,
    ticks: Vec<f64>,
}

impl TickedAxis {
    /// Covers every value and tick, padded by [`AXIS_MARGIN`].
    pub fn new(scale: AxisScale, values: &[f64], ticks: &[f64]) -> Result<Self> {
        let span: Vec<f64> = values.iter().chain(ticks).copied().collect();
        let range = scale.padded_range(&span)?;
        let ticks = ticks
            .iter()
            .map(|&t| scale.project(t))
            .collect::<Result<Vec<f64>>>()?;
        Ok(Self { scale, range, ticks })
    }

    pub fn project(&self, value: f64) -> Result<f64> {
        self.scale.project(value)
    }

    pub fn ticks(&self) -> &[f64] {
        &self.ticks
    }
}

impl Ranged for TickedAxis {
    type FormatOption = NoDefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        let span = self.range.end - self.range.start;
        let fraction = (value - self.range.start) / span;
        limit.0 + ((limit.1 - limit.0) as f64 * fraction).round() as i32
    }

    fn key_points<Hint: KeyPointHint>(&self, _hint: Hint) -> Vec<f64> {
        self.ticks.clone()
    }

    fn range(&self) -> Range<f64> {
        self.range.clone()
    }
}

impl ValueFormatter<f64> for TickedAxis {
    fn format_ext(&self, value: &f64) -> String {
        self.scale.tick_label(*value)
    }
}

/// Discrete axis of equally wide cells, labelled at their centres.
#[derive(Debug, Clone)]
pub struct CategoryAxis {
    labels: Vec<String>,
}

impl CategoryAxis {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }

    pub(crate) fn len(&self) -> usize {
        self.labels.len()
    }

    /// Coordinate of the middle of cell `index`.
    pub fn center(index: usize) -> f64 {
        index as f64 + 0.5
    }
}

impl Ranged for CategoryAxis {
    type FormatOption = NoDefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        let fraction = value / self.len().max(1) as f64;
        limit.0 + ((limit.1 - limit.0) as f64 * fraction).round() as i32
    }

    fn key_points<Hint: KeyPointHint>(&self, _hint: Hint) -> Vec<f64> {
        (0..self.len()).map(Self::center).collect()
    }

    fn range(&self) -> Range<f64> {
        0.0..self.len() as f64
    }
}

impl ValueFormatter<f64> for CategoryAxis {
    fn format_ext(&self, value: &f64) -> String {
        if *value < 0.0 {
            return String::new();
        }
        self.labels
            .get(value.floor() as usize)
            .cloned()
            .unwrap_or_default()
    }
}

/// Relative position (0 at the first tick, 1 at the last) of every tick.
pub fn tick_positions(scale: AxisScale, ticks: &[f64]) -> Result<Vec<f64>> {
    let projected = ticks
        .iter()
        .map(|&t| scale.project(t))
        .collect::<Result<Vec<f64>>>()?;
    let Some((lo, hi)) = min_max(&projected) else {
        return Ok(Vec::new());
    };
    let span = hi - lo;
    Ok(projected
        .iter()
        .map(|p| if span > 0.0 { (p - lo) / span } else { 0.0 })
        .collect())
}

/// Distinct values in ascending order, used to pin ticks to the data.
pub fn ticks_at(values: &[f64]) -> Vec<f64> {
    let mut ticks = values.to_vec();
    ticks.sort_by(f64::total_cmp);
    ticks.dedup();
    ticks
}

/// Widens `[lo, hi]` by `margin` of its span on each side; a degenerate span
/// becomes one unit wide.
pub fn pad(lo: f64, hi: f64, margin: f64) -> Range<f64> {
    let span = hi - lo;
    if span > 0.0 {
        (lo - span * margin)..(hi + span * margin)
    } else {
        let half = if lo != 0.0 { lo.abs() * 0.1 } else { 0.5 };
        (lo - half)..(hi + half)
    }
}

pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    values.iter().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Integers print bare; fractions keep up to four decimals.
pub fn format_value(value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() < 1e-9 * value.abs().max(1.0) {
        format!("{}", rounded)
    } else {
        let text = format!("{:.4}", value);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
