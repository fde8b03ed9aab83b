//! Annotated line charts: one marker per point, its value in a yellow tag
//! above it and an optional note in a blue tag below.

use std::{ops::Range, path::Path};

use log::debug;
use plotters::{
    coord::Shift,
    prelude::*,
    style::text_anchor::{HPos, Pos, VPos},
};

use crate::render::{
    axis::{min_max, pad, ticks_at, AxisScale, TickedAxis, AXIS_MARGIN},
    figure::render_png,
};
use crate::utils::{
    config::Figure,
    error::{ReportError, Result},
};

const FONT: &str = "sans-serif";
const LINE_COLOR: RGBColor = RGBColor(31, 119, 180);
const MARKER_EDGE: RGBColor = RGBColor(139, 0, 0);
const ERROR_COLOR: RGBColor = RGBColor(128, 128, 128);
const NOTE_FILL: RGBColor = RGBColor(173, 216, 230);

/// Space kept above the highest point (and below the lowest one when notes
/// are drawn), as a fraction of the padded y span.
const TAG_HEADROOM: f64 = 0.12;

#[derive(Debug, Clone, PartialEq)]
pub struct LinePoint {
    pub x: f64,
    pub y: f64,
    /// Text in the tag above the marker.
    pub label: String,
    /// Text in the tag below the marker.
    pub note: Option<String>,
    /// Half height of a vertical error bar centred on `y`.
    pub error: Option<f64>,
}

impl LinePoint {
    pub fn new(x: f64, y: f64, label: impl Into<String>) -> Self {
        Self { x, y, label: label.into(), note: None, error: None }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_error(mut self, error: f64) -> Self {
        self.error = Some(error);
        self
    }
}

/// Declarative description of one line chart. Points are joined in the
/// order given.
#[derive(Debug, Clone)]
pub struct LineChart {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub x_scale: AxisScale,
    /// Values the x ticks are pinned to; empty means one tick per distinct x.
    pub x_ticks: Vec<f64>,
    pub points: Vec<LinePoint>,
    pub legend: Option<String>,
}

impl LineChart {
    pub fn new(title: impl Into<String>, x_desc: impl Into<String>, y_desc: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_desc: x_desc.into(),
            y_desc: y_desc.into(),
            x_scale: AxisScale::Linear,
            x_ticks: Vec::new(),
            points: Vec::new(),
            legend: None,
        }
    }

    pub fn x_scale(mut self, scale: AxisScale) -> Self {
        self.x_scale = scale;
        self
    }

    pub fn x_ticks(mut self, ticks: Vec<f64>) -> Self {
        self.x_ticks = ticks;
        self
    }

    pub fn points(mut self, points: Vec<LinePoint>) -> Self {
        self.points = points;
        self
    }

    pub fn legend(mut self, label: impl Into<String>) -> Self {
        self.legend = Some(label.into());
        self
    }

    pub fn x_axis(&self) -> Result<TickedAxis> {
        let xs: Vec<f64> = self.points.iter().map(|p| p.x).collect();
        let ticks = if self.x_ticks.is_empty() {
            ticks_at(&xs)
        } else {
            self.x_ticks.clone()
        };
        TickedAxis::new(self.x_scale, &xs, &ticks)
    }

    /// Covers every point and error bar, plus headroom for the tags.
    pub fn y_range(&self) -> Result<Range<f64>> {
        let extents: Vec<f64> = self
            .points
            .iter()
            .flat_map(|p| {
                let e = p.error.unwrap_or(0.0);
                [p.y - e, p.y + e]
            })
            .collect();
        let (lo, hi) = min_max(&extents)
            .ok_or_else(|| ReportError::EmptyDataset(format!("'{}' has no points", self.title)))?;

        let padded = pad(lo, hi, AXIS_MARGIN);
        let span = padded.end - padded.start;
        let below = if self.points.iter().any(|p| p.note.is_some()) {
            span * TAG_HEADROOM
        } else {
            0.0
        };
        Ok((padded.start - below)..(padded.end + span * TAG_HEADROOM))
    }

    pub fn render(&self, figure: &Figure, path: &Path) -> Result<()> {
        if self.points.is_empty() {
            return Err(ReportError::EmptyDataset(format!("'{}' has no points", self.title)));
        }
        let x_axis = self.x_axis()?;
        let y_range = self.y_range()?;
        debug!(
            "'{}': {} points, x {:?} ({:?}), y {:?}",
            self.title,
            self.points.len(),
            x_axis.range(),
            self.x_scale,
            y_range
        );

        render_png(figure, path, |root| self.draw(root, figure, x_axis, y_range))
    }

    fn draw(
        &self,
        root: &DrawingArea<BitMapBackend<'_>, Shift>,
        figure: &Figure,
        x_axis: TickedAxis,
        y_range: Range<f64>,
    ) -> Result<()> {
        let coords = self
            .points
            .iter()
            .map(|p| Ok((x_axis.project(p.x)?, p.y)))
            .collect::<Result<Vec<(f64, f64)>>>()?;

        let line_width = figure.pt(2.0) as u32;
        let mut chart = ChartBuilder::on(root)
            .caption(&self.title, (FONT, figure.pt(14.0)))
            .margin(figure.pt(12.0))
            .x_label_area_size(figure.pt(36.0))
            .y_label_area_size(figure.pt(60.0))
            .build_cartesian_2d(x_axis, y_range)?;

        chart
            .configure_mesh()
            .x_desc(self.x_desc.as_str())
            .y_desc(self.y_desc.as_str())
            .axis_desc_style((FONT, figure.pt(12.0)))
            .label_style((FONT, figure.pt(10.0)))
            .bold_line_style(BLACK.mix(0.15))
            .light_line_style(TRANSPARENT)
            .draw()?;

        let cap = figure.pt(10.0) as u32;
        chart.draw_series(self.points.iter().zip(&coords).filter_map(|(point, &(x, y))| {
            point.error.map(|e| {
                ErrorBar::new_vertical(x, y - e, y, y + e, ERROR_COLOR.stroke_width(line_width), cap)
            })
        }))?;

        let series = chart.draw_series(LineSeries::new(
            coords.iter().copied(),
            LINE_COLOR.stroke_width(line_width),
        ))?;
        if let Some(label) = &self.legend {
            let swatch = figure.pt(20.0) as i32;
            series.label(label.as_str()).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + swatch, y)], LINE_COLOR.stroke_width(line_width))
            });
        }

        let radius = figure.pt(4.0) as i32;
        let edge = figure.pt(1.0).max(1.0) as u32;
        chart.draw_series(coords.iter().map(|&c| Circle::new(c, radius, RED.filled())))?;
        chart.draw_series(coords.iter().map(|&c| Circle::new(c, radius, MARKER_EDGE.stroke_width(edge))))?;

        if self.legend.is_some() {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK.mix(0.3))
                .label_font((FONT, figure.pt(10.0)))
                .draw()?;
        }

        let centered = Pos::new(HPos::Center, VPos::Center);
        let label_style = (FONT, figure.pt(9.0)).into_font().color(&BLACK).pos(centered);
        let note_style = (FONT, figure.pt(8.0)).into_font().color(&BLUE).pos(centered);
        let tag_pad = figure.pt(3.0) as i32;
        for (point, coord) in self.points.iter().zip(&coords) {
            let (x, y) = chart.backend_coord(coord);
            let above = y - figure.pt(10.0) as i32;
            draw_tag(root, &point.label, (x, above), &label_style, YELLOW.mix(0.7), tag_pad)?;
            if let Some(note) = &point.note {
                let below = y + figure.pt(20.0) as i32;
                draw_tag(root, note, (x, below), &note_style, NOTE_FILL.mix(0.5), tag_pad)?;
            }
        }
        Ok(())
    }
}

/// Boxed text centred horizontally on `x` whose bottom edge sits on `baseline`.
fn draw_tag(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    text: &str,
    (x, baseline): (i32, i32),
    style: &TextStyle,
    fill: RGBAColor,
    pad: i32,
) -> Result<()> {
    let (w, h) = root.estimate_text_size(text, style)?;
    let (w, h) = (w as i32, h as i32);
    root.draw(&Rectangle::new(
        [(x - w / 2 - pad, baseline - h - pad), (x + w / 2 + pad, baseline + pad)],
        fill.filled(),
    ))?;
    root.draw(&Text::new(text, (x, baseline - h / 2), style.clone()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart() -> LineChart {
        LineChart::new("Time vs processes", "Processes", "Time (s)")
            .x_scale(AxisScale::Log10)
            .points(vec![
                LinePoint::new(1.0, 20.0, "20.0s"),
                LinePoint::new(2.0, 11.0, "11.0s"),
                LinePoint::new(4.0, 6.5, "6.5s"),
                LinePoint::new(8.0, 4.0, "4.0s"),
            ])
    }

    #[test]
    fn y_range_leaves_room_for_tags() {
        let range = chart().y_range().unwrap();
        // 4..20 padded by 5% -> 3.2..20.8, then 12% of 17.6 on top only
        assert!((range.start - 3.2).abs() < 1e-9);
        assert!((range.end - (20.8 + 17.6 * TAG_HEADROOM)).abs() < 1e-9);
    }

    #[test]
    fn notes_and_error_bars_widen_the_y_range() {
        let plain = LineChart::new("t", "x", "y")
            .points(vec![LinePoint::new(1.0, 10.0, "a"), LinePoint::new(2.0, 20.0, "b")]);
        let rich = LineChart::new("t", "x", "y").points(vec![
            LinePoint::new(1.0, 10.0, "a").with_error(5.0).with_note("n"),
            LinePoint::new(2.0, 20.0, "b"),
        ]);

        let plain = plain.y_range().unwrap();
        let rich = rich.y_range().unwrap();
        assert!(rich.start < plain.start - 5.0);
        assert!(rich.end > plain.end);
    }

    #[test]
    fn default_ticks_follow_the_data() {
        let chart = LineChart::new("t", "x", "y")
            .points(vec![LinePoint::new(3.0, 1.0, "a"), LinePoint::new(1.0, 2.0, "b")]);
        assert_eq!(chart.x_axis().unwrap().ticks(), &[1.0, 3.0]);
    }

    #[test]
    fn empty_chart_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = LineChart::new("t", "x", "y")
            .render(&Figure::new(2.0, 2.0).with_dpi(30), &dir.path().join("x.png"))
            .unwrap_err();
        assert!(matches!(err, ReportError::EmptyDataset(_)));
    }

    #[test]
    fn zero_on_log_axis_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let chart = LineChart::new("t", "x", "y")
            .x_scale(AxisScale::Log10)
            .points(vec![LinePoint::new(0.0, 1.0, "a"), LinePoint::new(2.0, 2.0, "b")]);
        let err = chart
            .render(&Figure::new(2.0, 2.0).with_dpi(30), &dir.path().join("x.png"))
            .unwrap_err();
        assert!(matches!(err, ReportError::NonPositiveLog(_)));
    }

    #[test]
    fn render_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("line.png");
        let chart = chart().legend("Time");
        chart.render(&Figure::new(5.0, 3.0).with_dpi(60), &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }
}
