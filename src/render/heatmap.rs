//! Mean-time heatmap over (Jobs, Processors).
//!
//! Saved as a PNG through plotters or opened in plotly's HTML viewer. Both
//! use the viridis map over the present cells and print each value.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use plotly::{
    common::{ColorScale, ColorScalePalette, Mode},
    layout::{Axis, Layout},
    HeatMap, Plot, Scatter,
};
use plotters::{
    coord::Shift,
    prelude::*,
    style::text_anchor::{HPos, Pos, VPos},
};

use crate::render::{axis::CategoryAxis, figure::render_png};
use crate::report::aggregate::MeanTimeGrid;
use crate::utils::{
    config::Figure,
    error::{ReportError, Result},
};

const FONT: &str = "sans-serif";
/// Slices in the colour bar gradient.
const COLORBAR_STEPS: usize = 128;

/// Where a chart ends up.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Png(PathBuf),
    /// Interactive viewer in the default browser.
    Viewer,
}

#[derive(Debug, Clone)]
pub struct Heatmap {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub grid: MeanTimeGrid,
}

impl Heatmap {
    pub fn new(
        title: impl Into<String>,
        x_desc: impl Into<String>,
        y_desc: impl Into<String>,
        grid: MeanTimeGrid,
    ) -> Self {
        Self {
            title: title.into(),
            x_desc: x_desc.into(),
            y_desc: y_desc.into(),
            grid,
        }
    }

    pub fn output(&self, figure: &Figure, output: &Output) -> Result<()> {
        match output {
            Output::Png(path) => self.render(figure, path),
            Output::Viewer => self.show(figure),
        }
    }

    /// Colour scale bounds: smallest and largest present cell.
    pub fn color_range(&self) -> Result<(f64, f64)> {
        let (lo, hi) = self
            .grid
            .value_range()
            .ok_or_else(|| ReportError::EmptyDataset(format!("'{}' has no cells", self.title)))?;
        if lo == hi {
            warn!("all cells of '{}' equal {}; colour scale is flat", self.title, lo);
        }
        Ok((lo, hi))
    }

    pub fn render(&self, figure: &Figure, path: &Path) -> Result<()> {
        let range = self.color_range()?;
        debug!(
            "'{}': {} job counts x {} processor counts, range {:?}",
            self.title,
            self.grid.jobs.len(),
            self.grid.processors.len(),
            range
        );
        render_png(figure, path, |root| self.draw(root, figure, range))
    }

    fn draw(
        &self,
        root: &DrawingArea<BitMapBackend<'_>, Shift>,
        figure: &Figure,
        (lo, hi): (f64, f64),
    ) -> Result<()> {
        let (width, _) = root.dim_in_pixel();
        let (main, bar) = root.split_horizontally(width * 86 / 100);

        let columns = CategoryAxis::new(self.grid.processors.iter().map(|p| p.to_string()).collect());
        // Bottom-up labels; the grid stores the largest job count first.
        let rows = CategoryAxis::new(self.grid.jobs.iter().rev().map(|j| j.to_string()).collect());
        let n_rows = rows.len();

        let mut chart = ChartBuilder::on(&main)
            .caption(&self.title, (FONT, figure.pt(14.0)))
            .margin(figure.pt(10.0))
            .x_label_area_size(figure.pt(36.0))
            .y_label_area_size(figure.pt(48.0))
            .build_cartesian_2d(columns, rows)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc(self.x_desc.as_str())
            .y_desc(self.y_desc.as_str())
            .axis_desc_style((FONT, figure.pt(12.0)))
            .label_style((FONT, figure.pt(10.0)))
            .draw()?;

        let cells: Vec<(f64, f64, f64)> = self
            .grid
            .cells
            .iter()
            .enumerate()
            .flat_map(|(r, row)| {
                row.iter().enumerate().filter_map(move |(c, cell)| {
                    cell.map(|v| (c as f64, (n_rows - 1 - r) as f64, v))
                })
            })
            .collect();

        chart.draw_series(cells.iter().map(|&(x, y, v)| {
            Rectangle::new([(x, y), (x + 1.0, y + 1.0)], color_at(v, lo, hi).filled())
        }))?;

        let centered = Pos::new(HPos::Center, VPos::Center);
        chart.draw_series(cells.iter().map(|&(x, y, v)| {
            let ink = text_color(color_at(v, lo, hi));
            let style = (FONT, figure.pt(10.0)).into_font().color(&ink).pos(centered);
            Text::new(format!("{:.0}", v), (x + 0.5, y + 0.5), style)
        }))?;

        self.draw_colorbar(&bar, figure, lo, hi)
    }

    fn draw_colorbar(
        &self,
        area: &DrawingArea<BitMapBackend<'_>, Shift>,
        figure: &Figure,
        lo: f64,
        hi: f64,
    ) -> Result<()> {
        let span = if hi > lo { hi - lo } else { 1.0 };
        let mut bar = ChartBuilder::on(area)
            .margin_top(figure.pt(30.0))
            .margin_bottom(figure.pt(46.0))
            .margin_left(figure.pt(4.0))
            .margin_right(figure.pt(4.0))
            .y_label_area_size(figure.pt(40.0))
            .build_cartesian_2d(0f64..1f64, lo..lo + span)?;

        bar.configure_mesh()
            .disable_mesh()
            .disable_x_axis()
            .y_labels(6)
            .label_style((FONT, figure.pt(10.0)))
            .y_label_formatter(&|v| format!("{:.0}", v))
            .draw()?;

        let step = span / COLORBAR_STEPS as f64;
        bar.draw_series((0..COLORBAR_STEPS).map(|i| {
            let y = lo + i as f64 * step;
            Rectangle::new([(0.0, y), (1.0, y + step)], color_at(y + step / 2.0, lo, hi).filled())
        }))?;
        Ok(())
    }

    /// Plotly figure: the heatmap trace plus a text overlay with each value.
    pub fn to_plot(&self, figure: &Figure) -> Plot {
        let x: Vec<String> = self.grid.processors.iter().map(|p| p.to_string()).collect();
        // Plotly stacks categories bottom-up, so rows go in ascending job order.
        let y: Vec<String> = self.grid.jobs.iter().rev().map(|j| j.to_string()).collect();
        let z: Vec<Vec<Option<f64>>> = self.grid.cells.iter().rev().cloned().collect();

        let mut label_x = Vec::new();
        let mut label_y = Vec::new();
        let mut labels = Vec::new();
        for (row, jobs) in z.iter().zip(&y) {
            for (cell, processors) in row.iter().zip(&x) {
                if let Some(v) = cell {
                    label_x.push(processors.clone());
                    label_y.push(jobs.clone());
                    labels.push(format!("{:.0}", v));
                }
            }
        }

        let mut plot = Plot::new();
        plot.add_trace(
            HeatMap::new(x, y, z)
                .name("Time")
                .color_scale(ColorScale::Palette(ColorScalePalette::Viridis)),
        );
        plot.add_trace(
            Scatter::new(label_x, label_y)
                .mode(Mode::Text)
                .text_array(labels)
                .show_legend(false),
        );

        let (width, height) = (figure.width_in * 96.0, figure.height_in * 96.0);
        let layout = Layout::new()
            .title(self.title.as_str())
            .width(width as usize)
            .height(height as usize)
            .x_axis(Axis::new().title(self.x_desc.as_str()))
            .y_axis(Axis::new().title(self.y_desc.as_str()));
        plot.set_layout(layout);
        plot
    }

    /// Opens the interactive viewer.
    pub fn show(&self, figure: &Figure) -> Result<()> {
        self.color_range()?;
        info!("opening '{}' in the viewer", self.title);
        self.to_plot(figure).show();
        Ok(())
    }
}

/// Viridis colour of `value` within `[lo, hi]`; a flat range maps to the middle.
pub fn color_at(value: f64, lo: f64, hi: f64) -> RGBColor {
    if hi > lo {
        ViridisRGB::get_color_normalized(value.clamp(lo, hi), lo, hi)
    } else {
        ViridisRGB::get_color(0.5)
    }
}

/// Black on light cells, white on dark ones.
fn text_color(background: RGBColor) -> RGBColor {
    let RGBColor(r, g, b) = background;
    let luminance = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
    if luminance > 140.0 { BLACK } else { WHITE }
}
