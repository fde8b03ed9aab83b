//! Fixed inputs, outputs and figure geometry for the report binaries.
//!
//! Every report reads one hardcoded CSV and writes one hardcoded artifact;
//! there is no runtime configuration.

/// Trial results: `Series`, `Nproc`, `Time`, `Best`.
pub const RESULTS_CSV: &str = "results.csv";
/// Sequential scheduling results: `Jobs`, `Processors`, `Cooling`, `Time`.
pub const SEQ_RESULTS_CSV: &str = "results_seq.csv";

pub const TIME_VS_NPROC_PNG: &str = "graph_2.png";
pub const QUALITY_VS_PMUT_PNG: &str = "quality_vs_pmut.png";
pub const STABILITY_VS_PMUT_PNG: &str = "stability_vs_pmut.png";
pub const TIME_VS_SERIES_PNG: &str = "time_vs_series.png";

/// Raster resolution of every saved chart.
pub const OUTPUT_DPI: u32 = 300;

/// Whitespace kept around the cropped content, in inches.
pub const TIGHT_PAD_INCHES: f64 = 0.1;

/// Cooling schedule whose rows feed the heatmap (linear cooling).
pub const HEATMAP_COOLING: &str = "L";

pub const PMUT_BASE_RATE: f64 = 0.0004;
pub const PMUT_GROWTH_FACTOR: f64 = 1.5;

/// Physical size of a chart. Pixel dimensions and font sizes follow from the DPI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Figure {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: u32,
}

impl Figure {
    pub const fn new(width_in: f64, height_in: f64) -> Self {
        Self { width_in, height_in, dpi: OUTPUT_DPI }
    }

    pub const fn with_dpi(self, dpi: u32) -> Self {
        Self { dpi, ..self }
    }

    /// Canvas size in pixels.
    pub fn pixels(&self) -> (u32, u32) {
        (
            (self.width_in * self.dpi as f64).round() as u32,
            (self.height_in * self.dpi as f64).round() as u32,
        )
    }

    /// Converts a typographic point size to pixels at this DPI.
    pub fn pt(&self, points: f64) -> f64 {
        points * self.dpi as f64 / 72.0
    }

    /// Converts a length in inches to whole pixels.
    pub fn inches(&self, inches: f64) -> u32 {
        (inches * self.dpi as f64).round() as u32
    }
}

pub const TIME_VS_NPROC_FIGURE: Figure = Figure::new(10.0, 6.0);
/// The quality chart occupies one quadrant of a 12x8 inch canvas.
pub const QUALITY_FIGURE: Figure = Figure::new(6.0, 4.0);
pub const STABILITY_FIGURE: Figure = Figure::new(12.0, 7.0);
pub const TIME_VS_SERIES_FIGURE: Figure = Figure::new(10.0, 6.0);
pub const HEATMAP_FIGURE: Figure = Figure::new(10.0, 7.0);

/// Exponential mutation-probability schedule indexed by series number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PmutSchedule {
    pub base_rate: f64,
    pub growth_factor: f64,
}

impl Default for PmutSchedule {
    fn default() -> Self {
        Self {
            base_rate: PMUT_BASE_RATE,
            growth_factor: PMUT_GROWTH_FACTOR,
        }
    }
}

impl PmutSchedule {
    /// `base_rate * growth_factor ^ series`.
    pub fn rate(&self, series: i64) -> f64 {
        self.base_rate * self.growth_factor.powf(series as f64)
    }
}
