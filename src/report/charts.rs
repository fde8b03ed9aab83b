//! Chart descriptions for each report, built from its rows.

use crate::render::{
    axis::{ticks_at, AxisScale},
    heatmap::Heatmap,
    line::{LineChart, LinePoint},
};
use crate::report::{
    aggregate::MeanTimeGrid,
    rows::{BestRow, NprocRow, StabilityRow, TimeRow},
};

/// Run time against thread count on a log axis, ticked at every count used.
pub fn time_vs_nproc(rows: &[NprocRow]) -> LineChart {
    let nproc: Vec<f64> = rows.iter().map(|r| r.nproc as f64).collect();
    LineChart::new(
        "Execution time vs number of threads",
        "Number of threads (Nproc)",
        "Execution time (seconds)",
    )
    .x_scale(AxisScale::Log10)
    .x_ticks(ticks_at(&nproc))
    .points(
        rows.iter()
            .map(|r| LinePoint::new(r.nproc as f64, r.time, format!("{:.1}s", r.time)))
            .collect(),
    )
}

pub fn quality_vs_series(rows: &[BestRow]) -> LineChart {
    LineChart::new("Quality vs Series", "Series", "Best criterion value")
        .x_ticks(series_ticks(rows.iter().map(|r| r.series)))
        .legend("Best quality")
        .points(
            rows.iter()
                .map(|r| LinePoint::new(r.series as f64, r.best, format!("{:.3}", r.best)))
                .collect(),
        )
}

pub fn stability_vs_series(rows: &[StabilityRow]) -> LineChart {
    LineChart::new(
        "Algorithm stability vs Series (worst minus best result in a series)",
        "Series",
        "Criterion spread (stability)",
    )
    .x_ticks(series_ticks(rows.iter().map(|r| r.series)))
    .legend("Criterion spread")
    .points(
        rows.iter()
            .map(|r| LinePoint::new(r.series as f64, r.stability, format!("{:.3}", r.stability)))
            .collect(),
    )
}

/// Mean time per series with a ±std bar and the series' Pmut under each point.
/// A series with a single run gets no bar.
pub fn time_vs_series(rows: &[TimeRow]) -> LineChart {
    LineChart::new(
        "Execution time vs series number",
        "Series (series number)",
        "Execution time (seconds)",
    )
    .x_ticks(series_ticks(rows.iter().map(|r| r.series)))
    .points(
        rows.iter()
            .map(|r| {
                let point = LinePoint::new(r.series as f64, r.mean, format!("{:.1}s", r.mean))
                    .with_note(format!("Pmut={:.6}", r.pmut));
                match r.std {
                    Some(std) => point.with_error(std),
                    None => point,
                }
            })
            .collect(),
    )
}

pub fn jobs_heatmap(grid: MeanTimeGrid) -> Heatmap {
    Heatmap::new("Time (Jobs vs Processors)", "Processors", "Jobs", grid)
}

fn series_ticks<I: Iterator<Item = i64>>(series: I) -> Vec<f64> {
    ticks_at(&series.map(|s| s as f64).collect::<Vec<f64>>())
}
