//! Fixed-width console tables printed before each chart is rendered.

use crate::report::rows::{BestRow, NprocRow, StabilityRow, TimeRow};
use crate::report::aggregate::MeanTimeGrid;

const CELL_WIDTH: usize = 14;

/// A row that can be printed under a header.
pub trait TableRow {
    fn header() -> Vec<&'static str>;
    fn cells(&self) -> Vec<String>;
}

impl TableRow for NprocRow {
    fn header() -> Vec<&'static str> {
        vec!["Nproc", "Time (s)"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.nproc.to_string(), format!("{:.2}", self.time)]
    }
}

impl TableRow for BestRow {
    fn header() -> Vec<&'static str> {
        vec!["Series", "Pmut", "Best"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.series.to_string(), format!("{:.6}", self.pmut), format!("{:.3}", self.best)]
    }
}

impl TableRow for StabilityRow {
    fn header() -> Vec<&'static str> {
        vec!["Series", "Pmut", "Best", "Worst", "Spread"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.series.to_string(),
            format!("{:.6}", self.pmut),
            format!("{:.3}", self.best),
            format!("{:.3}", self.worst),
            format!("{:.3}", self.stability),
        ]
    }
}

impl TableRow for TimeRow {
    fn header() -> Vec<&'static str> {
        vec!["Series", "Pmut", "Runs", "Mean (s)", "Std (s)"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.series.to_string(),
            format!("{:.6}", self.pmut),
            self.count.to_string(),
            format!("{:.2}", self.mean),
            self.std.map_or_else(|| "-".to_string(), |std| format!("{:.2}", std)),
        ]
    }
}

/// Renders rows as a fixed-width table with a ruled header.
pub fn format_table<R: TableRow>(title: &str, rows: &[R]) -> String {
    let header = R::header();
    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    out.push_str(&"=".repeat(title.chars().count()));
    out.push_str("\n\n");
    out.push_str(&join_cells(header.iter().map(|h| h.to_string())));
    out.push('\n');
    out.push_str(&"=".repeat(CELL_WIDTH * header.len()));
    out.push('\n');
    for row in rows {
        out.push_str(&join_cells(row.cells().into_iter()));
        out.push('\n');
    }
    out
}

/// Renders the pivoted grid: one line per job count, one column per processor count.
pub fn format_grid(title: &str, grid: &MeanTimeGrid) -> String {
    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    out.push_str(&"=".repeat(title.chars().count()));
    out.push_str("\n\n");

    let header = std::iter::once("Jobs \\ Procs".to_string())
        .chain(grid.processors.iter().map(|p| p.to_string()));
    out.push_str(&join_cells(header));
    out.push('\n');
    out.push_str(&"=".repeat(CELL_WIDTH * (grid.processors.len() + 1)));
    out.push('\n');

    for &jobs in &grid.jobs {
        let cells = std::iter::once(jobs.to_string()).chain(grid.processors.iter().map(|&p| {
            grid.get(jobs, p)
                .map_or_else(|| "-".to_string(), |v| format!("{:.0}", v))
        }));
        out.push_str(&join_cells(cells));
        out.push('\n');
    }
    out
}

pub fn print_table<R: TableRow>(title: &str, rows: &[R]) {
    println!("{}", format_table(title, rows));
}

pub fn print_grid(title: &str, grid: &MeanTimeGrid) {
    println!("{}", format_grid(title, grid));
}

fn join_cells<I: Iterator<Item = String>>(cells: I) -> String {
    cells
        .map(|cell| format!("{:<width$}", cell, width = CELL_WIDTH))
        .collect::<String>()
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lists_every_row_under_the_header() {
        let rows = vec![
            BestRow { series: 1, pmut: 0.0006, best: 3.0 },
            BestRow { series: 2, pmut: 0.0009, best: 4.25 },
        ];
        let text = format_table("BEST PER SERIES", &rows);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "BEST PER SERIES");
        assert!(lines[3].starts_with("Series"));
        assert!(lines[5].starts_with("1"));
        assert!(lines[5].contains("0.000600"));
        assert!(lines[6].ends_with("4.250"));
    }

    #[test]
    fn single_run_shows_no_deviation() {
        let rows = vec![
            TimeRow { series: 1, pmut: 0.0006, mean: 11.0, std: Some(1.0), count: 3 },
            TimeRow { series: 2, pmut: 0.0009, mean: 8.0, std: None, count: 1 },
        ];
        let text = format_table("TIME PER SERIES", &rows);
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[5].ends_with("1.00"));
        assert!(lines[6].ends_with('-'));
    }

    #[test]
    fn grid_marks_missing_cells() {
        let grid = MeanTimeGrid {
            jobs: vec![20, 10],
            processors: vec![1, 2],
            cells: vec![vec![None, Some(160.0)], vec![Some(150.4), Some(80.0)]],
        };
        let text = format_grid("MEAN TIME", &grid);
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[5].starts_with("20"));
        assert!(lines[5].contains('-'));
        assert!(lines[5].ends_with("160"));
        assert!(lines[6].contains("150"));
        assert!(lines[6].ends_with("80"));
    }
}
