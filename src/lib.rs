//! Charts for trial and benchmark results.
//!
//! Each report binary under `src/analysis/` loads one CSV, aggregates it and
//! renders one chart:
//!
//! - `utils`: configuration constants, error type, CSV loading, statistics.
//! - `report`: derived columns, group-by aggregation, typed rows, tables.
//! - `render`: axis scales, line charts, heatmaps, PNG output.

pub mod render;
pub mod report;
pub mod utils;
