pub mod axis;
pub mod figure;
pub mod heatmap;
pub mod line;
