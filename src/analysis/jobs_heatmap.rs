//! Scheduling time heatmap: reads results_seq.csv (Jobs, Processors, Cooling, Time)
//! → keeps linear cooling → mean time per (Jobs, Processors) → interactive viewer.

use std::error::Error;

use log::info;

use trial_charts::{
    render::heatmap::Output,
    report::{aggregate::mean_time_grid, charts, rows::job_runs, table::print_grid},
    utils::{
        config::{HEATMAP_COOLING, HEATMAP_FIGURE, SEQ_RESULTS_CSV},
        loader::Dataset,
    },
};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let data = Dataset::from_csv(SEQ_RESULTS_CSV)?;
    let runs = job_runs(&data)?;
    let grid = mean_time_grid(&runs, HEATMAP_COOLING)?;
    info!(
        "{} runs in {}, grid {}x{}",
        runs.len(),
        SEQ_RESULTS_CSV,
        grid.jobs.len(),
        grid.processors.len()
    );

    print_grid(&format!("MEAN TIME (Cooling = {})", HEATMAP_COOLING), &grid);

    charts::jobs_heatmap(grid).output(&HEATMAP_FIGURE, &Output::Viewer)?;

    Ok(())
}
