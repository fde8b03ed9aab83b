//! Execution time vs thread count: reads results.csv (Nproc, Time)
//! → prints the measured points → writes graph_2.png on a log x axis.

use std::{error::Error, path::Path};

use log::info;

use trial_charts::{
    report::{charts, rows::nproc_rows, table::print_table},
    utils::{
        config::{RESULTS_CSV, TIME_VS_NPROC_FIGURE, TIME_VS_NPROC_PNG},
        loader::Dataset,
    },
};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let data = Dataset::from_csv(RESULTS_CSV)?;
    let rows = nproc_rows(&data)?;
    info!("{} measurements from {}", rows.len(), RESULTS_CSV);

    print_table("EXECUTION TIME BY THREAD COUNT", &rows);

    charts::time_vs_nproc(&rows).render(&TIME_VS_NPROC_FIGURE, Path::new(TIME_VS_NPROC_PNG))?;
    println!("Chart saved: {}", TIME_VS_NPROC_PNG);

    Ok(())
}
