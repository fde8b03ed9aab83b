//! Execution time per series: reads results.csv (Series, Time)
//! → derives Pmut → mean ± std time per series → time_vs_series.png.

use std::{error::Error, path::Path};

use log::info;

use trial_charts::{
    report::{charts, derive::derive_pmut, rows::time_rows, table::print_table},
    utils::{
        config::{PmutSchedule, RESULTS_CSV, TIME_VS_SERIES_FIGURE, TIME_VS_SERIES_PNG},
        loader::Dataset,
    },
};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut data = Dataset::from_csv(RESULTS_CSV)?;
    derive_pmut(&mut data, &PmutSchedule::default())?;

    let rows = time_rows(&data)?;
    info!("{} series in {}", rows.len(), RESULTS_CSV);

    print_table("MEAN EXECUTION TIME PER SERIES", &rows);

    charts::time_vs_series(&rows).render(&TIME_VS_SERIES_FIGURE, Path::new(TIME_VS_SERIES_PNG))?;
    println!("Chart saved: {}", TIME_VS_SERIES_PNG);

    Ok(())
}
