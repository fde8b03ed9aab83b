//! Solution quality per series: reads results.csv (Series, Best)
//! → derives Pmut → best criterion of each series → quality_vs_pmut.png.

use std::{error::Error, path::Path};

use log::info;

use trial_charts::{
    report::{charts, derive::derive_pmut, rows::best_rows, table::print_table},
    utils::{
        config::{PmutSchedule, QUALITY_FIGURE, QUALITY_VS_PMUT_PNG, RESULTS_CSV},
        loader::Dataset,
    },
};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut data = Dataset::from_csv(RESULTS_CSV)?;
    derive_pmut(&mut data, &PmutSchedule::default())?;

    let rows = best_rows(&data)?;
    info!("{} series in {}", rows.len(), RESULTS_CSV);

    print_table("BEST QUALITY PER SERIES", &rows);

    charts::quality_vs_series(&rows).render(&QUALITY_FIGURE, Path::new(QUALITY_VS_PMUT_PNG))?;
    println!("Chart saved: {}", QUALITY_VS_PMUT_PNG);

    Ok(())
}
