//! Algorithm stability per series: reads results.csv (Series, Best)
//! → derives Pmut → worst minus best criterion per series → stability_vs_pmut.png.

use std::{error::Error, path::Path};

use log::info;

use trial_charts::{
    report::{charts, derive::derive_pmut, rows::stability_rows, table::print_table},
    utils::{
        config::{PmutSchedule, RESULTS_CSV, STABILITY_FIGURE, STABILITY_VS_PMUT_PNG},
        loader::Dataset,
    },
};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut data = Dataset::from_csv(RESULTS_CSV)?;
    derive_pmut(&mut data, &PmutSchedule::default())?;

    let rows = stability_rows(&data)?;
    info!("{} series in {}", rows.len(), RESULTS_CSV);

    print_table("CRITERION SPREAD PER SERIES", &rows);

    charts::stability_vs_series(&rows)
        .render(&STABILITY_FIGURE, Path::new(STABILITY_VS_PMUT_PNG))?;
    println!("Chart saved: {}", STABILITY_VS_PMUT_PNG);

    Ok(())
}
