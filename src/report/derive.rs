//! Columns computed from the raw trial data.

use crate::utils::{config::PmutSchedule, error::Result, loader::Dataset};

pub const PMUT_COLUMN: &str = "Pmut";

/// Mutation probability of every row, from its `Series`.
pub fn pmut_column(data: &Dataset, schedule: &PmutSchedule) -> Result<Vec<f64>> {
    Ok(data
        .ints("Series")?
        .into_iter()
        .map(|series| schedule.rate(series))
        .collect())
}

/// Appends the `Pmut` column to the dataset.
pub fn derive_pmut(data: &mut Dataset, schedule: &PmutSchedule) -> Result<()> {
    let values = pmut_column(data, schedule)?;
    data.with_floats(PMUT_COLUMN, values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pmut_follows_series() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        std::fs::write(&path, "Series,Best\n0,1\n3,1\n3,2\n5,1\n").unwrap();
        let mut data = Dataset::from_csv(&path).unwrap();
        let schedule = PmutSchedule::default();

        derive_pmut(&mut data, &schedule).unwrap();
        let pmut = data.floats(PMUT_COLUMN).unwrap();

        let expected: Vec<f64> = [0, 3, 3, 5]
            .iter()
            .map(|&s| 0.0004 * 1.5f64.powf(s as f64))
            .collect();
        assert_eq!(pmut, expected);
    }

    #[test]
    fn derivation_needs_series() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        std::fs::write(&path, "Nproc,Time\n1,2.0\n").unwrap();
        let data = Dataset::from_csv(&path).unwrap();

        assert!(pmut_column(&data, &PmutSchedule::default()).is_err());
    }
}
