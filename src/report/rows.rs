//! Typed report rows extracted from a dataset.
//!
//! Series-based rows read the derived `Pmut` column, so `derive_pmut` must run
//! first; its value is constant inside a series and the first one is kept.
//! Rows whose measurement is blank or `nan` do not count towards any group.

use std::collections::BTreeMap;

use crate::report::{
    aggregate::{aggregate, group_by, JobRun},
    derive::PMUT_COLUMN,
};
use crate::utils::{error::Result, loader::Dataset};

/// One point of the time vs. processor-count curve.
#[derive(Debug, Clone, PartialEq)]
pub struct NprocRow {
    pub nproc: i64,
    pub time: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BestRow {
    pub series: i64,
    pub pmut: f64,
    pub best: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StabilityRow {
    pub series: i64,
    pub pmut: f64,
    /// `worst - best`.
    pub stability: f64,
    pub best: f64,
    pub worst: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeRow {
    pub series: i64,
    pub pmut: f64,
    pub mean: f64,
    /// Sample standard deviation; `None` below two runs.
    pub std: Option<f64>,
    pub count: usize,
}

/// `Nproc`/`Time` pairs in file order.
pub fn nproc_rows(data: &Dataset) -> Result<Vec<NprocRow>> {
    Ok(data
        .samples("Nproc", "Time")?
        .into_iter()
        .map(|(nproc, time)| NprocRow { nproc, time })
        .collect())
}

pub fn best_rows(data: &Dataset) -> Result<Vec<BestRow>> {
    let pmut = pmut_by_series(data)?;
    Ok(aggregate(&data.samples("Series", "Best")?)
        .into_iter()
        .map(|row| BestRow {
            series: row.key,
            pmut: pmut[&row.key],
            best: row.stats.min,
        })
        .collect())
}

pub fn stability_rows(data: &Dataset) -> Result<Vec<StabilityRow>> {
    let pmut = pmut_by_series(data)?;
    Ok(aggregate(&data.samples("Series", "Best")?)
        .into_iter()
        .map(|row| StabilityRow {
            series: row.key,
            pmut: pmut[&row.key],
            stability: row.stats.spread(),
            best: row.stats.min,
            worst: row.stats.max,
        })
        .collect())
}

pub fn time_rows(data: &Dataset) -> Result<Vec<TimeRow>> {
    let pmut = pmut_by_series(data)?;
    Ok(aggregate(&data.samples("Series", "Time")?)
        .into_iter()
        .map(|row| TimeRow {
            series: row.key,
            pmut: pmut[&row.key],
            mean: row.stats.mean,
            std: (row.stats.count > 1).then_some(row.stats.std_dev),
            count: row.stats.count,
        })
        .collect())
}

/// Scheduling runs for the heatmap; runs without a recorded time are skipped.
pub fn job_runs(data: &Dataset) -> Result<Vec<JobRun>> {
    let jobs = data.ints("Jobs")?;
    let processors = data.ints("Processors")?;
    let cooling = data.labels("Cooling")?;
    let time = data.measurements("Time")?;

    Ok(jobs
        .into_iter()
        .zip(processors)
        .zip(cooling)
        .zip(time)
        .filter_map(|(((jobs, processors), cooling), time)| {
            time.map(|time| JobRun { jobs, processors, cooling, time })
        })
        .collect())
}

fn pmut_by_series(data: &Dataset) -> Result<BTreeMap<i64, f64>> {
    Ok(group_by(&data.keyed("Series", PMUT_COLUMN)?)
        .into_iter()
        .filter_map(|(series, values)| values.first().map(|&pmut| (series, pmut)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::derive::derive_pmut;
    use crate::utils::config::PmutSchedule;

    fn load(body: &str) -> (tempfile::TempDir, Dataset) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        std::fs::write(&path, body).unwrap();
        let data = Dataset::from_csv(&path).unwrap();
        (dir, data)
    }

    #[test]
    fn series_rows_carry_pmut_and_group_metrics() {
        let (_dir, mut data) = load("Series,Time,Best\n1,10,5.0\n1,14,3.0\n2,8,4.0\n");
        let schedule = PmutSchedule::default();
        derive_pmut(&mut data, &schedule).unwrap();

        let best = best_rows(&data).unwrap();
        assert_eq!(
            best,
            vec![
                BestRow { series: 1, pmut: schedule.rate(1), best: 3.0 },
                BestRow { series: 2, pmut: schedule.rate(2), best: 4.0 },
            ]
        );

        let stability = stability_rows(&data).unwrap();
        assert_eq!(stability[0].stability, 2.0);
        assert_eq!((stability[0].best, stability[0].worst), (3.0, 5.0));
        assert_eq!(stability[1].stability, 0.0);

        let time = time_rows(&data).unwrap();
        assert_eq!(time[0].mean, 12.0);
        assert_eq!(time[0].count, 2);
        assert_eq!(time[1].count, 1);
        assert_eq!(time[1].std, None);
    }

    #[test]
    fn blank_criterion_cells_are_left_out_of_the_group() {
        let (_dir, mut data) = load("Series,Time,Best\n1,10,5.0\n1,12,3.0\n1,11,\n2,8,4.0\n");
        derive_pmut(&mut data, &PmutSchedule::default()).unwrap();

        let best: Vec<f64> = best_rows(&data).unwrap().iter().map(|r| r.best).collect();
        assert_eq!(best, vec![3.0, 4.0]);

        let time = time_rows(&data).unwrap();
        assert_eq!((time[0].mean, time[0].count), (11.0, 3));
        assert!((time[0].std.unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn nan_criterion_cells_do_not_poison_the_group() {
        let (_dir, mut data) = load("Series,Time,Best\n1,10,5.0\n1,12,3.0\n1,11,nan\n2,8,4.0\n");
        derive_pmut(&mut data, &PmutSchedule::default()).unwrap();

        let best: Vec<f64> = best_rows(&data).unwrap().iter().map(|r| r.best).collect();
        assert_eq!(best, vec![3.0, 4.0]);

        let spread: Vec<f64> = stability_rows(&data).unwrap().iter().map(|r| r.stability).collect();
        assert_eq!(spread, vec![2.0, 0.0]);
    }

    #[test]
    fn two_runs_get_a_deviation() {
        let (_dir, mut data) = load("Series,Time\n3,10\n3,14\n4,9\n");
        derive_pmut(&mut data, &PmutSchedule::default()).unwrap();

        let time = time_rows(&data).unwrap();
        assert!((time[0].std.unwrap() - 8f64.sqrt()).abs() < 1e-12);
        assert_eq!(time[1].std, None);
    }

    #[test]
    fn series_rows_need_derived_pmut() {
        let (_dir, data) = load("Series,Best\n1,5.0\n");
        assert!(best_rows(&data).is_err());
    }

    #[test]
    fn nproc_rows_keep_file_order() {
        let (_dir, data) = load("Nproc,Time\n8,3.5\n1,20.0\n4,6.1\n");
        let rows = nproc_rows(&data).unwrap();
        let nprocs: Vec<i64> = rows.iter().map(|r| r.nproc).collect();
        assert_eq!(nprocs, vec![8, 1, 4]);
    }

    #[test]
    fn job_runs_read_all_four_columns() {
        let (_dir, data) = load("Jobs,Processors,Cooling,Time\n10,2,L,55.5\n20,4,B,70\n");
        let runs = job_runs(&data).unwrap();
        assert_eq!(
            runs[1],
            JobRun { jobs: 20, processors: 4, cooling: "B".to_string(), time: 70.0 }
        );
    }

    #[test]
    fn job_runs_without_time_are_skipped() {
        let (_dir, data) = load("Jobs,Processors,Cooling,Time\n10,2,L,55.5\n10,2,L,\n20,4,L,70\n");
        let runs = job_runs(&data).unwrap();
        let times: Vec<f64> = runs.iter().map(|r| r.time).collect();
        assert_eq!(times, vec![55.5, 70.0]);
    }
}
