//! Group-by reductions behind every chart.
//!
//! Groups are keyed in ascending order. Each input sample lands in exactly
//! one group.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::utils::{
    error::{ReportError, Result},
    stats::{calculate_stats, Stats},
};

/// Summary of one group.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow<K> {
    pub key: K,
    pub stats: Stats,
}

/// Collects the values of each key, preserving file order inside a group.
pub fn group_by<K: Ord + Clone>(samples: &[(K, f64)]) -> BTreeMap<K, Vec<f64>> {
    let mut groups: BTreeMap<K, Vec<f64>> = BTreeMap::new();
    for (key, value) in samples {
        groups.entry(key.clone()).or_default().push(*value);
    }
    groups
}

/// Reduces every group to min/max/mean/std.
pub fn aggregate<K: Ord + Clone>(samples: &[(K, f64)]) -> Vec<AggregateRow<K>> {
    group_by(samples)
        .into_iter()
        .filter_map(|(key, values)| calculate_stats(&values).map(|stats| AggregateRow { key, stats }))
        .collect()
}

/// Best (lowest) criterion of each series.
pub fn best_per_series(samples: &[(i64, f64)]) -> BTreeMap<i64, f64> {
    aggregate(samples)
        .into_iter()
        .map(|row| (row.key, row.stats.min))
        .collect()
}

/// Spread between the worst and the best criterion of each series.
pub fn stability_per_series(samples: &[(i64, f64)]) -> BTreeMap<i64, f64> {
    aggregate(samples)
        .into_iter()
        .map(|row| (row.key, row.stats.spread()))
        .collect()
}

/// Mean and standard deviation of `Time` per series.
pub fn mean_time_per_series(samples: &[(i64, f64)]) -> Vec<AggregateRow<i64>> {
    aggregate(samples)
}

/// One row of the sequential scheduling results.
#[derive(Debug, Clone, PartialEq)]
pub struct JobRun {
    pub jobs: i64,
    pub processors: i64,
    pub cooling: String,
    pub time: f64,
}

/// Mean time per (Jobs, Processors), pivoted for the heatmap.
#[derive(Debug, Clone, PartialEq)]
pub struct MeanTimeGrid {
    /// Row labels, largest job count first.
    pub jobs: Vec<i64>,
    /// Column labels, ascending.
    pub processors: Vec<i64>,
    /// `cells[row][col]`; `None` where the combination was never run.
    pub cells: Vec<Vec<Option<f64>>>,
}

impl MeanTimeGrid {
    pub fn get(&self, jobs: i64, processors: i64) -> Option<f64> {
        let row = self.jobs.iter().position(|&j| j == jobs)?;
        let col = self.processors.iter().position(|&p| p == processors)?;
        self.cells[row][col]
    }

    /// Smallest and largest present cell.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.cells
            .iter()
            .flatten()
            .flatten()
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Keeps the runs of one cooling schedule and averages `Time` per (Jobs, Processors).
pub fn mean_time_grid(runs: &[JobRun], cooling: &str) -> Result<MeanTimeGrid> {
    let samples: Vec<((i64, i64), f64)> = runs
        .iter()
        .filter(|run| run.cooling == cooling)
        .map(|run| ((run.jobs, run.processors), run.time))
        .collect();

    if samples.is_empty() {
        return Err(ReportError::EmptyDataset(format!(
            "no rows with Cooling == '{cooling}'"
        )));
    }
    debug!("{} of {} runs use cooling '{}'", samples.len(), runs.len(), cooling);

    let means: BTreeMap<(i64, i64), f64> = aggregate(&samples)
        .into_iter()
        .map(|row| (row.key, row.stats.mean))
        .collect();

    let jobs: Vec<i64> = means
        .keys()
        .map(|&(j, _)| j)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .rev()
        .collect();
    let processors: Vec<i64> = means
        .keys()
        .map(|&(_, p)| p)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let cells = jobs
        .iter()
        .map(|&j| {
            processors
                .iter()
                .map(|&p| means.get(&(j, p)).copied())
                .collect()
        })
        .collect();

    Ok(MeanTimeGrid { jobs, processors, cells })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(jobs: i64, processors: i64, cooling: &str, time: f64) -> JobRun {
        JobRun { jobs, processors, cooling: cooling.to_string(), time }
    }

    #[test]
    fn best_and_stability_per_series() {
        let samples = [(1, 5.0), (1, 3.0), (2, 4.0)];

        let best = best_per_series(&samples);
        assert_eq!(best, BTreeMap::from([(1, 3.0), (2, 4.0)]));

        let stability = stability_per_series(&samples);
        assert_eq!(stability, BTreeMap::from([(1, 2.0), (2, 0.0)]));
    }

    #[test]
    fn groups_come_out_in_ascending_key_order() {
        let samples = [(3, 1.0), (1, 2.0), (2, 3.0), (1, 4.0)];
        let keys: Vec<i64> = aggregate(&samples).into_iter().map(|r| r.key).collect();
        assert_eq!(keys, vec![1, 2, 3]);

        let groups = group_by(&samples);
        assert_eq!(groups[&1], vec![2.0, 4.0]);
    }

    #[test]
    fn mean_time_of_constant_group_has_zero_std() {
        let samples = [(4, 7.5), (4, 7.5), (4, 7.5), (5, 1.0), (5, 3.0)];
        let rows = mean_time_per_series(&samples);

        assert_eq!(rows[0].key, 4);
        assert_eq!(rows[0].stats.mean, 7.5);
        assert_eq!(rows[0].stats.std_dev, 0.0);
        assert_eq!(rows[0].stats.count, 3);

        assert_eq!(rows[1].stats.mean, 2.0);
        assert!((rows[1].stats.std_dev - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn grid_only_uses_requested_cooling() {
        let runs = vec![
            run(10, 1, "L", 100.0),
            run(10, 1, "L", 200.0),
            run(10, 2, "L", 80.0),
            run(20, 2, "L", 160.0),
            run(10, 1, "B", 9999.0),
            run(30, 4, "C", 9999.0),
        ];
        let grid = mean_time_grid(&runs, "L").unwrap();

        assert_eq!(grid.jobs, vec![20, 10]);
        assert_eq!(grid.processors, vec![1, 2]);
        assert_eq!(grid.get(10, 1), Some(150.0));
        assert_eq!(grid.get(10, 2), Some(80.0));
        assert_eq!(grid.get(20, 2), Some(160.0));
        assert_eq!(grid.get(20, 1), None);
        assert_eq!(grid.get(30, 4), None);
        assert_eq!(grid.cells, vec![vec![None, Some(160.0)], vec![Some(150.0), Some(80.0)]]);
        assert_eq!(grid.value_range(), Some((80.0, 160.0)));
    }

    #[test]
    fn grid_without_matching_rows_is_an_error() {
        let runs = vec![run(10, 1, "B", 1.0)];
        assert!(matches!(
            mean_time_grid(&runs, "L"),
            Err(ReportError::EmptyDataset(_))
        ));
    }
}
