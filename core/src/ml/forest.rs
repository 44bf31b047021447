use ndarray::{ArrayView1, ArrayView2};
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::ml::tree::RegressionTree;

pub const DEFAULT_N_TREES: usize = 100;
pub const DEFAULT_SEED: u64 = 42;

/// Bagged ensemble of regression trees fitted on bootstrap samples drawn from
/// a seeded RNG, so the same data and seed always yield the same forest.
///
/// Per-tree predictions stay accessible so callers can form quantile
/// intervals over the ensemble instead of only a point estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForestRegressor {
    trees: Vec<RegressionTree>,
    seed: u64,
}

impl RandomForestRegressor {
    pub fn fit(x: ArrayView2<f64>, y: ArrayView1<f64>, n_trees: usize, seed: u64) -> Self {
        let n = x.nrows();
        if n == 0 {
            return Self {
                trees: Vec::new(),
                seed,
            };
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mut trees = Vec::with_capacity(n_trees);
        for _ in 0..n_trees {
            let sample: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
            trees.push(RegressionTree::fit(x, y, &sample, 1));
        }

        Self { trees, seed }
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Every ensemble member's prediction for one encoded row.
    pub fn predict_members(&self, row: ArrayView1<f64>) -> Vec<f64> {
        self.trees.iter().map(|tree| tree.predict(row)).collect()
    }

    pub fn predict_mean(&self, row: ArrayView1<f64>) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        self.predict_members(row).iter().sum::<f64>() / self.trees.len() as f64
    }
}

/// Linear-interpolated quantile over a sample, matching numpy's default
/// method. `q` is clamped to [0, 1].
pub fn quantile(samples: &[f64], q: f64) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    sorted[lower] + (pos - lower as f64) * (sorted[upper] - sorted[lower])
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2, array};

    fn step_data() -> (Array2<f64>, Array1<f64>) {
        let x = Array2::from_shape_vec(
            (8, 1),
            vec![0.0, 0.5, 1.0, 1.5, 10.0, 10.5, 11.0, 11.5],
        )
        .unwrap();
        let y = array![2.0, 2.0, 2.0, 2.0, 8.0, 8.0, 8.0, 8.0];
        (x, y)
    }

    #[test]
    fn same_seed_gives_identical_forests() {
        let (x, y) = step_data();
        let a = RandomForestRegressor::fit(x.view(), y.view(), 10, DEFAULT_SEED);
        let b = RandomForestRegressor::fit(x.view(), y.view(), 10, DEFAULT_SEED);

        assert_eq!(a, b);
    }

    #[test]
    fn ensemble_recovers_a_step_function() {
        let (x, y) = step_data();
        let forest = RandomForestRegressor::fit(x.view(), y.view(), 25, DEFAULT_SEED);

        assert_eq!(forest.len(), 25);
        let low = forest.predict_mean(array![0.25].view());
        let high = forest.predict_mean(array![11.25].view());
        assert!((low - 2.0).abs() < 1.5, "low prediction was {low}");
        assert!((high - 8.0).abs() < 1.5, "high prediction was {high}");
        assert!(high > low);
    }

    #[test]
    fn member_predictions_match_ensemble_size() {
        let (x, y) = step_data();
        let forest = RandomForestRegressor::fit(x.view(), y.view(), 7, 1);

        assert_eq!(forest.predict_members(array![1.0].view()).len(), 7);
    }

    #[test]
    fn quantile_interpolates_like_numpy() {
        let samples = [1.0, 2.0, 3.0, 4.0];

        assert_eq!(quantile(&samples, 0.0), 1.0);
        assert_eq!(quantile(&samples, 1.0), 4.0);
        assert_eq!(quantile(&samples, 0.5), 2.5);
        // np.quantile([1,2,3,4], 0.05) == 1.15
        assert!((quantile(&samples, 0.05) - 1.15).abs() < 1e-12);
    }

    #[test]
    fn quantile_of_a_single_sample_is_that_sample() {
        assert_eq!(quantile(&[3.5], 0.05), 3.5);
        assert_eq!(quantile(&[3.5], 0.95), 3.5);
    }
}
