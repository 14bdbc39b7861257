//! Decision-tree and random-forest regression

use crate::error::{Result, ScoutError};
use crate::models::Estimator;
use ndarray::{Array1, Array2, Axis};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// A fitted tree node
#[derive(Debug, Clone, Serialize, Deserialize)]
enum TreeNode {
    Leaf {
        value: f64,
    },
    Split {
        feature_idx: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

/// Regression tree splitting on variance reduction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTreeRegressor {
    root: Option<TreeNode>,
    max_depth: Option<usize>,
    min_samples_split: usize,
    min_samples_leaf: usize,
    max_features: Option<usize>,
}

impl Default for DecisionTreeRegressor {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionTreeRegressor {
    pub fn new() -> Self {
        Self {
            root: None,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
        }
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn with_min_samples_leaf(mut self, min_samples: usize) -> Self {
        self.min_samples_leaf = min_samples.max(1);
        self
    }

    /// Limit how many features each split considers; used by the forest.
    pub(crate) fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = Some(max_features.max(1));
        self
    }

    fn build(&self, x: &Array2<f64>, y: &Array1<f64>, indices: &[usize], depth: usize) -> TreeNode {
        let targets: Vec<f64> = indices.iter().map(|&i| y[i]).collect();
        let mean = targets.iter().sum::<f64>() / targets.len() as f64;

        let at_depth_limit = self.max_depth.map_or(false, |d| depth >= d);
        let is_pure = targets.iter().all(|&v| (v - targets[0]).abs() < 1e-12);
        if indices.len() < self.min_samples_split || at_depth_limit || is_pure {
            return TreeNode::Leaf { value: mean };
        }

        match self.best_split(x, y, indices) {
            Some((feature_idx, threshold)) => {
                let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
                    .iter()
                    .partition(|&&i| x[[i, feature_idx]] <= threshold);

                if left_idx.len() < self.min_samples_leaf || right_idx.len() < self.min_samples_leaf {
                    return TreeNode::Leaf { value: mean };
                }

                TreeNode::Split {
                    feature_idx,
                    threshold,
                    left: Box::new(self.build(x, y, &left_idx, depth + 1)),
                    right: Box::new(self.build(x, y, &right_idx, depth + 1)),
                }
            }
            None => TreeNode::Leaf { value: mean },
        }
    }

    /// Best (feature, threshold) by variance reduction, or None when no
    /// split improves on the parent. Running sums keep each candidate
    /// threshold O(n) without re-scanning the subset.
    fn best_split(&self, x: &Array2<f64>, y: &Array1<f64>, indices: &[usize]) -> Option<(usize, f64)> {
        let n = indices.len() as f64;
        let total_sum: f64 = indices.iter().map(|&i| y[i]).sum();
        let total_sq_sum: f64 = indices.iter().map(|&i| y[i] * y[i]).sum();
        let parent_var = total_sq_sum / n - (total_sum / n).powi(2);

        let n_features = x.ncols();
        let n_to_try = self.max_features.unwrap_or(n_features).min(n_features);

        let mut best: Option<(usize, f64, f64)> = None;

        for feature_idx in 0..n_to_try {
            // Sort the subset by feature value; thresholds are midpoints
            // between consecutive distinct values.
            let mut order: Vec<usize> = indices.to_vec();
            order.sort_by(|&a, &b| {
                x[[a, feature_idx]]
                    .partial_cmp(&x[[b, feature_idx]])
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            let mut left_count = 0.0;
            let mut left_sum = 0.0;
            let mut left_sq_sum = 0.0;

            for window in order.windows(2) {
                let (i, next) = (window[0], window[1]);
                left_count += 1.0;
                left_sum += y[i];
                left_sq_sum += y[i] * y[i];

                let lo = x[[i, feature_idx]];
                let hi = x[[next, feature_idx]];
                if lo == hi {
                    continue;
                }

                let right_count = n - left_count;
                if (left_count as usize) < self.min_samples_leaf
                    || (right_count as usize) < self.min_samples_leaf
                {
                    continue;
                }

                let right_sum = total_sum - left_sum;
                let right_sq_sum = total_sq_sum - left_sq_sum;
                let left_var = left_sq_sum / left_count - (left_sum / left_count).powi(2);
                let right_var = right_sq_sum / right_count - (right_sum / right_count).powi(2);
                let weighted = (left_count * left_var + right_count * right_var) / n;

                let gain = parent_var - weighted;
                if gain > 1e-12 && best.map_or(true, |(_, _, g)| gain > g) {
                    best = Some((feature_idx, (lo + hi) / 2.0, gain));
                }
            }
        }

        best.map(|(feature_idx, threshold, _)| (feature_idx, threshold))
    }

    fn predict_row(node: &TreeNode, row: &[f64]) -> f64 {
        match node {
            TreeNode::Leaf { value } => *value,
            TreeNode::Split {
                feature_idx,
                threshold,
                left,
                right,
            } => {
                if row[*feature_idx] <= *threshold {
                    Self::predict_row(left, row)
                } else {
                    Self::predict_row(right, row)
                }
            }
        }
    }
}

impl Estimator for DecisionTreeRegressor {
    fn name(&self) -> &str {
        "DecisionTreeRegressor"
    }

    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        if x.nrows() != y.len() {
            return Err(ScoutError::DataError(format!(
                "x has {} rows but y has {} values",
                x.nrows(),
                y.len()
            )));
        }
        if x.nrows() == 0 {
            return Err(ScoutError::DataError("empty training set".to_string()));
        }

        let indices: Vec<usize> = (0..x.nrows()).collect();
        self.root = Some(self.build(x, y, &indices, 0));
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let root = self.root.as_ref().ok_or(ScoutError::ModelNotFitted)?;
        let predictions: Vec<f64> = (0..x.nrows())
            .map(|i| Self::predict_row(root, &x.row(i).to_vec()))
            .collect();
        Ok(Array1::from_vec(predictions))
    }
}

/// Bagged ensemble of regression trees with per-tree bootstrap sampling and
/// feature subsampling. Predictions are the mean over trees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestRegressor {
    trees: Vec<DecisionTreeRegressor>,
    n_estimators: usize,
    max_depth: Option<usize>,
    random_state: Option<u64>,
}

impl RandomForestRegressor {
    pub fn new(n_estimators: usize) -> Self {
        Self {
            trees: Vec::new(),
            n_estimators: n_estimators.max(1),
            max_depth: None,
            random_state: None,
        }
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }
}

impl Estimator for RandomForestRegressor {
    fn name(&self) -> &str {
        "RandomForestRegressor"
    }

    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        let n_samples = x.nrows();
        if n_samples != y.len() {
            return Err(ScoutError::DataError(format!(
                "x has {} rows but y has {} values",
                n_samples,
                y.len()
            )));
        }
        if n_samples == 0 {
            return Err(ScoutError::DataError("empty training set".to_string()));
        }

        let max_features = ((x.ncols() as f64).sqrt().ceil() as usize).max(1);
        let base_seed = self.random_state.unwrap_or(0);

        let trees: Vec<Result<DecisionTreeRegressor>> = (0..self.n_estimators)
            .into_par_iter()
            .map(|tree_idx| {
                // Each tree gets its own deterministic stream
                let mut rng = ChaCha8Rng::seed_from_u64(base_seed.wrapping_add(tree_idx as u64));
                let sample_indices: Vec<usize> = (0..n_samples)
                    .map(|_| (rng.next_u64() as usize) % n_samples)
                    .collect();

                let x_boot = x.select(Axis(0), &sample_indices);
                let y_boot: Array1<f64> =
                    sample_indices.iter().map(|&i| y[i]).collect();

                let mut tree = DecisionTreeRegressor::new().with_max_features(max_features);
                if let Some(d) = self.max_depth {
                    tree = tree.with_max_depth(d);
                }
                tree.fit(&x_boot, &y_boot)?;
                Ok(tree)
            })
            .collect();

        self.trees = trees.into_iter().collect::<Result<Vec<_>>>()?;
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        if self.trees.is_empty() {
            return Err(ScoutError::ModelNotFitted);
        }

        let mut totals = Array1::<f64>::zeros(x.nrows());
        for tree in &self.trees {
            totals = totals + tree.predict(x)?;
        }
        Ok(totals / self.trees.len() as f64)
    }
}
