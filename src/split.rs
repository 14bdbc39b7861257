//! Deterministic train/test partitioning

use crate::error::{Result, ScoutError};
use ndarray::{Array1, Array2, Axis};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seed used for every selection pass, so results are reproducible across
/// runs and across machines for the same inputs.
pub const RANDOM_SEED: u64 = 42;

/// Fraction of rows held out for scoring.
pub const TEST_FRACTION: f64 = 0.2;

/// A train/test partition of a dataset.
///
/// All four arrays are owned copies: candidate models get these, never the
/// caller's data, so no fit/predict call can mutate the original dataset.
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub x_train: Array2<f64>,
    pub x_test: Array2<f64>,
    pub y_train: Array1<f64>,
    pub y_test: Array1<f64>,
}

/// Split (x, y) into a shuffled train/test partition.
///
/// Indices are shuffled with a seeded ChaCha8 generator and the first
/// `ceil(n * test_fraction)` shuffled rows become the test set, so the same
/// seed always yields the same partition. No stratification is applied.
pub fn train_test_split(
    x: &Array2<f64>,
    y: &Array1<f64>,
    test_fraction: f64,
    seed: u64,
) -> Result<TrainTestSplit> {
    let n_samples = x.nrows();

    if n_samples != y.len() {
        return Err(ScoutError::DataError(format!(
            "x has {} rows but y has {} values",
            n_samples,
            y.len()
        )));
    }
    if test_fraction <= 0.0 || test_fraction >= 1.0 {
        return Err(ScoutError::DataError(format!(
            "test_fraction must be in (0, 1), got {}",
            test_fraction
        )));
    }

    let n_test = ((n_samples as f64) * test_fraction).ceil() as usize;
    if n_test == 0 || n_test >= n_samples {
        return Err(ScoutError::DataError(format!(
            "cannot split {} samples into non-empty train and test sets",
            n_samples
        )));
    }

    let mut indices: Vec<usize> = (0..n_samples).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let (test_idx, train_idx) = indices.split_at(n_test);

    Ok(TrainTestSplit {
        x_train: x.select(Axis(0), train_idx),
        x_test: x.select(Axis(0), test_idx),
        y_train: train_idx.iter().map(|&i| y[i]).collect(),
        y_test: test_idx.iter().map(|&i| y[i]).collect(),
    })
}
