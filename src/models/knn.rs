//! K-nearest-neighbors regression

use crate::error::{Result, ScoutError};
use crate::models::Estimator;
use ndarray::{Array1, Array2};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Weighting scheme for neighbor aggregation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum WeightScheme {
    /// All neighbors contribute equally
    #[default]
    Uniform,
    /// Closer neighbors contribute more (inverse distance)
    Distance,
}

/// K-nearest-neighbors regressor. Fitting stores the training data;
/// prediction averages the targets of the k nearest rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KNNRegressor {
    n_neighbors: usize,
    weights: WeightScheme,
    x_train: Option<Array2<f64>>,
    y_train: Option<Array1<f64>>,
}

impl KNNRegressor {
    pub fn with_k(k: usize) -> Self {
        Self {
            n_neighbors: k.max(1),
            weights: WeightScheme::default(),
            x_train: None,
            y_train: None,
        }
    }

    pub fn with_weights(mut self, weights: WeightScheme) -> Self {
        self.weights = weights;
        self
    }
}

impl Estimator for KNNRegressor {
    fn name(&self) -> &str {
        "KNNRegressor"
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
        self.x_train = Some(x.clone());
        self.y_train = Some(y.clone());
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let x_train = self.x_train.as_ref().ok_or(ScoutError::ModelNotFitted)?;
        let y_train = self.y_train.as_ref().ok_or(ScoutError::ModelNotFitted)?;
        let k = self.n_neighbors.min(x_train.nrows());
        let weights = self.weights;

        let predictions: Vec<f64> = (0..x.nrows())
            .into_par_iter()
            .map(|i| {
                let neighbors = k_nearest(&x.row(i).to_vec(), x_train, y_train, k);
                aggregate(&neighbors, weights)
            })
            .collect();

        Ok(Array1::from_vec(predictions))
    }
}

/// Max-heap entry keyed on distance, keeping the k smallest seen so far.
#[derive(PartialEq)]
struct Neighbor(f64, f64);

impl Eq for Neighbor {}
impl PartialOrd for Neighbor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}
impl Ord for Neighbor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.partial_cmp(other).unwrap_or(Ordering::Equal)
    }
}

/// O(n log k) nearest-neighbor scan via a bounded max-heap.
fn k_nearest(point: &[f64], x_train: &Array2<f64>, y_train: &Array1<f64>, k: usize) -> Vec<(f64, f64)> {
    let mut heap = BinaryHeap::with_capacity(k + 1);

    for (i, row) in x_train.rows().into_iter().enumerate() {
        let dist = row
            .iter()
            .zip(point.iter())
            .map(|(a, b)| {
                let d = a - b;
                d * d
            })
            .sum::<f64>()
            .sqrt();

        if heap.len() < k {
            heap.push(Neighbor(dist, y_train[i]));
        } else if let Some(worst) = heap.peek() {
            if dist < worst.0 {
                heap.pop();
                heap.push(Neighbor(dist, y_train[i]));
            }
        }
    }

    heap.into_iter().map(|n| (n.0, n.1)).collect()
}

fn aggregate(neighbors: &[(f64, f64)], weights: WeightScheme) -> f64 {
    match weights {
        WeightScheme::Uniform => {
            neighbors.iter().map(|(_, y)| y).sum::<f64>() / neighbors.len() as f64
        }
        WeightScheme::Distance => {
            let mut weighted_sum = 0.0;
            let mut weight_total = 0.0;
            for &(dist, y) in neighbors {
                let w = 1.0 / (dist + 1e-10);
                weighted_sum += w * y;
                weight_total += w;
            }
            if weight_total > 0.0 {
                weighted_sum / weight_total
            } else {
                neighbors.iter().map(|(_, y)| y).sum::<f64>() / neighbors.len() as f64
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn training_data() -> (Array2<f64>, Array1<f64>) {
        let x = Array2::from_shape_fn((10, 2), |(i, j)| (i * 2 + j) as f64);
        let y = x.rows().into_iter().map(|row| row[0] + row[1]).collect();
        (x, y)
    }

    #[test]
    fn test_knn_interpolates() {
        let (x, y) = training_data();
        let mut knn = KNNRegressor::with_k(3);
        knn.fit(&x, &y).unwrap();

        let preds = knn.predict(&x).unwrap();
        let mse: f64 = preds
            .iter()
            .zip(y.iter())
            .map(|(p, t)| (p - t) * (p - t))
            .sum::<f64>()
            / y.len() as f64;
        assert!(mse < 10.0, "mse too high: {}", mse);
    }

    #[test]
    fn test_k_one_memorizes() {
        let (x, y) = training_data();
        let mut knn = KNNRegressor::with_k(1);
        knn.fit(&x, &y).unwrap();

        let preds = knn.predict(&x).unwrap();
        assert_eq!(preds, y);
    }

    #[test]
    fn test_distance_weighting() {
        let (x, y) = training_data();
        let mut knn = KNNRegressor::with_k(5).with_weights(WeightScheme::Distance);
        knn.fit(&x, &y).unwrap();

        let preds = knn.predict(&x).unwrap();
        assert_eq!(preds.len(), 10);
    }

    #[test]
    fn test_k_larger_than_dataset() {
        let x = array![[0.0], [1.0]];
        let y = array![1.0, 3.0];
        let mut knn = KNNRegressor::with_k(10);
        knn.fit(&x, &y).unwrap();

        // Falls back to averaging over everything
        let preds = knn.predict(&array![[0.5]]).unwrap();
        assert!((preds[0] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_predict_before_fit() {
        let knn = KNNRegressor::with_k(3);
        assert!(knn.predict(&array![[1.0]]).is_err());
    }
}
