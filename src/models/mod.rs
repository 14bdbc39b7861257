//! Candidate model implementations and the trainable-predictor contract
//!
//! The bundled regressors are intentionally small, dependency-free
//! implementations so that `Selector::new("regression")` works out of the
//! box; any external model can participate by implementing [`Estimator`].

pub mod knn;
pub mod linear;
pub mod tree;

pub use knn::{KNNRegressor, WeightScheme};
pub use linear::{LinearRegression, RidgeRegression};
pub use tree::{DecisionTreeRegressor, RandomForestRegressor};

use crate::error::Result;
use crate::split::RANDOM_SEED;
use ndarray::{Array1, Array2};

/// Trainable-predictor contract for candidate models.
pub trait Estimator: Send {
    /// Short display name, used as the row label in performance tables.
    fn name(&self) -> &str;

    /// Whether this candidate can be trained. Inference-only wrappers (e.g.
    /// a pre-trained model loaded for serving) return `false`; the Selector
    /// rejects such candidates when they are supplied at construction time.
    fn trainable(&self) -> bool {
        true
    }

    /// Fit the model to training data.
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()>;

    /// Make predictions.
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>>;
}

/// Fresh default candidate ensemble for regression problems.
///
/// Returns new instances on every call so Selectors never share model state.
pub fn default_regressors() -> Vec<Box<dyn Estimator>> {
    vec![
        Box::new(LinearRegression::new()),
        Box::new(RidgeRegression::new(1.0)),
        Box::new(KNNRegressor::with_k(5)),
        Box::new(DecisionTreeRegressor::new()),
        Box::new(RandomForestRegressor::new(100).with_random_state(RANDOM_SEED)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_regressors_are_fresh_instances() {
        let a = default_regressors();
        let b = default_regressors();
        assert_eq!(a.len(), b.len());
        assert!(a.iter().all(|m| m.trainable()));
    }

    #[test]
    fn test_default_regressor_names_are_unique() {
        let models = default_regressors();
        let mut names: Vec<&str> = models.iter().map(|m| m.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), models.len());
    }
}
