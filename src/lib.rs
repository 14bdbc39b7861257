//! modelscout — find the best starting model for a dataset
//!
//! A lightweight model-selection harness: hand it a dataset and a problem
//! type, and it trains a set of candidate models, scores each on a held-out
//! split, and returns the best performer along with a performance table.
//!
//! # Modules
//!
//! - [`selector`] - the selection loop ([`Selector`](selector::Selector))
//! - [`models`] - the trainable-predictor contract and bundled regressors
//! - [`metrics`] - the scorer contract and built-in regression metrics
//! - [`split`] - deterministic train/test partitioning
//! - [`evaluate`] - per-model scoring and the performance table
//! - [`report`] - aligned-text rendering of results
//!
//! # Example
//!
//! ```no_run
//! use modelscout::prelude::*;
//! use ndarray::{Array1, Array2};
//!
//! # fn main() -> modelscout::Result<()> {
//! let x = Array2::from_shape_fn((50, 2), |(i, j)| (i + j) as f64);
//! let y = Array1::from_iter((0..50).map(|i| 2.0 * i as f64 + 1.0));
//!
//! let mut selector = Selector::new("regression")?;
//! let (best, table) = selector.find_with_metrics(&x, &y)?;
//! println!("best model: {} ({} candidates)", best.name(), table.len());
//! # Ok(())
//! # }
//! ```

pub mod error;

pub mod evaluate;
pub mod metrics;
pub mod models;
pub mod report;
pub mod selector;
pub mod split;

pub use error::{Result, ScoutError};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{Result, ScoutError};
    pub use crate::evaluate::{PerformanceTable, ScoreRow};
    pub use crate::metrics::{
        default_regression_scorers, FnScorer, NegMeanAbsoluteError, NegRootMeanSquaredError,
        RSquared, Scorer,
    };
    pub use crate::models::{
        default_regressors, DecisionTreeRegressor, Estimator, KNNRegressor, LinearRegression,
        RandomForestRegressor, RidgeRegression,
    };
    pub use crate::selector::{ProblemType, Selector};
    pub use crate::split::{train_test_split, TrainTestSplit, RANDOM_SEED, TEST_FRACTION};
}
