//! Scoring metrics
//!
//! A metric is anything implementing [`Scorer`]: a named function from
//! (true labels, predictions) to a single numeric score. Higher is better —
//! error-style metrics are negated so the selection loop can always take an
//! argmax over the first configured metric.

use crate::error::{Result, ScoutError};
use ndarray::Array1;

/// Scoring capability contract.
///
/// The `name` is used as the column label in performance tables; two scorers
/// sharing a name are not deduplicated.
pub trait Scorer: Send {
    fn name(&self) -> &str;

    /// Compute a score from true vs. predicted labels.
    fn score(&self, y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<f64>;
}

fn check_lengths(name: &str, y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<()> {
    if y_true.len() != y_pred.len() || y_true.is_empty() {
        return Err(ScoutError::DataError(format!(
            "`{}` called with {} true labels and {} predictions",
            name,
            y_true.len(),
            y_pred.len()
        )));
    }
    Ok(())
}

/// Negative root mean squared error. Negated so that a perfect model scores
/// 0 and worse models score lower, keeping argmax selection valid.
#[derive(Debug, Clone, Copy, Default)]
pub struct NegRootMeanSquaredError;

impl Scorer for NegRootMeanSquaredError {
    fn name(&self) -> &str {
        "neg_rmse"
    }

    fn score(&self, y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<f64> {
        check_lengths(self.name(), y_true, y_pred)?;
        let n = y_true.len() as f64;
        let mse = y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(t, p)| (t - p) * (t - p))
            .sum::<f64>()
            / n;
        Ok(-mse.sqrt())
    }
}

/// Coefficient of determination (R²). Defined as 0 when the true labels are
/// constant, matching the convention used elsewhere in this codebase.
#[derive(Debug, Clone, Copy, Default)]
pub struct RSquared;

impl Scorer for RSquared {
    fn name(&self) -> &str {
        "r2"
    }

    fn score(&self, y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<f64> {
        check_lengths(self.name(), y_true, y_pred)?;
        let n = y_true.len() as f64;
        let y_mean = y_true.sum() / n;
        let ss_tot: f64 = y_true.iter().map(|t| (t - y_mean) * (t - y_mean)).sum();
        let ss_res: f64 = y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(t, p)| (t - p) * (t - p))
            .sum();

        if ss_tot > 0.0 {
            Ok(1.0 - ss_res / ss_tot)
        } else {
            Ok(0.0)
        }
    }
}

/// Negative mean absolute error. Not part of the default list; available for
/// callers that prefer an L1 ranking.
#[derive(Debug, Clone, Copy, Default)]
pub struct NegMeanAbsoluteError;

impl Scorer for NegMeanAbsoluteError {
    fn name(&self) -> &str {
        "neg_mae"
    }

    fn score(&self, y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<f64> {
        check_lengths(self.name(), y_true, y_pred)?;
        let n = y_true.len() as f64;
        let mae = y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(t, p)| (t - p).abs())
            .sum::<f64>()
            / n;
        Ok(-mae)
    }
}

/// Adapter turning a plain closure into a [`Scorer`].
pub struct FnScorer<F> {
    name: String,
    func: F,
}

impl<F> FnScorer<F>
where
    F: Fn(&Array1<f64>, &Array1<f64>) -> Result<f64> + Send,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> Scorer for FnScorer<F>
where
    F: Fn(&Array1<f64>, &Array1<f64>) -> Result<f64> + Send,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn score(&self, y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<f64> {
        (self.func)(y_true, y_pred)
    }
}

/// Fresh default scorer list for regression problems. Negative RMSE comes
/// first and therefore drives winner selection; R² is reported alongside.
pub fn default_regression_scorers() -> Vec<Box<dyn Scorer>> {
    vec![Box::new(NegRootMeanSquaredError), Box::new(RSquared)]
}
