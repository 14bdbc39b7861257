//! Linear regression models
//!
//! Ordinary least squares and its L2-regularized variant, solved via the
//! normal equations with Cholesky decomposition and a Gauss-Jordan fallback
//! for near-singular systems.

use crate::error::{Result, ScoutError};
use crate::models::Estimator;
use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

/// Cholesky solve for a symmetric positive-definite system Ax = b.
/// Returns None when the matrix is not positive definite.
fn cholesky_solve(a: &Array2<f64>, b: &Array1<f64>) -> Option<Array1<f64>> {
    let n = a.nrows();
    let mut l = Array2::<f64>::zeros((n, n));

    // A = L L^T
    for i in 0..n {
        for j in 0..=i {
            let sum: f64 = (0..j).map(|k| l[[i, k]] * l[[j, k]]).sum();
            if i == j {
                let diag = a[[i, i]] - sum;
                if diag <= 0.0 {
                    return None;
                }
                l[[i, j]] = diag.sqrt();
            } else {
                l[[i, j]] = (a[[i, j]] - sum) / l[[j, j]];
            }
        }
    }

    // Forward substitution: L z = b
    let mut z = Array1::<f64>::zeros(n);
    for i in 0..n {
        let sum: f64 = (0..i).map(|j| l[[i, j]] * z[j]).sum();
        z[i] = (b[i] - sum) / l[[i, i]];
    }

    // Backward substitution: L^T x = z
    let mut x = Array1::<f64>::zeros(n);
    for i in (0..n).rev() {
        let sum: f64 = ((i + 1)..n).map(|j| l[[j, i]] * x[j]).sum();
        x[i] = (z[i] - sum) / l[[i, i]];
    }

    Some(x)
}

/// Gauss-Jordan solve, used when Cholesky rejects the system.
fn gauss_jordan_solve(a: &Array2<f64>, b: &Array1<f64>) -> Option<Array1<f64>> {
    let n = a.nrows();
    let mut aug = Array2::<f64>::zeros((n, n + 1));
    for i in 0..n {
        for j in 0..n {
            aug[[i, j]] = a[[i, j]];
        }
        aug[[i, n]] = b[i];
    }

    for col in 0..n {
        // Partial pivoting
        let mut pivot_row = col;
        for row in col + 1..n {
            if aug[[row, col]].abs() > aug[[pivot_row, col]].abs() {
                pivot_row = row;
            }
        }
        if aug[[pivot_row, col]].abs() < 1e-12 {
            return None;
        }
        if pivot_row != col {
            for j in 0..=n {
                let tmp = aug[[col, j]];
                aug[[col, j]] = aug[[pivot_row, j]];
                aug[[pivot_row, j]] = tmp;
            }
        }

        let pivot = aug[[col, col]];
        for j in 0..=n {
            aug[[col, j]] /= pivot;
        }
        for row in 0..n {
            if row != col {
                let factor = aug[[row, col]];
                for j in 0..=n {
                    aug[[row, j]] -= factor * aug[[col, j]];
                }
            }
        }
    }

    Some(Array1::from_iter((0..n).map(|i| aug[[i, n]])))
}

/// Solve (X^T X + alpha I) w = X^T y.
fn solve_normal_equations(x: &Array2<f64>, y: &Array1<f64>, alpha: f64) -> Result<Array1<f64>> {
    let mut xtx = x.t().dot(x);
    if alpha > 0.0 {
        for i in 0..xtx.nrows() {
            xtx[[i, i]] += alpha;
        }
    }
    let xty = x.t().dot(y);

    cholesky_solve(&xtx, &xty)
        .or_else(|| gauss_jordan_solve(&xtx, &xty))
        .ok_or_else(|| {
            ScoutError::ComputationError("normal equations are singular".to_string())
        })
}

/// Fitted coefficients shared by the linear models.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LinearFit {
    coefficients: Array1<f64>,
    intercept: f64,
}

fn fit_linear(x: &Array2<f64>, y: &Array1<f64>, alpha: f64) -> Result<LinearFit> {
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

    // Center so the intercept falls out of the solve
    let x_mean = x
        .mean_axis(Axis(0))
        .ok_or_else(|| ScoutError::DataError("empty feature matrix".to_string()))?;
    let y_mean = y.sum() / y.len() as f64;

    let x_centered = x - &x_mean.clone().insert_axis(Axis(0));
    let y_centered = y - y_mean;

    let coefficients = solve_normal_equations(&x_centered, &y_centered, alpha)?;
    let intercept = y_mean - coefficients.dot(&x_mean);

    Ok(LinearFit {
        coefficients,
        intercept,
    })
}

fn predict_linear(fit: Option<&LinearFit>, x: &Array2<f64>) -> Result<Array1<f64>> {
    let fit = fit.ok_or(ScoutError::ModelNotFitted)?;
    Ok(x.dot(&fit.coefficients) + fit.intercept)
}

/// Ordinary least squares regression.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinearRegression {
    fit: Option<LinearFit>,
}

impl LinearRegression {
    pub fn new() -> Self {
        Self { fit: None }
    }

    /// Fitted coefficients, if the model has been trained.
    pub fn coefficients(&self) -> Option<&Array1<f64>> {
        self.fit.as_ref().map(|f| &f.coefficients)
    }
}

impl Estimator for LinearRegression {
    fn name(&self) -> &str {
        "LinearRegression"
    }

    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        self.fit = Some(fit_linear(x, y, 0.0)?);
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        predict_linear(self.fit.as_ref(), x)
    }
}

/// Least squares with L2 regularization on the coefficients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RidgeRegression {
    alpha: f64,
    fit: Option<LinearFit>,
}

impl RidgeRegression {
    pub fn new(alpha: f64) -> Self {
        Self { alpha, fit: None }
    }

    pub fn coefficients(&self) -> Option<&Array1<f64>> {
        self.fit.as_ref().map(|f| &f.coefficients)
    }
}

impl Estimator for RidgeRegression {
    fn name(&self) -> &str {
        "RidgeRegression"
    }

    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        self.fit = Some(fit_linear(x, y, self.alpha)?);
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        predict_linear(self.fit.as_ref(), x)
    }
}
