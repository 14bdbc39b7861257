//! Candidate selection over a held-out split
//!
//! [`Selector`] owns a problem type, an ordered list of candidate models and
//! an ordered list of scorers. A selection pass splits the dataset once,
//! fits and scores every candidate sequentially, and returns the candidate
//! with the best first-metric score.

use crate::error::{Result, ScoutError};
use crate::evaluate::{evaluate, PerformanceTable};
use crate::metrics::{default_regression_scorers, Scorer};
use crate::models::{default_regressors, Estimator};
use crate::report;
use crate::split::{train_test_split, RANDOM_SEED, TEST_FRACTION};
use colored::Colorize;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;
use tracing::debug;

/// Kind of problem a Selector is configured for.
///
/// Classification is accepted at construction time but ships with no default
/// models or scorers; callers must supply both explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProblemType {
    Regression,
    Classification,
}

impl FromStr for ProblemType {
    type Err = ScoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "regression" => Ok(Self::Regression),
            "classification" => Ok(Self::Classification),
            other => Err(ScoutError::UnsupportedProblem(other.to_string())),
        }
    }
}

impl fmt::Display for ProblemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Regression => write!(f, "regression"),
            Self::Classification => write!(f, "classification"),
        }
    }
}

/// Model-selection harness.
pub struct Selector {
    problem_type: ProblemType,
    models: Vec<Box<dyn Estimator>>,
    scorers: Vec<Box<dyn Scorer>>,
    display: bool,
}

struct Selection {
    best_index: usize,
    table: PerformanceTable,
}

impl Selector {
    /// Create a selector for the given problem type.
    ///
    /// Regression selectors start with the default regressor ensemble and
    /// the default scorer list (negative RMSE, then R²). Classification
    /// selectors start empty.
    pub fn new(problem_type: &str) -> Result<Self> {
        let problem_type = problem_type.parse::<ProblemType>()?;

        let (models, scorers) = match problem_type {
            ProblemType::Regression => (default_regressors(), default_regression_scorers()),
            ProblemType::Classification => (Vec::new(), Vec::new()),
        };

        Ok(Self {
            problem_type,
            models,
            scorers,
            display: true,
        })
    }

    /// Replace the candidate list. Every supplied candidate must be
    /// trainable; inference-only wrappers are rejected here, up front.
    pub fn with_models(mut self, models: Vec<Box<dyn Estimator>>) -> Result<Self> {
        for model in &models {
            if !model.trainable() {
                return Err(ScoutError::UnfittableModel(model.name().to_string()));
            }
        }
        self.models = models;
        Ok(self)
    }

    /// Replace the scorer list. Scorers are validated only at evaluation
    /// time, when they are first invoked.
    pub fn with_scorers(mut self, scorers: Vec<Box<dyn Scorer>>) -> Self {
        self.scorers = scorers;
        self
    }

    /// Enable or disable progress output and table rendering. Has no effect
    /// on returned values.
    pub fn with_display(mut self, display: bool) -> Self {
        self.display = display;
        self
    }

    /// Append a candidate. Unlike [`Selector::with_models`] this performs no
    /// capability check; an unfittable candidate registered here fails later,
    /// from its own `fit` error during the run.
    pub fn add_model(&mut self, model: Box<dyn Estimator>) {
        self.models.push(model);
    }

    pub fn problem_type(&self) -> ProblemType {
        self.problem_type
    }

    pub fn models(&self) -> &[Box<dyn Estimator>] {
        &self.models
    }

    /// Run a selection pass and return the best candidate.
    pub fn find(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<&dyn Estimator> {
        let selection = self.run(x, y)?;
        Ok(self.models[selection.best_index].as_ref())
    }

    /// Run a selection pass and return the best candidate together with the
    /// full performance table.
    pub fn find_with_metrics(
        &mut self,
        x: &Array2<f64>,
        y: &Array1<f64>,
    ) -> Result<(&dyn Estimator, PerformanceTable)> {
        let selection = self.run(x, y)?;
        Ok((
            self.models[selection.best_index].as_ref(),
            selection.table,
        ))
    }

    fn run(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<Selection> {
        if self.models.is_empty() {
            return Err(ScoutError::NoCandidates);
        }
        if self.scorers.is_empty() {
            return Err(ScoutError::NoScorers(self.problem_type));
        }

        let split = train_test_split(x, y, TEST_FRACTION, RANDOM_SEED)?;
        debug!(
            train_rows = split.x_train.nrows(),
            test_rows = split.x_test.nrows(),
            "dataset split"
        );

        let metric_names = self.scorers.iter().map(|s| s.name().to_string()).collect();
        let mut table = PerformanceTable::new(metric_names);

        for model in self.models.iter_mut() {
            let start = Instant::now();
            model.fit(&split.x_train, &split.y_train)?;

            let row = evaluate(&**model, &self.scorers, &split.x_test, &split.y_test)?;
            debug!(model = row.model.as_str(), scores = ?row.scores, "candidate evaluated");

            if self.display {
                println!(
                    "  {} {} {}",
                    "✓".green(),
                    row.model,
                    format!("{:.2?}", start.elapsed()).dimmed()
                );
            }

            table.push(row);
        }

        // Scorer list is non-empty and every score is finite, so a winner
        // always exists once at least one row landed.
        let best_index = table.best_row().ok_or(ScoutError::NoCandidates)?;

        if self.display {
            println!("\n{}", report::render(&table, best_index));
        }

        Ok(Selection { best_index, table })
    }
}
