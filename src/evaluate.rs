//! Per-model scoring and the accumulated performance table

use crate::error::{Result, ScoutError};
use crate::metrics::Scorer;
use crate::models::Estimator;
use ndarray::{Array1, Array2};
use serde::Serialize;

/// One evaluated model: its display name and one score per configured metric.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreRow {
    pub model: String,
    pub scores: Vec<f64>,
}

/// Ordered collection of per-model score rows from one selection run.
/// Row order equals candidate registration order; column order equals the
/// scorer configuration order.
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceTable {
    metric_names: Vec<String>,
    rows: Vec<ScoreRow>,
}

impl PerformanceTable {
    pub(crate) fn new(metric_names: Vec<String>) -> Self {
        Self {
            metric_names,
            rows: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, row: ScoreRow) {
        self.rows.push(row);
    }

    pub fn metric_names(&self) -> &[String] {
        &self.metric_names
    }

    pub fn rows(&self) -> &[ScoreRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the row with the maximum value in the first metric column.
    /// Ties go to the earliest row (stable argmax over insertion order).
    pub fn best_row(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (idx, row) in self.rows.iter().enumerate() {
            let score = *row.scores.first()?;
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((idx, score)),
            }
        }
        best.map(|(idx, _)| idx)
    }
}

/// Score one trained model on the held-out split.
///
/// Any scorer failure aborts with `IncorrectMetric`; so does a non-finite
/// score, since scorers are user-pluggable and only checked here at runtime.
/// Prediction errors from the model itself propagate unchanged.
pub(crate) fn evaluate(
    model: &dyn Estimator,
    scorers: &[Box<dyn Scorer>],
    x_test: &Array2<f64>,
    y_test: &Array1<f64>,
) -> Result<ScoreRow> {
    let y_pred = model.predict(x_test)?;

    let mut scores = Vec::with_capacity(scorers.len());
    for scorer in scorers {
        let value = scorer.score(y_test, &y_pred).map_err(|err| match err {
            ScoutError::IncorrectMetric(_) => err,
            other => ScoutError::IncorrectMetric(format!("`{}` failed: {}", scorer.name(), other)),
        })?;

        if !value.is_finite() {
            return Err(ScoutError::IncorrectMetric(format!(
                "`{}` produced a non-numeric score ({})",
                scorer.name(),
                value
            )));
        }
        scores.push(value);
    }

    Ok(ScoreRow {
        model: model.name().to_string(),
        scores,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::FnScorer;
    use ndarray::array;

    struct Echo;

    impl Estimator for Echo {
        fn name(&self) -> &str {
            "Echo"
        }
        fn fit(&mut self, _x: &Array2<f64>, _y: &Array1<f64>) -> Result<()> {
            Ok(())
        }
        fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
            Ok(x.column(0).to_owned())
        }
    }

    fn scorers(values: Vec<f64>) -> Vec<Box<dyn Scorer>> {
        values
            .into_iter()
            .enumerate()
            .map(|(i, v)| {
                Box::new(FnScorer::new(format!("m{}", i), move |_: &Array1<f64>, _: &Array1<f64>| {
                    Ok(v)
                })) as Box<dyn Scorer>
            })
            .collect()
    }

    #[test]
    fn test_evaluate_produces_one_score_per_metric() {
        let x = array![[1.0], [2.0]];
        let y = array![1.0, 2.0];
        let row = evaluate(&Echo, &scorers(vec![0.5, -1.0]), &x, &y).unwrap();

        assert_eq!(row.model, "Echo");
        assert_eq!(row.scores, vec![0.5, -1.0]);
    }

    #[test]
    fn test_nan_score_is_rejected() {
        let x = array![[1.0]];
        let y = array![1.0];
        let result = evaluate(&Echo, &scorers(vec![f64::NAN]), &x, &y);
        assert!(matches!(result, Err(ScoutError::IncorrectMetric(_))));
    }

    #[test]
    fn test_failing_scorer_is_wrapped() {
        let x = array![[1.0]];
        let y = array![1.0];
        let failing: Vec<Box<dyn Scorer>> = vec![Box::new(FnScorer::new(
            "broken",
            |_: &Array1<f64>, _: &Array1<f64>| Err(ScoutError::DataError("boom".to_string())),
        ))];

        let result = evaluate(&Echo, &failing, &x, &y);
        match result {
            Err(ScoutError::IncorrectMetric(msg)) => assert!(msg.contains("broken")),
            other => panic!("expected IncorrectMetric, got {:?}", other),
        }
    }

    #[test]
    fn test_best_row_stable_argmax() {
        let mut table = PerformanceTable::new(vec!["m".to_string()]);
        table.push(ScoreRow {
            model: "a".to_string(),
            scores: vec![1.0],
        });
        table.push(ScoreRow {
            model: "b".to_string(),
            scores: vec![3.0],
        });
        table.push(ScoreRow {
            model: "c".to_string(),
            scores: vec![3.0],
        });

        assert_eq!(table.best_row(), Some(1));
    }

    #[test]
    fn test_best_row_empty_table() {
        let table = PerformanceTable::new(vec!["m".to_string()]);
        assert_eq!(table.best_row(), None);
    }
}
