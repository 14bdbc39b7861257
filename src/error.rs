//! Error types for the modelscout harness

use crate::selector::ProblemType;
use thiserror::Error;

/// Result type alias for modelscout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Main error type for the harness
#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("unsupported problem type `{0}`: try \"regression\" or \"classification\" instead")]
    UnsupportedProblem(String),

    #[error("model `{0}` does not support training")]
    UnfittableModel(String),

    #[error("incorrect metric: {0}")]
    IncorrectMetric(String),

    #[error("no candidate models registered")]
    NoCandidates,

    #[error("no scoring metrics configured for {0} problems")]
    NoScorers(ProblemType),

    #[error("data error: {0}")]
    DataError(String),

    #[error("model not fitted")]
    ModelNotFitted,

    #[error("computation error: {0}")]
    ComputationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ScoutError::UnsupportedProblem("ranking".to_string());
        assert_eq!(
            err.to_string(),
            "unsupported problem type `ranking`: try \"regression\" or \"classification\" instead"
        );
    }

    #[test]
    fn test_metric_error_display() {
        let err = ScoutError::IncorrectMetric("`r2` failed".to_string());
        assert_eq!(err.to_string(), "incorrect metric: `r2` failed");
    }
}
