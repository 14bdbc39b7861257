//! Tabular rendering of selection results

use crate::evaluate::PerformanceTable;
use colored::Colorize;

const NAME_COL_MIN: usize = 24;
const SCORE_COL: usize = 12;

/// Render the table as aligned text with the winning row emphasized.
///
/// Rows are padded to width before any color is applied, so the emphasis
/// never disturbs alignment. Each emphasized line carries its own ANSI reset
/// and no terminal state outlives the returned string.
pub fn render(table: &PerformanceTable, best_index: usize) -> String {
    let name_width = table
        .rows()
        .iter()
        .map(|row| row.model.len())
        .chain(std::iter::once(NAME_COL_MIN))
        .max()
        .unwrap_or(NAME_COL_MIN);

    let mut header = format!("  {:<width$}", "model", width = name_width);
    for name in table.metric_names() {
        header.push_str(&format!(" {:>width$}", name, width = SCORE_COL));
    }

    let rule_width = name_width + (SCORE_COL + 1) * table.metric_names().len();
    let rule = format!("  {}", "─".repeat(rule_width));

    let mut out = String::new();
    out.push_str(&format!("{}\n", header.dimmed()));
    out.push_str(&format!("{}\n", rule.dimmed()));

    for (idx, row) in table.rows().iter().enumerate() {
        let mut line = format!("  {:<width$}", row.model, width = name_width);
        for score in &row.scores {
            line.push_str(&format!(" {:>width$.4}", score, width = SCORE_COL));
        }

        if idx == best_index {
            out.push_str(&format!("{}\n", line.green()));
        } else {
            out.push_str(&format!("{}\n", line));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate::{PerformanceTable, ScoreRow};

    fn sample_table() -> PerformanceTable {
        let mut table = PerformanceTable::new(vec!["neg_rmse".to_string(), "r2".to_string()]);
        table.push(ScoreRow {
            model: "LinearRegression".to_string(),
            scores: vec![-0.5, 0.91],
        });
        table.push(ScoreRow {
            model: "KNNRegressor".to_string(),
            scores: vec![-1.25, 0.62],
        });
        table
    }

    #[test]
    fn test_render_has_header_and_all_rows() {
        let text = render(&sample_table(), 0);

        assert!(text.contains("model"));
        assert!(text.contains("neg_rmse"));
        assert!(text.contains("r2"));
        assert!(text.contains("LinearRegression"));
        assert!(text.contains("KNNRegressor"));
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn test_render_formats_scores() {
        let text = render(&sample_table(), 0);
        assert!(text.contains("-0.5000"));
        assert!(text.contains("0.9100"));
        assert!(text.contains("-1.2500"));
    }

    #[test]
    fn test_long_model_names_stay_aligned() {
        let mut table = PerformanceTable::new(vec!["m".to_string()]);
        table.push(ScoreRow {
            model: "AVeryLongCandidateModelNameIndeed".to_string(),
            scores: vec![1.0],
        });
        table.push(ScoreRow {
            model: "Short".to_string(),
            scores: vec![2.0],
        });

        let text = render(&table, 1);
        assert!(text.contains("AVeryLongCandidateModelNameIndeed"));
        assert!(text.contains("Short"));
    }
}
