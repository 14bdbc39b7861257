//! Model Selection Example
//!
//! Runs the default regression ensemble on synthetic data and prints the
//! performance table with the winner highlighted.

use modelscout::prelude::*;
use ndarray::{Array1, Array2};

fn main() -> modelscout::Result<()> {
    // Create sample regression data
    let n = 200;
    let x = Array2::from_shape_fn((n, 2), |(i, j)| {
        let t = i as f64 / 10.0;
        if j == 0 {
            t
        } else {
            t.sin()
        }
    });
    let y = Array1::from_iter(
        x.rows()
            .into_iter()
            .map(|row| 2.0 * row[0] + 3.0 * row[1] + 0.5),
    );

    println!("Dataset: {} samples\n", n);

    let mut selector = Selector::new("regression")?;
    let (best, table) = selector.find_with_metrics(&x, &y)?;

    println!(
        "best: {} (out of {} candidates)",
        best.name(),
        table.len()
    );

    Ok(())
}
