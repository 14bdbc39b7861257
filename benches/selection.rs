use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use modelscout::prelude::*;
use ndarray::{Array1, Array2};
use rand::prelude::*;

fn create_regression_data(n_rows: usize, n_features: usize) -> (Array2<f64>, Array1<f64>) {
    let mut rng = rand::thread_rng();

    let x = Array2::from_shape_fn((n_rows, n_features), |_| rng.gen::<f64>() * 10.0);

    // Target is the row sum plus noise
    let y = Array1::from_iter(
        x.rows()
            .into_iter()
            .map(|row| row.sum() + rng.gen::<f64>() * 0.1),
    );

    (x, y)
}

fn bench_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection");
    group.sample_size(10); // Fewer samples for full selection passes

    for n_rows in [200, 1000].iter() {
        let (x, y) = create_regression_data(*n_rows, 5);

        group.bench_with_input(BenchmarkId::new("find", n_rows), &(x, y), |b, (x, y)| {
            b.iter(|| {
                let mut selector = Selector::new("regression")
                    .unwrap()
                    .with_display(false);
                selector.find(black_box(x), black_box(y)).unwrap();
            })
        });
    }

    group.finish();
}

fn bench_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("split");

    for n_rows in [1000, 10000].iter() {
        let (x, y) = create_regression_data(*n_rows, 10);

        group.bench_with_input(BenchmarkId::new("train_test_split", n_rows), &(x, y), |b, (x, y)| {
            b.iter(|| train_test_split(black_box(x), black_box(y), TEST_FRACTION, RANDOM_SEED).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_selection, bench_split);
criterion_main!(benches);
