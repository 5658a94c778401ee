use blocktrans::blocked::transpose_submit;
use blocktrans::harness::{Harness, Registry, register_functions};
use blocktrans::matrix::Dense;
use blocktrans::matrix::transpose::trans;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

const SHAPES: [(usize, usize); 3] = [(32, 32), (64, 64), (61, 67)];

fn bench_dense(c: &mut Criterion) {
    let mut group = c.benchmark_group("dense");
    for &(m, n) in &SHAPES {
        let a: Vec<i32> = (0..(m * n) as i32).collect();
        let mut b = vec![0; m * n];
        let label = format!("{}x{}", m, n);

        group.bench_with_input(BenchmarkId::new("blocked", &label), &(m, n), |bench, &(m, n)| {
            bench.iter(|| transpose_submit(&mut Dense::new(m, n, black_box(&a), &mut b)));
        });
        group.bench_with_input(BenchmarkId::new("row-wise", &label), &(m, n), |bench, &(m, n)| {
            bench.iter(|| trans(&mut Dense::new(m, n, black_box(&a), &mut b)));
        });
    }
    group.finish();
}

fn bench_simulated(c: &mut Criterion) {
    let mut registry = Registry::new();
    register_functions(&mut registry);
    let harness = Harness::default();

    let mut group = c.benchmark_group("simulated");
    for &(m, n) in &SHAPES {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", m, n)),
            &(m, n),
            |bench, &(m, n)| {
                bench.iter(|| harness.evaluate(&registry, m, n).unwrap());
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_dense, bench_simulated);
criterion_main!(benches);
