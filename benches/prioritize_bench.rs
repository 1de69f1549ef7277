//! Benchmarks for building and evaluating the priority engine

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fuzzy_priority::{DefuzzificationOp, PriorityConfig, PriorityEngine, TaskInputs};

fn build_benchmark(c: &mut Criterion) {
    c.bench_function("engine_build", |b| b.iter(|| black_box(PriorityEngine::new().unwrap())));
}

fn prioritize_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("prioritize");

    for defuzzification in [DefuzzificationOp::Centroid, DefuzzificationOp::Cog] {
        let engine = PriorityEngine::with_config(&PriorityConfig {
            defuzzification,
            ..PriorityConfig::default()
        })
        .unwrap();

        group.bench_with_input(
            BenchmarkId::new("single", format!("{defuzzification:?}")),
            &engine,
            |b, engine| b.iter(|| black_box(engine.prioritize(black_box(2.), black_box(8.), black_box(5.)))),
        );
    }

    group.finish();
}

fn batch_benchmark(c: &mut Criterion) {
    let engine = PriorityEngine::new().unwrap();
    let mut group = c.benchmark_group("prioritize_many");

    for size in [100usize, 1_000, 10_000] {
        let tasks: Vec<_> = (0..size)
            .map(|i| TaskInputs::new((i % 31) as f64, (i % 11) as f64, ((i * 7) % 11) as f64))
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &tasks, |b, tasks| {
            b.iter(|| black_box(engine.prioritize_many(tasks)))
        });
    }

    group.finish();
}

criterion_group!(benches, build_benchmark, prioritize_benchmark, batch_benchmark);
criterion_main!(benches);
