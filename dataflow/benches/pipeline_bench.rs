//! Benchmarks for pipeline execution.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dataflow::prelude::*;

fn input(keys: i64, values_per_key: i64) -> RecordTable {
    (1..=keys)
        .flat_map(|k| (1..=values_per_key).map(move |v| Record::new(k, (v * 7919) % 1000)))
        .collect()
}

fn pipeline_benchmark(c: &mut Criterion) {
    let pipeline = PipelineBuilder::new("bench")
        .operation("FILTER", "IS_EVEN")
        .operation("MAP", "MULTIPLY(3)")
        .operation("CHANGEKEY", "DIVIDE(10)")
        .operation("REDUCE", "SUM")
        .build()
        .expect("valid pipeline");

    let mut group = c.benchmark_group("pipeline");
    for rows in [1_000_i64, 100_000] {
        let table = input(10, rows / 10);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &table, |b, table| {
            b.iter(|| black_box(pipeline.run(table.clone())));
        });
    }
    group.finish();
}

fn parse_benchmark(c: &mut Criterion) {
    c.bench_function("compile_transform", |b| {
        b.iter(|| {
            black_box(Transform::compile(
                OperatorKind::Map,
                black_box("DIVIDE(7)"),
                TruncationPolicy::TowardZero,
            ))
        });
    });
}

criterion_group!(benches, pipeline_benchmark, parse_benchmark);
criterion_main!(benches);
