//! Translation pipeline benchmarks.
//!
//! Groups:
//! 1. `split/statements` - statement splitting of a flat class body
//! 2. `read/java` - lexing a compilation unit into a tree
//! 3. `pipeline/java_to_tuff` - the whole run, scaled by class count

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use reword::Pipeline;
use reword_syntax::{FoldingSplitter, Splitter, read_java};
use std::fmt::Write;

/// A compilation unit with `classes` top-level classes, each holding a
/// nested class and a few fields.
fn synthetic_unit(classes: usize) -> String {
    let mut source = String::from("package bench.synthetic;\n\n");
    for i in 0..classes {
        let _ = writeln!(source, "import bench.dep{}.Type{i};", i % 4);
    }
    for i in 0..classes {
        let _ = writeln!(
            source,
            "public class Class{i} {{\n  int a{i};\n  String s{i} = \"{{}};\";\n  class Inner{i} {{ long x; }}\n}}"
        );
    }
    source
}

fn bench_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("split/statements");
    let splitter = FoldingSplitter::statements();

    for n in [10, 100, 1000] {
        let body: String = (0..n).map(|i| format!("int f{i}; {{ g({i}); }} ")).collect();
        group.throughput(Throughput::Bytes(body.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &body, |b, body| {
            b.iter(|| splitter.split(body));
        });
    }

    group.finish();
}

fn bench_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("read/java");

    for n in [1, 10, 50] {
        let source = synthetic_unit(n);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &source, |b, source| {
            b.iter(|| read_java(source));
        });
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline/java_to_tuff");
    let Ok(pipeline) = Pipeline::for_languages("java", "tuff") else {
        return;
    };

    for n in [1, 10, 50] {
        let source = synthetic_unit(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &source, |b, source| {
            b.iter(|| pipeline.run(source));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_split, bench_read, bench_pipeline);
criterion_main!(benches);
