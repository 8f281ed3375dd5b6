//! Pipeline throughput benchmarks
//!
//! Every typed line passes through the full stage order, so per-line push
//! cost is the number that matters.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use preflight::transform::Pipeline;

const MIXED_SESSION: &[&str] = &[
    ">>> x = 1",
    ">>> y = x + 2",
    "!ls -la",
    "result = !git status",
    "%timeit f(x)",
    "foo?",
    "%%bash",
    "echo one",
    "echo two",
    "",
    "def f(a, b):",
    "    return a + b",
    "",
];

fn bench_plain_lines(c: &mut Criterion) {
    c.bench_function("push_plain_line", |b| {
        let mut pipeline = Pipeline::standard().unwrap();
        b.iter(|| {
            let out = pipeline.push(black_box("x = some_function(a, b) + 1"));
            black_box(out)
        });
    });
}

fn bench_escape_rewrite(c: &mut Criterion) {
    c.bench_function("push_escape_line", |b| {
        let mut pipeline = Pipeline::standard().unwrap();
        b.iter(|| {
            let out = pipeline.push(black_box("!!git log --oneline -n 20"));
            black_box(out)
        });
    });
}

fn bench_mixed_session(c: &mut Criterion) {
    c.bench_function("push_mixed_session", |b| {
        b.iter(|| {
            let mut pipeline = Pipeline::standard().unwrap();
            for line in MIXED_SESSION {
                black_box(pipeline.push(black_box(line)));
            }
            pipeline.reset();
        });
    });
}

criterion_group!(
    benches,
    bench_plain_lines,
    bench_escape_rewrite,
    bench_mixed_session
);
criterion_main!(benches);
