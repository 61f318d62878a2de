use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use sql_adapter::prelude::*;

const QUERIES: &[(&str, &str)] = &[
    ("plain", "SELECT id, name FROM users WHERE active = ? ORDER BY name LIMIT 20"),
    (
        "grouped",
        "SELECT team, COUNT(*) AS n FROM users GROUP BY team HAVING COUNT(*) > ? ORDER BY n DESC LIMIT 5",
    ),
    (
        "nested",
        "SELECT u.id, (SELECT MAX(created) FROM posts p WHERE p.user_id = u.id) AS last_post \
         FROM users u WHERE u.id IN (SELECT user_id FROM teams WHERE name = ?) ORDER BY u.id LIMIT 50",
    ),
];

fn rows(n: usize) -> Vec<Row> {
    (0..n)
        .map(|i| {
            Row::new()
                .with("id", i64::try_from(i).unwrap_or_default())
                .with("name", format!("user-{i}"))
                .with("score", i as f64 * 0.5)
                .with("active", i % 2 == 0)
        })
        .collect()
}

fn count_query_synthesis(c: &mut Criterion) {
    let mut group = c.benchmark_group("count_query");
    for &(name, sql) in QUERIES {
        group.bench_with_input(BenchmarkId::from_parameter(name), sql, |b, sql| {
            b.iter(|| count_query(black_box(sql)));
        });
    }
    group.finish();
}

fn multi_row_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_write_multi");
    for n in [10usize, 100, 1_000] {
        let spec = WriteSpec::new("users", rows(n)).on_duplicate_key_update(["name", "score"]);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &spec, |b, spec| {
            b.iter(|| build_write(black_box(spec)));
        });
    }
    group.finish();
}

criterion_group!(benches, count_query_synthesis, multi_row_write);
criterion_main!(benches);
