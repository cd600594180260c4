//! Thinning walk benchmarks

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use history::{RevisionKind, RevisionRecord};
use retention::{Pruner, RetentionPolicy};

/// One parent's history: a revision every seven hours for `n` steps
fn synthetic_group(n: usize) -> Vec<RevisionRecord> {
    let start = NaiveDate::from_ymd_opt(2015, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    (0..n)
        .map(|i| RevisionRecord {
            id: i as u64,
            parent_id: 1,
            kind: RevisionKind::Revision,
            timestamp: start + Duration::hours(7 * i as i64),
            fields: Vec::new(),
        })
        .collect()
}

fn bench_evaluate(c: &mut Criterion) {
    let revisions = synthetic_group(10_000);

    let pruner = Pruner::new(RetentionPolicy {
        daily: Some(1),
        weekly: Some(2),
        monthly: Some(4),
        ..Default::default()
    });
    c.bench_function("evaluate_group_10k_bucketed", |b| {
        b.iter(|| black_box(pruner.evaluate_group(1, black_box(&revisions))))
    });

    let fenced = Pruner::new(RetentionPolicy {
        keep_last: Some(100),
        daily: Some(1),
        ..Default::default()
    });
    c.bench_function("evaluate_group_10k_keep_last", |b| {
        b.iter(|| black_box(fenced.evaluate_group(1, black_box(&revisions))))
    });
}

criterion_group!(benches, bench_evaluate);
criterion_main!(benches);
