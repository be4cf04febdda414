use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use rust_decimal::Decimal;
use winnerlens_products::{
    aggregate_by_category, compute_margin, compute_total_score, CategoryEntry, ProductStatus, Score,
};

fn score(v: i64) -> Option<Score> {
    Score::new(Decimal::from(v)).ok()
}

fn sample_entries(count: usize, categories: usize) -> Vec<CategoryEntry> {
    (0..count)
        .map(|i| CategoryEntry {
            category: format!("category-{}", i % categories),
            status: ProductStatus::ALL[i % ProductStatus::ALL.len()],
            total_score: if i % 3 == 0 { None } else { Some((i % 101) as u8) },
        })
        .collect()
}

fn bench_margin(c: &mut Criterion) {
    let mut group = c.benchmark_group("margin");
    group.sample_size(1000);

    let price = Decimal::new(1_999_900, 2);
    let cost = Decimal::new(1_234_500, 2);

    group.bench_function("derived", |b| {
        b.iter(|| compute_margin(black_box(price), black_box(Some(cost)), None))
    });

    group.bench_function("explicit_override", |b| {
        b.iter(|| compute_margin(black_box(price), black_box(Some(cost)), Some(Decimal::TEN)))
    });

    group.finish();
}

fn bench_total_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("total_score");
    group.sample_size(1000);

    group.bench_function("all_scored", |b| {
        b.iter(|| {
            compute_total_score(
                black_box(score(80)),
                black_box(score(60)),
                black_box(score(70)),
                black_box(score(50)),
            )
        })
    });

    group.bench_function("partially_scored", |b| {
        b.iter(|| compute_total_score(black_box(score(80)), None, black_box(score(70)), None))
    });

    group.finish();
}

fn bench_category_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("category_aggregation");

    for size in [100usize, 1_000, 10_000] {
        let entries = sample_entries(size, 12);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &entries, |b, entries| {
            b.iter(|| aggregate_by_category(black_box(entries)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_margin,
    bench_total_score,
    bench_category_aggregation
);
criterion_main!(benches);
