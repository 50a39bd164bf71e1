//! Batch pricing throughput benchmarks.
//!
//! Measures the full parse → validate → price → summarize path over JSON Lines input,
//! and the pure pricing fold on already-validated records.
//!
//! Run with: cargo bench

#![allow(missing_docs)] // criterion macros generate undocumented items

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use parcelcost::model::{DeliveryRecord, RawDelivery};
use parcelcost::pipeline::price_lines;
use parcelcost::pricing::{filter_valid, map_costs, sum_totals};
use parcelcost::source::SourceLine;

const ZONES: [&str; 5] = ["zona1", "zona2", "zona3", "zona4", "zona9"];

/// Deterministic mix of deliveries; every fifth record has an unknown zone.
fn generate_raw(count: usize) -> Vec<RawDelivery> {
    (0..count)
        .map(|i| {
            RawDelivery::new(
                ZONES[i % ZONES.len()],
                (i % 37) as f64 * 0.75,
                (i % 11) as f64 * 0.1,
                i % 3 == 0,
            )
        })
        .collect()
}

fn generate_lines(count: usize) -> Vec<SourceLine> {
    generate_raw(count)
        .iter()
        .enumerate()
        .map(|(i, raw)| {
            SourceLine::new(i + 1, serde_json::to_string(raw).expect("serializable record"))
        })
        .collect()
}

fn bench_price_lines(c: &mut Criterion) {
    let mut group = c.benchmark_group("price_lines");

    for count in [100, 10_000] {
        let lines = generate_lines(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &lines, |b, lines| {
            b.iter(|| price_lines(black_box(lines)))
        });
    }

    group.finish();
}

fn bench_map_and_sum(c: &mut Criterion) {
    let records: Vec<DeliveryRecord> = filter_valid(&generate_raw(10_000));

    c.bench_function("map_costs_and_sum_totals_10k", |b| {
        b.iter(|| sum_totals(&map_costs(black_box(&records))))
    });
}

criterion_group!(benches, bench_price_lines, bench_map_and_sum);
criterion_main!(benches);
