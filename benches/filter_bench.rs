// Filter build and probe benchmarks for AiDb Bloom

use aidb_bloom::{BloomFilterPolicy, FilterPolicy};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

fn make_keys(count: usize) -> Vec<Vec<u8>> {
    (0..count).map(|i| format!("key{:08}", i).into_bytes()).collect()
}

fn benchmark_create_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_filter");
    let policy = BloomFilterPolicy::new(10);

    for size in [100, 1000, 10000].iter() {
        let keys = make_keys(*size);
        let key_refs: Vec<&[u8]> = keys.iter().map(|k| k.as_slice()).collect();

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &key_refs, |b, key_refs| {
            let mut dst = Vec::with_capacity(policy.filter_size(key_refs.len()));
            b.iter(|| {
                dst.clear();
                policy.create_filter(key_refs, &mut dst);
                black_box(&dst);
            });
        });
    }

    group.finish();
}

fn benchmark_key_may_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("key_may_match");

    for bits_per_key in [5, 10, 20].iter() {
        let policy = BloomFilterPolicy::new(*bits_per_key);
        let keys = make_keys(10000);
        let key_refs: Vec<&[u8]> = keys.iter().map(|k| k.as_slice()).collect();
        let mut filter = Vec::new();
        policy.create_filter(&key_refs, &mut filter);

        group.throughput(Throughput::Elements(1000));
        group.bench_with_input(
            BenchmarkId::new("present", bits_per_key),
            &filter,
            |b, filter| {
                b.iter(|| {
                    for key in keys.iter().take(1000) {
                        black_box(policy.key_may_match(key, filter));
                    }
                });
            },
        );

        let missing = (0..1000).map(|i| format!("missing{:08}", i).into_bytes()).collect::<Vec<_>>();
        group.bench_with_input(
            BenchmarkId::new("absent", bits_per_key),
            &filter,
            |b, filter| {
                b.iter(|| {
                    for key in &missing {
                        black_box(policy.key_may_match(key, filter));
                    }
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_create_filter, benchmark_key_may_match);
criterion_main!(benches);
