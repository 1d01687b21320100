use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use rbtree_collections::{RBTreeMap, RBTreeMultiSet, RBTreeSet};
use std::collections::{BTreeMap, BTreeSet};

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn reverse_ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).rev().collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

fn key_patterns() -> [(&'static str, Vec<i64>); 3] {
    [
        ("ordered", ordered_keys(N)),
        ("reverse", reverse_ordered_keys(N)),
        ("random", random_keys(N)),
    ]
}

// ─── Map Benchmarks ─────────────────────────────────────────────────────────

fn bench_map_insert(c: &mut Criterion) {
    for (pattern, keys) in key_patterns() {
        let mut group = c.benchmark_group(format!("map_insert_{pattern}"));

        group.bench_function(BenchmarkId::new("RBTreeMap", N), |b| {
            b.iter(|| {
                let mut map = RBTreeMap::new();
                for &k in &keys {
                    map.insert(k, k);
                }
                map
            });
        });

        group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
            b.iter(|| {
                let mut map = BTreeMap::new();
                for &k in &keys {
                    map.insert(k, k);
                }
                map
            });
        });

        group.finish();
    }
}

fn bench_map_get(c: &mut Criterion) {
    for (pattern, keys) in key_patterns() {
        let rb_map: RBTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
        let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

        let mut group = c.benchmark_group(format!("map_get_{pattern}"));

        group.bench_function(BenchmarkId::new("RBTreeMap", N), |b| {
            b.iter(|| keys.iter().filter_map(|k| rb_map.get(k)).sum::<i64>());
        });

        group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
            b.iter(|| keys.iter().filter_map(|k| bt_map.get(k)).sum::<i64>());
        });

        group.finish();
    }
}

fn bench_map_remove(c: &mut Criterion) {
    for (pattern, keys) in key_patterns() {
        let mut group = c.benchmark_group(format!("map_remove_{pattern}"));

        group.bench_function(BenchmarkId::new("RBTreeMap", N), |b| {
            b.iter_batched(
                || keys.iter().map(|&k| (k, k)).collect::<RBTreeMap<i64, i64>>(),
                |mut map| {
                    for k in &keys {
                        map.remove(k);
                    }
                    map
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
            b.iter_batched(
                || keys.iter().map(|&k| (k, k)).collect::<BTreeMap<i64, i64>>(),
                |mut map| {
                    for k in &keys {
                        map.remove(k);
                    }
                    map
                },
                BatchSize::SmallInput,
            );
        });

        group.finish();
    }
}

fn bench_map_lower_bound(c: &mut Criterion) {
    let keys = random_keys(N);
    let rb_map: RBTreeMap<i64, i64> = keys.iter().map(|&k| (k * 2, k)).collect();
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k * 2, k)).collect();

    let mut group = c.benchmark_group("map_lower_bound_random");

    group.bench_function(BenchmarkId::new("RBTreeMap", N), |b| {
        b.iter(|| keys.iter().filter_map(|&k| rb_map.lower_bound(&(k * 2 + 1)).value()).count());
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| keys.iter().filter_map(|&k| bt_map.range(k * 2 + 1..).next()).count());
    });

    group.finish();
}

// ─── Set Benchmarks ─────────────────────────────────────────────────────────

fn bench_set_insert(c: &mut Criterion) {
    for (pattern, keys) in key_patterns() {
        let mut group = c.benchmark_group(format!("set_insert_{pattern}"));

        group.bench_function(BenchmarkId::new("RBTreeSet", N), |b| {
            b.iter(|| keys.iter().copied().collect::<RBTreeSet<i64>>());
        });

        group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
            b.iter(|| keys.iter().copied().collect::<BTreeSet<i64>>());
        });

        group.finish();
    }
}

fn bench_set_contains(c: &mut Criterion) {
    for (pattern, keys) in key_patterns() {
        let rb_set: RBTreeSet<i64> = keys.iter().copied().collect();
        let bt_set: BTreeSet<i64> = keys.iter().copied().collect();

        let mut group = c.benchmark_group(format!("set_contains_{pattern}"));

        group.bench_function(BenchmarkId::new("RBTreeSet", N), |b| {
            b.iter(|| keys.iter().filter(|k| rb_set.contains(*k)).count());
        });

        group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
            b.iter(|| keys.iter().filter(|k| bt_set.contains(*k)).count());
        });

        group.finish();
    }
}

fn bench_set_iterate(c: &mut Criterion) {
    let keys = random_keys(N);
    let rb_set: RBTreeSet<i64> = keys.iter().copied().collect();
    let bt_set: BTreeSet<i64> = keys.iter().copied().collect();

    let mut group = c.benchmark_group("set_iterate");

    group.bench_function(BenchmarkId::new("RBTreeSet", N), |b| {
        b.iter(|| rb_set.iter().sum::<i64>());
    });

    group.bench_function(BenchmarkId::new("RBTreeSet_cursor_back", N), |b| {
        b.iter(|| {
            let mut total = 0;
            let mut cursor = rb_set.cursor_end();
            while cursor.move_prev() {
                total += cursor.key().copied().unwrap_or_default();
            }
            total
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| bt_set.iter().sum::<i64>());
    });

    group.finish();
}

// ─── Multiset Benchmarks ────────────────────────────────────────────────────

fn bench_multiset_insert_and_count(c: &mut Criterion) {
    // Fold the random keys into a small range so runs of duplicates form.
    let keys: Vec<i64> = random_keys(N).into_iter().map(|k| k % 512).collect();

    let mut group = c.benchmark_group("multiset_duplicates");

    group.bench_function(BenchmarkId::new("insert", N), |b| {
        b.iter(|| keys.iter().copied().collect::<RBTreeMultiSet<i64>>());
    });

    let bag: RBTreeMultiSet<i64> = keys.iter().copied().collect();
    group.bench_function(BenchmarkId::new("count", N), |b| {
        b.iter(|| keys.iter().map(|k| bag.count(k)).sum::<usize>());
    });

    group.bench_function(BenchmarkId::new("remove_all", N), |b| {
        b.iter_batched(
            || bag.clone(),
            |mut bag| {
                for k in 0..512 {
                    bag.remove_all(&k);
                }
                bag
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ─── Criterion Groups ───────────────────────────────────────────────────────

criterion_group!(map_benches, bench_map_insert, bench_map_get, bench_map_remove, bench_map_lower_bound,);

criterion_group!(set_benches, bench_set_insert, bench_set_contains, bench_set_iterate,);

criterion_group!(multiset_benches, bench_multiset_insert_and_count,);

criterion_main!(map_benches, set_benches, multiset_benches,);
