//! Run queue benchmarks.
//!
//! Run with: cargo bench
//!
//! Storage is pre-allocated once per benchmark and reused via clear().

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use nexus_skiplist::{BoxedSkipStorage, Handle, SkipList};
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

type Storage = BoxedSkipStorage<u64>;
type Queue = SkipList<u64, Storage>;

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

fn filled(n: usize, rng: &mut SmallRng) -> (Storage, Queue, Vec<Handle>) {
    let mut storage = Storage::with_capacity(n);
    let mut queue = Queue::new();
    let handles = (0..n)
        .map(|_| {
            let key = rng.next_u64() % 1_000_000;
            queue.try_insert_with_rng(&mut storage, key, key, rng).unwrap()
        })
        .collect();
    (storage, queue, handles)
}

// ============================================================================
// Insert
// ============================================================================

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for n in SIZES {
        group.throughput(Throughput::Elements(n as u64));
        let mut rng = SmallRng::seed_from_u64(1);
        let keys: Vec<(u64, u64)> = (0..n)
            .map(|_| (rng.next_u64() % 1_000_000, rng.next_u64()))
            .collect();
        let mut storage = Storage::with_capacity(n);
        let mut queue = Queue::new();

        group.bench_with_input(BenchmarkId::from_parameter(n), &keys, |b, keys| {
            b.iter(|| {
                for &(key, entropy) in keys {
                    black_box(queue.try_insert(&mut storage, key, key, entropy).unwrap());
                }
                queue.clear(&mut storage);
            });
        });
    }

    group.finish();
}

// ============================================================================
// Remove by handle
// ============================================================================

fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_handle");

    for n in SIZES {
        let mut rng = SmallRng::seed_from_u64(2);
        let (mut storage, mut queue, mut handles) = filled(n, &mut rng);
        let mut cursor = 0;

        // Remove one, put one back, so the size stays at n
        group.bench_function(BenchmarkId::from_parameter(n), |b| {
            b.iter(|| {
                let i = cursor % handles.len();
                let h = handles[i];
                let (key, _) = queue.get(&storage, h).unwrap();
                let v = queue.remove(&mut storage, black_box(h)).unwrap();
                handles[i] = queue
                    .try_insert(&mut storage, key, black_box(v), rng.next_u64())
                    .unwrap();
                cursor += 1;
            });
        });
    }

    group.finish();
}

// ============================================================================
// Pop first
// ============================================================================

fn bench_pop_first(c: &mut Criterion) {
    let mut group = c.benchmark_group("pop_first");

    for n in SIZES {
        let mut rng = SmallRng::seed_from_u64(3);
        let (mut storage, mut queue, _) = filled(n, &mut rng);

        // Dispatcher loop: take the earliest, reschedule it later
        group.bench_function(BenchmarkId::from_parameter(n), |b| {
            b.iter(|| {
                let (key, v) = queue.pop_first(&mut storage).unwrap();
                let next = key + 1 + rng.next_u64() % 1_000_000;
                black_box(
                    queue
                        .try_insert(&mut storage, next, v, rng.next_u64())
                        .unwrap(),
                );
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_insert, bench_remove, bench_pop_first);
criterion_main!(benches);
