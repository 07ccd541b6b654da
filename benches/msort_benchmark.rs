use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use fmsort::msort::{SortRun, merge_sort};

/// Deterministic scrambled data (xorshift32) so runs are comparable.
fn scrambled(len: usize) -> Vec<u32> {
    let mut state = 0x9E37_79B9u32;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state
        })
        .collect()
}

fn bench_merge_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_sort");
    for size in [1_000usize, 100_000, 1_000_000] {
        let data = scrambled(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| {
                let mut v = data.clone();
                merge_sort(black_box(&mut v));
                v
            })
        });
    }
    group.finish();
}

fn bench_worker_counts(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_run");
    group.sample_size(20);
    let data = scrambled(1_000_000);
    for workers in [1usize, 2, 4, 8] {
        group.bench_with_input(
            BenchmarkId::new("workers", workers),
            &workers,
            |b, &workers| {
                let sort = SortRun::new(workers).unwrap();
                b.iter(|| {
                    let mut v = data.clone();
                    sort.execute(black_box(&mut v)).unwrap();
                    v
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_merge_sort, bench_worker_counts);
criterion_main!(benches);
