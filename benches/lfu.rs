use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use policy_cache::policy::lfu::LfuCache;
use policy_cache::traits::{CoreCache, LfuCacheTrait};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const CAPACITY: usize = 1024;

fn filled(capacity: usize) -> LfuCache<u64, u64> {
    let mut cache = LfuCache::new(capacity);
    for i in 0..capacity as u64 {
        cache.put(i, i);
    }
    cache
}

fn hotset_keys(n: usize, seed: u64) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let universe = (CAPACITY * 2) as u64;
    let hot = universe / 5;
    (0..n)
        .map(|_| {
            if rng.gen_bool(0.8) {
                rng.gen_range(0..hot)
            } else {
                rng.gen_range(hot..universe)
            }
        })
        .collect()
}

fn bench_lfu_put_get(c: &mut Criterion) {
    c.bench_function("lfu_put_get", |b| {
        b.iter_batched(
            || filled(CAPACITY),
            |mut cache| {
                for i in 0..CAPACITY as u64 {
                    cache.put(std::hint::black_box(i + 10_000), i);
                    let _ = std::hint::black_box(cache.get(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lfu_repeated_hits(c: &mut Criterion) {
    // Walks a single key up a long chain of frequency tiers.
    c.bench_function("lfu_repeated_hits", |b| {
        b.iter_batched(
            || filled(CAPACITY),
            |mut cache| {
                for _ in 0..4096 {
                    let _ = std::hint::black_box(cache.get(&std::hint::black_box(7)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lfu_pop_lfu(c: &mut Criterion) {
    c.bench_function("lfu_pop_lfu", |b| {
        b.iter_batched(
            || {
                let mut cache = filled(CAPACITY);
                for i in (0..CAPACITY as u64).step_by(3) {
                    cache.get(&i);
                }
                cache
            },
            |mut cache| {
                for _ in 0..CAPACITY {
                    let _ = std::hint::black_box(cache.pop_lfu());
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lfu_hotset(c: &mut Criterion) {
    let keys = hotset_keys(8192, 42);
    c.bench_function("lfu_hotset_get_or_put", |b| {
        b.iter_batched(
            || filled(CAPACITY),
            |mut cache| {
                for &k in &keys {
                    if cache.get(&std::hint::black_box(k)).is_none() {
                        cache.put(k, k);
                    }
                }
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_lfu_put_get,
    bench_lfu_repeated_hits,
    bench_lfu_pop_lfu,
    bench_lfu_hotset
);
criterion_main!(benches);
