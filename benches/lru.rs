use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use policy_cache::policy::lru::LruCache;
use policy_cache::traits::{CoreCache, LruCacheTrait};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const CAPACITY: usize = 1024;

fn filled(capacity: usize) -> LruCache<u64, u64> {
    let mut cache = LruCache::new(capacity);
    for i in 0..capacity as u64 {
        cache.put(i, i);
    }
    cache
}

/// 80% of requests go to 20% of a keyspace twice the cache size.
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

fn bench_lru_put_get(c: &mut Criterion) {
    c.bench_function("lru_put_get", |b| {
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

fn bench_lru_pop_lru(c: &mut Criterion) {
    c.bench_function("lru_pop_lru", |b| {
        b.iter_batched(
            || filled(CAPACITY),
            |mut cache| {
                for _ in 0..CAPACITY {
                    let _ = std::hint::black_box(cache.pop_lru());
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lru_eviction_churn(c: &mut Criterion) {
    c.bench_function("lru_eviction_churn", |b| {
        b.iter_batched(
            || filled(CAPACITY),
            |mut cache| {
                for i in 0..4096u64 {
                    cache.put(std::hint::black_box(10_000 + i), i);
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lru_hotset(c: &mut Criterion) {
    let keys = hotset_keys(8192, 42);
    c.bench_function("lru_hotset_get_or_put", |b| {
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
    bench_lru_put_get,
    bench_lru_pop_lru,
    bench_lru_eviction_churn,
    bench_lru_hotset
);
criterion_main!(benches);
