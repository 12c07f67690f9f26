use policy_cache::policy::lru::LruCache;
use policy_cache::traits::{CoreCache, LruCacheTrait};

fn main() {
    let mut cache: LruCache<u32, String> = LruCache::new(2);

    cache.put(1, "alpha".to_string());
    cache.put(2, "beta".to_string());

    if let Some(value) = cache.get(&1) {
        println!("hit 1: {}", value);
    }

    cache.put(3, "gamma".to_string());

    println!("contains 2? {}", cache.contains(&2));
    println!("next victim: {:?}", cache.peek_lru().map(|(k, _)| *k));
    println!("{}", cache.display());
}

// Expected output:
// hit 1: alpha
// contains 2? false
// next victim: Some(1)
// LRU Cache: [1:alpha] [3:gamma]
//
// Explanation: capacity=2; after get(&1), key 1 is MRU and key 2 is LRU.
// Inserting key 3 evicts key 2, leaving key 1 as the oldest entry.
