use policy_cache::policy::lfu::LfuCache;
use policy_cache::traits::{CoreCache, LfuCacheTrait};

fn main() {
    let mut cache: LfuCache<u32, &str> = LfuCache::new(2);

    cache.put(1, "alpha");
    cache.put(2, "beta");

    cache.get(&1);
    cache.get(&1);

    cache.put(3, "gamma");

    println!("contains 2? {}", cache.contains(&2));
    println!("freq(1) = {:?}", cache.frequency(&1));
    println!("min freq = {:?}", cache.min_frequency());
    println!("{}", cache.display());
}

// Expected output:
// contains 2? false
// freq(1) = Some(3)
// min freq = Some(1)
// LFU Cache:
// Freq 1: [3:gamma]
// Freq 3: [1:alpha]
//
// Explanation: key 1 was read twice (freq 3) while key 2 stayed at freq 1,
// so inserting key 3 evicts key 2. Key 3 enters at freq 1.
