//! Example demonstrating policy selection through CacheBuilder.
//!
//! Run with: cargo run --example basic_builder

use policy_cache::builder::{CacheBuilder, CachePolicy};
use policy_cache::traits::CoreCache;

fn main() {
    println!("=== CacheBuilder Examples ===\n");

    // Example 1: LRU Cache
    println!("1. LRU Cache");
    let mut lru = CacheBuilder::new(3)
        .try_build::<u64, String>(CachePolicy::Lru)
        .expect("capacity is positive");

    lru.put(1, "one".to_string());
    lru.put(2, "two".to_string());
    lru.put(3, "three".to_string());

    // Access key 1 to make it MRU
    lru.get(&1);

    // Insert key 4, evicts LRU (key 2)
    lru.put(4, "four".to_string());

    println!("   contains 1? {} (was accessed)", lru.contains(&1));
    println!("   contains 2? {} (evicted as LRU)", lru.contains(&2));
    println!("   contains 4? {} (just inserted)", lru.contains(&4));
    println!();

    // Example 2: LFU Cache
    println!("2. LFU Cache");
    let mut lfu = CacheBuilder::new(3)
        .try_build::<u64, String>(CachePolicy::Lfu)
        .expect("capacity is positive");

    lfu.put(1, "one".to_string());
    lfu.put(2, "two".to_string());
    lfu.put(3, "three".to_string());

    lfu.get(&1);
    lfu.get(&1);
    lfu.get(&3);

    // Key 2 has the lowest frequency
    lfu.put(4, "four".to_string());

    println!("   contains 1? {} (highest frequency)", lfu.contains(&1));
    println!("   contains 2? {} (evicted as LFU)", lfu.contains(&2));
    println!("   len: {}", lfu.len());
    println!();

    // Example 3: Policy from a string
    println!("3. Parsed policy");
    let policy: CachePolicy = "lfu".parse().expect("known policy");
    println!("   parsed: {}", policy);
    match "arc".parse::<CachePolicy>() {
        Ok(p) => println!("   parsed: {}", p),
        Err(e) => println!("   error: {}", e),
    }
    println!();

    // Example 4: Invalid capacity
    println!("4. Invalid capacity");
    match CacheBuilder::new(0).try_build::<u64, String>(CachePolicy::Lru) {
        Ok(_) => println!("   built"),
        Err(e) => println!("   error: {}", e),
    }
    println!();

    // Example 5: Common operations
    println!("5. Common Operations");
    let mut cache = CacheBuilder::new(10)
        .try_build::<u64, String>(CachePolicy::Lru)
        .expect("capacity is positive");

    cache.put(1, "original".to_string());
    cache.put(1, "updated".to_string());

    if let Some(value) = cache.get(&1) {
        println!("   get(&1): {}", value);
    }

    // Contains (doesn't update access order)
    println!("   contains(&1): {}", cache.contains(&1));
    println!("   contains(&99): {}", cache.contains(&99));
    println!(
        "   len: {}, capacity: {}, is_empty: {}",
        cache.len(),
        cache.capacity(),
        cache.is_empty()
    );
    println!("   {}", cache.display());

    cache.clear();
    println!("   after clear - is_empty: {}", cache.is_empty());
}

// Expected output:
// === CacheBuilder Examples ===
//
// 1. LRU Cache
//    contains 1? true (was accessed)
//    contains 2? false (evicted as LRU)
//    contains 4? true (just inserted)
//
// 2. LFU Cache
//    contains 1? true (highest frequency)
//    contains 2? false (evicted as LFU)
//    len: 3
//
// 3. Parsed policy
//    parsed: LFU
//    error: unknown cache policy `arc` (expected LRU or LFU)
//
// 4. Invalid capacity
//    error: capacity must be > 0 (got 0)
//
// 5. Common Operations
//    get(&1): updated
//    contains(&1): true
//    contains(&99): false
//    len: 1, capacity: 10, is_empty: false
//    LRU Cache: [1:updated]
//    after clear - is_empty: true
