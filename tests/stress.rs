//! Random sets and removes over a small key space, checked against `std`'s map after every step.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap as Reference;
use trickle::{HashMap, NotFound};

const KEY_SPACE: u32 = 50;

fn run(seed: u64, rounds: usize, capacity: usize, load_factor: f64) {
    let mut map = HashMap::with_capacity_and_load_factor(capacity, load_factor);
    let mut reference = Reference::new();
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut migrations = 0;

    for _ in 0..rounds {
        let key = rng.gen_range(0..KEY_SPACE).to_string();
        let value = rng.gen::<u32>().to_string();

        match reference.get(&key) {
            Some(expected) => {
                assert!(map.contains_key(&key));
                assert_eq!(map.get(&key), Ok(expected));
            }
            None => {
                assert!(!map.contains_key(&key));
                assert_eq!(map.get(&key), Err(NotFound));
                assert_eq!(map.remove(&key), Err(NotFound));
            }
        }

        let was = map.is_migrating();
        if rng.gen_bool(0.5) {
            map.insert(key.clone(), value.clone());
            reference.insert(key.clone(), value.clone());

            assert!(map.contains_key(&key));
            assert_eq!(map.get(&key), Ok(&value));
        } else if let Some(expected) = reference.remove(&key) {
            assert_eq!(map.remove(&key), Ok(expected));
            assert!(!map.contains_key(&key));
            assert_eq!(map.get(&key), Err(NotFound));
            assert_eq!(map.remove(&key), Err(NotFound));
        }
        if !was && map.is_migrating() {
            migrations += 1;
        }

        assert_eq!(map.len(), reference.len());
    }

    assert!(migrations > 0, "seed {} never resized", seed);
    for (key, value) in &reference {
        assert_eq!(map.peek(key), Some(value));
    }
}

#[test]
fn driver() {
    run(10, 1000, 10, 0.75);
}

#[test]
fn many_seeds() {
    for seed in 0..32 {
        run(seed, 2000, 1, 0.75);
    }
}

#[test]
fn full_load_factor() {
    for seed in 0..8 {
        run(seed, 2000, 3, 1.0);
    }
}
