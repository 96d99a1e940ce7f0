use trickle::{HashMap, NotFound};

#[test]
fn ten_buckets_eight_keys() {
    let mut map = HashMap::with_capacity_and_load_factor(10, 0.75);
    for i in 0..7 {
        map.insert(i.to_string(), i);
        assert!(!map.is_migrating());
    }
    map.insert("7".to_string(), 7);
    assert!(map.is_migrating());
    assert_eq!(map.buckets(), 16);

    let mut calls = 0;
    while map.is_migrating() {
        match calls % 3 {
            0 => assert_eq!(map.get("3"), Ok(&3)),
            1 => assert!(map.insert("5".to_string(), 50).is_some()),
            _ => assert_eq!(map.remove("missing"), Err(NotFound)),
        }
        calls += 1;
    }
    assert!(calls <= 10, "took {} calls to drain", calls);

    assert_eq!(map.len(), 8);
    for i in 0..8 {
        let expected = if i == 5 { 50 } else { i };
        assert_eq!(map.get(&i.to_string()), Ok(&expected));
    }
}

#[test]
fn overwrite_keeps_len() {
    let mut map = HashMap::new();
    map.insert("k", 1);
    map.insert("k", 2);
    assert_eq!(map.get("k"), Ok(&2));
    assert_eq!(map.len(), 1);
}

#[test]
fn remove_then_miss() {
    let mut map = HashMap::with_capacity(2);
    for i in 0..20 {
        map.insert(i, i * i);
    }
    for i in 0..20 {
        assert_eq!(map.remove(&i), Ok(i * i));
        assert!(!map.contains_key(&i));
        assert_eq!(map.get(&i), Err(NotFound));
        assert_eq!(map.remove(&i), Err(NotFound));
    }
    assert!(map.is_empty());
}

#[test]
fn keys_inserted_during_migration_survive() {
    let mut map = HashMap::with_capacity_and_load_factor(8, 1.0);
    for i in 0..8 {
        map.insert(i, i);
    }
    assert!(map.is_migrating());

    // Keep inserting new keys while the old table drains.
    let mut i = 8;
    while map.is_migrating() {
        map.insert(i, i);
        i += 1;
    }
    for k in 0..i {
        assert!(map.contains_key(&k));
        assert_eq!(map.get(&k), Ok(&k));
    }
    assert_eq!(map.len(), i as usize);
}

#[test]
fn not_found_is_an_error() {
    fn lookup(map: &mut HashMap<u32, u32>) -> Result<u32, Box<dyn std::error::Error>> {
        Ok(*map.get(&1)?)
    }

    let mut map = HashMap::new();
    let err = lookup(&mut map).unwrap_err();
    assert_eq!(err.to_string(), "no entry found for key");
    map.insert(1, 10);
    assert_eq!(lookup(&mut map).unwrap(), 10);
}

#[test]
fn zero_sized_values() {
    let mut map = HashMap::with_capacity(1);
    for i in 0..100u8 {
        map.insert(i, ());
    }
    assert_eq!(map.len(), 100);
    assert_eq!(map.remove(&42), Ok(()));
    assert_eq!(map.iter().count(), 99);
}
