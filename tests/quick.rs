#![cfg(not(miri))]

#[macro_use]
extern crate quickcheck;

use trickle::HashMap as TrickleMap;
use trickle::NotFound;

use quickcheck::Arbitrary;
use quickcheck::Gen;

use fnv::FnvHasher;
use std::hash::{BuildHasher, BuildHasherDefault};
type FnvBuilder = BuildHasherDefault<FnvHasher>;
type TrickleMapFnv<K, V> = TrickleMap<K, V, FnvBuilder>;

use std::cmp::min;
use std::collections::HashMap;
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;
use std::iter::FromIterator;
use std::ops::Deref;

fn set<'a, T: 'a, I>(iter: I) -> HashSet<T>
where
    I: IntoIterator<Item = &'a T>,
    T: Copy + Hash + Eq,
{
    iter.into_iter().cloned().collect()
}

quickcheck! {
    fn contains(insert: Vec<u32>) -> bool {
        let mut map = TrickleMap::new();
        for &key in &insert {
            map.insert(key, ());
        }
        insert.iter().all(|&key| map.contains_key(&key) && map.get(&key).is_ok())
    }

    fn contains_not(insert: Vec<u8>, not: Vec<u8>) -> bool {
        let mut map = TrickleMap::new();
        for &key in &insert {
            map.insert(key, ());
        }
        let nots = &set(&not) - &set(&insert);
        nots.iter().all(|&key| !map.contains_key(&key) && map.get(&key) == Err(NotFound))
    }

    fn insert_remove(insert: Vec<u8>, remove: Vec<u8>) -> bool {
        let mut map = TrickleMap::with_capacity(1);
        for &key in &insert {
            map.insert(key, ());
        }
        for &key in &remove {
            let _ = map.remove(&key);
        }
        let elements = &set(&insert) - &set(&remove);
        map.len() == elements.len() && map.iter().count() == elements.len() &&
            elements.iter().all(|k| map.get(k).is_ok())
    }

    fn with_cap(cap: u16) -> bool {
        let map: TrickleMap<u8, u8> = TrickleMap::with_capacity(cap as usize);
        map.buckets() == usize::max(cap as usize, 1)
    }

    fn drains_within_old_element_count(insert: Vec<u16>) -> bool {
        let mut map = TrickleMap::with_capacity(4);
        for &key in &insert {
            let was = map.is_migrating();
            map.insert(key, key);
            if !was && map.is_migrating() {
                assert!(map.buckets() >= 2 * map.len());

                // Every step moves at least one element out of the old table.
                let mut probe = map.clone();
                let mut steps = 0;
                while probe.is_migrating() {
                    assert_eq!(probe.get(&key), Ok(&key));
                    steps += 1;
                }
                assert!(steps >= 1 && steps <= map.len());
                assert_eq!(probe.len(), map.len());
            }
        }
        true
    }
}

use Op::*;
#[derive(Copy, Clone, Debug)]
enum Op<K, V> {
    Add(K, V),
    Remove(K),
    Lookup(K),
    Overwrite(K, V),
    ReplaceWithClone,
    Clear,
}

impl<K, V> Arbitrary for Op<K, V>
where
    K: Arbitrary,
    V: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        // Clearing is rare, otherwise the map would hardly ever get big enough to resize.
        match u32::arbitrary(g) % 64 {
            0..=23 => Add(K::arbitrary(g), V::arbitrary(g)),
            24..=39 => Remove(K::arbitrary(g)),
            40..=51 => Lookup(K::arbitrary(g)),
            52..=59 => Overwrite(K::arbitrary(g), V::arbitrary(g)),
            60..=62 => ReplaceWithClone,
            _ => Clear,
        }
    }
}

fn do_ops<K, V, S>(ops: &[Op<K, V>], a: &mut TrickleMap<K, V, S>, b: &mut HashMap<K, V>)
where
    K: Hash + Eq + Clone + Debug,
    V: Clone + Eq + Debug,
    S: BuildHasher + Clone,
{
    for op in ops {
        match *op {
            Add(ref k, ref v) => {
                assert_eq!(a.insert(k.clone(), v.clone()), b.insert(k.clone(), v.clone()));
            }
            Remove(ref k) => {
                assert_eq!(a.remove(k).ok(), b.remove(k));
            }
            Lookup(ref k) => {
                assert_eq!(a.contains_key(k), b.contains_key(k));
                assert_eq!(a.peek(k), b.get(k));
                assert_eq!(a.get(k).ok(), b.get(k));
            }
            Overwrite(ref k, ref v) => {
                if let Some(old) = b.get_mut(k) {
                    let new = a.get_mut(k).expect("key missing from map");
                    assert_eq!(new, old);
                    *new = v.clone();
                    *old = v.clone();
                } else {
                    assert_eq!(a.get_mut(k), Err(NotFound));
                }
            }
            ReplaceWithClone => {
                *a = a.clone();
                *b = b.clone();
            }
            Clear => {
                a.clear();
                b.clear();
            }
        }
        assert_eq!(a.len(), b.len());
    }
}

fn assert_maps_equivalent<K, V, S>(a: &TrickleMap<K, V, S>, b: &HashMap<K, V>) -> bool
where
    K: Hash + Eq + Debug,
    V: Eq + Debug,
    S: BuildHasher,
{
    assert_eq!(a.len(), b.len());
    assert_eq!(a.iter().next().is_some(), b.iter().next().is_some());
    for key in a.keys() {
        assert!(b.contains_key(key), "b does not contain {:?}", key);
    }
    for key in b.keys() {
        assert!(a.contains_key(key), "a does not contain {:?}", key);
    }
    for (key, value) in a.iter() {
        assert_eq!(value, &b[key]);
    }
    true
}

quickcheck! {
    fn operations_i8(ops: Large<Vec<Op<i8, i8>>>) -> bool {
        let mut map = TrickleMap::with_capacity(1);
        let mut reference = HashMap::new();
        do_ops(&ops, &mut map, &mut reference);
        assert_maps_equivalent(&map, &reference)
    }

    fn operations_string(ops: Vec<Op<Alpha, i8>>) -> bool {
        let mut map = TrickleMap::with_capacity(2);
        let mut reference = HashMap::new();
        do_ops(&ops, &mut map, &mut reference);
        assert_maps_equivalent(&map, &reference)
    }

    fn operations_fnv(ops: Large<Vec<Op<u16, u8>>>) -> bool {
        let mut map = TrickleMapFnv::with_capacity_load_factor_and_hasher(3, 0.5, FnvBuilder::default());
        let mut reference = HashMap::new();
        do_ops(&ops, &mut map, &mut reference);
        assert_maps_equivalent(&map, &reference)
    }

    fn keys_values(ops: Large<Vec<Op<i8, i8>>>) -> bool {
        let mut map = TrickleMap::new();
        let mut reference = HashMap::new();
        do_ops(&ops, &mut map, &mut reference);
        let mut visit = TrickleMap::new();
        for (k, v) in map.keys().zip(map.values()) {
            assert_eq!(map.peek(k), Some(v));
            assert!(!visit.contains_key(k));
            visit.insert(*k, *v);
        }
        assert_eq!(visit.len(), reference.len());
        true
    }

    fn keys_values_mut(ops: Large<Vec<Op<i8, i8>>>) -> bool {
        let mut map = TrickleMap::new();
        let mut reference = HashMap::new();
        do_ops(&ops, &mut map, &mut reference);
        let mut visit = TrickleMap::new();
        let keys = Vec::from_iter(map.keys().cloned());
        for (k, v) in keys.iter().zip(map.values_mut()) {
            assert_eq!(&reference[k], v);
            assert!(!visit.contains_key(k));
            visit.insert(*k, *v);
        }
        assert_eq!(visit.len(), reference.len());
        true
    }

    fn equality(ops1: Vec<Op<i8, i8>>, removes: Vec<usize>) -> bool {
        let mut map = TrickleMap::new();
        let mut reference = HashMap::new();
        do_ops(&ops1, &mut map, &mut reference);
        let mut ops2 = ops1.clone();
        for &r in &removes {
            if !ops2.is_empty() {
                let i = r % ops2.len();
                ops2.remove(i);
            }
        }
        let mut map2 = TrickleMapFnv::default();
        let mut reference2 = HashMap::new();
        do_ops(&ops2, &mut map2, &mut reference2);
        let should = reference == reference2;
        assert_eq!(map.len() == map2.len() && map.iter().all(|(k, v)| {
            map2.peek(k).map_or(false, |v2| v2 == v)
        }), should);
        true
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq)]
struct Alpha(String);

impl Deref for Alpha {
    type Target = String;
    fn deref(&self) -> &String {
        &self.0
    }
}

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

impl Arbitrary for Alpha {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % usize::max(g.size(), 1);
        let len = min(len, 16);
        Alpha(
            (0..len)
                .map(|_| *g.choose(ALPHABET).unwrap() as char)
                .collect(),
        )
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new((**self).shrink().map(Alpha))
    }
}

/// quickcheck Arbitrary adaptor -- make a larger vec
#[derive(Clone, Debug)]
struct Large<T>(T);

impl<T> Deref for Large<T> {
    type Target = T;
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> Arbitrary for Large<Vec<T>>
where
    T: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % (g.size() * 10);
        Large((0..len).map(|_| T::arbitrary(g)).collect())
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new((**self).shrink().map(Large))
    }
}
