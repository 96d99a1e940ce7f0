//! A raw chained hash table that resizes incrementally.
//!
//! This is the engine behind [`HashMap`](crate::HashMap). It is exposed for users who want to
//! build their own map or set types on top of it.

use core::iter::FusedIterator;
use core::{mem, slice};

use alloc::vec;

mod bucket;

use self::bucket::{Chain, Table};

/// A chained hash table with incremental resizing.
///
/// When the table grows, the existing buckets are not rehashed all at once. Instead, the old
/// table is kept around as "leftovers" next to a new, larger table, and every call to
/// [`RawTable::carry`] moves the contents of one more old bucket across. Until the leftovers
/// are exhausted, an element lives in exactly one of the two tables, and
/// [`RawTable::belongs_to_leftovers`] tells you which.
///
/// The table is generic over the stored element and knows nothing about keys. Callers supply the
/// hash of the element they are looking for, an equality predicate, and, for operations that
/// may move elements, a function that recomputes an element's hash.
#[derive(Clone)]
pub struct RawTable<T> {
    table: Table<T>,
    leftovers: Option<OldTable<T>>,
    items: usize,
    load_factor: f64,
}

#[derive(Clone)]
struct OldTable<T> {
    table: Table<T>,

    // Every bucket below `cursor` has been emptied already.
    cursor: usize,

    // Number of elements still waiting to be moved.
    items: usize,
}

impl<T> OldTable<T> {
    /// Takes the next non-empty chain, skipping over the empty buckets in front of it.
    fn next_chain(&mut self) -> Option<Chain<T>> {
        while self.cursor < self.table.buckets() && self.table.is_bucket_empty(self.cursor) {
            self.cursor += 1;
        }
        if self.cursor == self.table.buckets() {
            return None;
        }
        let chain = self.table.take_bucket(self.cursor);
        self.cursor += 1;
        self.items -= chain.len();
        Some(chain)
    }
}

impl<T> RawTable<T> {
    /// Allocates a table with `buckets` buckets (at least one) that starts an incremental
    /// resize once `len() >= buckets() * load_factor`.
    ///
    /// # Panics
    ///
    /// Panics if `load_factor` is not in `(0, 1]`, which includes NaN.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn with_buckets(buckets: usize, load_factor: f64) -> Self {
        assert!(
            load_factor > 0.0 && load_factor <= 1.0,
            "load factor must be in (0, 1], got {}",
            load_factor
        );
        Self {
            table: Table::with_buckets(buckets),
            leftovers: None,
            items: 0,
            load_factor,
        }
    }

    /// Returns true if `hash` must be looked up in the old table.
    ///
    /// That is the case while a resize is in progress and the old bucket the hash maps to has
    /// not been moved yet.
    #[inline]
    pub fn belongs_to_leftovers(&self, hash: u64) -> bool {
        match self.leftovers {
            Some(ref lo) => lo.table.index(hash) >= lo.cursor,
            None => false,
        }
    }

    #[inline]
    fn route(&self, hash: u64) -> &Table<T> {
        match self.leftovers {
            Some(ref lo) if lo.table.index(hash) >= lo.cursor => &lo.table,
            _ => &self.table,
        }
    }

    /// Searches for an element in whichever table currently holds `hash`.
    ///
    /// This never moves any elements.
    #[inline]
    pub fn find(&self, hash: u64, eq: impl FnMut(&T) -> bool) -> Option<&T> {
        self.route(hash).find(hash, eq)
    }

    /// Like [`RawTable::find`], but hands out a mutable reference.
    #[inline]
    pub fn find_mut(&mut self, hash: u64, eq: impl FnMut(&T) -> bool) -> Option<&mut T> {
        match self.leftovers {
            Some(ref mut lo) if lo.table.index(hash) >= lo.cursor => lo.table.find_mut(hash, eq),
            _ => self.table.find_mut(hash, eq),
        }
    }

    /// Inserts a new element into the table that currently holds `hash`, and starts a resize if
    /// that pushed the table over its load factor.
    ///
    /// This does not check if the given element already exists in the table.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn insert(&mut self, hash: u64, value: T) {
        match self.leftovers {
            Some(ref mut lo) if lo.table.index(hash) >= lo.cursor => {
                lo.table.push(hash, value);
                lo.items += 1;
            }
            _ => self.table.push(hash, value),
        }
        self.items += 1;
        self.reserve_one();
    }

    /// Starts a resize if the table has reached its load factor and no resize is running.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn reserve_one(&mut self) {
        if self.leftovers.is_none()
            && self.items as f64 >= self.table.buckets() as f64 * self.load_factor
        {
            self.grow();
        }
    }

    /// Removes the element matching `eq` from whichever table currently holds `hash`.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn remove(&mut self, hash: u64, eq: impl FnMut(&T) -> bool) -> Option<T> {
        let value = match self.leftovers {
            Some(ref mut lo) if lo.table.index(hash) >= lo.cursor => {
                let value = lo.table.remove(hash, eq)?;
                lo.items -= 1;
                value
            }
            _ => self.table.remove(hash, eq)?,
        };
        self.items -= 1;
        if self.leftovers.as_ref().map_or(false, |lo| lo.items == 0) {
            // The resize is finally fully complete.
            self.leftovers = None;
        }
        Some(value)
    }

    /// Moves the contents of one old bucket into the current table.
    ///
    /// Does nothing if no resize is in progress. `hasher` must return the same hash that was
    /// used to insert each element.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn carry(&mut self, hasher: impl Fn(&T) -> u64) {
        let chain = match self.leftovers {
            Some(ref mut lo) => lo.next_chain(),
            None => return,
        };

        match chain {
            Some(chain) => {
                for value in chain {
                    self.table.push(hasher(&value), value);
                }
                if self.leftovers.as_ref().map_or(false, |lo| lo.items == 0) {
                    self.leftovers = None;
                }
            }
            None => {
                // Nothing left to move.
                self.leftovers = None;
            }
        }
    }

    #[cold]
    #[inline(never)]
    fn grow(&mut self) {
        debug_assert!(self.leftovers.is_none());

        let new_table = Table::with_buckets(2 * self.items);
        let old_table = mem::replace(&mut self.table, new_table);
        if self.items != 0 {
            self.leftovers = Some(OldTable {
                table: old_table,
                cursor: 0,
                items: self.items,
            });
        }
    }

    /// Removes all elements from the table and drops any leftovers.
    ///
    /// The current table keeps its number of buckets.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn clear(&mut self) {
        self.leftovers = None;
        self.table.clear();
        self.items = 0;
    }

    /// Returns the number of elements in the table, counting both the current table and any
    /// leftovers.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn len(&self) -> usize {
        self.items
    }

    /// Returns the number of buckets in the current table.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn buckets(&self) -> usize {
        self.table.buckets()
    }

    /// Returns the fraction of `buckets()` that may be filled before the table grows.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Returns true while an old table is still being drained.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn is_split(&self) -> bool {
        self.leftovers.is_some()
    }

    /// Returns the number of buckets of the old table, if a resize is in progress.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn leftover_buckets(&self) -> Option<usize> {
        self.leftovers.as_ref().map(|lo| lo.table.buckets())
    }

    /// Returns an iterator over every element in both tables.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn iter(&self) -> RawIter<'_, T> {
        RawIter {
            table: ChainsIter::new(self.table.chains()),
            leftovers: self
                .leftovers
                .as_ref()
                .map(|lo| ChainsIter::new(&lo.table.chains()[lo.cursor..])),
            items: self.items,
        }
    }

    /// Returns an iterator over mutable references to every element in both tables.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn iter_mut(&mut self) -> RawIterMut<'_, T> {
        RawIterMut {
            table: ChainsIterMut::new(self.table.chains_mut()),
            leftovers: self
                .leftovers
                .as_mut()
                .map(|lo| ChainsIterMut::new(&mut lo.table.chains_mut()[lo.cursor..])),
            items: self.items,
        }
    }

    #[cfg(any(test, feature = "rayon"))]
    pub(crate) fn main_chains(&self) -> &[Chain<T>] {
        self.table.chains()
    }

    #[cfg(any(test, feature = "rayon"))]
    pub(crate) fn leftover_chains(&self) -> Option<&[Chain<T>]> {
        self.leftovers
            .as_ref()
            .map(|lo| &lo.table.chains()[lo.cursor..])
    }

    #[cfg(feature = "rayon")]
    pub(crate) fn split_chains_mut(&mut self) -> (&mut [Chain<T>], Option<&mut [Chain<T>]>) {
        let leftovers = self.leftovers.as_mut().map(|lo| {
            let cursor = lo.cursor;
            &mut lo.table.chains_mut()[cursor..]
        });
        (self.table.chains_mut(), leftovers)
    }

    #[cfg(feature = "rayon")]
    pub(crate) fn into_split_chains(self) -> (alloc::vec::Vec<Chain<T>>, Option<alloc::vec::Vec<Chain<T>>>) {
        (
            self.table.into_chains(),
            self.leftovers.map(|lo| lo.table.into_chains()),
        )
    }
}

impl<T> IntoIterator for RawTable<T> {
    type Item = T;
    type IntoIter = RawIntoIter<T>;

    #[cfg_attr(feature = "inline-more", inline)]
    fn into_iter(self) -> RawIntoIter<T> {
        RawIntoIter {
            table: ChainsIntoIter::new(self.table.into_chains()),
            leftovers: self
                .leftovers
                .map(|lo| ChainsIntoIter::new(lo.table.into_chains())),
            items: self.items,
        }
    }
}

/// Iterator over shared references to every element in a [`RawTable`].
///
/// Elements in the current table are yielded first, followed by those still waiting in the old
/// table.
pub struct RawIter<'a, T> {
    table: ChainsIter<'a, T>,
    leftovers: Option<ChainsIter<'a, T>>,
    items: usize,
}

impl<T> Clone for RawIter<'_, T> {
    #[cfg_attr(feature = "inline-more", inline)]
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            leftovers: self.leftovers.clone(),
            items: self.items,
        }
    }
}

impl<'a, T> Iterator for RawIter<'a, T> {
    type Item = &'a T;

    #[cfg_attr(feature = "inline-more", inline)]
    fn next(&mut self) -> Option<Self::Item> {
        let leftovers = &mut self.leftovers;
        let next = self
            .table
            .next()
            .or_else(|| leftovers.as_mut()?.next())?;
        self.items -= 1;
        Some(next)
    }

    #[cfg_attr(feature = "inline-more", inline)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.items, Some(self.items))
    }
}

impl<T> ExactSizeIterator for RawIter<'_, T> {}
impl<T> FusedIterator for RawIter<'_, T> {}

/// Iterator over mutable references to every element in a [`RawTable`].
pub struct RawIterMut<'a, T> {
    table: ChainsIterMut<'a, T>,
    leftovers: Option<ChainsIterMut<'a, T>>,
    items: usize,
}

impl<'a, T> Iterator for RawIterMut<'a, T> {
    type Item = &'a mut T;

    #[cfg_attr(feature = "inline-more", inline)]
    fn next(&mut self) -> Option<Self::Item> {
        let leftovers = &mut self.leftovers;
        let next = self
            .table
            .next()
            .or_else(|| leftovers.as_mut()?.next())?;
        self.items -= 1;
        Some(next)
    }

    #[cfg_attr(feature = "inline-more", inline)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.items, Some(self.items))
    }
}

impl<T> ExactSizeIterator for RawIterMut<'_, T> {}
impl<T> FusedIterator for RawIterMut<'_, T> {}

/// Iterator which consumes a table and returns elements.
pub struct RawIntoIter<T> {
    table: ChainsIntoIter<T>,
    leftovers: Option<ChainsIntoIter<T>>,
    items: usize,
}

impl<T> Iterator for RawIntoIter<T> {
    type Item = T;

    #[cfg_attr(feature = "inline-more", inline)]
    fn next(&mut self) -> Option<T> {
        let leftovers = &mut self.leftovers;
        let next = self
            .table
            .next()
            .or_else(|| leftovers.as_mut()?.next())?;
        self.items -= 1;
        Some(next)
    }

    #[cfg_attr(feature = "inline-more", inline)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.items, Some(self.items))
    }
}

impl<T> ExactSizeIterator for RawIntoIter<T> {}
impl<T> FusedIterator for RawIntoIter<T> {}

// Not `Flatten`, which is invariant over `T` and would make the map iterators invariant too.

struct ChainsIter<'a, T> {
    chains: slice::Iter<'a, Chain<T>>,
    chain: slice::Iter<'a, T>,
}

impl<'a, T> ChainsIter<'a, T> {
    fn new(chains: &'a [Chain<T>]) -> Self {
        Self {
            chains: chains.iter(),
            chain: <&[T]>::default().iter(),
        }
    }
}

impl<T> Clone for ChainsIter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            chains: self.chains.clone(),
            chain: self.chain.clone(),
        }
    }
}

impl<'a, T> Iterator for ChainsIter<'a, T> {
    type Item = &'a T;

    #[cfg_attr(feature = "inline-more", inline)]
    fn next(&mut self) -> Option<&'a T> {
        loop {
            if let Some(item) = self.chain.next() {
                return Some(item);
            }
            self.chain = self.chains.next()?.iter();
        }
    }
}

struct ChainsIterMut<'a, T> {
    chains: slice::IterMut<'a, Chain<T>>,
    chain: Option<slice::IterMut<'a, T>>,
}

impl<'a, T> ChainsIterMut<'a, T> {
    fn new(chains: &'a mut [Chain<T>]) -> Self {
        Self {
            chains: chains.iter_mut(),
            chain: None,
        }
    }
}

impl<'a, T> Iterator for ChainsIterMut<'a, T> {
    type Item = &'a mut T;

    #[cfg_attr(feature = "inline-more", inline)]
    fn next(&mut self) -> Option<&'a mut T> {
        loop {
            if let Some(item) = self.chain.as_mut().and_then(Iterator::next) {
                return Some(item);
            }
            self.chain = Some(self.chains.next()?.iter_mut());
        }
    }
}

struct ChainsIntoIter<T> {
    chains: vec::IntoIter<Chain<T>>,
    chain: Option<vec::IntoIter<T>>,
}

impl<T> ChainsIntoIter<T> {
    fn new(chains: alloc::vec::Vec<Chain<T>>) -> Self {
        Self {
            chains: chains.into_iter(),
            chain: None,
        }
    }
}

impl<T> Iterator for ChainsIntoIter<T> {
    type Item = T;

    #[cfg_attr(feature = "inline-more", inline)]
    fn next(&mut self) -> Option<T> {
        loop {
            if let Some(item) = self.chain.as_mut().and_then(Iterator::next) {
                return Some(item);
            }
            self.chain = Some(self.chains.next()?.into_iter());
        }
    }
}
