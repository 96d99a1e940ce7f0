use alloc::boxed::Box;
use alloc::vec::Vec;
use core::mem;

/// A single collision chain.
pub(crate) type Chain<T> = Vec<T>;

/// A fixed-size array of collision chains.
///
/// The number of buckets is chosen at construction and never changes. Growing means building a
/// new `Table` and moving the elements over.
#[derive(Clone)]
pub(crate) struct Table<T> {
    buckets: Box<[Chain<T>]>,
}

impl<T> Table<T> {
    /// Allocates a table with `buckets` empty chains.
    ///
    /// A table always has at least one bucket so that `hash % buckets` is defined.
    pub(crate) fn with_buckets(buckets: usize) -> Self {
        let buckets = usize::max(buckets, 1);
        let mut chains = Vec::with_capacity(buckets);
        chains.resize_with(buckets, Vec::new);
        Self {
            buckets: chains.into_boxed_slice(),
        }
    }

    #[cfg_attr(feature = "inline-more", inline)]
    pub(crate) fn buckets(&self) -> usize {
        self.buckets.len()
    }

    /// Maps a hash to the index of the bucket it belongs to in this table.
    #[inline]
    pub(crate) fn index(&self, hash: u64) -> usize {
        (hash % self.buckets.len() as u64) as usize
    }

    #[inline]
    fn chain(&self, hash: u64) -> &Chain<T> {
        let i = self.index(hash);
        &self.buckets[i]
    }

    #[inline]
    fn chain_mut(&mut self, hash: u64) -> &mut Chain<T> {
        let i = self.index(hash);
        &mut self.buckets[i]
    }

    #[inline]
    pub(crate) fn find(&self, hash: u64, mut eq: impl FnMut(&T) -> bool) -> Option<&T> {
        self.chain(hash).iter().find(|e| eq(e))
    }

    #[inline]
    pub(crate) fn find_mut(&mut self, hash: u64, mut eq: impl FnMut(&T) -> bool) -> Option<&mut T> {
        self.chain_mut(hash).iter_mut().find(|e| eq(e))
    }

    /// Appends `value` to the chain for `hash`.
    ///
    /// This does not check if the given element already exists in the table.
    #[inline]
    pub(crate) fn push(&mut self, hash: u64, value: T) {
        self.chain_mut(hash).push(value);
    }

    /// Unlinks the first element of the chain for `hash` that matches `eq`.
    #[inline]
    pub(crate) fn remove(&mut self, hash: u64, eq: impl FnMut(&T) -> bool) -> Option<T> {
        let chain = self.chain_mut(hash);
        let i = chain.iter().position(eq)?;
        Some(chain.swap_remove(i))
    }

    #[inline]
    pub(crate) fn is_bucket_empty(&self, index: usize) -> bool {
        self.buckets[index].is_empty()
    }

    /// Takes the whole chain at `index` out of the table, leaving an empty bucket behind.
    #[inline]
    pub(crate) fn take_bucket(&mut self, index: usize) -> Chain<T> {
        mem::take(&mut self.buckets[index])
    }

    /// Empties every chain while keeping the bucket count.
    pub(crate) fn clear(&mut self) {
        for chain in self.buckets.iter_mut() {
            chain.clear();
        }
    }

    pub(crate) fn chains(&self) -> &[Chain<T>] {
        &self.buckets
    }

    pub(crate) fn chains_mut(&mut self) -> &mut [Chain<T>] {
        &mut self.buckets
    }

    pub(crate) fn into_chains(self) -> Vec<Chain<T>> {
        self.buckets.into_vec()
    }
}
