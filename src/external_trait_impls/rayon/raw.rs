use crate::raw::RawTable;
use alloc::vec::Vec;
use rayon_::iter::{
    plumbing::{Reducer, UnindexedConsumer},
    IntoParallelIterator, IntoParallelRefIterator, IntoParallelRefMutIterator, ParallelIterator,
};

/// Parallel iterator which returns a reference to every element in the table.
///
/// The current table and the leftovers of an in-progress resize are walked side by side.
pub struct RawParIter<'a, T> {
    table: &'a [Vec<T>],
    leftovers: Option<&'a [Vec<T>]>,
}

impl<'a, T: Sync> ParallelIterator for RawParIter<'a, T> {
    type Item = &'a T;

    #[cfg_attr(feature = "inline-more", inline)]
    fn drive_unindexed<C>(self, consumer: C) -> C::Result
    where
        C: UnindexedConsumer<Self::Item>,
    {
        let table = self.table;
        if let Some(lo) = self.leftovers {
            let left = consumer.split_off_left();
            let reducer = consumer.to_reducer();
            let (left_half, right_half) = rayon_::join(
                move || {
                    table
                        .par_iter()
                        .flat_map_iter(|chain| chain.iter())
                        .drive_unindexed(left)
                },
                move || {
                    lo.par_iter()
                        .flat_map_iter(|chain| chain.iter())
                        .drive_unindexed(consumer)
                },
            );
            reducer.reduce(left_half, right_half)
        } else {
            table
                .par_iter()
                .flat_map_iter(|chain| chain.iter())
                .drive_unindexed(consumer)
        }
    }
}

/// Parallel iterator which returns a mutable reference to every element in the table.
pub struct RawParIterMut<'a, T> {
    table: &'a mut [Vec<T>],
    leftovers: Option<&'a mut [Vec<T>]>,
}

impl<'a, T: Send> ParallelIterator for RawParIterMut<'a, T> {
    type Item = &'a mut T;

    #[cfg_attr(feature = "inline-more", inline)]
    fn drive_unindexed<C>(self, consumer: C) -> C::Result
    where
        C: UnindexedConsumer<Self::Item>,
    {
        let table = self.table;
        if let Some(lo) = self.leftovers {
            let left = consumer.split_off_left();
            let reducer = consumer.to_reducer();
            let (left_half, right_half) = rayon_::join(
                move || {
                    table
                        .par_iter_mut()
                        .flat_map_iter(|chain| chain.iter_mut())
                        .drive_unindexed(left)
                },
                move || {
                    lo.par_iter_mut()
                        .flat_map_iter(|chain| chain.iter_mut())
                        .drive_unindexed(consumer)
                },
            );
            reducer.reduce(left_half, right_half)
        } else {
            table
                .par_iter_mut()
                .flat_map_iter(|chain| chain.iter_mut())
                .drive_unindexed(consumer)
        }
    }
}

/// Parallel iterator which consumes a table and returns elements.
pub struct RawIntoParIter<T> {
    table: RawTable<T>,
}

impl<T: Send> ParallelIterator for RawIntoParIter<T> {
    type Item = T;

    #[cfg_attr(feature = "inline-more", inline)]
    fn drive_unindexed<C>(self, consumer: C) -> C::Result
    where
        C: UnindexedConsumer<Self::Item>,
    {
        let (table, leftovers) = self.table.into_split_chains();
        let table = table.into_par_iter().flat_map_iter(|chain| chain.into_iter());
        match leftovers {
            Some(lo) => table
                .chain(lo.into_par_iter().flat_map_iter(|chain| chain.into_iter()))
                .drive_unindexed(consumer),
            None => table.drive_unindexed(consumer),
        }
    }
}

impl<T> RawTable<T> {
    /// Returns a parallel iterator over the elements in a `RawTable`.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn par_iter(&self) -> RawParIter<'_, T> {
        RawParIter {
            table: self.main_chains(),
            leftovers: self.leftover_chains(),
        }
    }

    /// Returns a parallel iterator over mutable references to the elements in a `RawTable`.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn par_iter_mut(&mut self) -> RawParIterMut<'_, T> {
        let (table, leftovers) = self.split_chains_mut();
        RawParIterMut { table, leftovers }
    }

    /// Returns a parallel iterator that consumes the table.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn into_par_iter(self) -> RawIntoParIter<T> {
        RawIntoParIter { table: self }
    }
}
