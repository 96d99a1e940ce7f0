//! A `HashMap` that rehashes one bucket at a time instead of all at once.
//!
//! A hash map that grows must every now and then allocate a bigger table and move every element
//! from the old table into it. Done all at once, that one insert pays for the whole move, and the
//! bigger the map gets the longer that single call takes. For applications that care about tail
//! latency, one slow insert in a million is exactly the problem.
//!
//! This crate spreads the move out instead. When the map reaches its load factor, the current
//! table becomes the "old" table and an empty table with twice as many buckets as there are
//! elements takes its place. From then on, every call to [`HashMap::get`], [`HashMap::get_mut`],
//! [`HashMap::insert`] or [`HashMap::remove`] first moves the contents of one old bucket across,
//! and then does its own work. Once the old table is empty it is dropped. A cursor over the old
//! table tells every lookup which of the two tables a key lives in, so the split is never
//! visible to callers.
//!
//! Some things to keep in mind:
//!
//!  - No call ever rehashes more than one bucket's worth of elements.
//!  - Memory held by the old table is not reclaimed until the move finishes.
//!  - [`HashMap::contains_key`], [`HashMap::peek`] and iteration take `&self` and never advance
//!    the move. Only the calls that take `&mut self` do.
//!  - A missing key is reported as [`NotFound`] (or `false`), never as a panic.
//!
//! ```
//! use trickle::HashMap;
//!
//! let mut map = HashMap::with_capacity_and_load_factor(10, 0.75);
//! for i in 0..8 {
//!     map.insert(i.to_string(), i);
//! }
//! // The eighth insert reached the load factor.
//! assert!(map.is_migrating());
//!
//! // Every call that takes `&mut self` moves one bucket along.
//! for _ in 0..10 {
//!     let _ = map.get("0");
//! }
//! assert!(!map.is_migrating());
//! assert_eq!(map.get("7"), Ok(&7));
//! assert_eq!(map.remove("3"), Ok(3));
//! assert!(map.remove("3").is_err());
//! ```
//!
//! # Benchmarks
//!
//! `benches/vroom.rs` runs lots of inserts back-to-back and measures how long each one takes,
//! once with `hashbrown` and once with this crate:
//!
//! ```console
//! $ cargo bench --bench vroom > data.txt
//! ```
//!
//! The largest single insert is where the two differ.

#![no_std]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

#[cfg(any(test, feature = "std"))]
#[cfg_attr(test, macro_use)]
extern crate std;

extern crate alloc;

mod external_trait_impls;
mod map;
pub mod raw;

pub mod hash_map {
    //! A hash map with incremental rehashing.
    pub use crate::map::*;

    #[cfg(feature = "rayon")]
    /// [rayon]-based parallel iterator types for hash maps.
    /// You will rarely need to interact with it directly unless you have need
    /// to name one of the iterator types.
    ///
    /// [rayon]: https://docs.rs/rayon/1.0/rayon
    pub mod rayon {
        pub use crate::external_trait_impls::rayon::map::*;
    }
}

pub use crate::map::HashMap;

use core::fmt;

/// The error returned when a key is not in the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NotFound;

impl fmt::Display for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("no entry found for key")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for NotFound {}
