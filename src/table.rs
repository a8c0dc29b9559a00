//! Key/value tables the benchmark can drive.
//!
//! The harness only needs `insert`, `find` and `size`, so any map can be
//! benchmarked by implementing [`KeyValueTable`] for it.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::hasher::XorFoldBuildHasher;

/// Minimal map capability used by the benchmark harness.
pub trait KeyValueTable {
    /// Insert a key-value pair, replacing any existing value.
    ///
    /// Returns the previous value if the key already existed.
    fn insert(&mut self, key: String, value: i32) -> Option<i32>;

    /// Look up the value for a key.
    fn find(&self, key: &str) -> Option<i32>;

    /// Number of distinct keys stored.
    fn size(&self) -> usize;

    /// Short label for reports and logs.
    fn name(&self) -> &'static str;
}

impl<T: KeyValueTable + ?Sized> KeyValueTable for Box<T> {
    fn insert(&mut self, key: String, value: i32) -> Option<i32> {
        (**self).insert(key, value)
    }

    fn find(&self, key: &str) -> Option<i32> {
        (**self).find(key)
    }

    fn size(&self) -> usize {
        (**self).size()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<S: BuildHasher> KeyValueTable for HashMap<String, i32, S> {
    fn insert(&mut self, key: String, value: i32) -> Option<i32> {
        HashMap::insert(self, key, value)
    }

    fn find(&self, key: &str) -> Option<i32> {
        self.get(key).copied()
    }

    fn size(&self) -> usize {
        self.len()
    }

    fn name(&self) -> &'static str {
        "HashMap"
    }
}

impl KeyValueTable for BTreeMap<String, i32> {
    fn insert(&mut self, key: String, value: i32) -> Option<i32> {
        BTreeMap::insert(self, key, value)
    }

    fn find(&self, key: &str) -> Option<i32> {
        self.get(key).copied()
    }

    fn size(&self) -> usize {
        self.len()
    }

    fn name(&self) -> &'static str {
        "BTreeMap"
    }
}

/// Table implementations selectable from configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum TableKind {
    /// `HashMap` hashed with [`XorFoldHasher`](crate::XorFoldHasher).
    #[default]
    #[value(name = "xorfold")]
    XorFold,
    /// `HashMap` with the standard library's randomly seeded SipHash.
    Std,
    /// `BTreeMap`, no hashing at all.
    #[value(name = "btree")]
    BTree,
}

impl TableKind {
    pub const ALL: [TableKind; 3] = [TableKind::XorFold, TableKind::Std, TableKind::BTree];

    pub fn name(&self) -> &'static str {
        match self {
            TableKind::XorFold => "xorfold",
            TableKind::Std => "std",
            TableKind::BTree => "btree",
        }
    }

    /// Build an empty table, pre-sized for `capacity` keys where the
    /// implementation supports it.
    pub fn build(&self, capacity: usize) -> Box<dyn KeyValueTable> {
        match self {
            TableKind::XorFold => Box::new(HashMap::<String, i32, _>::with_capacity_and_hasher(
                capacity,
                XorFoldBuildHasher::default(),
            )),
            TableKind::Std => Box::new(HashMap::<String, i32>::with_capacity(capacity)),
            TableKind::BTree => Box::new(BTreeMap::<String, i32>::new()),
        }
    }
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
