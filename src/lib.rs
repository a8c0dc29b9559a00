//! # xorfold
//!
//! A fast XOR-fold string hasher, and a benchmark that measures how quickly
//! a hash table fills up with random keys.
//!
//! ## Hashing
//!
//! ```rust
//! use std::hash::Hasher;
//! use xorfold::{digest, XorFoldHashMap, XorFoldHasher};
//!
//! assert_eq!(digest(b"A"), 65);
//!
//! let mut h = XorFoldHasher::new();
//! h.write(b"ab");
//! h.write(b"cd");
//! assert_eq!(h.finish(), digest(b"abcd"));
//!
//! let mut map: XorFoldHashMap<String, i32> = XorFoldHashMap::default();
//! map.insert("key".to_string(), 1);
//! assert_eq!(map.get("key"), Some(&1));
//! ```
//!
//! ## Benchmarking
//!
//! ```rust
//! use xorfold::{Harness, KeyGenerator, RunParams, TableKind};
//!
//! let params = RunParams { total_ops: 100, sample_stride: 10, key_len: 14 };
//! let mut harness = Harness::new(params, TableKind::XorFold.build(100), KeyGenerator::seeded(1));
//! let summary = harness.run().unwrap();
//! assert_eq!(summary.samples.len(), 10);
//! assert_eq!(summary.size, 100);
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod harness;
pub mod hasher;
pub mod keygen;
pub mod report;
pub mod table;

pub use config::BenchConfig;
pub use harness::{run, Harness, HarnessError, HarnessState, RunParams, RunSummary, SampleRecord};
pub use hasher::{
    digest, trace_digest, HashDigest, XorFoldBuildHasher, XorFoldHashMap, XorFoldHasher,
};
pub use keygen::{KeyGenerator, ALPHANUMERIC};
pub use report::{report, run_and_report, Destination, ReportError};
pub use table::{KeyValueTable, TableKind};

#[cfg(test)]
mod proptests;
