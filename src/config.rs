//! Benchmark configuration.

use crate::harness::{Harness, RunParams};
use crate::keygen::KeyGenerator;
use crate::report::Destination;
use crate::table::{KeyValueTable, TableKind};

/// Everything needed to set up one benchmark run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BenchConfig {
    /// Operation count, stride and key length.
    pub params: RunParams,
    /// Table implementation to fill.
    pub table: TableKind,
    /// Fixed RNG seed; `None` seeds from the clock.
    pub seed: Option<u64>,
    /// Where the samples go.
    pub destination: Destination,
}

impl BenchConfig {
    pub fn keygen(&self) -> KeyGenerator {
        match self.seed {
            Some(seed) => KeyGenerator::seeded(seed),
            None => KeyGenerator::from_time(),
        }
    }

    /// Build an idle harness over a fresh, empty table of the configured kind.
    ///
    /// The table starts with no reserved capacity, so growth is part of what
    /// the samples measure.
    pub fn harness(&self) -> Harness<Box<dyn KeyValueTable>> {
        let table = self.table.build(0);
        Harness::new(self.params, table, self.keygen())
    }
}
