//! Timed insertion benchmark.
//!
//! A [`Harness`] inserts `total_ops` random keys into a table and records the
//! cumulative elapsed time every `sample_stride` insertions. A harness runs
//! exactly once: `Idle -> Running -> Completed`.

use std::time::Instant;

use crate::keygen::KeyGenerator;
use crate::table::KeyValueTable;

/// Cumulative elapsed time after `operation_count` insertions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SampleRecord {
    pub elapsed_ms: u64,
    pub operation_count: u64,
}

/// Outcome of a completed run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Wall-clock time for the whole run.
    pub total_ms: u64,
    /// Table size after the last insertion.
    pub size: usize,
    /// Samples in increasing `operation_count` order.
    pub samples: Vec<SampleRecord>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HarnessState {
    Idle,
    Running,
    Completed,
}

/// Error type for harness runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HarnessError {
    /// `run` was called on a harness that already ran.
    AlreadyCompleted,
    /// A stride of zero would never sample.
    ZeroStride,
}

impl std::fmt::Display for HarnessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HarnessError::AlreadyCompleted => {
                write!(f, "benchmark already ran; build a new harness")
            }
            HarnessError::ZeroStride => write!(f, "sample stride must be at least 1"),
        }
    }
}

impl std::error::Error for HarnessError {}

/// Size and sampling parameters for a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunParams {
    pub total_ops: u64,
    pub sample_stride: u64,
    /// Length of every generated key.
    pub key_len: usize,
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            total_ops: 5_000_000,
            sample_stride: 50_000,
            key_len: 14,
        }
    }
}

/// Upper bound on the sample buffer reserved before a run.
const MAX_RESERVED_SAMPLES: usize = 1024;

impl RunParams {
    /// Number of samples a run will record.
    pub fn expected_samples(&self) -> u64 {
        if self.sample_stride == 0 {
            0
        } else {
            self.total_ops / self.sample_stride
        }
    }

    /// Capacity to reserve for the samples up front. Larger runs grow the
    /// buffer as they go.
    pub fn sample_capacity(&self) -> usize {
        usize::try_from(self.expected_samples())
            .unwrap_or(usize::MAX)
            .min(MAX_RESERVED_SAMPLES)
    }
}

pub struct Harness<T> {
    params: RunParams,
    table: T,
    keygen: KeyGenerator,
    state: HarnessState,
}

impl<T: KeyValueTable> Harness<T> {
    pub fn new(params: RunParams, table: T, keygen: KeyGenerator) -> Self {
        Self {
            params,
            table,
            keygen,
            state: HarnessState::Idle,
        }
    }

    pub fn state(&self) -> HarnessState {
        self.state
    }

    /// Seed of the key generator, enough to repeat the run.
    pub fn seed(&self) -> u64 {
        self.keygen.seed()
    }

    /// The table being filled, for inspection after a run.
    pub fn table(&self) -> &T {
        &self.table
    }

    pub fn into_table(self) -> T {
        self.table
    }

    /// Run the benchmark to completion.
    ///
    /// Key generation is inside the timed loop, as is the insertion itself.
    pub fn run(&mut self) -> Result<RunSummary, HarnessError> {
        if self.state != HarnessState::Idle {
            return Err(HarnessError::AlreadyCompleted);
        }
        let RunParams {
            total_ops,
            sample_stride,
            key_len,
        } = self.params;
        if sample_stride == 0 {
            return Err(HarnessError::ZeroStride);
        }

        self.state = HarnessState::Running;
        log::info!(
            "inserting {total_ops} keys of length {key_len} into {}, sampling every {}, seed {}",
            self.table.name(),
            sample_stride,
            self.keygen.seed()
        );

        let mut samples = Vec::with_capacity(self.params.sample_capacity());
        let start = Instant::now();
        for i in 1..=total_ops {
            let key = self.keygen.generate_random_string(key_len);
            let value = self.keygen.next_value();
            self.table.insert(key, value);

            if i % sample_stride == 0 {
                let sample = SampleRecord {
                    elapsed_ms: start.elapsed().as_millis() as u64,
                    operation_count: i,
                };
                log::debug!("{} ops after {} ms", sample.operation_count, sample.elapsed_ms);
                samples.push(sample);
            }
        }
        let total_ms = start.elapsed().as_millis() as u64;

        self.state = HarnessState::Completed;
        let size = self.table.size();
        log::info!("finished in {total_ms} ms, {size} distinct keys");

        Ok(RunSummary {
            total_ms,
            size,
            samples,
        })
    }
}

/// Run a one-off benchmark with default key length and return its samples.
pub fn run<T: KeyValueTable>(
    total_ops: u64,
    sample_stride: u64,
    table: T,
    keygen: KeyGenerator,
) -> Result<Vec<SampleRecord>, HarnessError> {
    let params = RunParams {
        total_ops,
        sample_stride,
        ..RunParams::default()
    };
    Harness::new(params, table, keygen)
        .run()
        .map(|summary| summary.samples)
}
