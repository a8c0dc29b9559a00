//! Random benchmark keys.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Characters keys are drawn from: digits, then upper case, then lower case.
pub const ALPHANUMERIC: &[u8; 62] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Owns the pseudorandom generator for one benchmark run.
///
/// Two generators built from the same seed produce the same keys and values.
pub struct KeyGenerator {
    rng: StdRng,
    seed: u64,
    chars: Uniform<usize>,
    values: Uniform<i32>,
}

impl KeyGenerator {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            chars: Uniform::from(0..ALPHANUMERIC.len()),
            values: Uniform::from(0..2),
        }
    }

    /// Seed once from the wall clock.
    pub fn from_time() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        log::debug!("seeding key generator from clock: {seed}");
        Self::seeded(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Exactly `len` characters, each uniform over [`ALPHANUMERIC`].
    pub fn generate_random_string(&mut self, len: usize) -> String {
        let mut s = String::with_capacity(len);
        for _ in 0..len {
            s.push(ALPHANUMERIC[self.chars.sample(&mut self.rng)] as char);
        }
        s
    }

    /// Value stored alongside each key, 0 or 1.
    pub fn next_value(&mut self) -> i32 {
        self.values.sample(&mut self.rng)
    }
}
