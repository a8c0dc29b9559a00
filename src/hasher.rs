//! XOR-fold string hashing.
//!
//! The input is split into 4-byte groups which are XORed into a 64-bit
//! accumulator, every odd group shifted left by 4 bits so that periodic
//! strings ("abcdabcd...") do not cancel themselves out. The `L % 4` trailing
//! bytes are XORed in one at a time, byte `j` shifted left by `8 * j`.
//!
//! Groups are composed byte by byte in little-endian order, so the digest is
//! the same on every host regardless of native endianness or alignment.
//!
//! This is a table digest only. It is trivially invertible and collides on
//! purpose-built inputs; never use it where an adversary controls the keys.

use std::collections::HashMap;
use std::hash::{BuildHasherDefault, Hasher};

/// Digest produced by [`digest`] and [`XorFoldHasher`].
pub type HashDigest = u64;

const GROUP_LEN: usize = 4;

#[inline]
fn load_group(b: &[u8]) -> u64 {
    debug_assert_eq!(b.len(), GROUP_LEN);
    let word = (b[0] as u32) | (b[1] as u32) << 8 | (b[2] as u32) << 16 | (b[3] as u32) << 24;
    word as u64
}

/// Shift applied to group `idx`: 0 for even groups, 4 for odd ones.
#[inline]
fn group_shift(idx: u64) -> u32 {
    4 * (idx % 2) as u32
}

#[inline]
fn fold_trailing(mut acc: u64, tail: &[u8]) -> u64 {
    debug_assert!(tail.len() < GROUP_LEN);
    for (j, &b) in tail.iter().enumerate() {
        acc ^= (b as u64) << (8 * j);
    }
    acc
}

/// Hash a byte sequence.
///
/// Empty input yields `0`; inputs shorter than four bytes only go through the
/// trailing-byte step.
///
/// ```rust
/// use xorfold::digest;
///
/// assert_eq!(digest(b""), 0);
/// assert_eq!(digest(b"A"), 65);
/// assert_eq!(digest(b"abcd"), 0x6463_6261);
/// ```
pub fn digest(bytes: &[u8]) -> HashDigest {
    let mut acc = 0u64;
    let mut groups = bytes.chunks_exact(GROUP_LEN);
    for (i, g) in groups.by_ref().enumerate() {
        acc ^= load_group(g) << group_shift(i as u64);
    }
    fold_trailing(acc, groups.remainder())
}

/// Same as [`digest`], logging every step at `trace` level.
pub fn trace_digest(bytes: &[u8]) -> HashDigest {
    let mut acc = 0u64;
    let mut groups = bytes.chunks_exact(GROUP_LEN);
    for (i, g) in groups.by_ref().enumerate() {
        let shift = group_shift(i as u64);
        acc ^= load_group(g) << shift;
        log::trace!("group({i}) {g:02x?} << {shift} -> {acc:#018x}");
    }
    let tail = groups.remainder();
    for (j, &b) in tail.iter().enumerate() {
        acc ^= (b as u64) << (8 * j);
        log::trace!("trailing({j}) {b:#04x} << {} -> {acc:#018x}", 8 * j);
    }
    log::trace!("digest of {:?}: {acc:064b}", String::from_utf8_lossy(bytes));
    acc
}

/// Streaming [`Hasher`] over the XOR-fold digest.
///
/// Bytes from successive `write` calls are folded as if they had been passed
/// in a single call, so `h.write(x); h.finish()` equals `digest(x)` however
/// `x` is split. Note that `str`'s `Hash` impl appends a `0xff` terminator,
/// so a `String` key hashes as `digest(key ++ [0xff])`.
#[derive(Debug, Clone, Default)]
pub struct XorFoldHasher {
    acc: u64,
    groups: u64,
    pending: [u8; GROUP_LEN],
    pending_len: usize,
}

impl XorFoldHasher {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn fold_group(&mut self, g: &[u8]) {
        self.acc ^= load_group(g) << group_shift(self.groups);
        self.groups += 1;
    }
}

impl Hasher for XorFoldHasher {
    #[inline]
    fn finish(&self) -> u64 {
        fold_trailing(self.acc, &self.pending[..self.pending_len])
    }

    fn write(&mut self, mut bytes: &[u8]) {
        if self.pending_len > 0 {
            let take = (GROUP_LEN - self.pending_len).min(bytes.len());
            self.pending[self.pending_len..self.pending_len + take].copy_from_slice(&bytes[..take]);
            self.pending_len += take;
            bytes = &bytes[take..];
            if self.pending_len < GROUP_LEN {
                return;
            }
            let full = self.pending;
            self.fold_group(&full);
            self.pending_len = 0;
        }

        let mut groups = bytes.chunks_exact(GROUP_LEN);
        for g in groups.by_ref() {
            self.fold_group(g);
        }
        let tail = groups.remainder();
        self.pending[..tail.len()].copy_from_slice(tail);
        self.pending_len = tail.len();
    }
}

/// `BuildHasher` for [`XorFoldHasher`]. Stateless, so every map built with it
/// hashes identically.
pub type XorFoldBuildHasher = BuildHasherDefault<XorFoldHasher>;

/// `HashMap` keyed through [`XorFoldHasher`].
pub type XorFoldHashMap<K, V> = HashMap<K, V, XorFoldBuildHasher>;
