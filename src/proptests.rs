use super::*;

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use std::collections::BTreeMap;
use std::hash::Hasher;

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    #[proptest(weight = 3)]
    Insert(
        // Short keys over a small alphabet so overwrites actually happen.
        #[proptest(regex = "[a-c0-1]{0,4}")] String,
        #[proptest(strategy = "0..2i32")] i32,
    ),
    Find(#[proptest(regex = "[a-c0-1]{0,4}")] String),
}

/// Independent model of the grouped loop using `from_le_bytes`.
fn grouped_model(bytes: &[u8]) -> u64 {
    bytes
        .chunks_exact(4)
        .enumerate()
        .map(|(i, g)| {
            let word = u32::from_le_bytes([g[0], g[1], g[2], g[3]]) as u64;
            word << (4 * (i % 2))
        })
        .fold(0, |acc, w| acc ^ w)
}

fn trailing_model(tail: &[u8]) -> u64 {
    tail.iter()
        .enumerate()
        .fold(0, |acc, (j, &b)| acc ^ ((b as u64) << (8 * j)))
}

fn bytes_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=96)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_digest_deterministic(bytes in bytes_strategy()) {
        prop_assert_eq!(digest(&bytes), digest(&bytes));
        prop_assert_eq!(trace_digest(&bytes), digest(&bytes));
    }

    #[test]
    fn prop_short_input_is_trailing_only(bytes in prop::collection::vec(any::<u8>(), 0..4)) {
        prop_assert_eq!(digest(&bytes), trailing_model(&bytes));
    }

    #[test]
    fn prop_whole_groups_are_grouped_only(
        groups in prop::collection::vec(any::<[u8; 4]>(), 0..24),
    ) {
        let bytes: Vec<u8> = groups.concat();
        prop_assert_eq!(digest(&bytes), grouped_model(&bytes));
    }

    #[test]
    fn prop_digest_splits_into_groups_and_tail(bytes in bytes_strategy()) {
        let split = bytes.len() - bytes.len() % 4;
        let (head, tail) = bytes.split_at(split);
        prop_assert_eq!(digest(&bytes), grouped_model(head) ^ trailing_model(tail));
        prop_assert_eq!(digest(&bytes), digest(head) ^ digest(tail));
    }

    #[test]
    fn prop_streaming_matches_digest(
        bytes in bytes_strategy(),
        cuts in prop::collection::vec(any::<prop::sample::Index>(), 0..6),
    ) {
        let mut points: Vec<usize> = cuts.iter().map(|c| c.index(bytes.len() + 1)).collect();
        points.sort_unstable();

        let mut h = XorFoldHasher::new();
        let mut from = 0;
        for p in points {
            h.write(&bytes[from..p]);
            from = p;
        }
        h.write(&bytes[from..]);
        prop_assert_eq!(h.finish(), digest(&bytes));
    }

    #[test]
    fn prop_table_equivalence(
        kind in any::<TableKind>(),
        ops in prop::collection::vec(any::<Op>(), 0..300),
    ) {
        let mut t = kind.build(0);
        let mut m: BTreeMap<String, i32> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    let old_t = t.insert(key.clone(), value);
                    let old_m = m.insert(key, value);
                    prop_assert_eq!(old_t, old_m);
                }
                Op::Find(key) => {
                    prop_assert_eq!(t.find(&key), m.get(&key).copied());
                }
            }
            prop_assert_eq!(t.size(), m.len());
        }
    }

    #[test]
    fn prop_random_string_shape(seed in any::<u64>(), len in 0usize..64) {
        let s = KeyGenerator::seeded(seed).generate_random_string(len);
        prop_assert_eq!(s.len(), len);
        prop_assert!(s.bytes().all(|b| ALPHANUMERIC.contains(&b)));
    }

    #[test]
    fn prop_run_samples(total_ops in 0u64..400, sample_stride in 1u64..40, seed in any::<u64>()) {
        let table: BTreeMap<String, i32> = BTreeMap::new();
        let samples = run(total_ops, sample_stride, table, KeyGenerator::seeded(seed)).unwrap();
        prop_assert_eq!(samples.len() as u64, total_ops / sample_stride);
        for (k, s) in samples.iter().enumerate() {
            prop_assert_eq!(s.operation_count, (k as u64 + 1) * sample_stride);
        }
        prop_assert!(samples.windows(2).all(|w| w[0].elapsed_ms <= w[1].elapsed_ms));
    }
}

#[test]
fn exhaustive_two_byte_inputs() {
    // Every input shorter than a group is the little-endian value of its bytes.
    for a in 0..=255u8 {
        for b in 0..=255u8 {
            assert_eq!(digest(&[a, b]), u16::from_le_bytes([a, b]) as u64);
        }
    }
}
