//! Bloom Filter policy.
//!
//! Filters use the LevelDB "BuiltinBloomFilter2" encoding:
//!
//! ```text
//! +----------------------------------+---------+
//! | bit array (ceil(bits/8) bytes)   | k (u8)  |
//! +----------------------------------+---------+
//! ```
//!
//! Bits are numbered LSB-first within each byte. The probe count `k` is
//! stored in the filter itself, so a filter built with one `bits_per_key`
//! can be probed by a policy configured with another.

use crate::filter::FilterPolicy;
use crate::hash::hash;
use std::f64::consts::LN_2;
use std::sync::Arc;

/// Seed for the base hash of every key.
const BLOOM_SEED: u32 = 0xbc9f1d34;

/// Filters are never smaller than this many bits. Tiny key sets would
/// otherwise get a very high false positive rate.
const MIN_FILTER_BITS: usize = 64;

/// Largest probe count of this encoding. A larger trailing byte marks an
/// encoding this crate does not know.
const MAX_PROBES: u8 = 30;

/// Default bits per key for bloom filter
pub const DEFAULT_BITS_PER_KEY: i32 = 10;

/// Bloom filter policy producing LevelDB-compatible filters.
///
/// # Example
/// ```
/// use aidb_bloom::filter::{BloomFilterPolicy, FilterPolicy};
///
/// let policy = BloomFilterPolicy::new(10);
/// let keys: [&[u8]; 2] = [b"key1", b"key2"];
///
/// let mut filter = Vec::new();
/// policy.create_filter(&keys, &mut filter);
///
/// assert!(policy.key_may_match(b"key1", &filter));
/// assert!(policy.key_may_match(b"key2", &filter));
/// // key3 might return true (false positive) or false
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BloomFilterPolicy {
    /// Bits allocated per key, as configured by the caller
    bits_per_key: i32,
    /// Number of probes per key, always in `1..=30`
    k: u8,
}

impl BloomFilterPolicy {
    /// Name recorded alongside every filter built by this policy.
    pub const NAME: &'static str = "leveldb.BuiltinBloomFilter2";

    /// Creates a policy spending roughly `bits_per_key` bits per key.
    ///
    /// The probe count is `floor(bits_per_key * ln 2)` clamped to `1..=30`.
    /// Rounding down keeps probing a little cheaper. Any `bits_per_key` is
    /// accepted; non-positive values still produce a minimum-size filter.
    pub fn new(bits_per_key: i32) -> Self {
        let optimal = (f64::from(bits_per_key) * LN_2).floor();
        let k = optimal.clamp(1.0, f64::from(MAX_PROBES)) as u8;

        if optimal != f64::from(k) {
            log::debug!(
                "Bloom probe count for {} bits per key clamped from {} to {}",
                bits_per_key,
                optimal,
                k
            );
        }

        Self { bits_per_key, k }
    }

    /// Get the configured bits per key.
    pub fn bits_per_key(&self) -> i32 {
        self.bits_per_key
    }

    /// Get the number of probes used for new filters.
    pub fn num_probes(&self) -> u8 {
        self.k
    }

    /// Number of bits in the array of a filter over `num_keys` keys.
    fn filter_bits(&self, num_keys: usize) -> usize {
        let per_key = usize::try_from(self.bits_per_key).unwrap_or(0);
        let bits = num_keys.saturating_mul(per_key).max(MIN_FILTER_BITS);
        bits.div_ceil(8) * 8
    }

    /// Get the encoded length in bytes of a filter over `num_keys` keys,
    /// including the trailing probe count.
    pub fn filter_size(&self, num_keys: usize) -> usize {
        self.filter_bits(num_keys) / 8 + 1
    }

    /// Calculate the approximate false positive rate of a filter over
    /// `num_keys` keys.
    ///
    /// This is an estimate based on the theoretical formula:
    /// p = (1 - e^(-kn/m))^k
    /// where k = probes, n = num_keys, m = filter bits
    pub fn estimated_false_positive_rate(&self, num_keys: usize) -> f64 {
        if num_keys == 0 {
            return 0.0;
        }

        let k = f64::from(self.k);
        let n = num_keys as f64;
        let m = self.filter_bits(num_keys) as f64;

        (1.0 - (-k * n / m).exp()).powf(k)
    }
}

impl Default for BloomFilterPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_BITS_PER_KEY)
    }
}

impl FilterPolicy for BloomFilterPolicy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn create_filter(&self, keys: &[&[u8]], dst: &mut Vec<u8>) {
        let bits = self.filter_bits(keys.len());
        let bytes = bits / 8;

        let init_size = dst.len();
        dst.resize(init_size + bytes, 0);
        dst.push(self.k);

        let array = &mut dst[init_size..init_size + bytes];
        for key in keys {
            for h in Probes::new(key, self.k) {
                let bitpos = h as usize % bits;
                array[bitpos / 8] |= 1 << (bitpos % 8);
            }
        }

        log::debug!(
            "Built bloom filter: {} keys, {} bits, {} probes",
            keys.len(),
            bits,
            self.k
        );
    }

    fn key_may_match(&self, key: &[u8], filter: &[u8]) -> bool {
        FilterView::parse(filter).may_contain(key)
    }
}

/// Creates a shareable Bloom filter policy.
pub fn new_bloom_filter_policy(bits_per_key: i32) -> Arc<dyn FilterPolicy> {
    Arc::new(BloomFilterPolicy::new(bits_per_key))
}

/// Probe positions of a key, before reduction modulo the filter size.
///
/// Uses double hashing (Kirsch and Mitzenmacher, 2006): the second hash is
/// the base hash rotated right by 17 bits. The rotation is part of the
/// persisted format.
struct Probes {
    h: u32,
    delta: u32,
    remaining: u8,
}

impl Probes {
    fn new(key: &[u8], k: u8) -> Self {
        let h = hash(key, BLOOM_SEED);
        Self { h, delta: h.rotate_right(17), remaining: k }
    }
}

impl Iterator for Probes {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let h = self.h;
        self.h = h.wrapping_add(self.delta);
        Some(h)
    }
}

/// Borrowed view over the bytes of an encoded filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterView<'a> {
    /// Shorter than two bytes; matches nothing.
    Malformed,

    /// Trailing byte above 30, reserved for encodings unknown to this
    /// crate; matches everything.
    Reserved {
        /// The trailing byte.
        probes: u8,
    },

    /// A Bloom filter of this encoding.
    Bloom {
        /// The bit array, without the trailing probe count.
        array: &'a [u8],
        /// Number of probes per key.
        probes: u8,
    },
}

impl<'a> FilterView<'a> {
    /// Classifies `filter`.
    pub fn parse(filter: &'a [u8]) -> Self {
        match filter.split_last() {
            Some((&probes, array)) if !array.is_empty() => {
                if probes > MAX_PROBES {
                    FilterView::Reserved { probes }
                } else {
                    FilterView::Bloom { array, probes }
                }
            }
            _ => FilterView::Malformed,
        }
    }

    /// Number of bits in the array, or 0 unless this is a Bloom filter.
    pub fn num_bits(&self) -> usize {
        match self {
            FilterView::Bloom { array, .. } => array.len() * 8,
            _ => 0,
        }
    }

    /// The trailing probe byte, if the filter has one.
    pub fn num_probes(&self) -> Option<u8> {
        match self {
            FilterView::Malformed => None,
            FilterView::Reserved { probes } | FilterView::Bloom { probes, .. } => Some(*probes),
        }
    }

    /// Returns `false` if `key` is definitely absent, `true` if it may be
    /// present.
    pub fn may_contain(&self, key: &[u8]) -> bool {
        match *self {
            FilterView::Malformed => false,
            FilterView::Reserved { probes } => {
                log::trace!("Filter has reserved probe count {}, treating as match", probes);
                true
            }
            FilterView::Bloom { array, probes } => {
                let bits = array.len() * 8;
                Probes::new(key, probes).all(|h| {
                    let bitpos = h as usize % bits;
                    array[bitpos / 8] & (1 << (bitpos % 8)) != 0
                })
            }
        }
    }
}
