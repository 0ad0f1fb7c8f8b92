//! 32-bit seeded hash used to place keys in filters.
//!
//! This is the hash LevelDB uses for its filter blocks. It is similar to
//! Murmur hash and must stay bit-exact: every persisted filter depends on it.

const M: u32 = 0xc6a4a793;
const R: u32 = 24;

/// Hashes `data` with the given `seed`.
///
/// Full 4-byte words are consumed little-endian; the 1 to 3 trailing bytes
/// are folded in as unsigned values.
pub fn hash(data: &[u8], seed: u32) -> u32 {
    let mut h = seed ^ (data.len() as u32).wrapping_mul(M);

    let mut words = data.chunks_exact(4);
    for word in &mut words {
        let w = u32::from_le_bytes([word[0], word[1], word[2], word[3]]);
        h = h.wrapping_add(w);
        h = h.wrapping_mul(M);
        h ^= h >> 16;
    }

    let rest = words.remainder();
    if !rest.is_empty() {
        if rest.len() == 3 {
            h = h.wrapping_add(u32::from(rest[2]) << 16);
        }
        if rest.len() >= 2 {
            h = h.wrapping_add(u32::from(rest[1]) << 8);
        }
        h = h.wrapping_add(u32::from(rest[0]));
        h = h.wrapping_mul(M);
        h ^= h >> R;
    }

    h
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: u32 = 0xbc9f1d34;

    #[test]
    fn test_hash_reference_vectors() {
        assert_eq!(hash(&[], SEED), 0xbc9f1d34);
        assert_eq!(hash(&[0x62], SEED), 0xef1345c4);
        assert_eq!(hash(&[0xc3, 0x97], SEED), 0x5b663814);
        assert_eq!(hash(&[0xe2, 0x99, 0xa5], SEED), 0x323c078f);
        assert_eq!(hash(&[0xe1, 0x80, 0xb9, 0x32], SEED), 0xed21633a);
    }

    #[test]
    fn test_hash_deterministic() {
        assert_eq!(hash(b"hello world", SEED), hash(b"hello world", SEED));
    }

    #[test]
    fn test_hash_seed_changes_output() {
        assert_ne!(hash(b"hello", 0), hash(b"hello", SEED));
    }

    #[test]
    fn test_hash_length_is_mixed_in() {
        // Trailing zero bytes must not collide with the shorter input.
        assert_ne!(hash(b"a", SEED), hash(b"a\0", SEED));
        assert_ne!(hash(b"abcd", SEED), hash(b"abcd\0\0\0\0", SEED));
    }
}
