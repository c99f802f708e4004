//! Stable string hash
//!
//! A one-at-a-time rolling hash over the UTF-16LE bytes of the input.
//! The byte encoding is part of the contract: hashing UTF-8 bytes instead
//! produces different values and therefore different package identifiers.

/// Exclusive upper bound of [`stable_hash`] results
pub const HASH_BOUND: u32 = 100_000_000;

/// Hash `text` to a value in `[0, HASH_BOUND)`.
///
/// Deterministic across calls and processes.
pub fn stable_hash(text: &str) -> u32 {
    let mut hash: u32 = 0;
    for unit in text.encode_utf16() {
        for byte in unit.to_le_bytes() {
            hash = hash.wrapping_add(u32::from(byte));
            hash = hash.wrapping_add(hash << 10);
            hash ^= hash >> 6;
        }
    }

    // Final avalanche
    hash = hash.wrapping_add(hash << 3);
    hash ^= hash >> 11;
    hash = hash.wrapping_add(hash << 15);

    hash % HASH_BOUND
}
