use blake3::Hasher;

use crate::text::fingerprint_form;

/// Computes a 64-bit hash of the input data using BLAKE3, truncated from 256 bits.
///
/// # Collision Probability
///
/// With 64 bits of entropy, `P(collision) ≈ n² / (2 × 2^64)` for `n` items. The
/// duplicate tracker holds at most a few hundred thousand fingerprints, where the
/// probability is negligible. A collision makes one submission look like a
/// duplicate of another; it never corrupts state.
///
#[inline]
pub fn hash_to_u64(data: &[u8]) -> u64 {
    let hash = blake3::hash(data);
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[0..8]);
    u64::from_le_bytes(bytes)
}

/// 64-bit fingerprint of the content, used as the duplicate-tracker key.
///
/// Case, surrounding whitespace, whitespace runs and punctuation do not affect the
/// result, so `"Hello,  World!"` and `"hello world"` hash identically.
#[inline]
pub fn content_fingerprint(content: &str) -> u64 {
    hash_to_u64(fingerprint_form(content).as_bytes())
}

/// Order-sensitive hash over a tag list.
///
/// Tags are separated so `["ab", "c"]` and `["a", "bc"]` differ.
#[inline]
pub fn hash_tags<S: AsRef<str>>(tags: &[S]) -> u64 {
    let mut hasher = Hasher::new();
    for tag in tags {
        hasher.update(tag.as_ref().as_bytes());
        hasher.update(b"|");
    }

    let hash = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[0..8]);
    u64::from_le_bytes(bytes)
}
