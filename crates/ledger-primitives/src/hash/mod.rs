//! Hash function primitives.
//!
//! Provides BLAKE3 and double BLAKE3, the only digests used by the
//! transaction core: key hashes, transaction ids, signature hashes and
//! string checksums are all built from these two functions.

/// Compute the BLAKE3 hash of the input data.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 32-byte BLAKE3 digest.
pub fn blake3_hash(data: &[u8]) -> [u8; 32] {
    *blake3::hash(data).as_bytes()
}

/// Compute BLAKE3(BLAKE3(data)).
///
/// Used for public-key hashes, transaction ids and signature hashes.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 32-byte double-BLAKE3 digest.
pub fn double_blake3_hash(data: &[u8]) -> [u8; 32] {
    blake3_hash(&blake3_hash(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blake3_empty() {
        assert_eq!(
            hex::encode(blake3_hash(b"")),
            "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262"
        );
    }

    #[test]
    fn test_blake3_abc() {
        assert_eq!(
            hex::encode(blake3_hash(b"abc")),
            "6437b3ac38465133ffb63b75273a8db548c558465d79db03fd359c6cd5bd9d85"
        );
    }

    #[test]
    fn test_double_blake3_is_nested() {
        let data = b"ledger";
        assert_eq!(double_blake3_hash(data), blake3_hash(&blake3_hash(data)));
        assert_ne!(double_blake3_hash(data), blake3_hash(data));
    }
}
