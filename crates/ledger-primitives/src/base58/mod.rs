//! Base58 encoding and the prefixed, checksummed string format.
//!
//! Raw Base58 uses the Bitcoin alphabet. The checked format used for every
//! human-facing key and hash string is
//! `prefix || hex(blake3(payload)[..4]) || base58(payload)`.

use crate::hash::blake3_hash;
use crate::PrimitivesError;

/// Number of checksum bytes embedded in a checked string.
pub const CHECKSUM_LEN: usize = 4;

/// Encode a byte slice to a Base58 string.
///
/// Leading zero bytes are encoded as leading '1' characters.
pub fn encode(data: &[u8]) -> String {
    bs58::encode(data).with_alphabet(bs58::Alphabet::BITCOIN).into_string()
}

/// Decode a Base58 string to a byte vector.
///
/// # Returns
/// `Ok(Vec<u8>)` on success, or `MalformedEncoding` for invalid characters.
pub fn decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    bs58::decode(s)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_vec()
        .map_err(|e| PrimitivesError::MalformedEncoding(format!("invalid base58: {}", e)))
}

/// The 4-byte checksum of a payload: the head of its BLAKE3 hash.
pub fn checksum(payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    let hash = blake3_hash(payload);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&hash[..CHECKSUM_LEN]);
    out
}

/// Encode `payload` as a prefixed checked string.
///
/// # Arguments
/// * `prefix` - Domain prefix naming the identity kind (e.g. `ebxpkh`).
/// * `payload` - The bytes to encode.
///
/// # Returns
/// `prefix` followed by 8 lowercase hex checksum characters and the Base58 payload.
pub fn check_encode(prefix: &str, payload: &[u8]) -> String {
    format!("{}{}{}", prefix, hex::encode(checksum(payload)), encode(payload))
}

/// Decode a prefixed checked string, verifying prefix, length and checksum.
///
/// # Arguments
/// * `prefix` - The domain prefix the string must start with.
/// * `expected_len` - Exact payload length required.
/// * `s` - The string to decode.
///
/// # Returns
/// The payload, `MalformedEncoding` for a wrong prefix, bad hex or Base58,
/// or wrong payload length, and `ChecksumMismatch` when the embedded
/// checksum does not match the payload.
pub fn check_decode(
    prefix: &str,
    expected_len: usize,
    s: &str,
) -> Result<Vec<u8>, PrimitivesError> {
    let rest = s.strip_prefix(prefix).ok_or_else(|| {
        PrimitivesError::MalformedEncoding(format!("expected prefix {}", prefix))
    })?;
    let checksum_hex = rest
        .get(..CHECKSUM_LEN * 2)
        .ok_or_else(|| PrimitivesError::MalformedEncoding("missing checksum".to_string()))?;
    let encoded_payload = &rest[CHECKSUM_LEN * 2..];

    let embedded = crate::buf::decode_strict_hex(checksum_hex)
        .map_err(|_| PrimitivesError::MalformedEncoding("invalid checksum hex".to_string()))?;
    let payload = decode(encoded_payload)?;
    if payload.len() != expected_len {
        return Err(PrimitivesError::MalformedEncoding(format!(
            "payload is {} bytes, expected {}",
            payload.len(),
            expected_len
        )));
    }
    if embedded.as_slice() != checksum(&payload) {
        return Err(PrimitivesError::ChecksumMismatch);
    }
    Ok(payload)
}
