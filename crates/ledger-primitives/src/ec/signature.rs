//! Compact ECDSA signatures over 32-byte digests.
//!
//! Signing is deterministic (RFC6979) and always yields a low-S signature.
//! The wire form is the 64-byte concatenation `r || s`.

use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa;

use crate::ec::private_key::PrivKey;
use crate::ec::public_key::PubKey;
use crate::PrimitivesError;

/// Length of a compact signature in bytes.
pub const COMPACT_SIZE: usize = 64;

/// An ECDSA signature with R and S components.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature {
    /// The R component of the signature (32 bytes, big-endian).
    r: [u8; 32],
    /// The S component of the signature (32 bytes, big-endian).
    s: [u8; 32],
}

impl Signature {
    /// Create a signature from raw R and S 32-byte arrays.
    pub fn new(r: [u8; 32], s: [u8; 32]) -> Self {
        Signature { r, s }
    }

    pub fn r(&self) -> &[u8; 32] {
        &self.r
    }

    pub fn s(&self) -> &[u8; 32] {
        &self.s
    }

    /// Parse a 64-byte `r || s` signature.
    ///
    /// # Returns
    /// `SizeMismatch` for the wrong length, `InvalidSignature` when either
    /// scalar is zero or out of range.
    pub fn from_compact(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != COMPACT_SIZE {
            return Err(PrimitivesError::SizeMismatch {
                expected: COMPACT_SIZE,
                got: bytes.len(),
            });
        }
        ecdsa::Signature::from_slice(bytes)
            .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);
        Ok(Signature { r, s })
    }

    /// Serialize as 64 bytes `r || s`.
    pub fn to_compact(&self) -> [u8; COMPACT_SIZE] {
        let mut out = [0u8; COMPACT_SIZE];
        out[..32].copy_from_slice(&self.r);
        out[32..].copy_from_slice(&self.s);
        out
    }

    /// Sign a 32-byte digest with a private key.
    ///
    /// # Arguments
    /// * `digest` - The prehashed message.
    /// * `priv_key` - The private key to sign with.
    ///
    /// # Returns
    /// `Ok(Signature)` with a normalized low-S value.
    pub fn sign(digest: &[u8; 32], priv_key: &PrivKey) -> Result<Self, PrimitivesError> {
        let (sig, _recovery_id) = priv_key
            .signing_key()
            .sign_prehash_recoverable(digest)
            .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;
        let sig = sig.normalize_s().unwrap_or(sig);

        let (r_bytes, s_bytes) = sig.split_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&r_bytes);
        s.copy_from_slice(&s_bytes);
        Ok(Signature { r, s })
    }

    /// Verify this signature against a digest and public key.
    ///
    /// # Returns
    /// `true` if the signature is valid, `false` otherwise.
    pub fn verify(&self, digest: &[u8; 32], pub_key: &PubKey) -> bool {
        let k256_sig = match ecdsa::Signature::from_scalars(
            k256::FieldBytes::from(self.r),
            k256::FieldBytes::from(self.s),
        ) {
            Ok(sig) => sig,
            Err(_) => return false,
        };
        match pub_key.verifying_key() {
            Ok(key) => key.verify_prehash(digest, &k256_sig).is_ok(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::blake3_hash;

    /// Half of the secp256k1 curve order (N/2).
    const HALF_ORDER: [u8; 32] = [
        0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFF, 0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B,
        0x20, 0xA0,
    ];

    #[test]
    fn test_sign_verify() {
        let priv_key = PrivKey::random();
        let digest = blake3_hash(b"message");
        let sig = priv_key.sign_digest(&digest).unwrap();
        assert!(priv_key.to_pub_key().verify_digest(&digest, &sig));

        let other = blake3_hash(b"other message");
        assert!(!priv_key.to_pub_key().verify_digest(&other, &sig));
        assert!(!PrivKey::random().to_pub_key().verify_digest(&digest, &sig));
    }

    #[test]
    fn test_deterministic_and_low_s() {
        let priv_key =
            PrivKey::from_hex("2ef930fed143c0b92b485c29aaaba97d09cab882baafdb9ea1e55dec252cd09f")
                .unwrap();
        let digest = blake3_hash(b"deterministic");
        let a = priv_key.sign_digest(&digest).unwrap();
        let b = priv_key.sign_digest(&digest).unwrap();
        assert_eq!(a, b);
        assert!(a.s() <= &HALF_ORDER);
    }

    #[test]
    fn test_compact_roundtrip() {
        let priv_key = PrivKey::random();
        let sig = priv_key.sign_digest(&[7u8; 32]).unwrap();
        let back = Signature::from_compact(&sig.to_compact()).unwrap();
        assert_eq!(back, sig);
    }

    #[test]
    fn test_from_compact_rejects() {
        assert!(matches!(
            Signature::from_compact(&[1u8; 63]),
            Err(PrimitivesError::SizeMismatch {
                expected: 64,
                got: 63,
            })
        ));
        assert!(matches!(
            Signature::from_compact(&[0u8; 64]),
            Err(PrimitivesError::InvalidSignature(_))
        ));
    }

    #[test]
    fn test_zero_signature_does_not_verify() {
        let sig = Signature::new([0u8; 32], [0u8; 32]);
        assert!(!PrivKey::random().to_pub_key().verify_digest(&[1u8; 32], &sig));
    }
}
