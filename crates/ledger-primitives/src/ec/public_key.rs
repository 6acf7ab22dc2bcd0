//! Compressed secp256k1 public key.

use std::fmt;
use std::str::FromStr;

use k256::ecdsa::VerifyingKey;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::buf::{decode_strict_hex, FixedBuf};
use crate::ec::pkh::Pkh;
use crate::ec::signature::Signature;
use crate::PrimitivesError;

/// Prefix of the checked string form of a public key.
pub const PUB_KEY_PREFIX: &str = "ebxpub";

/// Length of a compressed public key in bytes.
pub const PUB_KEY_SIZE: usize = 33;

/// A compressed public key: 33 bytes, first byte `0x02` or `0x03`, and a
/// valid point on the curve.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PubKey(FixedBuf<PUB_KEY_SIZE>);

impl PubKey {
    /// Parse a compressed public key.
    ///
    /// # Arguments
    /// * `bytes` - 33-byte SEC1 compressed encoding.
    ///
    /// # Returns
    /// `Ok(PubKey)`, `SizeMismatch` for the wrong length, or
    /// `InvalidPublicKey` for a bad prefix or off-curve point.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        let buf = FixedBuf::<PUB_KEY_SIZE>::from_slice(bytes)?;
        if buf[0] != 0x02 && buf[0] != 0x03 {
            return Err(PrimitivesError::InvalidPublicKey(format!(
                "invalid prefix byte 0x{:02x}",
                buf[0]
            )));
        }
        VerifyingKey::from_sec1_bytes(&buf)
            .map_err(|e| PrimitivesError::InvalidPublicKey(e.to_string()))?;
        Ok(PubKey(buf))
    }

    /// Wrap bytes already produced by the curve library.
    pub(crate) fn from_verified(bytes: [u8; PUB_KEY_SIZE]) -> Self {
        PubKey(FixedBuf::new(bytes))
    }

    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        Self::from_bytes(&decode_strict_hex(hex_str)?)
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }

    pub fn as_bytes(&self) -> &[u8; PUB_KEY_SIZE] {
        self.0.as_array()
    }

    /// Hash of this key.
    pub fn pkh(&self) -> Pkh {
        Pkh::from_pub_key(self)
    }

    /// Encode as the `ebxpub` checked string.
    pub fn to_checked_str(&self) -> String {
        self.0.to_checked_str(PUB_KEY_PREFIX)
    }

    /// Decode an `ebxpub` checked string.
    ///
    /// Fails with `ChecksumMismatch` when the checksum does not match and
    /// `MalformedEncoding` for every other structural problem.
    pub fn from_checked_str(s: &str) -> Result<Self, PrimitivesError> {
        let buf = FixedBuf::<PUB_KEY_SIZE>::from_checked_str(PUB_KEY_PREFIX, s)?;
        Self::from_bytes(&buf)
    }

    /// Verify a signature over a 32-byte digest.
    pub fn verify_digest(&self, digest: &[u8; 32], sig: &Signature) -> bool {
        sig.verify(digest, self)
    }

    pub(crate) fn verifying_key(&self) -> Result<VerifyingKey, PrimitivesError> {
        VerifyingKey::from_sec1_bytes(&self.0)
            .map_err(|e| PrimitivesError::InvalidPublicKey(e.to_string()))
    }
}

impl fmt::Debug for PubKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PubKey({})", self.to_hex())
    }
}

impl fmt::Display for PubKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checked_str())
    }
}

impl FromStr for PubKey {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_checked_str(s)
    }
}

impl Serialize for PubKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_checked_str())
    }
}

impl<'de> Deserialize<'de> for PubKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_checked_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ec::PrivKey;

    const KNOWN: &str = "03f9bd9639017196c2558c96272d0ea9511cd61157185c98ae3109a28af058db7b";

    #[test]
    fn test_from_hex_valid() {
        let pub_key = PubKey::from_hex(KNOWN).unwrap();
        assert_eq!(pub_key.to_hex(), KNOWN);
    }

    #[test]
    fn test_rejects_bad_prefix_and_length() {
        let mut bytes = hex::decode(KNOWN).unwrap();
        bytes[0] = 0x04;
        assert!(matches!(
            PubKey::from_bytes(&bytes),
            Err(PrimitivesError::InvalidPublicKey(_))
        ));
        assert!(matches!(
            PubKey::from_bytes(&bytes[..32]),
            Err(PrimitivesError::SizeMismatch {
                expected: 33,
                got: 32,
            })
        ));
    }

    #[test]
    fn test_checked_str_roundtrip() {
        let pub_key = PrivKey::random().to_pub_key();
        let s = pub_key.to_checked_str();
        assert!(s.starts_with(PUB_KEY_PREFIX));
        assert_eq!(PubKey::from_checked_str(&s).unwrap(), pub_key);
        assert_eq!(s.parse::<PubKey>().unwrap(), pub_key);
    }

    #[test]
    fn test_pkh_string_is_not_a_pub_key() {
        let pub_key = PubKey::from_hex(KNOWN).unwrap();
        let pkh_str = pub_key.pkh().to_string();
        assert!(matches!(
            PubKey::from_checked_str(&pkh_str),
            Err(PrimitivesError::MalformedEncoding(_))
        ));
    }

    #[test]
    fn test_serde_checked_str() {
        let pub_key = PubKey::from_hex(KNOWN).unwrap();
        let json = serde_json::to_string(&pub_key).unwrap();
        let back: PubKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pub_key);
    }
}
