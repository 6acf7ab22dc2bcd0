//! Public-key hash.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::buf::FixedBuf;
use crate::ec::public_key::PubKey;
use crate::hash::double_blake3_hash;
use crate::PrimitivesError;

/// Prefix of the checked string form of a public-key hash.
pub const PKH_PREFIX: &str = "ebxpkh";

/// Length of a public-key hash in bytes.
pub const PKH_SIZE: usize = 32;

/// Double BLAKE3 of a compressed public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pkh(FixedBuf<PKH_SIZE>);

impl Pkh {
    pub fn new(bytes: [u8; PKH_SIZE]) -> Self {
        Pkh(FixedBuf::new(bytes))
    }

    /// Hash a public key.
    pub fn from_pub_key(pub_key: &PubKey) -> Self {
        Self::from_pub_key_bytes(pub_key.as_bytes())
    }

    /// Hash the 33-byte encoding of a public key.
    pub fn from_pub_key_bytes(pub_key: &[u8; 33]) -> Self {
        Pkh::new(double_blake3_hash(pub_key))
    }

    /// Wrap an existing 32-byte hash.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        Ok(Pkh(FixedBuf::from_slice(bytes)?))
    }

    pub fn as_bytes(&self) -> &[u8; PKH_SIZE] {
        self.0.as_array()
    }

    pub fn to_checked_str(&self) -> String {
        self.0.to_checked_str(PKH_PREFIX)
    }

    /// Decode an `ebxpkh` checked string.
    pub fn from_checked_str(s: &str) -> Result<Self, PrimitivesError> {
        Ok(Pkh(FixedBuf::from_checked_str(PKH_PREFIX, s)?))
    }
}

impl fmt::Debug for Pkh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pkh({})", self.0.to_hex())
    }
}

impl fmt::Display for Pkh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checked_str())
    }
}

impl FromStr for Pkh {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_checked_str(s)
    }
}

impl Serialize for Pkh {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_checked_str())
    }
}

impl<'de> Deserialize<'de> for Pkh {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_checked_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base58;
    use crate::hash::blake3_hash;

    fn known_pub_key() -> PubKey {
        PubKey::from_hex("03f9bd9639017196c2558c96272d0ea9511cd61157185c98ae3109a28af058db7b")
            .unwrap()
    }

    #[test]
    fn test_pkh_is_double_hash() {
        let pub_key = known_pub_key();
        let pkh = Pkh::from_pub_key(&pub_key);
        assert_eq!(pkh.as_bytes(), &blake3_hash(&blake3_hash(pub_key.as_bytes())));
    }

    #[test]
    fn test_string_roundtrip() {
        let pkh = Pkh::from_pub_key(&known_pub_key());
        let s = pkh.to_string();
        assert!(s.starts_with(PKH_PREFIX));
        assert_eq!(s.parse::<Pkh>().unwrap(), pkh);
    }

    #[test]
    fn test_checksum_mismatch_is_distinct() {
        let pkh = Pkh::new([5u8; 32]);
        let sum = base58::checksum(pkh.as_bytes());
        let tampered = [sum[0], sum[1], sum[2], sum[3].wrapping_add(1)];
        let s = format!(
            "{}{}{}",
            PKH_PREFIX,
            hex::encode(tampered),
            base58::encode(pkh.as_bytes())
        );
        assert_eq!(Pkh::from_checked_str(&s), Err(PrimitivesError::ChecksumMismatch));

        let s = format!("{}{}!!", PKH_PREFIX, hex::encode(sum));
        assert!(matches!(
            Pkh::from_checked_str(&s),
            Err(PrimitivesError::MalformedEncoding(_))
        ));
    }

    #[test]
    fn test_pub_key_string_is_not_a_pkh() {
        let s = known_pub_key().to_checked_str();
        assert!(matches!(
            Pkh::from_checked_str(&s),
            Err(PrimitivesError::MalformedEncoding(_))
        ));
    }
}
