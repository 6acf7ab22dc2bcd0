//! Owned byte containers with strict hex and checked string codecs.
//!
//! `FixedBuf<N>` holds exactly `N` bytes and can never be resized.
//! `VarBuf` holds any number of bytes and is used for pushdata payloads.
//! Both serialize to lowercase hex.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::base58;
use crate::PrimitivesError;

/// Decode a lowercase hex string.
///
/// Unlike `hex::decode`, uppercase digits are rejected so that every byte
/// string has exactly one textual form.
pub fn decode_strict_hex(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    if s.len() % 2 != 0 {
        return Err(PrimitivesError::InvalidHex("odd length".to_string()));
    }
    if let Some(c) = s.chars().find(|c| !matches!(c, '0'..='9' | 'a'..='f')) {
        return Err(PrimitivesError::InvalidHex(format!("invalid character {:?}", c)));
    }
    Ok(hex::decode(s)?)
}

// ---------------------------------------------------------------------------
// FixedBuf
// ---------------------------------------------------------------------------

/// Exactly `N` bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FixedBuf<const N: usize>([u8; N]);

impl<const N: usize> FixedBuf<N> {
    /// Number of bytes held.
    pub const SIZE: usize = N;

    /// Wrap an array of the right size.
    pub fn new(bytes: [u8; N]) -> Self {
        FixedBuf(bytes)
    }

    /// Copy a slice into a new buffer.
    ///
    /// # Arguments
    /// * `bytes` - A slice that must be exactly `N` bytes.
    ///
    /// # Returns
    /// `Ok(FixedBuf)` or `SizeMismatch` if the length differs.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        let arr: [u8; N] = bytes.try_into().map_err(|_| PrimitivesError::SizeMismatch {
            expected: N,
            got: bytes.len(),
        })?;
        Ok(FixedBuf(arr))
    }

    /// Parse lowercase hex of exactly `2 * N` characters.
    pub fn from_hex(s: &str) -> Result<Self, PrimitivesError> {
        Self::from_slice(&decode_strict_hex(s)?)
    }

    /// Encode as lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Encode as plain Base58.
    pub fn to_base58(&self) -> String {
        base58::encode(&self.0)
    }

    /// Decode plain Base58 that must yield exactly `N` bytes.
    pub fn from_base58(s: &str) -> Result<Self, PrimitivesError> {
        Self::from_slice(&base58::decode(s)?)
    }

    /// Encode as a prefixed checked string.
    pub fn to_checked_str(&self, prefix: &str) -> String {
        base58::check_encode(prefix, &self.0)
    }

    /// Decode a prefixed checked string holding exactly `N` bytes.
    pub fn from_checked_str(prefix: &str, s: &str) -> Result<Self, PrimitivesError> {
        let payload = base58::check_decode(prefix, N, s)?;
        Self::from_slice(&payload)
    }

    pub fn as_array(&self) -> &[u8; N] {
        &self.0
    }

    pub fn into_array(self) -> [u8; N] {
        self.0
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

impl<const N: usize> Default for FixedBuf<N> {
    fn default() -> Self {
        FixedBuf([0u8; N])
    }
}

impl<const N: usize> Deref for FixedBuf<N> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> AsRef<[u8]> for FixedBuf<N> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> From<[u8; N]> for FixedBuf<N> {
    fn from(bytes: [u8; N]) -> Self {
        FixedBuf(bytes)
    }
}

impl<const N: usize> TryFrom<&[u8]> for FixedBuf<N> {
    type Error = PrimitivesError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(bytes)
    }
}

impl<const N: usize> fmt::Debug for FixedBuf<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixedBuf<{}>({})", N, self.to_hex())
    }
}

impl<const N: usize> fmt::Display for FixedBuf<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl<const N: usize> FromStr for FixedBuf<N> {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// Serialize as a hex string in JSON.
impl<const N: usize> Serialize for FixedBuf<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Deserialize from a hex string in JSON.
impl<'de, const N: usize> Deserialize<'de> for FixedBuf<N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// VarBuf
// ---------------------------------------------------------------------------

/// A byte string of any length.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct VarBuf(Vec<u8>);

impl VarBuf {
    pub fn new(bytes: Vec<u8>) -> Self {
        VarBuf(bytes)
    }

    /// Parse lowercase hex.
    pub fn from_hex(s: &str) -> Result<Self, PrimitivesError> {
        Ok(VarBuf(decode_strict_hex(s)?))
    }

    /// Encode as lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl Deref for VarBuf {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for VarBuf {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for VarBuf {
    fn from(bytes: Vec<u8>) -> Self {
        VarBuf(bytes)
    }
}

impl From<&[u8]> for VarBuf {
    fn from(bytes: &[u8]) -> Self {
        VarBuf(bytes.to_vec())
    }
}

impl fmt::Debug for VarBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VarBuf({})", self.to_hex())
    }
}

impl Serialize for VarBuf {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for VarBuf {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slice_exact_length() {
        let buf = FixedBuf::<4>::from_slice(&[1, 2, 3, 4]).unwrap();
        assert_eq!(&*buf, &[1, 2, 3, 4]);
        assert_eq!(FixedBuf::<4>::SIZE, 4);
    }

    #[test]
    fn test_from_slice_wrong_length() {
        assert_eq!(
            FixedBuf::<4>::from_slice(&[1, 2, 3]),
            Err(PrimitivesError::SizeMismatch {
                expected: 4,
                got: 3,
            })
        );
        assert_eq!(
            FixedBuf::<4>::from_slice(&[0; 5]),
            Err(PrimitivesError::SizeMismatch {
                expected: 4,
                got: 5,
            })
        );
    }

    #[test]
    fn test_hex_roundtrip() {
        let buf = FixedBuf::<3>::from_hex("0aff10").unwrap();
        assert_eq!(buf.to_hex(), "0aff10");
        assert_eq!(buf.to_string(), "0aff10");
        assert_eq!("0aff10".parse::<FixedBuf<3>>().unwrap(), buf);
    }

    #[test]
    fn test_strict_hex_rejects() {
        assert!(matches!(decode_strict_hex("abc"), Err(PrimitivesError::InvalidHex(_))));
        assert!(matches!(decode_strict_hex("0G"), Err(PrimitivesError::InvalidHex(_))));
        assert!(matches!(decode_strict_hex("AB"), Err(PrimitivesError::InvalidHex(_))));
        assert_eq!(decode_strict_hex("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_from_hex_wrong_size() {
        assert!(matches!(
            FixedBuf::<2>::from_hex("000000"),
            Err(PrimitivesError::SizeMismatch {
                expected: 2,
                got: 3,
            })
        ));
    }

    #[test]
    fn test_base58_roundtrip() {
        let buf = FixedBuf::<8>::new([0, 0, 1, 2, 3, 4, 5, 6]);
        let s = buf.to_base58();
        assert!(s.starts_with("11"));
        assert_eq!(FixedBuf::<8>::from_base58(&s).unwrap(), buf);
        assert!(FixedBuf::<9>::from_base58(&s).is_err());
    }

    #[test]
    fn test_checked_str_roundtrip() {
        let buf = FixedBuf::<32>::new([0xab; 32]);
        let s = buf.to_checked_str("ebxpkh");
        assert_eq!(FixedBuf::<32>::from_checked_str("ebxpkh", &s).unwrap(), buf);
        assert!(FixedBuf::<33>::from_checked_str("ebxpkh", &s).is_err());
    }

    #[test]
    fn test_serde_hex() {
        let buf = FixedBuf::<2>::new([0xde, 0xad]);
        let json = serde_json::to_string(&buf).unwrap();
        assert_eq!(json, "\"dead\"");
        let back: FixedBuf<2> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, buf);
        assert!(serde_json::from_str::<FixedBuf<3>>(&json).is_err());

        let var = VarBuf::from_hex("0102").unwrap();
        let json = serde_json::to_string(&var).unwrap();
        assert_eq!(json, "\"0102\"");
        assert_eq!(serde_json::from_str::<VarBuf>(&json).unwrap(), var);
    }

    #[test]
    fn test_var_buf_any_length() {
        assert!(VarBuf::from_hex("").unwrap().is_empty());
        assert_eq!(VarBuf::from(vec![1u8; 300]).len(), 300);
    }
}
