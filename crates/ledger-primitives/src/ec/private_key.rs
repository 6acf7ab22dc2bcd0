//! secp256k1 private key.
//!
//! Wraps a k256 signing key and adds the `ebxprv` checked string form and
//! deterministic (RFC6979) signing of prehashed digests.

use std::fmt;
use std::str::FromStr;

use k256::ecdsa::SigningKey;
use rand::rngs::OsRng;

use crate::buf::{decode_strict_hex, FixedBuf};
use crate::ec::public_key::PubKey;
use crate::ec::signature::Signature;
use crate::PrimitivesError;

/// Prefix of the checked string form of a private key.
pub const PRIV_KEY_PREFIX: &str = "ebxprv";

/// Length of a serialized private key in bytes.
pub const PRIV_KEY_SIZE: usize = 32;

/// A secp256k1 private key.
#[derive(Clone)]
pub struct PrivKey {
    inner: SigningKey,
}

impl PrivKey {
    /// Generate a new random private key using the OS random number generator.
    pub fn random() -> Self {
        PrivKey {
            inner: SigningKey::random(&mut OsRng),
        }
    }

    /// Create a private key from a raw 32-byte scalar.
    ///
    /// # Arguments
    /// * `bytes` - A 32-byte slice representing the private key scalar.
    ///
    /// # Returns
    /// `Ok(PrivKey)` if the bytes represent a valid non-zero scalar,
    /// `SizeMismatch` for the wrong length, or `InvalidPrivateKey`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        let buf = FixedBuf::<PRIV_KEY_SIZE>::from_slice(bytes)?;
        let inner = SigningKey::from_slice(buf.as_array())
            .map_err(|e| PrimitivesError::InvalidPrivateKey(e.to_string()))?;
        Ok(PrivKey { inner })
    }

    /// Create a private key from a lowercase hex string.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        Self::from_bytes(&decode_strict_hex(hex_str)?)
    }

    /// Serialize the private key scalar to 32 bytes.
    pub fn to_bytes(&self) -> [u8; PRIV_KEY_SIZE] {
        let mut out = [0u8; PRIV_KEY_SIZE];
        out.copy_from_slice(&self.inner.to_bytes());
        out
    }

    /// Serialize the private key scalar to hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Derive the compressed public key.
    pub fn to_pub_key(&self) -> PubKey {
        let point = self.inner.verifying_key().to_encoded_point(true);
        let mut out = [0u8; 33];
        out.copy_from_slice(point.as_bytes());
        PubKey::from_verified(out)
    }

    /// Encode as the `ebxprv` checked string.
    pub fn to_checked_str(&self) -> String {
        FixedBuf::new(self.to_bytes()).to_checked_str(PRIV_KEY_PREFIX)
    }

    /// Decode an `ebxprv` checked string.
    pub fn from_checked_str(s: &str) -> Result<Self, PrimitivesError> {
        let buf = FixedBuf::<PRIV_KEY_SIZE>::from_checked_str(PRIV_KEY_PREFIX, s)?;
        Self::from_bytes(buf.as_array())
    }

    /// Sign a 32-byte digest, producing a low-S compact signature.
    pub fn sign_digest(&self, digest: &[u8; 32]) -> Result<Signature, PrimitivesError> {
        Signature::sign(digest, self)
    }

    /// Access the underlying k256 signing key.
    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.inner
    }
}

impl PartialEq for PrivKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for PrivKey {}

impl fmt::Debug for PrivKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivKey(..)")
    }
}

impl fmt::Display for PrivKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checked_str())
    }
}

impl FromStr for PrivKey {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_checked_str(s)
    }
}
