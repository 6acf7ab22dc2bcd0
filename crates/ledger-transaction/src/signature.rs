//! Transaction signatures: a hash-type byte followed by a compact ECDSA
//! signature.

use ledger_primitives::ec::signature::COMPACT_SIZE;
use ledger_primitives::ec::Signature;
use ledger_primitives::PrimitivesError;

use crate::sighash::check_hash_type;
use crate::TransactionError;

/// Encoded size of a `TxSignature`.
pub const TX_SIGNATURE_SIZE: usize = 1 + COMPACT_SIZE;

/// A signature over one input's sighash, tagged with the hash type used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TxSignature {
    pub hash_type: u8,
    pub sig: Signature,
}

impl TxSignature {
    pub fn new(hash_type: u8, sig: Signature) -> Self {
        TxSignature { hash_type, sig }
    }

    /// Encode as `hash_type || r || s`.
    pub fn to_bytes(&self) -> [u8; TX_SIGNATURE_SIZE] {
        let mut out = [0u8; TX_SIGNATURE_SIZE];
        out[0] = self.hash_type;
        out[1..].copy_from_slice(&self.sig.to_compact());
        out
    }

    /// Decode a 65-byte transaction signature.
    ///
    /// # Returns
    /// `SizeMismatch` for any other length, `UnsupportedSighashType` for a
    /// hash type other than `SIGHASH_ALL`, or `InvalidSignature` if the
    /// scalars are out of range.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        if bytes.len() != TX_SIGNATURE_SIZE {
            return Err(PrimitivesError::SizeMismatch {
                expected: TX_SIGNATURE_SIZE,
                got: bytes.len(),
            }
            .into());
        }
        check_hash_type(bytes[0])?;
        Ok(TxSignature {
            hash_type: bytes[0],
            sig: Signature::from_compact(&bytes[1..])?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sighash::SIGHASH_ALL;
    use ledger_primitives::ec::PrivKey;

    #[test]
    fn test_bytes_roundtrip() {
        let key = PrivKey::random();
        let sig = key.sign_digest(&[9u8; 32]).expect("sign");
        let tx_sig = TxSignature::new(SIGHASH_ALL, sig);
        let bytes = tx_sig.to_bytes();
        assert_eq!(bytes[0], SIGHASH_ALL);
        assert_eq!(TxSignature::from_bytes(&bytes).unwrap(), tx_sig);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(
            TxSignature::from_bytes(&[1u8; 64]),
            Err(TransactionError::Primitives(PrimitivesError::SizeMismatch {
                expected: 65,
                got: 64,
            }))
        ));
        let mut bytes = [1u8; TX_SIGNATURE_SIZE];
        bytes[0] = 0x41;
        assert_eq!(
            TxSignature::from_bytes(&bytes),
            Err(TransactionError::UnsupportedSighashType(0x41))
        );
    }
}
