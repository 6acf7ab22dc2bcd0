/// Unified error type for all primitives operations.
///
/// Covers errors from buffer construction, string encodings, binary decoding
/// and key handling.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrimitivesError {
    #[error("size mismatch: expected {expected} bytes, got {got}")]
    SizeMismatch { expected: usize, got: usize },

    #[error("malformed encoding: {0}")]
    MalformedEncoding(String),

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("checksum mismatch")]
    ChecksumMismatch,

    #[error("truncated input: needed {needed} bytes, {available} available")]
    TruncatedInput { needed: usize, available: usize },

    #[error("non-minimal varint encoding")]
    NonMinimalVarInt,

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),
}

impl From<hex::FromHexError> for PrimitivesError {
    fn from(e: hex::FromHexError) -> Self {
        PrimitivesError::InvalidHex(e.to_string())
    }
}
