/// Error types for script operations.
///
/// Covers binary decoding, text parsing and push-data construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    /// An opcode with no text name, or a bare push opcode outside a push.
    #[error("invalid opcode: 0x{0:02x}")]
    InvalidOpcode(u8),

    /// A text token that is neither an opcode name nor `0x<hex>` data.
    #[error("unknown token: {0}")]
    UnknownToken(String),

    /// A PUSHDATA2 or PUSHDATA4 length that fits a smaller push opcode.
    #[error("non-minimal push data length")]
    NonMinimalPush,

    /// Push data longer than a PUSHDATA4 length can describe.
    #[error("data too big: {0} bytes")]
    DataTooBig(usize),

    /// Error from primitives crate.
    #[error("primitives error: {0}")]
    Primitives(#[from] ledger_primitives::PrimitivesError),
}
