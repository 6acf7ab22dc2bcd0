/// Error types for transaction encoding, hashing and signing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransactionError {
    /// The bytes do not form exactly one transaction (e.g. trailing data).
    #[error("serialization error: {0}")]
    Serialization(String),
    /// Only `SIGHASH_ALL` is supported.
    #[error("unsupported sighash type: {0:#04x}")]
    UnsupportedSighashType(u8),
    /// A sighash or signature was requested for an input the transaction
    /// does not have.
    #[error("input index {index} out of range (tx has {count} inputs)")]
    InputIndexOutOfRange { index: usize, count: usize },
    /// Signing input `index` failed; inputs before it may already be signed.
    #[error("signing input {index} failed: {source}")]
    SignInput {
        index: usize,
        #[source]
        source: SignError,
    },
    /// An underlying script error (forwarded from `ledger-script`).
    #[error("script error: {0}")]
    Script(#[from] ledger_script::ScriptError),
    /// An underlying primitives error (forwarded from `ledger-primitives`).
    #[error("primitives error: {0}")]
    Primitives(#[from] ledger_primitives::PrimitivesError),
}

/// Why a single input could not be signed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignError {
    /// The spent output is not in the UTXO lookup.
    #[error("spent output not found")]
    OutputNotFound,
    /// The spent output's script is not a template the signer handles.
    #[error("unsupported output script type")]
    UnsupportedScriptType,
    /// The input script is not the placeholder the output template requires.
    #[error("unexpected input script shape")]
    UnexpectedInputShape,
    /// The output's lock has elapsed but the input is not the expired form.
    #[error("expected expired input script")]
    ExpectedExpiredInput,
    /// The output's lock is still running but the input is not the
    /// unexpired form.
    #[error("expected unexpired input script")]
    ExpectedUnexpiredInput,
    /// No key pair is known for the output's key hash.
    #[error("key not found for output key hash")]
    KeyNotFound,
    #[error("input index {0} out of range")]
    InputOutOfRange(usize),
    /// Hashing or signing the input failed.
    #[error(transparent)]
    Transaction(Box<TransactionError>),
}

impl From<TransactionError> for SignError {
    fn from(err: TransactionError) -> Self {
        SignError::Transaction(Box::new(err))
    }
}

impl From<ledger_script::ScriptError> for SignError {
    fn from(err: ledger_script::ScriptError) -> Self {
        SignError::Transaction(Box::new(err.into()))
    }
}

impl From<ledger_primitives::PrimitivesError> for SignError {
    fn from(err: ledger_primitives::PrimitivesError) -> Self {
        SignError::Transaction(Box::new(err.into()))
    }
}
