/// Transaction model and signer for the ledger core.
///
/// Provides the `Tx` type with inputs and outputs, binary/hex
/// serialization, signature hash computation, and `TxSigner` which fills
/// template placeholders with signatures.

pub mod config;
pub mod input;
pub mod lookup;
pub mod output;
pub mod sighash;
pub mod signature;
pub mod signer;
pub mod transaction;

mod error;
pub use config::SignerConfig;
pub use error::{SignError, TransactionError};
pub use input::TxInput;
pub use lookup::{KeyLookup, PkhKeyMap, TxOutBn, TxOutBnMap, UtxoLookup};
pub use output::TxOutput;
pub use signature::TxSignature;
pub use signer::TxSigner;
pub use transaction::Tx;
