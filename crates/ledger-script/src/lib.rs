/// Script model for the ledger transaction core.
///
/// Provides opcode definitions, script chunk encoding, the `Script` type with
/// binary and text round-trips, and recognition of the spend templates the
/// signer understands.

pub mod chunk;
pub mod opcodes;
pub mod script;
pub mod template;

mod error;
pub use chunk::ScriptChunk;
pub use error::ScriptError;
pub use script::Script;
pub use template::{OutputTemplate, PkhxLock, PkhxrLock};
