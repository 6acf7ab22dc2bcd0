#![deny(missing_docs)]

//! Ledger transaction core - complete SDK.
//!
//! Re-exports the primitives, script and transaction crates for
//! single-crate usage, and provides a tracing subscriber initializer.

pub use ledger_primitives as primitives;
pub use ledger_script as script;
pub use ledger_transaction as transaction;

pub mod logging;
