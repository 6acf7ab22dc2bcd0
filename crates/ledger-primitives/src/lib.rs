//! Cryptographic primitives and binary utilities for the ledger transaction core.
//!
//! This crate provides the foundational building blocks:
//! - `FixedBuf<N>` / `VarBuf` byte containers with strict hex
//! - Prefixed, checksummed Base58 strings
//! - BLAKE3 and double BLAKE3 hashing
//! - VarInt encoding with minimality checks, big-endian reader and writer
//! - secp256k1 keys, public-key hashes and compact signatures

pub mod base58;
pub mod buf;
pub mod ec;
pub mod hash;
pub mod util;

mod error;
pub use error::PrimitivesError;
