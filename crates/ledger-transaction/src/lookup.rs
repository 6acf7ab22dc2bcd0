//! Read-only lookups the signer consumes: spent outputs by outpoint, and
//! key pairs by key hash.

use std::collections::HashMap;

use ledger_primitives::ec::{KeyPair, Pkh};

use crate::output::TxOutput;
use crate::transaction::Tx;

/// An unspent output together with the block number it was created in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxOutBn {
    pub tx_out: TxOutput,
    pub block_num: u64,
}

impl TxOutBn {
    pub fn new(tx_out: TxOutput, block_num: u64) -> Self {
        TxOutBn { tx_out, block_num }
    }
}

/// Resolves an outpoint to the output it names.
pub trait UtxoLookup {
    fn get(&self, tx_id: &[u8; 32], out_index: u32) -> Option<&TxOutBn>;
}

/// Resolves a key hash to the key pair that owns it.
pub trait KeyLookup {
    fn get(&self, pkh: &Pkh) -> Option<&KeyPair>;
}

// -----------------------------------------------------------------------
// In-memory implementations
// -----------------------------------------------------------------------

/// Unspent outputs keyed by `(tx_id, out_index)`.
#[derive(Clone, Debug, Default)]
pub struct TxOutBnMap {
    map: HashMap<([u8; 32], u32), TxOutBn>,
}

impl TxOutBnMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the output at `(tx_id, out_index)`.
    pub fn add(&mut self, tx_id: [u8; 32], out_index: u32, tx_out_bn: TxOutBn) {
        self.map.insert((tx_id, out_index), tx_out_bn);
    }

    pub fn remove(&mut self, tx_id: &[u8; 32], out_index: u32) -> Option<TxOutBn> {
        self.map.remove(&(*tx_id, out_index))
    }

    /// Register every output of `tx` as created at `block_num`.
    pub fn add_tx_outputs(&mut self, tx: &Tx, block_num: u64) {
        let tx_id = tx.id();
        for (index, output) in tx.outputs.iter().enumerate() {
            // output counts above u32::MAX cannot be referenced by an input
            let Ok(out_index) = u32::try_from(index) else {
                break;
            };
            self.add(tx_id, out_index, TxOutBn::new(output.clone(), block_num));
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl UtxoLookup for TxOutBnMap {
    fn get(&self, tx_id: &[u8; 32], out_index: u32) -> Option<&TxOutBn> {
        self.map.get(&(*tx_id, out_index))
    }
}

/// Key pairs keyed by the hash of their public key.
#[derive(Clone, Debug, Default)]
pub struct PkhKeyMap {
    map: HashMap<Pkh, KeyPair>,
}

impl PkhKeyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `key_pair` under its own key hash.
    pub fn add(&mut self, key_pair: KeyPair) {
        self.map.insert(key_pair.pkh(), key_pair);
    }

    pub fn remove(&mut self, pkh: &Pkh) -> Option<KeyPair> {
        self.map.remove(pkh)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl KeyLookup for PkhKeyMap {
    fn get(&self, pkh: &Pkh) -> Option<&KeyPair> {
        self.map.get(pkh)
    }
}
