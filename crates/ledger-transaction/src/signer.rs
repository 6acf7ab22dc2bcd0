//! Per-input transaction signing.
//!
//! The signer resolves each input's spent output, classifies its script,
//! applies the time-lock policy, and fills the input's placeholder slots
//! with a signature and public key.

use ledger_primitives::ec::{KeyPair, Pkh};
use ledger_script::{OutputTemplate, Script};
use tracing::{debug, warn};

use crate::config::SignerConfig;
use crate::lookup::{KeyLookup, TxOutBn, UtxoLookup};
use crate::transaction::Tx;
use crate::{SignError, TransactionError};

/// Signs the inputs of one transaction in place.
///
/// Lookups are borrowed read-only for the lifetime of the signer; only the
/// inputs' scripts are mutated.
pub struct TxSigner<'a, U, K> {
    tx: &'a mut Tx,
    utxos: &'a U,
    keys: &'a K,
    config: SignerConfig,
}

impl<'a, U: UtxoLookup, K: KeyLookup> TxSigner<'a, U, K> {
    /// Create a signer over `tx`.
    ///
    /// # Arguments
    /// * `tx` - The transaction whose inputs will be filled in.
    /// * `utxos` - Spent outputs with their creation block numbers.
    /// * `keys` - Key pairs by key hash.
    /// * `config` - Working block number and hash type.
    pub fn new(tx: &'a mut Tx, utxos: &'a U, keys: &'a K, config: SignerConfig) -> Self {
        TxSigner {
            tx,
            utxos,
            keys,
            config,
        }
    }

    pub fn tx(&self) -> &Tx {
        self.tx
    }

    pub fn config(&self) -> &SignerConfig {
        &self.config
    }

    /// Sign input `index`.
    ///
    /// An expired time-locked output needs no signature: the input must
    /// already carry the expired form and is left unchanged.
    ///
    /// # Returns
    /// `Ok(())` once the input is signed (or needs no signature), otherwise
    /// the reason it could not be. The input is unchanged on failure.
    pub fn sign(&mut self, index: usize) -> Result<(), SignError> {
        let utxos = self.utxos;
        let input = self
            .tx
            .inputs
            .get(index)
            .ok_or(SignError::InputOutOfRange(index))?;

        let Some(tx_out_bn) = utxos.get(&input.prev_tx_id, input.prev_out_index) else {
            warn!(index, prev_out_index = input.prev_out_index, "spent output not found");
            return Err(SignError::OutputNotFound);
        };

        let Some(template) = tx_out_bn.tx_out.script.output_template() else {
            warn!(index, "spent output script matches no template");
            return Err(SignError::UnsupportedScriptType);
        };

        let working = self.config.working_block_num;
        match template {
            OutputTemplate::Pkh { pkh } => {
                expect_shape(&input.script, Script::is_pkh_input, SignError::UnexpectedInputShape)?;
                self.fill(index, &pkh, tx_out_bn)
            }
            OutputTemplate::Pkhx { pkh, lock } => {
                if lock.is_expired(working, tx_out_bn.block_num) {
                    expect_shape(
                        &input.script,
                        Script::is_expired_pkhx_input,
                        SignError::ExpectedExpiredInput,
                    )?;
                    debug!(index, ?lock, "time lock expired, nothing to sign");
                    return Ok(());
                }
                expect_shape(
                    &input.script,
                    Script::is_unexpired_pkhx_input,
                    SignError::ExpectedUnexpiredInput,
                )?;
                self.fill(index, &pkh, tx_out_bn)
            }
            OutputTemplate::Pkhxr { .. } => {
                warn!(index, "recovery outputs are not signed here");
                Err(SignError::UnsupportedScriptType)
            }
        }
    }

    /// Sign every input in ascending order, stopping at the first failure.
    ///
    /// Inputs signed before the failing one keep their signatures. Callers
    /// that need all-or-nothing behaviour should sign a clone.
    pub fn sign_all(&mut self) -> Result<(), TransactionError> {
        for index in 0..self.tx.inputs.len() {
            self.sign(index)
                .map_err(|source| TransactionError::SignInput { index, source })?;
        }
        Ok(())
    }

    /// Write the signature and public key into slots 0 and 1 of input
    /// `index`.
    fn fill(&mut self, index: usize, pkh: &Pkh, tx_out_bn: &TxOutBn) -> Result<(), SignError> {
        let keys = self.keys;
        let Some(key_pair) = keys.get(pkh) else {
            warn!(index, %pkh, "no key for output key hash");
            return Err(SignError::KeyNotFound);
        };

        let script_bytes = tx_out_bn.tx_out.script.to_bytes();
        let sig = self.tx.sign_input(
            index,
            &key_pair.priv_key,
            &script_bytes,
            tx_out_bn.tx_out.value,
            self.config.hash_type,
        )?;

        write_slots(&mut self.tx.inputs[index].script, &sig.to_bytes(), key_pair)?;
        debug!(index, %pkh, "signed input");
        Ok(())
    }
}

fn expect_shape(
    script: &Script,
    matches: fn(&Script) -> bool,
    err: SignError,
) -> Result<(), SignError> {
    if matches(script) {
        Ok(())
    } else {
        warn!(script = %script, "input script has the wrong shape");
        Err(err)
    }
}

fn write_slots(script: &mut Script, sig: &[u8], key_pair: &KeyPair) -> Result<(), SignError> {
    let chunks = script.chunks_mut();
    chunks[0].set_data(sig)?;
    chunks[1].set_data(&key_pair.pub_key.as_bytes()[..])?;
    Ok(())
}
