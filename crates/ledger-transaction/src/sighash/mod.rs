//! Signature hash computation for transaction signing.
//!
//! Computes the digest that is signed to authorize spending one input. The
//! preimage commits to the transaction version, every outpoint and sequence,
//! the position of the signed input, the spent output's script and value, all
//! outputs, the lock number and the hash type.

use ledger_primitives::hash::double_blake3_hash;
use ledger_primitives::util::ByteWriter;

use crate::transaction::Tx;
use crate::TransactionError;

// -----------------------------------------------------------------------
// Sighash type constants
// -----------------------------------------------------------------------

/// Sign all inputs and all outputs. The only supported type.
pub const SIGHASH_ALL: u8 = 0x01;

/// Reject hash types other than `SIGHASH_ALL`.
pub fn check_hash_type(hash_type: u8) -> Result<(), TransactionError> {
    if hash_type == SIGHASH_ALL {
        Ok(())
    } else {
        Err(TransactionError::UnsupportedSighashType(hash_type))
    }
}

// -----------------------------------------------------------------------
// Signature hash
// -----------------------------------------------------------------------

/// Compute the signature hash for a given input.
///
/// # Arguments
/// * `tx`          - The transaction being signed.
/// * `input_index` - Index of the input being signed.
/// * `script`      - Script bytes of the output being spent.
/// * `value`       - Value of the output being spent.
/// * `hash_type`   - Must be `SIGHASH_ALL`.
///
/// # Returns
/// The 32-byte double-blake3 digest of the preimage.
pub fn signature_hash(
    tx: &Tx,
    input_index: usize,
    script: &[u8],
    value: u64,
    hash_type: u8,
) -> Result<[u8; 32], TransactionError> {
    let preimage = calc_preimage(tx, input_index, script, value, hash_type)?;
    Ok(double_blake3_hash(&preimage))
}

/// Build the preimage bytes before hashing.
///
/// The preimage consists of:
/// 1. version (1 byte)
/// 2. hashPrevouts (32 bytes) - double blake3 of all outpoints
/// 3. hashSequence (32 bytes) - double blake3 of all sequences
/// 4. outpoint (32+4 bytes) - prev tx ID and index of the signed input
/// 5. inputIndex (4 bytes BE) - position of the signed input
/// 6. script (VarInt + script) - the spent output's script
/// 7. value (8 bytes BE) - value of the spent output
/// 8. sequence (4 bytes BE) - sequence of the signed input
/// 9. hashOutputs (32 bytes) - double blake3 of all serialized outputs
/// 10. lockNum (8 bytes BE)
/// 11. hashType (1 byte)
pub fn calc_preimage(
    tx: &Tx,
    input_index: usize,
    script: &[u8],
    value: u64,
    hash_type: u8,
) -> Result<Vec<u8>, TransactionError> {
    check_hash_type(hash_type)?;
    let out_of_range = TransactionError::InputIndexOutOfRange {
        index: input_index,
        count: tx.inputs.len(),
    };
    let position = u32::try_from(input_index).map_err(|_| out_of_range.clone())?;
    let input = tx.inputs.get(input_index).ok_or(out_of_range)?;

    let capacity = 1 + 32 * 4 + 4 + 4 + 9 + script.len() + 8 + 4 + 8 + 1;
    let mut writer = ByteWriter::with_capacity(capacity);
    writer.write_u8(tx.version);
    writer.write_bytes(&prevouts_hash(tx));
    writer.write_bytes(&sequence_hash(tx));
    writer.write_bytes(&input.prev_tx_id);
    writer.write_u32_be(input.prev_out_index);
    writer.write_u32_be(position);
    writer.write_varint(script.len() as u64);
    writer.write_bytes(script);
    writer.write_u64_be(value);
    writer.write_u32_be(input.sequence);
    writer.write_bytes(&outputs_hash(tx));
    writer.write_u64_be(tx.lock_num);
    writer.write_u8(hash_type);

    Ok(writer.into_bytes())
}

// -----------------------------------------------------------------------
// Internal helper functions
// -----------------------------------------------------------------------

/// Double blake3 of every outpoint, each `prev_tx_id || prev_out_index`.
fn prevouts_hash(tx: &Tx) -> [u8; 32] {
    let mut writer = ByteWriter::with_capacity(tx.inputs.len() * 36);
    for input in &tx.inputs {
        writer.write_bytes(&input.prev_tx_id);
        writer.write_u32_be(input.prev_out_index);
    }
    double_blake3_hash(writer.as_bytes())
}

fn sequence_hash(tx: &Tx) -> [u8; 32] {
    let mut writer = ByteWriter::with_capacity(tx.inputs.len() * 4);
    for input in &tx.inputs {
        writer.write_u32_be(input.sequence);
    }
    double_blake3_hash(writer.as_bytes())
}

fn outputs_hash(tx: &Tx) -> [u8; 32] {
    let mut writer = ByteWriter::new();
    for output in &tx.outputs {
        output.write_to(&mut writer);
    }
    double_blake3_hash(writer.as_bytes())
}
