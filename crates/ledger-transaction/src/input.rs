//! Transaction input referencing a previous output.
//!
//! Contains the spent transaction ID and output index, the unlocking
//! script, and the sequence number.

use ledger_primitives::util::{ByteReader, ByteWriter};
use ledger_script::Script;

use crate::TransactionError;

/// Sequence number marking a finalized input.
pub const DEFAULT_SEQUENCE: u32 = 0xFFFF_FFFF;

/// Output index carried by a null (coinbase) input.
pub const NULL_OUT_INDEX: u32 = 0xFFFF_FFFF;

/// A single input in a transaction.
///
/// The script starts out as a template placeholder and is filled in by the
/// signer.
///
/// # Wire format
///
/// | Field          | Size         |
/// |----------------|--------------|
/// | prev_tx_id     | 32 bytes     |
/// | prev_out_index | 4 bytes (BE) |
/// | script length  | VarInt       |
/// | script         | variable     |
/// | sequence       | 4 bytes (BE) |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxInput {
    /// ID of the transaction holding the spent output.
    pub prev_tx_id: [u8; 32],

    /// Index of the spent output within that transaction.
    pub prev_out_index: u32,

    /// The unlocking script.
    pub script: Script,

    /// Sequence number. Defaults to `0xFFFFFFFF` (final).
    pub sequence: u32,
}

impl TxInput {
    /// Create an input spending `prev_out_index` of `prev_tx_id` with a
    /// final sequence number.
    ///
    /// # Arguments
    /// * `prev_tx_id` - ID of the transaction holding the spent output.
    /// * `prev_out_index` - Output index within that transaction.
    /// * `script` - The unlocking script, usually a placeholder.
    pub fn new(prev_tx_id: [u8; 32], prev_out_index: u32, script: Script) -> Self {
        TxInput {
            prev_tx_id,
            prev_out_index,
            script,
            sequence: DEFAULT_SEQUENCE,
        }
    }

    /// Create the single input of a coinbase transaction.
    pub fn from_coinbase(script: Script) -> Self {
        Self::new([0u8; 32], NULL_OUT_INDEX, script)
    }

    /// An all-zero previous tx ID with the null output index.
    pub fn is_null(&self) -> bool {
        self.prev_tx_id == [0u8; 32] && self.prev_out_index == NULL_OUT_INDEX
    }

    /// Sequence number is `0xFFFFFFFF`.
    pub fn is_final(&self) -> bool {
        self.sequence == DEFAULT_SEQUENCE
    }

    pub fn is_coinbase(&self) -> bool {
        self.is_null() && self.is_final()
    }

    /// Deserialize a `TxInput` from a `ByteReader`.
    ///
    /// # Arguments
    /// * `reader` - The reader positioned at the start of an encoded input.
    ///
    /// # Returns
    /// `Ok(TxInput)` on success, or a `TransactionError` if the data is
    /// truncated or malformed.
    pub fn read_from(reader: &mut ByteReader<'_>) -> Result<Self, TransactionError> {
        let prev_tx_id = reader.read_array::<32>()?;
        let prev_out_index = reader.read_u32_be()?;
        let script_len = reader.read_minimal_varint()?;
        let script_bytes = reader.read_bytes(usize::try_from(script_len).unwrap_or(usize::MAX))?;
        let script = Script::from_bytes(script_bytes)?;
        let sequence = reader.read_u32_be()?;

        Ok(TxInput {
            prev_tx_id,
            prev_out_index,
            script,
            sequence,
        })
    }

    /// Serialize this input into a `ByteWriter`.
    pub fn write_to(&self, writer: &mut ByteWriter) {
        writer.write_bytes(&self.prev_tx_id);
        writer.write_u32_be(self.prev_out_index);
        let script_bytes = self.script.to_bytes();
        writer.write_varint(script_bytes.len() as u64);
        writer.write_bytes(&script_bytes);
        writer.write_u32_be(self.sequence);
    }

    /// Serialize this input to a byte vector.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = ByteWriter::new();
        self.write_to(&mut writer);
        writer.into_bytes()
    }

    /// Parse exactly one input from `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        let mut reader = ByteReader::new(bytes);
        let input = Self::read_from(&mut reader)?;
        if !reader.is_empty() {
            return Err(TransactionError::Serialization(format!(
                "trailing {} bytes after input",
                reader.remaining()
            )));
        }
        Ok(input)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Parse an input from lowercase hex.
    pub fn from_hex(hex_str: &str) -> Result<Self, TransactionError> {
        let bytes = ledger_primitives::buf::decode_strict_hex(hex_str)?;
        Self::from_bytes(&bytes)
    }
}
