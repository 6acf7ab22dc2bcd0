//! Transaction output: a value and the script that locks it.

use ledger_primitives::util::{ByteReader, ByteWriter};
use ledger_script::Script;

use crate::TransactionError;

/// A single output in a transaction.
///
/// # Wire format
///
/// | Field         | Size         |
/// |---------------|--------------|
/// | value         | 8 bytes (BE) |
/// | script length | VarInt       |
/// | script        | variable     |
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TxOutput {
    /// Amount locked by this output.
    pub value: u64,

    /// The locking script that defines spending conditions.
    pub script: Script,
}

impl TxOutput {
    /// Create an output locking `value` with `script`.
    pub fn new(value: u64, script: Script) -> Self {
        TxOutput { value, script }
    }

    /// Deserialize a `TxOutput` from a `ByteReader`.
    ///
    /// # Arguments
    /// * `reader` - The reader positioned at the start of an encoded output.
    ///
    /// # Returns
    /// `Ok(TxOutput)` on success, or a `TransactionError` if the data is
    /// truncated, the script length is not minimally encoded, or the script
    /// itself does not decode.
    pub fn read_from(reader: &mut ByteReader<'_>) -> Result<Self, TransactionError> {
        let value = reader.read_u64_be()?;
        let script_len = reader.read_minimal_varint()?;
        let script_bytes = reader.read_bytes(usize::try_from(script_len).unwrap_or(usize::MAX))?;
        Ok(TxOutput {
            value,
            script: Script::from_bytes(script_bytes)?,
        })
    }

    /// Serialize this output into a `ByteWriter`.
    pub fn write_to(&self, writer: &mut ByteWriter) {
        writer.write_u64_be(self.value);
        let script_bytes = self.script.to_bytes();
        writer.write_varint(script_bytes.len() as u64);
        writer.write_bytes(&script_bytes);
    }

    /// Serialize this output to a byte vector.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = ByteWriter::new();
        self.write_to(&mut writer);
        writer.into_bytes()
    }

    /// Parse exactly one output from `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        let mut reader = ByteReader::new(bytes);
        let output = Self::read_from(&mut reader)?;
        if !reader.is_empty() {
            return Err(TransactionError::Serialization(format!(
                "trailing {} bytes after output",
                reader.remaining()
            )));
        }
        Ok(output)
    }
}
