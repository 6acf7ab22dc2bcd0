//! Core transaction type.
//!
//! Represents a complete transaction with version, inputs, outputs and lock
//! number. Supports binary and hex serialization, transaction ID
//! computation, coinbase detection, and per-input signature hashing.

use ledger_primitives::buf::decode_strict_hex;
use ledger_primitives::ec::{PrivKey, PubKey};
use ledger_primitives::hash::double_blake3_hash;
use ledger_primitives::util::{ByteReader, ByteWriter};

use crate::input::TxInput;
use crate::output::TxOutput;
use crate::sighash;
use crate::signature::TxSignature;
use crate::TransactionError;

/// A transaction consisting of a version, a set of inputs, a set of
/// outputs, and a lock number.
///
/// # Wire format
///
/// | Field        | Size                  |
/// |--------------|-----------------------|
/// | version      | 1 byte                |
/// | input count  | VarInt                |
/// | inputs       | variable (per input)  |
/// | output count | VarInt                |
/// | outputs      | variable (per output) |
/// | lock_num     | 8 bytes (BE)          |
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tx {
    /// Transaction format version.
    pub version: u8,

    /// Ordered list of inputs.
    pub inputs: Vec<TxInput>,

    /// Ordered list of outputs.
    pub outputs: Vec<TxOutput>,

    /// Block number before which the transaction is not valid.
    pub lock_num: u64,
}

impl Tx {
    /// Create an empty transaction.
    ///
    /// # Arguments
    /// * `version` - Transaction format version.
    /// * `lock_num` - Lock number.
    pub fn new(version: u8, lock_num: u64) -> Self {
        Tx {
            version,
            inputs: Vec::new(),
            outputs: Vec::new(),
            lock_num,
        }
    }

    pub fn add_input(&mut self, input: TxInput) {
        self.inputs.push(input);
    }

    pub fn add_output(&mut self, output: TxOutput) {
        self.outputs.push(output);
    }

    // -----------------------------------------------------------------
    // Deserialization
    // -----------------------------------------------------------------

    /// Parse a transaction from a lowercase hex string.
    pub fn from_hex(hex_str: &str) -> Result<Self, TransactionError> {
        let bytes = decode_strict_hex(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Parse a transaction from raw bytes.
    ///
    /// The slice must contain exactly one complete transaction with no
    /// trailing data.
    ///
    /// # Returns
    /// `Ok(Tx)` on success, or a `TransactionError` if the data is
    /// truncated, malformed, non-canonical, or has trailing bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        let mut reader = ByteReader::new(bytes);
        let tx = Self::read_from(&mut reader)?;
        if !reader.is_empty() {
            return Err(TransactionError::Serialization(format!(
                "trailing {} bytes after transaction",
                reader.remaining()
            )));
        }
        Ok(tx)
    }

    /// Deserialize a transaction from a `ByteReader`.
    ///
    /// Counts and script lengths must be minimally encoded. Allocation is
    /// bounded by the bytes actually available, not by the declared counts.
    pub fn read_from(reader: &mut ByteReader<'_>) -> Result<Self, TransactionError> {
        let version = reader.read_u8()?;

        let input_count = reader.read_minimal_varint()?;
        let mut inputs = Vec::with_capacity(capacity_hint(input_count, reader));
        for _ in 0..input_count {
            inputs.push(TxInput::read_from(reader)?);
        }

        let output_count = reader.read_minimal_varint()?;
        let mut outputs = Vec::with_capacity(capacity_hint(output_count, reader));
        for _ in 0..output_count {
            outputs.push(TxOutput::read_from(reader)?);
        }

        let lock_num = reader.read_u64_be()?;

        Ok(Tx {
            version,
            inputs,
            outputs,
            lock_num,
        })
    }

    // -----------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------

    pub fn write_to(&self, writer: &mut ByteWriter) {
        writer.write_u8(self.version);

        writer.write_varint(self.inputs.len() as u64);
        for input in &self.inputs {
            input.write_to(writer);
        }

        writer.write_varint(self.outputs.len() as u64);
        for output in &self.outputs {
            output.write_to(writer);
        }

        writer.write_u64_be(self.lock_num);
    }

    /// Serialize this transaction to raw bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = ByteWriter::with_capacity(256);
        self.write_to(&mut writer);
        writer.into_bytes()
    }

    /// Serialize this transaction to lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    // -----------------------------------------------------------------
    // Identity
    // -----------------------------------------------------------------

    /// Double blake3 of the serialized transaction.
    pub fn id(&self) -> [u8; 32] {
        double_blake3_hash(&self.to_bytes())
    }

    /// A coinbase transaction has exactly one input, and that input is
    /// itself coinbase.
    pub fn is_coinbase(&self) -> bool {
        matches!(self.inputs.as_slice(), [input] if input.is_coinbase())
    }

    // -----------------------------------------------------------------
    // Signature hash
    // -----------------------------------------------------------------

    /// Build the signature hash preimage for one input.
    ///
    /// See [`sighash::calc_preimage`] for the layout.
    pub fn sighash_preimage(
        &self,
        input_index: usize,
        script: &[u8],
        value: u64,
        hash_type: u8,
    ) -> Result<Vec<u8>, TransactionError> {
        sighash::calc_preimage(self, input_index, script, value, hash_type)
    }

    /// Compute the digest signed for one input.
    ///
    /// # Arguments
    /// * `input_index` - Index of the input being signed.
    /// * `script` - Script bytes of the output being spent.
    /// * `value` - Value of the output being spent.
    /// * `hash_type` - Must be `SIGHASH_ALL`.
    pub fn sighash(
        &self,
        input_index: usize,
        script: &[u8],
        value: u64,
        hash_type: u8,
    ) -> Result<[u8; 32], TransactionError> {
        sighash::signature_hash(self, input_index, script, value, hash_type)
    }

    /// Sign one input's sighash.
    ///
    /// # Returns
    /// The tagged signature; the input itself is left untouched.
    pub fn sign_input(
        &self,
        input_index: usize,
        priv_key: &PrivKey,
        script: &[u8],
        value: u64,
        hash_type: u8,
    ) -> Result<TxSignature, TransactionError> {
        let digest = self.sighash(input_index, script, value, hash_type)?;
        let sig = priv_key.sign_digest(&digest)?;
        Ok(TxSignature::new(hash_type, sig))
    }

    /// Check a signature for one input against `pub_key`.
    ///
    /// The sighash is recomputed with the hash type carried by `sig`.
    pub fn verify_input(
        &self,
        input_index: usize,
        pub_key: &PubKey,
        sig: &TxSignature,
        script: &[u8],
        value: u64,
    ) -> Result<bool, TransactionError> {
        let digest = self.sighash(input_index, script, value, sig.hash_type)?;
        Ok(pub_key.verify_digest(&digest, &sig.sig))
    }
}

/// Never reserve more entries than there are bytes left to read.
fn capacity_hint(count: u64, reader: &ByteReader<'_>) -> usize {
    usize::try_from(count)
        .unwrap_or(usize::MAX)
        .min(reader.remaining())
}

impl std::fmt::Display for Tx {
    /// Display the transaction as its hex-encoded serialization.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
