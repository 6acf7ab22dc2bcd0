/// Script type - an ordered sequence of opcode and push-data chunks.
///
/// Scripts lock transaction outputs and unlock them from inputs. The binary
/// form is the concatenation of each chunk's encoding; the text form is the
/// chunks' tokens separated by single spaces.

use std::fmt;

use ledger_primitives::buf::decode_strict_hex;
use ledger_primitives::util::{ByteReader, ByteWriter};

use crate::chunk::ScriptChunk;
use crate::opcodes::*;
use crate::ScriptError;

/// A script, held as parsed chunks.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Script {
    chunks: Vec<ScriptChunk>,
}

impl Script {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Create a new empty script.
    pub fn new() -> Self {
        Script { chunks: Vec::new() }
    }

    /// Create a script from its chunks.
    pub fn from_chunks(chunks: Vec<ScriptChunk>) -> Self {
        Script { chunks }
    }

    /// Decode a script from its binary form.
    ///
    /// # Arguments
    /// * `bytes` - Raw script bytes; all of them belong to the script.
    ///
    /// # Returns
    /// The parsed `Script`, or an error if a push runs past the end or uses
    /// a non-minimal PUSHDATA length.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ScriptError> {
        let mut reader = ByteReader::new(bytes);
        let mut chunks = Vec::new();
        while !reader.is_empty() {
            chunks.push(ScriptChunk::read_from(&mut reader)?);
        }
        Ok(Script { chunks })
    }

    /// Decode a script from lowercase hex.
    pub fn from_hex(hex_str: &str) -> Result<Self, ScriptError> {
        Self::from_bytes(&decode_strict_hex(hex_str)?)
    }

    /// Parse the text form of a script.
    ///
    /// Tokens are separated by whitespace. Each token is either an opcode
    /// name (case-sensitive, no `OP_` prefix) or `0x<hex>` push data.
    ///
    /// # Arguments
    /// * `asm` - The text form, e.g. `"DUP DOUBLEBLAKE3 0x1234"`.
    ///
    /// # Returns
    /// A `Script`, or an error naming the first unrecognized token.
    pub fn from_asm(asm: &str) -> Result<Self, ScriptError> {
        let chunks = asm
            .split_whitespace()
            .map(ScriptChunk::from_asm_token)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Script { chunks })
    }

    // -----------------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------------

    /// Append the binary form of this script (without a length prefix).
    pub fn write_to(&self, writer: &mut ByteWriter) {
        for chunk in &self.chunks {
            chunk.write_to(writer);
        }
    }

    /// Encode the script to bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = ByteWriter::new();
        self.write_to(&mut writer);
        writer.into_bytes()
    }

    /// Encode the script as lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Render the text form of the script.
    ///
    /// # Returns
    /// Space-separated tokens, or `InvalidOpcode` if a chunk holds an
    /// opcode with no name.
    pub fn to_asm(&self) -> Result<String, ScriptError> {
        let tokens = self
            .chunks
            .iter()
            .map(ScriptChunk::to_asm_token)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tokens.join(" "))
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn chunks(&self) -> &[ScriptChunk] {
        &self.chunks
    }

    /// Mutable access to the chunks, used to fill signature placeholders.
    pub fn chunks_mut(&mut self) -> &mut [ScriptChunk] {
        &mut self.chunks
    }

    pub fn into_chunks(self) -> Vec<ScriptChunk> {
        self.chunks
    }

    pub fn push_chunk(&mut self, chunk: ScriptChunk) {
        self.chunks.push(chunk);
    }

    /// Number of chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Whether every chunk is a push or a small-number opcode.
    pub fn is_push_only(&self) -> bool {
        self.chunks.iter().all(|chunk| chunk.op() <= OP_16)
    }
}

impl From<Vec<ScriptChunk>> for Script {
    fn from(chunks: Vec<ScriptChunk>) -> Self {
        Script::from_chunks(chunks)
    }
}

impl fmt::Display for Script {
    /// Display the script as a lowercase hex string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_asm() {
            Ok(asm) => write!(f, "Script({})", asm),
            Err(_) => write!(f, "Script({})", self.to_hex()),
        }
    }
}

impl serde::Serialize for Script {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Script {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Script::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
