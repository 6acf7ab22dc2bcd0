//! Script chunk parsing and encoding.
//!
//! A script chunk is either a bare opcode or a data push carrying the push
//! opcode and its payload. New pushes always use PUSHDATA1, PUSHDATA2 or
//! PUSHDATA4 chosen by payload size; decoding also accepts the direct-push
//! opcodes `0x01..=0x4b` and keeps them, so binary round-trips are exact.

use ledger_primitives::buf::VarBuf;
use ledger_primitives::util::{ByteReader, ByteWriter};

use crate::opcodes::*;
use crate::ScriptError;

/// Largest direct-push opcode; the opcode byte is the payload length.
pub const MAX_DIRECT_PUSH: u8 = 0x4b;

/// A single element of a script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScriptChunk {
    /// A non-push opcode such as `DUP` or `0`.
    Opcode(u8),
    /// A data push: the push opcode and the pushed bytes.
    Push { op: u8, data: VarBuf },
}

impl ScriptChunk {
    pub fn from_opcode(op: u8) -> Self {
        ScriptChunk::Opcode(op)
    }

    /// Build a data push, selecting PUSHDATA1/2/4 by payload size.
    ///
    /// # Arguments
    /// * `data` - The payload to push.
    ///
    /// # Returns
    /// The push chunk, or `DataTooBig` if the payload exceeds `u32::MAX` bytes.
    pub fn from_data(data: impl Into<VarBuf>) -> Result<Self, ScriptError> {
        let data = data.into();
        let op = push_opcode_for_len(data.len())?;
        Ok(ScriptChunk::Push { op, data })
    }

    /// Build the opcode for a small integer in `-1..=16`.
    pub fn from_small_number(n: i8) -> Option<Self> {
        match n {
            -1 => Some(ScriptChunk::Opcode(OP_1NEGATE)),
            0 => Some(ScriptChunk::Opcode(OP_0)),
            1..=16 => Some(ScriptChunk::Opcode(OP_1 + (n as u8) - 1)),
            _ => None,
        }
    }

    /// The opcode byte of this chunk.
    pub fn op(&self) -> u8 {
        match self {
            ScriptChunk::Opcode(op) => *op,
            ScriptChunk::Push { op, .. } => *op,
        }
    }

    /// The pushed payload, if this chunk is a push.
    pub fn data(&self) -> Option<&[u8]> {
        match self {
            ScriptChunk::Opcode(_) => None,
            ScriptChunk::Push { data, .. } => Some(data.as_slice()),
        }
    }

    pub fn is_push(&self) -> bool {
        matches!(self, ScriptChunk::Push { .. })
    }

    /// Replace this chunk with a push of `data`.
    pub fn set_data(&mut self, data: impl Into<VarBuf>) -> Result<(), ScriptError> {
        *self = Self::from_data(data)?;
        Ok(())
    }

    /// Decode one chunk from a reader.
    ///
    /// # Returns
    /// The chunk, `TruncatedInput` (wrapped) if the payload runs past the end
    /// of the data, or `NonMinimalPush` for a PUSHDATA2/4 length that would
    /// fit a smaller push opcode.
    pub fn read_from(reader: &mut ByteReader<'_>) -> Result<Self, ScriptError> {
        let op = reader.read_u8()?;
        let len = match op {
            0x01..=MAX_DIRECT_PUSH => op as usize,
            OP_PUSHDATA1 => reader.read_u8()? as usize,
            OP_PUSHDATA2 => {
                let len = reader.read_u16_be()?;
                if len <= u8::MAX as u16 {
                    return Err(ScriptError::NonMinimalPush);
                }
                len as usize
            }
            OP_PUSHDATA4 => {
                let len = reader.read_u32_be()?;
                if len <= u16::MAX as u32 {
                    return Err(ScriptError::NonMinimalPush);
                }
                len as usize
            }
            _ => return Ok(ScriptChunk::Opcode(op)),
        };
        let data = reader.read_bytes(len)?;
        Ok(ScriptChunk::Push {
            op,
            data: VarBuf::from(data),
        })
    }

    /// Append the wire encoding of this chunk.
    ///
    /// A push whose opcode cannot describe its payload length is written
    /// with the opcode `from_data` would have chosen.
    pub fn write_to(&self, writer: &mut ByteWriter) {
        match self {
            ScriptChunk::Opcode(op) => writer.write_u8(*op),
            ScriptChunk::Push { op, data } => {
                let len = data.len();
                let op = if push_opcode_fits(*op, len) {
                    *op
                } else {
                    // lengths above u32::MAX never reach a Push
                    push_opcode_for_len(len).unwrap_or(OP_PUSHDATA4)
                };
                writer.write_u8(op);
                match op {
                    OP_PUSHDATA1 => writer.write_u8(len as u8),
                    OP_PUSHDATA2 => writer.write_u16_be(len as u16),
                    OP_PUSHDATA4 => writer.write_u32_be(len as u32),
                    _ => {}
                }
                writer.write_bytes(data);
            }
        }
    }

    /// Encode this chunk on its own.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = ByteWriter::new();
        self.write_to(&mut writer);
        writer.into_bytes()
    }

    /// Render this chunk as a text token: `0x<hex>` for pushes, the opcode
    /// name otherwise.
    pub fn to_asm_token(&self) -> Result<String, ScriptError> {
        match self {
            ScriptChunk::Push { data, .. } => Ok(format!("0x{}", data.to_hex())),
            ScriptChunk::Opcode(op) => opcode_to_name(*op)
                .filter(|_| !is_push_opcode(*op))
                .map(str::to_string)
                .ok_or(ScriptError::InvalidOpcode(*op)),
        }
    }

    /// Parse a single text token.
    ///
    /// `0x<hex>` becomes a push (hex must be lowercase and even-length);
    /// anything else must be an exact opcode name. The bare PUSHDATA names
    /// are rejected since they cannot stand without a payload.
    pub fn from_asm_token(token: &str) -> Result<Self, ScriptError> {
        if let Some(hex) = token.strip_prefix("0x") {
            return Self::from_data(VarBuf::from_hex(hex)?);
        }
        match name_to_opcode(token) {
            Some(op) if is_push_opcode(op) => Err(ScriptError::InvalidOpcode(op)),
            Some(op) => Ok(ScriptChunk::Opcode(op)),
            None => Err(ScriptError::UnknownToken(token.to_string())),
        }
    }
}

/// Select the push opcode for a payload of `len` bytes.
pub fn push_opcode_for_len(len: usize) -> Result<u8, ScriptError> {
    if len <= u8::MAX as usize {
        Ok(OP_PUSHDATA1)
    } else if len <= u16::MAX as usize {
        Ok(OP_PUSHDATA2)
    } else if len <= u32::MAX as usize {
        Ok(OP_PUSHDATA4)
    } else {
        Err(ScriptError::DataTooBig(len))
    }
}

/// Whether `op` is a direct push or one of the PUSHDATA opcodes.
pub fn is_push_opcode(op: u8) -> bool {
    (0x01..=OP_PUSHDATA4).contains(&op)
}

fn push_opcode_fits(op: u8, len: usize) -> bool {
    match op {
        0x01..=MAX_DIRECT_PUSH => op as usize == len,
        OP_PUSHDATA1 => len <= u8::MAX as usize,
        OP_PUSHDATA2 => len <= u16::MAX as usize,
        OP_PUSHDATA4 => len <= u32::MAX as usize,
        _ => false,
    }
}
