//! Utility types for binary serialization.
//!
//! Provides VarInt encoding/decoding plus the `ByteReader` and `ByteWriter`
//! cursors used by every wire codec in the workspace. All fixed-width
//! integers on the wire are big-endian, including the trailing width bytes
//! of a VarInt.

use crate::PrimitivesError;

// ---------------------------------------------------------------------------
// VarInt
// ---------------------------------------------------------------------------

/// A variable-length integer together with the width it was encoded in.
///
/// Values below `0xfd` take a single byte; larger values are prefixed with
/// `0xfd`, `0xfe` or `0xff` followed by 2, 4 or 8 big-endian bytes. Values
/// built with [`VarInt::new`] always use the minimal width. Decoded values
/// remember the width they arrived in, so a wider-than-necessary encoding is
/// reproduced byte for byte and can be detected with [`VarInt::is_minimal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarInt {
    value: u64,
    width: usize,
}

impl VarInt {
    /// Create a VarInt with the minimal encoding for `value`.
    pub fn new(value: u64) -> Self {
        VarInt {
            value,
            width: minimal_length(value),
        }
    }

    /// Decode a VarInt from the start of a byte slice.
    ///
    /// # Arguments
    /// * `data` - Byte slice starting with a VarInt encoding.
    ///
    /// # Returns
    /// A tuple of `(VarInt, bytes_consumed)`, or `TruncatedInput` if the
    /// slice is shorter than the width announced by the first byte.
    pub fn decode(data: &[u8]) -> Result<(Self, usize), PrimitivesError> {
        let mut reader = ByteReader::new(data);
        let varint = reader.read_varint()?;
        Ok((varint, varint.width))
    }

    /// Read a VarInt from a reader, preserving its encoded width.
    pub fn read_from(reader: &mut ByteReader<'_>) -> Result<Self, PrimitivesError> {
        reader.read_varint()
    }

    /// Return the decoded integer value.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Return the byte length of this VarInt as it is (or was) encoded.
    pub fn length(&self) -> usize {
        self.width
    }

    /// Whether this VarInt uses the smallest width able to hold its value.
    pub fn is_minimal(&self) -> bool {
        self.width == minimal_length(self.value)
    }

    /// Return the encoded bytes, in the width this VarInt carries.
    ///
    /// # Returns
    /// A `Vec<u8>` of 1, 3, 5, or 9 bytes.
    pub fn encoded(&self) -> Vec<u8> {
        let v = self.value;
        match self.width {
            1 => vec![v as u8],
            3 => {
                let mut buf = vec![0xfd];
                buf.extend_from_slice(&(v as u16).to_be_bytes());
                buf
            }
            5 => {
                let mut buf = vec![0xfe];
                buf.extend_from_slice(&(v as u32).to_be_bytes());
                buf
            }
            _ => {
                let mut buf = vec![0xff];
                buf.extend_from_slice(&v.to_be_bytes());
                buf
            }
        }
    }
}

impl From<u64> for VarInt {
    fn from(v: u64) -> Self {
        VarInt::new(v)
    }
}

impl From<usize> for VarInt {
    fn from(v: usize) -> Self {
        VarInt::new(v as u64)
    }
}

/// Encode `value` in its minimal VarInt form.
pub fn encode(value: u64) -> Vec<u8> {
    VarInt::new(value).encoded()
}

/// Byte length of the minimal VarInt encoding of `value`.
pub fn minimal_length(value: u64) -> usize {
    if value < 0xfd {
        1
    } else if value <= u16::MAX as u64 {
        3
    } else if value <= u32::MAX as u64 {
        5
    } else {
        9
    }
}

/// Check whether `bytes` is exactly the minimal encoding of the value it
/// decodes to.
///
/// # Returns
/// `Ok(false)` for wider-than-necessary encodings or trailing bytes, and
/// `TruncatedInput` if `bytes` does not hold a complete VarInt.
pub fn is_minimal(bytes: &[u8]) -> Result<bool, PrimitivesError> {
    let (varint, _) = VarInt::decode(bytes)?;
    Ok(encode(varint.value()) == bytes)
}

// ---------------------------------------------------------------------------
// ByteReader
// ---------------------------------------------------------------------------

/// A cursor-based reader over wire-format bytes.
///
/// Wraps a byte slice and maintains a read position. Every read checks the
/// remaining length first and reports `TruncatedInput` instead of panicking.
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Create a new reader positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        ByteReader { data, pos: 0 }
    }

    /// Read `n` bytes and advance the position.
    ///
    /// # Arguments
    /// * `n` - Number of bytes to read.
    ///
    /// # Returns
    /// A byte slice of length `n`, or `TruncatedInput` if insufficient data remains.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], PrimitivesError> {
        let available = self.remaining();
        if n > available {
            return Err(PrimitivesError::TruncatedInput {
                needed: n,
                available,
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read exactly `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], PrimitivesError> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Read a single byte and advance the position.
    pub fn read_u8(&mut self) -> Result<u8, PrimitivesError> {
        let bytes = self.read_bytes(1)?;
        Ok(bytes[0])
    }

    /// Read a big-endian u16.
    pub fn read_u16_be(&mut self) -> Result<u16, PrimitivesError> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    /// Read a big-endian u32.
    pub fn read_u32_be(&mut self) -> Result<u32, PrimitivesError> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    /// Read a big-endian u64.
    pub fn read_u64_be(&mut self) -> Result<u64, PrimitivesError> {
        Ok(u64::from_be_bytes(self.read_array()?))
    }

    /// Read a VarInt and advance the position accordingly.
    ///
    /// The width the value was encoded in is kept, so non-minimal encodings
    /// are accepted here and can be inspected by the caller.
    pub fn read_varint(&mut self) -> Result<VarInt, PrimitivesError> {
        let first = self.read_u8()?;
        let (value, width) = match first {
            0xff => (self.read_u64_be()?, 9),
            0xfe => (self.read_u32_be()? as u64, 5),
            0xfd => (self.read_u16_be()? as u64, 3),
            b => (b as u64, 1),
        };
        Ok(VarInt { value, width })
    }

    /// Read a VarInt and reject it unless it is minimally encoded.
    ///
    /// Used for every length and count field of the wire format, which keeps
    /// decoded structures byte-exact when re-serialized.
    pub fn read_minimal_varint(&mut self) -> Result<u64, PrimitivesError> {
        let varint = self.read_varint()?;
        if !varint.is_minimal() {
            return Err(PrimitivesError::NonMinimalVarInt);
        }
        Ok(varint.value())
    }

    /// Return the number of bytes remaining.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Whether every byte has been consumed.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}

// ---------------------------------------------------------------------------
// ByteWriter
// ---------------------------------------------------------------------------

/// A buffer-based writer for wire-format bytes.
///
/// Wraps a `Vec<u8>` and appends big-endian integers and minimal VarInts.
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    /// Create a new empty writer.
    pub fn new() -> Self {
        ByteWriter { buf: Vec::new() }
    }

    /// Create a new writer with a pre-allocated capacity.
    ///
    /// # Arguments
    /// * `capacity` - Initial byte capacity of the internal buffer.
    pub fn with_capacity(capacity: usize) -> Self {
        ByteWriter {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Append raw bytes to the buffer.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Append a single byte to the buffer.
    pub fn write_u8(&mut self, val: u8) {
        self.buf.push(val);
    }

    /// Append a big-endian u16.
    pub fn write_u16_be(&mut self, val: u16) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    /// Append a big-endian u32.
    pub fn write_u32_be(&mut self, val: u32) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    /// Append a big-endian u64.
    pub fn write_u64_be(&mut self, val: u64) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    /// Append the minimal VarInt encoding of `val`.
    pub fn write_varint(&mut self, val: u64) {
        self.buf.extend_from_slice(&encode(val));
    }

    /// Consume the writer and return the accumulated bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Return a reference to the current buffer contents.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Return the number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

impl Default for ByteWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_varint() {
        let (vi, sz) = VarInt::decode(&[0xff, 0, 0, 0, 0, 0, 0, 0, 0]).unwrap();
        assert_eq!(vi.value(), 0);
        assert_eq!(sz, 9);

        let (vi, sz) = VarInt::decode(&[0xfe, 0, 0, 0, 0]).unwrap();
        assert_eq!(vi.value(), 0);
        assert_eq!(sz, 5);

        let (vi, sz) = VarInt::decode(&[0xfd, 0x01, 0x00]).unwrap();
        assert_eq!(vi.value(), 256);
        assert_eq!(sz, 3);

        let (vi, sz) = VarInt::decode(&[0x01, 0xaa]).unwrap();
        assert_eq!(vi.value(), 1);
        assert_eq!(sz, 1);
    }

    #[test]
    fn test_decode_varint_truncated() {
        assert!(matches!(
            VarInt::decode(&[]),
            Err(PrimitivesError::TruncatedInput {
                needed: 1,
                available: 0,
            })
        ));
        assert!(matches!(
            VarInt::decode(&[0xfd, 0x01]),
            Err(PrimitivesError::TruncatedInput {
                needed: 2,
                available: 1,
            })
        ));
        assert!(matches!(
            VarInt::decode(&[0xff, 0, 0, 0]),
            Err(PrimitivesError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn test_varint_encode_widths() {
        let cases: Vec<(u64, Vec<u8>)> = vec![
            (0, vec![0x00]),
            (1, vec![0x01]),
            (252, vec![0xfc]),
            (253, vec![0xfd, 0x00, 0xfd]),
            (65535, vec![0xfd, 0xff, 0xff]),
            (65536, vec![0xfe, 0x00, 0x01, 0x00, 0x00]),
            (4294967295, vec![0xfe, 0xff, 0xff, 0xff, 0xff]),
            (4294967296, vec![0xff, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00]),
            (u64::MAX, vec![0xff; 9]),
        ];

        for (value, expected) in cases {
            assert_eq!(encode(value), expected, "encoding mismatch for {}", value);
            assert_eq!(VarInt::new(value).length(), expected.len());
            assert_eq!(minimal_length(value), expected.len());
        }
    }

    #[test]
    fn test_non_minimal_zero() {
        assert!(!is_minimal(&[0xfd, 0x00, 0x00]).unwrap());
        let (vi, _) = VarInt::decode(&[0xfd, 0x00, 0x00]).unwrap();
        assert_eq!(vi.value(), 0);
        assert!(!vi.is_minimal());
        assert_eq!(vi.encoded(), vec![0xfd, 0x00, 0x00]);
    }

    #[test]
    fn test_is_minimal() {
        assert!(is_minimal(&[0x00]).unwrap());
        assert!(is_minimal(&[0xfd, 0x00, 0xfd]).unwrap());
        assert!(!is_minimal(&[0xfd, 0x00, 0xfc]).unwrap());
        assert!(!is_minimal(&[0xfe, 0x00, 0x00, 0xff, 0xff]).unwrap());
        assert!(is_minimal(&[0xfe, 0x00, 0x01, 0x00, 0x00]).unwrap());
        assert!(!is_minimal(&[0xff, 0, 0, 0, 0, 0xff, 0xff, 0xff, 0xff]).unwrap());
        // trailing bytes are not part of a minimal encoding
        assert!(!is_minimal(&[0x05, 0x00]).unwrap());
    }

    #[test]
    fn test_reader_writer_roundtrip() {
        let mut writer = ByteWriter::new();
        writer.write_u8(0x42);
        writer.write_u16_be(0x1234);
        writer.write_u32_be(0xDEADBEEF);
        writer.write_u64_be(0x0102030405060708);
        writer.write_varint(300);
        writer.write_bytes(b"hello");

        let data = writer.into_bytes();
        assert_eq!(&data[1..3], &[0x12, 0x34]);

        let mut reader = ByteReader::new(&data);
        assert_eq!(reader.read_u8().unwrap(), 0x42);
        assert_eq!(reader.read_u16_be().unwrap(), 0x1234);
        assert_eq!(reader.read_u32_be().unwrap(), 0xDEADBEEF);
        assert_eq!(reader.read_u64_be().unwrap(), 0x0102030405060708);
        assert_eq!(reader.read_minimal_varint().unwrap(), 300);
        assert_eq!(reader.read_bytes(5).unwrap(), b"hello");
        assert!(reader.is_empty());
    }

    #[test]
    fn test_reader_eof() {
        let mut reader = ByteReader::new(&[0x01]);
        assert!(reader.read_u8().is_ok());
        assert!(matches!(
            reader.read_u8(),
            Err(PrimitivesError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn test_read_minimal_varint_rejects_wide() {
        let mut reader = ByteReader::new(&[0xfd, 0x00, 0x05]);
        assert_eq!(reader.read_minimal_varint(), Err(PrimitivesError::NonMinimalVarInt));

        let mut reader = ByteReader::new(&[0xfd, 0x00, 0x05]);
        let vi = reader.read_varint().unwrap();
        assert_eq!(vi.value(), 5);
        assert!(!vi.is_minimal());
    }
}
