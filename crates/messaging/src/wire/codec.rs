//! Field-tagged binary encoding primitives.
//!
//! The encoding follows the protobuf wire format: each field is a varint
//! tag `(number << 3) | wire_type` followed by a varint or a
//! length-delimited byte run. Zero-valued scalars and empty strings are
//! omitted on encode; unknown fields are skipped on decode.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use super::{WireError, WireMessage};

const WIRE_VARINT: u64 = 0;
const WIRE_FIXED64: u64 = 1;
const WIRE_LEN: u64 = 2;
const WIRE_FIXED32: u64 = 5;

/// Accumulates encoded fields for one message.
#[derive(Debug, Default)]
pub struct FieldWriter {
    buf: BytesMut,
}

impl FieldWriter {
    pub fn new() -> Self {
        Self::default()
    }

    fn put_varint(&mut self, mut v: u64) {
        while v >= 0x80 {
            self.buf.put_u8((v as u8 & 0x7f) | 0x80);
            v >>= 7;
        }
        self.buf.put_u8(v as u8);
    }

    fn put_tag(&mut self, number: u32, wire_type: u64) {
        self.put_varint(((number as u64) << 3) | wire_type);
    }

    pub fn put_int32(&mut self, number: u32, v: i32) {
        if v != 0 {
            self.put_tag(number, WIRE_VARINT);
            // negative values sign-extend to 64 bits, as protobuf does
            self.put_varint(v as i64 as u64);
        }
    }

    pub fn put_bool(&mut self, number: u32, v: bool) {
        if v {
            self.put_tag(number, WIRE_VARINT);
            self.put_varint(1);
        }
    }

    pub fn put_str(&mut self, number: u32, v: &str) {
        if !v.is_empty() {
            self.put_len_delimited(number, v.as_bytes());
        }
    }

    /// Length-delimited field, written unconditionally. Used for nested
    /// messages and map entries, which are present even when empty.
    pub fn put_len_delimited(&mut self, number: u32, v: &[u8]) {
        self.put_tag(number, WIRE_LEN);
        self.put_varint(v.len() as u64);
        self.buf.put_slice(v);
    }

    pub fn put_message<M: WireMessage>(&mut self, number: u32, msg: &M) {
        let mut nested = FieldWriter::new();
        msg.encode_fields(&mut nested);
        self.put_len_delimited(number, &nested.buf);
    }

    pub fn finish(self) -> Bytes {
        self.buf.freeze()
    }
}

/// One decoded field value. Unknown fields come out as one of these and
/// are simply dropped by the caller.
#[derive(Debug, Clone)]
pub enum FieldValue {
    Varint(u64),
    Bytes(Bytes),
    Fixed32(u32),
    Fixed64(u64),
}

impl FieldValue {
    pub fn into_string(self, field: &'static str) -> Result<String, WireError> {
        match self {
            FieldValue::Bytes(b) => {
                String::from_utf8(b.to_vec()).map_err(|_| WireError::InvalidUtf8(field))
            }
            _ => Err(WireError::WireTypeMismatch(field)),
        }
    }

    pub fn into_bytes(self, field: &'static str) -> Result<Bytes, WireError> {
        match self {
            FieldValue::Bytes(b) => Ok(b),
            _ => Err(WireError::WireTypeMismatch(field)),
        }
    }

    pub fn into_int32(self, field: &'static str) -> Result<i32, WireError> {
        match self {
            FieldValue::Varint(v) => Ok(v as i32),
            _ => Err(WireError::WireTypeMismatch(field)),
        }
    }

    pub fn into_bool(self, field: &'static str) -> Result<bool, WireError> {
        match self {
            FieldValue::Varint(v) => Ok(v != 0),
            _ => Err(WireError::WireTypeMismatch(field)),
        }
    }
}

/// Streams `(field number, value)` pairs out of an encoded message.
#[derive(Debug)]
pub struct FieldReader {
    buf: Bytes,
}

impl FieldReader {
    pub fn new(buf: Bytes) -> Self {
        Self { buf }
    }

    fn get_varint(&mut self) -> Result<u64, WireError> {
        let mut v: u64 = 0;
        for shift in (0..64).step_by(7) {
            if !self.buf.has_remaining() {
                return Err(WireError::Truncated);
            }
            let byte = self.buf.get_u8();
            v |= u64::from(byte & 0x7f) << shift;
            if byte & 0x80 == 0 {
                return Ok(v);
            }
        }
        Err(WireError::VarintOverflow)
    }

    pub fn next_field(&mut self) -> Result<Option<(u32, FieldValue)>, WireError> {
        if !self.buf.has_remaining() {
            return Ok(None);
        }
        let tag = self.get_varint()?;
        let number = (tag >> 3) as u32;
        let value = match tag & 0x7 {
            WIRE_VARINT => FieldValue::Varint(self.get_varint()?),
            WIRE_FIXED64 => {
                if self.buf.remaining() < 8 {
                    return Err(WireError::Truncated);
                }
                FieldValue::Fixed64(self.buf.get_u64_le())
            }
            WIRE_LEN => {
                let len = self.get_varint()? as usize;
                if self.buf.remaining() < len {
                    return Err(WireError::Truncated);
                }
                FieldValue::Bytes(self.buf.split_to(len))
            }
            WIRE_FIXED32 => {
                if self.buf.remaining() < 4 {
                    return Err(WireError::Truncated);
                }
                FieldValue::Fixed32(self.buf.get_u32_le())
            }
            other => return Err(WireError::InvalidWireType(other as u8)),
        };
        Ok(Some((number, value)))
    }
}
