use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::io::wkb::common::Endianness;

/// Accumulates WKB output under one byte order.
///
/// Nested geometries append to the same builder as their parent, so a single builder holds a
/// whole geometry tree.
#[derive(Debug, Clone)]
pub struct ByteStreamBuilder {
    buf: Vec<u8>,
    endianness: Endianness,
}

impl ByteStreamBuilder {
    pub fn new(endianness: Endianness) -> Self {
        Self::with_capacity(endianness, 0)
    }

    pub fn with_capacity(endianness: Endianness, capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            endianness,
        }
    }

    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// Append the byte order flag: `0` for big-endian, `1` for little-endian.
    pub fn add_byte_order(&mut self) {
        self.buf.push(self.endianness.into());
    }

    pub fn add_u32(&mut self, value: u32) {
        let mut bytes = [0; 4];
        match self.endianness {
            Endianness::BigEndian => BigEndian::write_u32(&mut bytes, value),
            Endianness::LittleEndian => LittleEndian::write_u32(&mut bytes, value),
        }
        self.buf.extend_from_slice(&bytes);
    }

    pub fn add_f64(&mut self, value: f64) {
        let mut bytes = [0; 8];
        match self.endianness {
            Endianness::BigEndian => BigEndian::write_f64(&mut bytes, value),
            Endianness::LittleEndian => LittleEndian::write_f64(&mut bytes, value),
        }
        self.buf.extend_from_slice(&bytes);
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consume the builder, returning the accumulated bytes.
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}
