use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::error::{GeoCodecError, Result};
use crate::io::wkb::common::Endianness;

/// A bounds-checked read position over a WKB buffer.
#[derive(Debug, Clone)]
pub(super) struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub(super) fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub(super) fn position(&self) -> usize {
        self.pos
    }

    pub(super) fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// How many of `declared` elements of at least `min_size` bytes each could still fit.
    ///
    /// Used to size allocations without trusting counts read from the input.
    pub(super) fn capacity_for(&self, declared: usize, min_size: usize) -> usize {
        declared.min(self.remaining() / min_size.max(1))
    }

    fn take(&mut self, len: usize, expected: &'static str) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(GeoCodecError::TruncatedInput {
                offset: self.buf.len(),
                expected,
            });
        }
        let bytes = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    pub(super) fn read_u8(&mut self, expected: &'static str) -> Result<u8> {
        Ok(self.take(1, expected)?[0])
    }

    pub(super) fn read_u32(
        &mut self,
        endianness: Endianness,
        expected: &'static str,
    ) -> Result<u32> {
        let bytes = self.take(4, expected)?;
        Ok(match endianness {
            Endianness::BigEndian => BigEndian::read_u32(bytes),
            Endianness::LittleEndian => LittleEndian::read_u32(bytes),
        })
    }

    pub(super) fn read_f64(
        &mut self,
        endianness: Endianness,
        expected: &'static str,
    ) -> Result<f64> {
        let bytes = self.take(8, expected)?;
        Ok(match endianness {
            Endianness::BigEndian => BigEndian::read_f64(bytes),
            Endianness::LittleEndian => LittleEndian::read_f64(bytes),
        })
    }
}
