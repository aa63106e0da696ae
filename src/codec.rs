//! Bounds-checked little-endian binary codec primitives.
//!
//! A single, auditable parser with a uniform error surface (every failure
//! is `ContainerError::InvalidFormat`) so the container decoder never has
//! to hand-slice a byte buffer.

extern crate alloc;
use alloc::vec::Vec;

use crate::error::ContainerError;

/// Borrowing cursor over an immutable byte buffer.
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8], offset: usize) -> Result<Self, ContainerError> {
        if offset > buf.len() {
            return Err(ContainerError::InvalidFormat);
        }
        Ok(Self { buf, pos: offset })
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos == self.buf.len()
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], ContainerError> {
        if n > self.remaining() {
            return Err(ContainerError::InvalidFormat);
        }
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], ContainerError> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub fn read_u16_le(&mut self) -> Result<u16, ContainerError> {
        Ok(u16::from_le_bytes(self.read_array::<2>()?))
    }

    pub fn read_u32_le(&mut self) -> Result<u32, ContainerError> {
        Ok(u32::from_le_bytes(self.read_array::<4>()?))
    }

    pub fn read_u64_le(&mut self) -> Result<u64, ContainerError> {
        Ok(u64::from_le_bytes(self.read_array::<8>()?))
    }

    pub fn skip(&mut self, n: usize) -> Result<(), ContainerError> {
        if n > self.remaining() {
            return Err(ContainerError::InvalidFormat);
        }
        self.pos += n;
        Ok(())
    }

    /// Build a sub-reader bounded to exactly `len` bytes starting here, and
    /// advance past it. Used to parse a length-prefixed block (the v1
    /// header) without letting its parser read past its declared bounds.
    pub fn sub_reader(&mut self, len: usize) -> Result<Reader<'a>, ContainerError> {
        let bytes = self.read_bytes(len)?;
        Reader::new(bytes, 0)
    }
}

/// Owning, growable byte buffer writer.
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn append(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn append_u16_le(&mut self, v: u16) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn append_u32_le(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn append_u64_le(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reader_round_trips_integers() {
        let mut w = Writer::new();
        w.append_u16_le(0x1234);
        w.append_u32_le(0xdead_beef);
        w.append_u64_le(0x0102_0304_0506_0708);
        let bytes = w.into_bytes();

        let mut r = Reader::new(&bytes, 0).unwrap();
        assert_eq!(r.read_u16_le().unwrap(), 0x1234);
        assert_eq!(r.read_u32_le().unwrap(), 0xdead_beef);
        assert_eq!(r.read_u64_le().unwrap(), 0x0102_0304_0506_0708);
        assert!(r.is_at_end());
    }

    #[test]
    fn reader_rejects_offset_past_end() {
        let bytes = [0u8; 4];
        assert!(Reader::new(&bytes, 5).is_err());
    }

    #[test]
    fn reader_rejects_underflow() {
        let bytes = [0u8; 2];
        let mut r = Reader::new(&bytes, 0).unwrap();
        assert_eq!(r.read_u32_le(), Err(ContainerError::InvalidFormat));
    }

    #[test]
    fn reader_skip_bounds() {
        let bytes = [0u8; 4];
        let mut r = Reader::new(&bytes, 0).unwrap();
        assert!(r.skip(4).is_ok());
        assert!(r.is_at_end());
        assert_eq!(r.skip(1), Err(ContainerError::InvalidFormat));
    }

    #[test]
    fn sub_reader_is_bounded() {
        let mut w = Writer::new();
        w.append(&[1, 2, 3, 4, 5, 6]);
        let bytes = w.into_bytes();
        let mut r = Reader::new(&bytes, 0).unwrap();
        let mut sub = r.sub_reader(4).unwrap();
        assert_eq!(sub.read_bytes(4).unwrap(), &[1, 2, 3, 4]);
        assert!(sub.is_at_end());
        // outer reader continues after the sub-block
        assert_eq!(r.read_bytes(2).unwrap(), &[5, 6]);
    }
}
