//! Sequential little-endian reader

use std::io::{Read, Seek, SeekFrom};

use super::Record;
use crate::error::{FormatError, Result};

/// Reads primitives, strings and records from a seekable stream.
pub struct BinaryReader<R> {
    inner: R,
}

impl<R: Read + Seek> BinaryReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Current absolute offset.
    pub fn tell(&mut self) -> Result<u64> {
        Ok(self.inner.stream_position()?)
    }

    /// Seek to an absolute offset, returning the offset before the seek so the
    /// caller can restore it.
    pub fn seek(&mut self, offset: u64) -> Result<u64> {
        let previous = self.tell()?;
        self.inner.seek(SeekFrom::Start(offset))?;
        Ok(previous)
    }

    /// Total stream length. The position is left unchanged.
    pub fn stream_len(&mut self) -> Result<u64> {
        let previous = self.tell()?;
        let len = self.inner.seek(SeekFrom::End(0))?;
        self.inner.seek(SeekFrom::Start(previous))?;
        Ok(len)
    }

    /// Read exactly `len` bytes.
    ///
    /// The buffer grows with the data actually present, so a corrupt length
    /// fails as truncation instead of allocating up front.
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let offset = self.tell()?;
        let mut buf = Vec::new();
        (&mut self.inner).take(len as u64).read_to_end(&mut buf)?;
        if buf.len() < len {
            return Err(FormatError::Truncated {
                offset,
                needed: len - buf.len(),
            });
        }
        Ok(buf)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let offset = self.tell()?;
        let mut buf = [0u8; N];
        self.inner.read_exact(&mut buf).map_err(|e| match e.kind() {
            std::io::ErrorKind::UnexpectedEof => FormatError::Truncated { offset, needed: N },
            _ => FormatError::Io(e),
        })?;
        Ok(buf)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_le_bytes(self.read_array()?))
    }

    /// Read an `i32` length or count prefix, rejecting negative values.
    pub fn read_len(&mut self, what: &'static str) -> Result<usize> {
        let value = self.read_i32()?;
        usize::try_from(value).map_err(|_| FormatError::NegativeLength { what, value })
    }

    /// Read a length-prefixed UTF-8 string.
    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_len("string length")?;
        let bytes = self.read_bytes(len)?;
        String::from_utf8(bytes).map_err(|_| FormatError::InvalidUtf8)
    }

    /// Read a length-prefixed byte blob.
    pub fn read_blob(&mut self) -> Result<Vec<u8>> {
        let len = self.read_len("blob length")?;
        self.read_bytes(len)
    }

    pub fn read_record<T: Record>(&mut self) -> Result<T> {
        let offset = self.tell()?;
        let bytes = self.read_bytes(T::SIZE)?;
        T::decode(&bytes).ok_or(FormatError::Truncated {
            offset,
            needed: T::SIZE,
        })
    }

    /// Read `count` consecutive records without a prefix.
    pub fn read_records<T: Record>(&mut self, count: usize) -> Result<Vec<T>> {
        let offset = self.tell()?;
        let bytes = self.read_bytes(count.saturating_mul(T::SIZE))?;
        bytes
            .chunks_exact(T::SIZE)
            .map(|chunk| {
                T::decode(chunk).ok_or(FormatError::Truncated {
                    offset,
                    needed: T::SIZE,
                })
            })
            .collect()
    }

    /// Read a count-prefixed record array.
    pub fn read_record_array<T: Record>(&mut self) -> Result<Vec<T>> {
        let count = self.read_len("record count")?;
        self.read_records(count)
    }
}
