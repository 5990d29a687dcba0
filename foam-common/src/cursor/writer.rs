//! Sequential little-endian writer

use std::io::{Seek, SeekFrom, Write};

use super::Record;
use crate::error::{FormatError, Result};

/// Writes primitives, strings and records to a seekable stream.
pub struct BinaryWriter<W> {
    inner: W,
}

impl<W: Write + Seek> BinaryWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Current absolute offset.
    pub fn tell(&mut self) -> Result<u64> {
        Ok(self.inner.stream_position()?)
    }

    /// Seek to an absolute offset, returning the offset before the seek.
    pub fn seek(&mut self, offset: u64) -> Result<u64> {
        let previous = self.tell()?;
        self.inner.seek(SeekFrom::Start(offset))?;
        Ok(previous)
    }

    pub fn flush(&mut self) -> Result<()> {
        Ok(self.inner.flush()?)
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        Ok(self.inner.write_all(bytes)?)
    }

    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.write_bytes(&[value])
    }

    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Write a length or count as an `i32` prefix.
    pub fn write_len(&mut self, len: usize) -> Result<()> {
        let value = i32::try_from(len)
            .map_err(|_| FormatError::Malformed(format!("length {len} does not fit in i32")))?;
        self.write_i32(value)
    }

    /// Write a length-prefixed UTF-8 string (no terminator).
    pub fn write_string(&mut self, value: &str) -> Result<()> {
        self.write_len(value.len())?;
        self.write_bytes(value.as_bytes())
    }

    /// Write a length-prefixed byte blob.
    pub fn write_blob(&mut self, data: &[u8]) -> Result<()> {
        self.write_len(data.len())?;
        self.write_bytes(data)
    }

    pub fn write_record<T: Record>(&mut self, record: &T) -> Result<()> {
        let mut buf = Vec::with_capacity(T::SIZE);
        record.encode(&mut buf);
        self.write_bytes(&buf)
    }

    /// Write records back to back without a prefix.
    pub fn write_records<T: Record>(&mut self, records: &[T]) -> Result<()> {
        let mut buf = Vec::with_capacity(records.len() * T::SIZE);
        for record in records {
            record.encode(&mut buf);
        }
        self.write_bytes(&buf)
    }

    /// Write a count-prefixed record array.
    pub fn write_record_array<T: Record>(&mut self, records: &[T]) -> Result<()> {
        self.write_len(records.len())?;
        self.write_records(records)
    }
}
