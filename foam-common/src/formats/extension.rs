//! Extension entity: a named opaque byte blob.
//!
//! # Layout
//! ```text
//! name  string
//! data  len:i32 + len bytes
//! ```
//!
//! Readers that do not understand an extension keep it untouched so it is
//! written back byte for byte.

use std::io::{Read, Seek, Write};

use super::serialization::BinarySerializable;
use crate::cursor::{BinaryReader, BinaryWriter};
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extension {
    pub name: String,
    pub data: Vec<u8>,
}

impl Extension {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

impl BinarySerializable for Extension {
    fn write_to<W: Write + Seek>(&self, w: &mut BinaryWriter<W>) -> Result<()> {
        w.write_string(&self.name)?;
        w.write_blob(&self.data)
    }

    fn read_from<R: Read + Seek>(r: &mut BinaryReader<R>) -> Result<Self> {
        Ok(Self {
            name: r.read_string()?,
            data: r.read_blob()?,
        })
    }
}
