//! Bone entity
//!
//! # Layout
//! ```text
//! name         string
//! parent       i32 (-1 = root, otherwise an earlier bone)
//! bind_matrix  f32 × 16 (column-major)
//! ```
//!
//! `bind_matrix` is the accumulated inverse bind pose: it already contains
//! every ancestor's contribution, so it maps model space straight into this
//! bone's space at bind time.

use std::io::{Read, Seek, Write};

use glam::Mat4;

use super::serialization::BinarySerializable;
use crate::cursor::{BinaryReader, BinaryWriter};
use crate::error::Result;

/// Parent index of a root bone.
pub const ROOT_PARENT: i32 = -1;

#[derive(Debug, Clone, PartialEq)]
pub struct Bone {
    pub name: String,
    pub parent: i32,
    pub bind_matrix: Mat4,
}

impl Bone {
    pub fn new(name: impl Into<String>, parent: i32, bind_matrix: Mat4) -> Self {
        Self {
            name: name.into(),
            parent,
            bind_matrix,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent < 0
    }

    /// Parent bone index, or `None` for a root.
    pub fn parent_index(&self) -> Option<usize> {
        usize::try_from(self.parent).ok()
    }
}

impl BinarySerializable for Bone {
    fn write_to<W: Write + Seek>(&self, w: &mut BinaryWriter<W>) -> Result<()> {
        w.write_string(&self.name)?;
        w.write_i32(self.parent)?;
        w.write_record(&self.bind_matrix)
    }

    fn read_from<R: Read + Seek>(r: &mut BinaryReader<R>) -> Result<Self> {
        Ok(Self {
            name: r.read_string()?,
            parent: r.read_i32()?,
            bind_matrix: r.read_record()?,
        })
    }
}
