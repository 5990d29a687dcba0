//! Mesh entity
//!
//! # Layout
//! ```text
//! name            string
//! material_index  u32
//! vertices        count:i32 + count × Vertex (56 bytes)
//! indices         count:i32 + count × u16     (0 ⇒ flat triangle list)
//! bone_influences count:i32 + count × BoneInfluence (20 bytes, 0 ⇒ none)
//! ```

use std::io::{Read, Seek, Write};

use super::serialization::{BinarySerializable, non_empty};
use super::vertex::{BoneInfluence, Vertex};
use crate::cursor::{BinaryReader, BinaryWriter};
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub name: String,
    /// Index into the container's material list
    pub material_index: u32,
    pub vertices: Vec<Vertex>,
    /// `None` means `vertices` is already a flat triangle list
    pub indices: Option<Vec<u16>>,
    /// When present, one entry per vertex
    pub bone_influences: Option<Vec<BoneInfluence>>,
}

impl Mesh {
    pub fn new(
        name: impl Into<String>,
        vertices: Vec<Vertex>,
        indices: Option<Vec<u16>>,
        material_index: u32,
    ) -> Self {
        Self {
            name: name.into(),
            material_index,
            vertices,
            indices,
            bone_influences: None,
        }
    }

    pub fn with_bone_influences(mut self, influences: Vec<BoneInfluence>) -> Self {
        self.bone_influences = Some(influences);
        self
    }

    /// Number of triangles described by this mesh.
    pub fn triangle_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len() / 3,
            None => self.vertices.len() / 3,
        }
    }

    /// Expand the index buffer into a flat triangle list.
    ///
    /// Out-of-range indices are skipped; a validated mesh has none.
    pub fn flat_vertices(&self) -> Vec<Vertex> {
        match &self.indices {
            Some(indices) => indices
                .iter()
                .filter_map(|&i| self.vertices.get(i as usize).copied())
                .collect(),
            None => self.vertices.clone(),
        }
    }
}

impl BinarySerializable for Mesh {
    fn write_to<W: Write + Seek>(&self, w: &mut BinaryWriter<W>) -> Result<()> {
        w.write_string(&self.name)?;
        w.write_u32(self.material_index)?;
        w.write_record_array(&self.vertices)?;
        w.write_record_array(self.indices.as_deref().unwrap_or(&[]))?;
        w.write_record_array(self.bone_influences.as_deref().unwrap_or(&[]))
    }

    fn read_from<R: Read + Seek>(r: &mut BinaryReader<R>) -> Result<Self> {
        let name = r.read_string()?;
        let material_index = r.read_u32()?;
        let vertices = r.read_record_array()?;
        let indices = non_empty(r.read_record_array()?);
        let bone_influences = non_empty(r.read_record_array()?);
        Ok(Self {
            name,
            material_index,
            vertices,
            indices,
            bone_influences,
        })
    }
}
