//! Referential checks run on every read and before every write.

use foam_shared::FOAM_FORMAT;

use super::ModelContainer;
use crate::error::{FormatError, Result};
use crate::formats::animation::AnimationClip;
use crate::formats::bone::{Bone, ROOT_PARENT};
use crate::formats::mesh::Mesh;

impl ModelContainer {
    /// Check every cross-reference inside the container.
    pub fn validate(&self) -> Result<()> {
        if self.magic != FOAM_FORMAT.magic {
            return Err(FormatError::InvalidMagic {
                found: self.magic,
                expected: FOAM_FORMAT.magic,
            });
        }
        if self.version != FOAM_FORMAT.version {
            return Err(FormatError::UnsupportedVersion {
                found: self.version,
                expected: FOAM_FORMAT.version,
            });
        }

        let materials = self.materials.as_ref().map_or(0, Vec::len);
        let bones = self.bones.as_ref().map_or(0, Vec::len);
        for mesh in &self.meshes {
            validate_mesh(mesh, materials, bones)?;
        }
        if let Some(bones) = &self.bones {
            validate_bones(bones)?;
        }
        for clip in self.animations.iter().flatten() {
            validate_clip(clip)?;
        }
        Ok(())
    }
}

/// `materials` and `bones` are the container's list lengths (0 when absent).
pub(crate) fn validate_mesh(mesh: &Mesh, materials: usize, bones: usize) -> Result<()> {
    let vertex_count = mesh.vertices.len();

    if let Some(indices) = &mesh.indices
        && let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count)
    {
        return Err(FormatError::IndexOutOfRange {
            mesh: mesh.name.clone(),
            index: u32::from(index),
            vertex_count,
        });
    }

    if let Some(influences) = &mesh.bone_influences
        && influences.len() != vertex_count
    {
        return Err(FormatError::InfluenceCountMismatch {
            mesh: mesh.name.clone(),
            influences: influences.len(),
            vertices: vertex_count,
        });
    }

    if mesh.material_index as usize >= materials {
        return Err(FormatError::InvalidMaterialIndex {
            mesh: mesh.name.clone(),
            index: mesh.material_index,
            available: materials,
        });
    }

    // Zero-weight slots are padding; their bone index is never read.
    for (vertex, influence) in mesh.bone_influences.iter().flatten().enumerate() {
        if let Some((&bone, _)) = influence
            .bones
            .iter()
            .zip(&influence.weights)
            .find(|&(&bone, &weight)| weight > 0.0 && bone as usize >= bones)
        {
            return Err(FormatError::InvalidInfluenceBone {
                mesh: mesh.name.clone(),
                vertex,
                bone,
                available: bones,
            });
        }
    }

    Ok(())
}

/// Bones form a pre-ordered tree: each parent is root or an earlier bone.
pub(crate) fn validate_bones(bones: &[Bone]) -> Result<()> {
    for (i, bone) in bones.iter().enumerate() {
        let ok = match bone.parent_index() {
            Some(parent) => parent < i,
            None => bone.parent == ROOT_PARENT,
        };
        if !ok {
            return Err(FormatError::InvalidParent {
                bone: i,
                parent: bone.parent,
            });
        }
    }
    Ok(())
}

pub(crate) fn validate_clip(clip: &AnimationClip) -> Result<()> {
    let expected = clip.bone_names.len();
    for (frame, f) in clip.frames.iter().enumerate() {
        if f.transforms.len() != expected {
            return Err(FormatError::FrameLengthMismatch {
                clip: clip.name.clone(),
                frame,
                len: f.transforms.len(),
                expected,
            });
        }
    }
    Ok(())
}
