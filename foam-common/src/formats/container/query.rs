//! Read-only queries over a loaded container.

use glam::{Mat4, Vec3};

use super::ModelContainer;
use crate::formats::animation::AnimationClip;

impl ModelContainer {
    /// Axis-aligned bounds of every vertex position, or `None` without vertices.
    pub fn calc_bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut positions = self
            .meshes
            .iter()
            .flat_map(|m| m.vertices.iter().map(|v| v.position));
        let first = positions.next()?;
        Some(positions.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }

    pub fn find_bone(&self, name: &str) -> Option<usize> {
        self.bones.as_ref()?.iter().position(|b| b.name == name)
    }

    pub fn find_animation(&self, name: &str) -> Option<&AnimationClip> {
        self.animations.as_ref()?.iter().find(|a| a.name == name)
    }

    /// World transform of `bone` at bind time.
    pub fn bind_world_transform(&self, bone: usize) -> Option<Mat4> {
        let bone = self.bones.as_ref()?.get(bone)?;
        Some(bone.bind_matrix.inverse())
    }

    /// World transform of `bone` at `frame` of `clip`.
    ///
    /// Bones the clip does not animate contribute identity.
    pub fn world_transform(&self, clip: &AnimationClip, frame: usize, bone: usize) -> Option<Mat4> {
        let bones = self.bones.as_ref()?;
        let pose = clip.frames.get(frame)?;
        let mut world = Mat4::IDENTITY;
        let mut current = Some(bone);
        while let Some(i) = current {
            let b = bones.get(i)?;
            let local = clip
                .bone_slot(&b.name)
                .and_then(|slot| pose.transforms.get(slot).copied())
                .unwrap_or(Mat4::IDENTITY);
            world = local * world;
            // Validated parents always point backwards, so this terminates.
            current = b.parent_index().filter(|&p| p < i);
        }
        Some(world)
    }

    /// Per-bone skinning matrices (`world * inverse_bind`) for one frame.
    pub fn skinning_matrices(&self, clip: &AnimationClip, frame: usize) -> Option<Vec<Mat4>> {
        let bones = self.bones.as_ref()?;
        let pose = clip.frames.get(frame)?;
        let mut world: Vec<Mat4> = Vec::with_capacity(bones.len());
        for bone in bones {
            let local = clip
                .bone_slot(&bone.name)
                .and_then(|slot| pose.transforms.get(slot).copied())
                .unwrap_or(Mat4::IDENTITY);
            let parent = bone
                .parent_index()
                .and_then(|p| world.get(p).copied())
                .unwrap_or(Mat4::IDENTITY);
            world.push(parent * local);
        }
        Some(
            world
                .iter()
                .zip(bones)
                .map(|(w, b)| *w * b.bind_matrix)
                .collect(),
        )
    }
}
