//! Joint hierarchy to accumulated inverse bind matrices.

use foam_common::{Bone, FormatError, ROOT_PARENT, Result};
use glam::{Mat4, Quat, Vec3, Vec4};

use super::context::DecodeContext;

/// Unit quaternion, falling back to identity for a zero quaternion.
pub fn normalize_rotation(q: Quat) -> Quat {
    Quat::from_vec4(Vec4::from(q).normalize_or(Vec4::W))
}

/// Local joint transform: scale, then rotate, then translate.
pub fn compose_local(translate: Vec3, rotate: Quat, scale: Vec3) -> Mat4 {
    Mat4::from_scale_rotation_translation(scale, normalize_rotation(rotate), translate)
}

/// Build bones in array order.
///
/// Each stored matrix is `inverse(local) * stored(parent)`, so it maps model
/// space to joint space at bind time without any runtime composition.
pub fn build_bones(ctx: &DecodeContext) -> Result<Vec<Bone>> {
    let mut bones: Vec<Bone> = Vec::with_capacity(ctx.joints.len());
    for (i, joint) in ctx.joints.iter().enumerate() {
        let inverse_local = compose_local(joint.translate, joint.rotate, joint.scale).inverse();

        let (parent, bind_matrix) = if joint.parent < 0 {
            (ROOT_PARENT, inverse_local)
        } else {
            let parent_bone = bones
                .get(joint.parent as usize)
                .ok_or(FormatError::InvalidParent {
                    bone: i,
                    parent: joint.parent,
                })?;
            (joint.parent, inverse_local * parent_bone.bind_matrix)
        };

        bones.push(Bone::new(ctx.text_at(joint.name)?, parent, bind_matrix));
    }
    Ok(bones)
}
