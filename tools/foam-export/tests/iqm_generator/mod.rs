//! Programmatic IQM generation for integration tests.
//!
//! Generates a complete IQM file with:
//! - Two-segment column (positions, normals, UVs, blend indexes, weights)
//! - Two submeshes with distinct materials
//! - 2-bone skeleton (Root -> Tip)
//! - 4-frame timeline split into two clips

mod mesh_data;
mod packing;

pub use mesh_data::{BONE_COUNT, FRAME_COUNT, TIP_OFFSETS};

use mesh_data::{create_animation, create_mesh_data, create_skeleton};

/// Generate a complete skinned IQM for testing.
pub fn generate_skinned_iqm() -> Vec<u8> {
    let mesh = create_mesh_data();
    let skeleton = create_skeleton();
    let animation = create_animation();

    packing::pack_iqm(&mesh, &skeleton, &animation, b"generated by foam-export tests")
}

/// Generate the lower segment alone, without skinning or animation.
pub fn generate_static_iqm() -> Vec<u8> {
    let mut mesh = create_mesh_data();
    mesh.blend_indexes.clear();
    mesh.blend_weights.clear();
    mesh.submeshes.truncate(1);

    packing::pack_iqm(
        &mesh,
        &mesh_data::SkeletonData::default(),
        &mesh_data::AnimationData::default(),
        b"",
    )
}
