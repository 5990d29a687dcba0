//! IQM skeletal source decoder (IQM -> Foam container)
//!
//! Decoding runs in a fixed order over one [`DecodeContext`]:
//! 1. header signature and version
//! 2. every section at its absolute offset
//! 3. global vertex buffer and skinning data
//! 4. bones with accumulated inverse bind matrices
//! 5. the shared frame timeline, sliced into one clip per anim entry
//! 6. submesh partitioning (plus optional basis conversion)
//!
//! Any failure aborts the whole decode; no partial model is returned.

mod context;
mod frames;
mod geometry;
pub mod header;
pub mod records;
mod skeleton;


use foam_common::{Extension, ModelContainer, ModelFlags, Result};

pub use context::DecodeContext;
pub use header::{IQM_MAGIC, IQM_VERSION, IqmHeader};
pub use skeleton::{compose_local, normalize_rotation};

use crate::loader::ConvertOptions;
use crate::partition::MaterialTable;

/// Extension name under which the IQM comment blob is preserved.
pub const COMMENT_EXTENSION: &str = "comment";

/// True if `header` starts with the IQM signature.
pub fn can_load(header: &[u8]) -> bool {
    header.starts_with(IQM_MAGIC)
}

/// Decode an in-memory IQM file into a container.
pub fn decode_iqm(bytes: &[u8], options: &ConvertOptions) -> Result<ModelContainer> {
    let mut ctx = DecodeContext::open(bytes)?;
    ctx.read_sections()?;

    let vertices = geometry::build_vertices(&ctx)?;
    let influences = geometry::build_influences(&ctx);
    let bones = skeleton::build_bones(&ctx)?;

    let frames = frames::decode_frames(&ctx)?;
    let bone_names: Vec<String> = bones.iter().map(|b| b.name.clone()).collect();
    let clips = frames::build_clips(&ctx, &frames, &bone_names)?;
    if !frames.is_empty() && clips.is_empty() {
        tracing::warn!("IQM has {} frames but no anims; frames dropped", frames.len());
    }

    let mut materials = MaterialTable::new();
    let meshes = geometry::build_meshes(
        &ctx,
        &vertices,
        influences.as_deref(),
        &mut materials,
        options.convert_basis,
    )?;

    let flags = if clips.is_empty() {
        ModelFlags::STATIC
    } else {
        ModelFlags::ANIMATED
    };
    let mut model = ModelContainer::new(options.name.clone(), flags);
    model.meshes = meshes;
    model.bones = (!bones.is_empty()).then_some(bones);
    model.animations = (!clips.is_empty()).then_some(clips);
    model.materials = materials.into_materials();
    if !ctx.comment.is_empty() {
        model.add_extension(Extension::new(COMMENT_EXTENSION, ctx.comment.clone()));
    }

    model.validate()?;
    tracing::info!(
        "Decoded IQM '{}': {} meshes, {} bones, {} clips",
        model.name,
        model.meshes.len(),
        model.bones.as_ref().map_or(0, Vec::len),
        model.animations.as_ref().map_or(0, Vec::len)
    );
    Ok(model)
}
