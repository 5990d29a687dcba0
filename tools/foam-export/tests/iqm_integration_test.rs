//! Integration tests for the IQM import pipeline.
//!
//! Tests the complete flow:
//! 1. Generate IQM programmatically
//! 2. Convert through foam-export
//! 3. Validate the container and its derived transforms

mod iqm_generator;

use glam::{Mat4, Vec2, Vec3};
use tempfile::tempdir;

use foam_export::iqm::COMMENT_EXTENSION;
use foam_export::{ConvertOptions, ModelContainer, convert_to_memory, decode_iqm, load_model};
use foam_common::{ModelFlags, TextureKind};

fn assert_mat_eq(a: Mat4, b: Mat4) {
    assert!(a.abs_diff_eq(b, 1e-5), "expected {b:?}, got {a:?}");
}

fn decode_column() -> ModelContainer {
    let iqm = iqm_generator::generate_skinned_iqm();
    decode_iqm(&iqm, &ConvertOptions::new("column")).expect("Failed to decode generated IQM")
}

#[test]
fn test_generated_iqm_header() {
    let iqm = iqm_generator::generate_skinned_iqm();
    assert_eq!(&iqm[..16], b"INTERQUAKEMODEL\0");
    assert_eq!(u32::from_le_bytes(iqm[16..20].try_into().unwrap()), 2);
    assert_eq!(
        u32::from_le_bytes(iqm[20..24].try_into().unwrap()) as usize,
        iqm.len(),
        "filesize field should match"
    );
}

#[test]
fn test_submeshes_are_partitioned() {
    let model = decode_column();
    assert_eq!(model.name, "column");
    assert_eq!(model.meshes.len(), 2);

    // Each segment references rows [0, 1] or [1, 2]: four vertices each.
    for (mesh, base_y) in model.meshes.iter().zip([0.0, 1.0]) {
        assert_eq!(mesh.vertices.len(), 4, "mesh {}", mesh.name);
        assert_eq!(mesh.indices, Some(vec![0, 1, 3, 0, 3, 2]));
        assert_eq!(mesh.vertices[0].position, Vec3::new(0.0, base_y, 0.0));
        assert_eq!(mesh.vertices[0].normal, Vec3::Z);
        assert_eq!(mesh.bone_influences.as_ref().map(Vec::len), Some(4));
    }
    assert_eq!(model.meshes[0].name, "lower");
    assert_eq!(model.meshes[1].name, "upper");
    assert_eq!(model.meshes[0].material_index, 0);
    assert_eq!(model.meshes[1].material_index, 1);

    let materials = model.materials.as_ref().unwrap();
    let names: Vec<_> = materials
        .iter()
        .map(|m| m.find_texture(TextureKind::Diffuse).unwrap().name.as_str())
        .collect();
    assert_eq!(names, ["body", "head"]);
}

#[test]
fn test_shared_row_weights() {
    let model = decode_column();
    let upper = &model.meshes[1];
    let influences = upper.bone_influences.as_ref().unwrap();
    // Vertex 0 of the upper mesh is global vertex 2 (shared row).
    assert_eq!(influences[0].bones, [0, 1, 0, 0]);
    assert!((influences[0].weight_sum() - 1.0).abs() < 1e-6);
    assert_eq!(influences[2].bones[0], 1);
    assert!((influences[2].weights[0] - 1.0).abs() < 1e-6);
}

#[test]
fn test_bind_pose() {
    let model = decode_column();
    let bones = model.bones.as_ref().unwrap();
    assert_eq!(bones.len(), iqm_generator::BONE_COUNT);
    assert_eq!(bones[0].name, "Root");
    assert!(bones[0].is_root());
    assert_eq!(bones[1].parent_index(), Some(0));

    assert_mat_eq(bones[0].bind_matrix, Mat4::IDENTITY);
    assert_mat_eq(bones[1].bind_matrix, Mat4::from_translation(-Vec3::Y));
    assert_mat_eq(
        model.bind_world_transform(1).unwrap(),
        Mat4::from_translation(Vec3::Y),
    );
}

#[test]
fn test_clips_slice_the_timeline() {
    let model = decode_column();
    assert_eq!(model.flags, ModelFlags::ANIMATED);

    let clips = model.animations.as_ref().unwrap();
    assert_eq!(clips.len(), 2);
    let total: usize = clips.iter().map(|c| c.frames.len()).sum();
    assert_eq!(total, iqm_generator::FRAME_COUNT);

    let idle = model.find_animation("idle").unwrap();
    assert_eq!(idle.frames.len(), 2);
    assert_eq!(idle.duration_ticks, 2.0);
    assert_eq!(idle.ticks_per_second, 30.0);
    assert_eq!(idle.bone_names, ["Root", "Tip"]);

    let wave = model.find_animation("wave").unwrap();
    assert_eq!(wave.ticks_per_second, 15.0);
    assert!((wave.duration_seconds(21.0) - 2.0 / 15.0).abs() < 1e-6);

    let (idle_offsets, wave_offsets) = iqm_generator::TIP_OFFSETS.split_at(2);
    for (clip, offsets) in [(idle, idle_offsets), (wave, wave_offsets)] {
        for (frame, y) in offsets.iter().enumerate() {
            let local = clip.local_transform(frame, "Tip").unwrap();
            assert_mat_eq(local, Mat4::from_translation(Vec3::new(0.0, *y, 0.0)));
        }
    }
}

#[test]
fn test_skinning_matrices() {
    let model = decode_column();
    let idle = model.find_animation("idle").unwrap();

    // Frame 0 holds the bind pose.
    for m in model.skinning_matrices(idle, 0).unwrap() {
        assert_mat_eq(m, Mat4::IDENTITY);
    }

    // Frame 1 lifts the tip by one unit.
    let skin = model.skinning_matrices(idle, 1).unwrap();
    assert_mat_eq(skin[0], Mat4::IDENTITY);
    assert_mat_eq(skin[1], Mat4::from_translation(Vec3::Y));
    assert_mat_eq(
        model.world_transform(idle, 1, 1).unwrap(),
        Mat4::from_translation(Vec3::new(0.0, 2.0, 0.0)),
    );
}

#[test]
fn test_comment_extension() {
    let model = decode_column();
    let extensions = model.extensions.as_ref().unwrap();
    assert_eq!(extensions.len(), 1);
    assert_eq!(extensions[0].name, COMMENT_EXTENSION);
    assert_eq!(extensions[0].data, b"generated by foam-export tests");
}

#[test]
fn test_static_iqm() {
    let iqm = iqm_generator::generate_static_iqm();
    let model = decode_iqm(&iqm, &ConvertOptions::new("lower")).unwrap();
    assert_eq!(model.flags, ModelFlags::STATIC);
    assert!(model.bones.is_none());
    assert!(model.animations.is_none());
    assert!(model.extensions.is_none());
    assert_eq!(model.meshes.len(), 1);
    assert!(model.meshes[0].bone_influences.is_none());
}

#[test]
fn test_basis_conversion() {
    let iqm = iqm_generator::generate_skinned_iqm();
    let options = ConvertOptions::new("column").with_convert_basis(true);
    let model = decode_iqm(&iqm, &options).unwrap();

    let lower = &model.meshes[0];
    assert_eq!(lower.indices, Some(vec![3, 1, 0, 2, 3, 0]));
    // Normals swap Y and Z.
    assert_eq!(lower.vertices[0].normal, Vec3::Y);
    // V is flipped: row 1 had v = 0.5.
    assert_eq!(lower.vertices[2].uv, Vec2::new(0.0, 0.5));
    assert_eq!(lower.vertices[0].uv, Vec2::new(0.0, 1.0));
}

#[test]
fn test_container_round_trip() {
    let model = decode_column();
    let bytes = model.to_bytes().unwrap();
    assert_eq!(&bytes[..4], b"Foam");
    let back = ModelContainer::from_bytes(&bytes).unwrap();
    assert_eq!(back, model);
    assert_eq!(back.to_bytes().unwrap(), bytes);
}

#[test]
fn test_load_from_disk() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("column.iqm");
    std::fs::write(&path, iqm_generator::generate_skinned_iqm()).unwrap();

    let model = load_model(&path, &ConvertOptions::new("column")).unwrap();
    assert_eq!(model, decode_column());

    // The default name is the file stem.
    let named = convert_to_memory(&path, None, false).unwrap();
    assert_eq!(named.name, "column");
}
