//! Source data for the generated column model.

use foam_export::iqm::records::{POSE_CHANNELS, Pose};
use glam::{Quat, Vec2, Vec3};

/// Number of joints in the generated skeleton.
pub const BONE_COUNT: usize = 2;

/// Frames on the shared timeline.
pub const FRAME_COUNT: usize = 4;

/// Tip translation along Y for each frame.
pub const TIP_OFFSETS: [f32; FRAME_COUNT] = [1.0, 2.0, 1.0, 2.0];

pub struct SubmeshData {
    pub name: &'static str,
    pub material: &'static str,
    pub first_triangle: u32,
    pub num_triangles: u32,
}

pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub blend_indexes: Vec<[u8; 4]>,
    pub blend_weights: Vec<[u8; 4]>,
    pub triangles: Vec<[u32; 3]>,
    pub submeshes: Vec<SubmeshData>,
}

pub struct JointData {
    pub name: &'static str,
    pub parent: i32,
    pub translate: Vec3,
    pub rotate: Quat,
    pub scale: Vec3,
}

#[derive(Default)]
pub struct SkeletonData {
    pub joints: Vec<JointData>,
    pub poses: Vec<Pose>,
}

pub struct ClipData {
    pub name: &'static str,
    pub first_frame: u32,
    pub num_frames: u32,
    pub framerate: f32,
}

#[derive(Default)]
pub struct AnimationData {
    pub clips: Vec<ClipData>,
    pub num_framechannels: u32,
    pub frame_data: Vec<u16>,
}

/// Two stacked unit quads. Rows at y = 0, 1, 2.
pub fn create_mesh_data() -> MeshData {
    let positions: Vec<Vec3> = (0..3)
        .flat_map(|row| [Vec3::new(0.0, row as f32, 0.0), Vec3::new(1.0, row as f32, 0.0)])
        .collect();
    let uvs = positions
        .iter()
        .map(|p| Vec2::new(p.x, p.y / 2.0))
        .collect();

    // Bottom row follows Root, middle row is shared, top row follows Tip.
    let blend_indexes = vec![
        [0, 0, 0, 0],
        [0, 0, 0, 0],
        [0, 1, 0, 0],
        [0, 1, 0, 0],
        [1, 0, 0, 0],
        [1, 0, 0, 0],
    ];
    let blend_weights = vec![
        [255, 0, 0, 0],
        [255, 0, 0, 0],
        [128, 127, 0, 0],
        [128, 127, 0, 0],
        [255, 0, 0, 0],
        [255, 0, 0, 0],
    ];

    MeshData {
        normals: vec![Vec3::Z; positions.len()],
        positions,
        uvs,
        blend_indexes,
        blend_weights,
        triangles: vec![[0, 1, 3], [0, 3, 2], [2, 3, 5], [2, 5, 4]],
        submeshes: vec![
            SubmeshData {
                name: "lower",
                material: "body",
                first_triangle: 0,
                num_triangles: 2,
            },
            SubmeshData {
                name: "upper",
                material: "head",
                first_triangle: 2,
                num_triangles: 2,
            },
        ],
    }
}

fn holding_pose(parent: i32, t: Vec3) -> Pose {
    let mut channel_offset = [0.0; POSE_CHANNELS];
    channel_offset[..3].copy_from_slice(&t.to_array());
    channel_offset[6] = 1.0;
    channel_offset[7..].copy_from_slice(&[1.0; 3]);
    Pose {
        parent,
        channel_mask: 0,
        channel_offset,
        channel_scale: [0.0; POSE_CHANNELS],
    }
}

pub fn create_skeleton() -> SkeletonData {
    // Tip animates translate.y: offset 1.0, one unit per 65535 steps.
    let mut tip = holding_pose(0, Vec3::Y);
    tip.channel_mask = 1 << 1;
    tip.channel_scale[1] = 1.0 / 65535.0;

    SkeletonData {
        joints: vec![
            JointData {
                name: "Root",
                parent: -1,
                translate: Vec3::ZERO,
                rotate: Quat::IDENTITY,
                scale: Vec3::ONE,
            },
            JointData {
                name: "Tip",
                parent: 0,
                translate: Vec3::Y,
                rotate: Quat::IDENTITY,
                scale: Vec3::ONE,
            },
        ],
        poses: vec![holding_pose(-1, Vec3::ZERO), tip],
    }
}

pub fn create_animation() -> AnimationData {
    let frame_data = TIP_OFFSETS
        .iter()
        .map(|y| ((y - 1.0) * 65535.0).round() as u16)
        .collect();

    AnimationData {
        clips: vec![
            ClipData {
                name: "idle",
                first_frame: 0,
                num_frames: 2,
                framerate: 30.0,
            },
            ClipData {
                name: "wave",
                first_frame: 2,
                num_frames: 2,
                framerate: 15.0,
            },
        ],
        num_framechannels: 1,
        frame_data,
    }
}
