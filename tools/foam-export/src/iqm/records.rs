//! Fixed-size IQM directory records, decoded field by field.

use foam_common::cursor::{Record, f32_at, f32s_at, i32_at, u32_at};
use glam::{Quat, Vec3};

fn put_u32s(out: &mut Vec<u8>, values: &[u32]) {
    for v in values {
        out.extend_from_slice(&v.to_le_bytes());
    }
}

fn put_f32s(out: &mut Vec<u8>, values: &[f32]) {
    for v in values {
        out.extend_from_slice(&v.to_le_bytes());
    }
}

// ============================================================================
// Vertex arrays
// ============================================================================

/// Component storage formats.
pub mod component {
    pub const BYTE: u32 = 0;
    pub const UBYTE: u32 = 1;
    pub const SHORT: u32 = 2;
    pub const USHORT: u32 = 3;
    pub const INT: u32 = 4;
    pub const UINT: u32 = 5;
    pub const HALF: u32 = 6;
    pub const FLOAT: u32 = 7;
    pub const DOUBLE: u32 = 8;
}

/// Semantic of a vertex array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexArrayKind {
    Position,
    TexCoord,
    Normal,
    Tangent,
    BlendIndexes,
    BlendWeights,
    Color,
    /// Reserved (7..0x10) or custom (>= 0x10, names a text entry).
    Other(u32),
}

impl VertexArrayKind {
    pub fn from_u32(value: u32) -> Self {
        match value {
            0 => Self::Position,
            1 => Self::TexCoord,
            2 => Self::Normal,
            3 => Self::Tangent,
            4 => Self::BlendIndexes,
            5 => Self::BlendWeights,
            6 => Self::Color,
            other => Self::Other(other),
        }
    }

    pub fn to_u32(self) -> u32 {
        match self {
            Self::Position => 0,
            Self::TexCoord => 1,
            Self::Normal => 2,
            Self::Tangent => 3,
            Self::BlendIndexes => 4,
            Self::BlendWeights => 5,
            Self::Color => 6,
            Self::Other(v) => v,
        }
    }

    /// The `(format, size)` pair this decoder accepts for the semantic.
    pub fn expected_layout(self) -> Option<(u32, u32)> {
        match self {
            Self::Position | Self::Normal => Some((component::FLOAT, 3)),
            Self::TexCoord => Some((component::FLOAT, 2)),
            Self::Tangent => Some((component::FLOAT, 4)),
            Self::BlendIndexes | Self::BlendWeights | Self::Color => Some((component::UBYTE, 4)),
            Self::Other(_) => None,
        }
    }
}

/// Vertex array descriptor (20 bytes): type, flags, format, size, offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexArray {
    pub kind: VertexArrayKind,
    pub flags: u32,
    pub format: u32,
    pub size: u32,
    pub offset: u32,
}

impl Record for VertexArray {
    const SIZE: usize = 20;

    fn encode(&self, out: &mut Vec<u8>) {
        put_u32s(
            out,
            &[self.kind.to_u32(), self.flags, self.format, self.size, self.offset],
        );
    }

    fn decode(bytes: &[u8]) -> Option<Self> {
        Some(Self {
            kind: VertexArrayKind::from_u32(u32_at(bytes, 0)?),
            flags: u32_at(bytes, 4)?,
            format: u32_at(bytes, 8)?,
            size: u32_at(bytes, 12)?,
            offset: u32_at(bytes, 16)?,
        })
    }
}

// ============================================================================
// Geometry directory
// ============================================================================

/// Triangle (12 bytes): three global vertex indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle(pub [u32; 3]);

impl Record for Triangle {
    const SIZE: usize = 12;

    fn encode(&self, out: &mut Vec<u8>) {
        put_u32s(out, &self.0);
    }

    fn decode(bytes: &[u8]) -> Option<Self> {
        Some(Self([u32_at(bytes, 0)?, u32_at(bytes, 4)?, u32_at(bytes, 8)?]))
    }
}

/// Submesh directory entry (24 bytes). Names are text-table offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshEntry {
    pub name: u32,
    pub material: u32,
    pub first_vertex: u32,
    pub num_vertexes: u32,
    pub first_triangle: u32,
    pub num_triangles: u32,
}

impl Record for MeshEntry {
    const SIZE: usize = 24;

    fn encode(&self, out: &mut Vec<u8>) {
        put_u32s(
            out,
            &[
                self.name,
                self.material,
                self.first_vertex,
                self.num_vertexes,
                self.first_triangle,
                self.num_triangles,
            ],
        );
    }

    fn decode(bytes: &[u8]) -> Option<Self> {
        Some(Self {
            name: u32_at(bytes, 0)?,
            material: u32_at(bytes, 4)?,
            first_vertex: u32_at(bytes, 8)?,
            num_vertexes: u32_at(bytes, 12)?,
            first_triangle: u32_at(bytes, 16)?,
            num_triangles: u32_at(bytes, 20)?,
        })
    }
}

// ============================================================================
// Skeleton and animation
// ============================================================================

/// Bind-pose joint (48 bytes).
///
/// ```text
/// 0x00: name       u32 (text offset)
/// 0x04: parent     i32 (< 0 = root)
/// 0x08: translate  f32 × 3
/// 0x14: rotate     f32 × 4 (x, y, z, w)
/// 0x24: scale      f32 × 3
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Joint {
    pub name: u32,
    pub parent: i32,
    pub translate: Vec3,
    pub rotate: Quat,
    pub scale: Vec3,
}

impl Record for Joint {
    const SIZE: usize = 48;

    fn encode(&self, out: &mut Vec<u8>) {
        put_u32s(out, &[self.name]);
        out.extend_from_slice(&self.parent.to_le_bytes());
        put_f32s(out, &self.translate.to_array());
        put_f32s(out, &self.rotate.to_array());
        put_f32s(out, &self.scale.to_array());
    }

    fn decode(bytes: &[u8]) -> Option<Self> {
        Some(Self {
            name: u32_at(bytes, 0)?,
            parent: i32_at(bytes, 4)?,
            translate: Vec3::from_array(f32s_at(bytes, 8)?),
            rotate: Quat::from_array(f32s_at(bytes, 20)?),
            scale: Vec3::from_array(f32s_at(bytes, 36)?),
        })
    }
}

/// Number of scalar channels in a pose: translate xyz, rotate xyzw, scale xyz.
pub const POSE_CHANNELS: usize = 10;

/// Per-joint channel descriptor (88 bytes).
///
/// ```text
/// 0x00: parent         i32
/// 0x04: channelmask    u32 (bit n set = channel n carries a quantized delta)
/// 0x08: channeloffset  f32 × 10
/// 0x30: channelscale   f32 × 10
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub parent: i32,
    pub channel_mask: u32,
    pub channel_offset: [f32; POSE_CHANNELS],
    pub channel_scale: [f32; POSE_CHANNELS],
}

impl Pose {
    pub fn has_channel(&self, channel: usize) -> bool {
        self.channel_mask & (1 << channel) != 0
    }
}

impl Record for Pose {
    const SIZE: usize = 88;

    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.parent.to_le_bytes());
        put_u32s(out, &[self.channel_mask]);
        put_f32s(out, &self.channel_offset);
        put_f32s(out, &self.channel_scale);
    }

    fn decode(bytes: &[u8]) -> Option<Self> {
        Some(Self {
            parent: i32_at(bytes, 0)?,
            channel_mask: u32_at(bytes, 4)?,
            channel_offset: f32s_at(bytes, 8)?,
            channel_scale: f32s_at(bytes, 48)?,
        })
    }
}

/// Set on clips that loop.
pub const ANIM_LOOP: u32 = 1 << 0;

/// Named clip over the shared frame timeline (20 bytes).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anim {
    pub name: u32,
    pub first_frame: u32,
    pub num_frames: u32,
    pub framerate: f32,
    pub flags: u32,
}

impl Record for Anim {
    const SIZE: usize = 20;

    fn encode(&self, out: &mut Vec<u8>) {
        put_u32s(out, &[self.name, self.first_frame, self.num_frames]);
        put_f32s(out, &[self.framerate]);
        put_u32s(out, &[self.flags]);
    }

    fn decode(bytes: &[u8]) -> Option<Self> {
        Some(Self {
            name: u32_at(bytes, 0)?,
            first_frame: u32_at(bytes, 4)?,
            num_frames: u32_at(bytes, 8)?,
            framerate: f32_at(bytes, 12)?,
            flags: u32_at(bytes, 16)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joint_layout() {
        let joint = Joint {
            name: 7,
            parent: -1,
            translate: Vec3::new(1.0, 2.0, 3.0),
            rotate: Quat::from_xyzw(0.0, 0.0, 0.0, 1.0),
            scale: Vec3::ONE,
        };
        let mut buf = Vec::new();
        joint.encode(&mut buf);
        assert_eq!(buf.len(), Joint::SIZE);
        assert_eq!(i32_at(&buf, 4), Some(-1));
        // rotate.w sits right before scale
        assert_eq!(f32_at(&buf, 32), Some(1.0));
        assert_eq!(Joint::decode(&buf), Some(joint));
    }

    #[test]
    fn test_pose_layout() {
        let mut offset = [0.0; POSE_CHANNELS];
        offset[9] = 4.0;
        let mut scale = [0.0; POSE_CHANNELS];
        scale[0] = 0.5;
        let pose = Pose {
            parent: 0,
            channel_mask: 0b10_0000_0001,
            channel_offset: offset,
            channel_scale: scale,
        };
        let mut buf = Vec::new();
        pose.encode(&mut buf);
        assert_eq!(buf.len(), Pose::SIZE);
        assert_eq!(f32_at(&buf, 8 + 9 * 4), Some(4.0));
        assert_eq!(f32_at(&buf, 48), Some(0.5));
        assert!(pose.has_channel(0));
        assert!(pose.has_channel(9));
        assert!(!pose.has_channel(3));
        assert_eq!(Pose::decode(&buf), Some(pose));
    }

    #[test]
    fn test_vertex_array_kinds() {
        assert_eq!(VertexArrayKind::from_u32(4), VertexArrayKind::BlendIndexes);
        assert_eq!(VertexArrayKind::from_u32(0x10), VertexArrayKind::Other(0x10));
        assert_eq!(
            VertexArrayKind::Tangent.expected_layout(),
            Some((component::FLOAT, 4))
        );
        assert_eq!(VertexArrayKind::Other(0x12).expected_layout(), None);
    }
}
