//! Fixed-layout vertex records.
//!
//! # Layout
//! ```text
//! Vertex (56 bytes):
//! 0x00: position  f32 × 3
//! 0x0C: normal    f32 × 3
//! 0x18: tangent   f32 × 3
//! 0x24: uv        f32 × 2
//! 0x2C: uv2       f32 × 2
//! 0x34: color     u8 × 4 (RGBA)
//!
//! BoneInfluence (20 bytes):
//! 0x00: bones     u8 × 4
//! 0x04: weights   f32 × 4
//! ```

use glam::{Vec2, Vec3};

use crate::cursor::{Record, f32s_at};

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub const fn from_array(c: [u8; 4]) -> Self {
        Self::rgba(c[0], c[1], c[2], c[3])
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Record for Color {
    const SIZE: usize = 4;

    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_array());
    }

    fn decode(bytes: &[u8]) -> Option<Self> {
        let b = bytes.get(0..4)?;
        Some(Self::rgba(b[0], b[1], b[2], b[3]))
    }
}

/// A single mesh vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub tangent: Vec3,
    /// Primary texture coordinate
    pub uv: Vec2,
    /// Secondary texture coordinate (lightmap atlas)
    pub uv2: Vec2,
    pub color: Color,
}

impl Vertex {
    /// Vertex with only position and UV set; everything else neutral.
    pub fn new(position: Vec3, uv: Vec2) -> Self {
        Self {
            position,
            uv,
            ..Self::default()
        }
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            normal: Vec3::ZERO,
            tangent: Vec3::ZERO,
            uv: Vec2::ZERO,
            uv2: Vec2::ZERO,
            color: Color::WHITE,
        }
    }
}

impl Record for Vertex {
    const SIZE: usize = 56;

    fn encode(&self, out: &mut Vec<u8>) {
        self.position.encode(out);
        self.normal.encode(out);
        self.tangent.encode(out);
        self.uv.encode(out);
        self.uv2.encode(out);
        self.color.encode(out);
    }

    fn decode(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(Self {
            position: Vec3::from_array(f32s_at(bytes, 0x00)?),
            normal: Vec3::from_array(f32s_at(bytes, 0x0C)?),
            tangent: Vec3::from_array(f32s_at(bytes, 0x18)?),
            uv: Vec2::from_array(f32s_at(bytes, 0x24)?),
            uv2: Vec2::from_array(f32s_at(bytes, 0x2C)?),
            color: Color::decode(&bytes[0x34..])?,
        })
    }
}

/// Up to four bone influences for one vertex.
///
/// Unused slots are zero (bone 0 with weight 0.0).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoneInfluence {
    pub bones: [u8; 4],
    pub weights: [f32; 4],
}

impl BoneInfluence {
    pub fn new(bones: [u8; 4], weights: [f32; 4]) -> Self {
        Self { bones, weights }
    }

    /// Build from a list of `(bone, weight)` pairs, keeping at most four and
    /// zero-padding the rest.
    pub fn from_pairs(pairs: &[(u8, f32)]) -> Self {
        let mut influence = Self::default();
        for (slot, &(bone, weight)) in pairs.iter().take(4).enumerate() {
            influence.bones[slot] = bone;
            influence.weights[slot] = weight;
        }
        influence
    }

    /// Build from 8-bit quantized weights (`w / 255`).
    pub fn from_unorm8(bones: [u8; 4], weights: [u8; 4]) -> Self {
        Self {
            bones,
            weights: weights.map(|w| w as f32 / 255.0),
        }
    }

    pub fn weight_sum(&self) -> f32 {
        self.weights.iter().sum()
    }
}

impl Record for BoneInfluence {
    const SIZE: usize = 20;

    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.bones);
        for w in self.weights {
            out.extend_from_slice(&w.to_le_bytes());
        }
    }

    fn decode(bytes: &[u8]) -> Option<Self> {
        let bones = bytes.get(0..4)?;
        Some(Self {
            bones: [bones[0], bones[1], bones[2], bones[3]],
            weights: f32s_at(bytes, 4)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_size() {
        let mut buf = Vec::new();
        Vertex::default().encode(&mut buf);
        assert_eq!(buf.len(), Vertex::SIZE);
        assert_eq!(Vertex::SIZE, 56);
    }

    #[test]
    fn test_vertex_field_offsets() {
        let v = Vertex {
            position: Vec3::new(1.0, 2.0, 3.0),
            normal: Vec3::Z,
            tangent: Vec3::X,
            uv: Vec2::new(0.25, 0.75),
            uv2: Vec2::new(0.5, 0.5),
            color: Color::rgba(10, 20, 30, 40),
        };
        let mut buf = Vec::new();
        v.encode(&mut buf);
        assert_eq!(&buf[0..4], &1.0f32.to_le_bytes());
        assert_eq!(&buf[0x14..0x18], &1.0f32.to_le_bytes()); // normal.z
        assert_eq!(&buf[0x18..0x1C], &1.0f32.to_le_bytes()); // tangent.x
        assert_eq!(&buf[0x24..0x28], &0.25f32.to_le_bytes());
        assert_eq!(&buf[0x34..0x38], &[10, 20, 30, 40]);
        assert_eq!(Vertex::decode(&buf), Some(v));
    }

    #[test]
    fn test_default_vertex_is_opaque_white() {
        let v = Vertex::new(Vec3::ONE, Vec2::ZERO);
        assert_eq!(v.color, Color::WHITE);
        assert_eq!(v.normal, Vec3::ZERO);
    }

    #[test]
    fn test_influence_zero_padding() {
        let inf = BoneInfluence::from_pairs(&[(3, 0.75), (7, 0.25)]);
        assert_eq!(inf.bones, [3, 7, 0, 0]);
        assert_eq!(inf.weights, [0.75, 0.25, 0.0, 0.0]);
    }

    #[test]
    fn test_influence_unorm8_weights() {
        let inf = BoneInfluence::from_unorm8([1, 2, 0, 0], [255, 0, 0, 0]);
        assert_eq!(inf.weights[0], 1.0);
        assert_eq!(inf.weight_sum(), 1.0);
    }

    #[test]
    fn test_influence_layout() {
        let inf = BoneInfluence::new([1, 2, 3, 4], [0.5, 0.25, 0.125, 0.125]);
        let mut buf = Vec::new();
        inf.encode(&mut buf);
        assert_eq!(buf.len(), BoneInfluence::SIZE);
        assert_eq!(&buf[0..4], &[1, 2, 3, 4]);
        assert_eq!(BoneInfluence::decode(&buf), Some(inf));
    }
}
