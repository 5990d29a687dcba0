//! Binary cursor layer
//!
//! Sequential reads and writes over a seekable byte stream. Every multi-byte
//! value is little-endian and decoded field by field; nothing relies on the
//! in-memory layout of a Rust struct.
//!
//! # Wire primitives
//! ```text
//! string       = len:i32 + len UTF-8 bytes (no terminator)
//! record       = Record::SIZE bytes, fields in declaration order
//! record array = count:i32 + count × Record::SIZE bytes
//! ```
//!
//! Reaching the end of the stream in the middle of any of these is fatal
//! ([`FormatError::Truncated`](crate::FormatError::Truncated)).

mod reader;
mod writer;


pub use reader::BinaryReader;
pub use writer::BinaryWriter;

use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

/// A fixed-size value with an explicit little-endian wire layout.
///
/// Implementors append exactly `SIZE` bytes in `encode` and consume exactly
/// `SIZE` bytes in `decode`.
pub trait Record: Sized {
    /// Serialized size in bytes.
    const SIZE: usize;

    /// Append the wire form of `self` to `out`.
    fn encode(&self, out: &mut Vec<u8>);

    /// Decode from the first `SIZE` bytes of `bytes`.
    ///
    /// Returns `None` if the slice is too short.
    fn decode(bytes: &[u8]) -> Option<Self>;
}

// ============================================================================
// Little-endian slice helpers
// ============================================================================

/// Read a little-endian `u16` at byte offset `at`.
#[inline]
pub fn u16_at(bytes: &[u8], at: usize) -> Option<u16> {
    let b = bytes.get(at..at + 2)?;
    Some(u16::from_le_bytes([b[0], b[1]]))
}

/// Read a little-endian `u32` at byte offset `at`.
#[inline]
pub fn u32_at(bytes: &[u8], at: usize) -> Option<u32> {
    let b = bytes.get(at..at + 4)?;
    Some(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

/// Read a little-endian `i32` at byte offset `at`.
#[inline]
pub fn i32_at(bytes: &[u8], at: usize) -> Option<i32> {
    u32_at(bytes, at).map(|v| v as i32)
}

/// Read a little-endian `f32` at byte offset `at`.
#[inline]
pub fn f32_at(bytes: &[u8], at: usize) -> Option<f32> {
    u32_at(bytes, at).map(f32::from_bits)
}

/// Read `N` consecutive little-endian `f32`s starting at byte offset `at`.
#[inline]
pub fn f32s_at<const N: usize>(bytes: &[u8], at: usize) -> Option<[f32; N]> {
    let mut out = [0.0f32; N];
    for (i, v) in out.iter_mut().enumerate() {
        *v = f32_at(bytes, at + i * 4)?;
    }
    Some(out)
}

fn put_f32s(out: &mut Vec<u8>, values: &[f32]) {
    for v in values {
        out.extend_from_slice(&v.to_le_bytes());
    }
}

// ============================================================================
// Primitive records
// ============================================================================

impl Record for u8 {
    const SIZE: usize = 1;

    fn encode(&self, out: &mut Vec<u8>) {
        out.push(*self);
    }

    fn decode(bytes: &[u8]) -> Option<Self> {
        bytes.first().copied()
    }
}

/// Four packed bytes (blend indices, unorm weights, RGBA).
impl Record for [u8; 4] {
    const SIZE: usize = 4;

    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self);
    }

    fn decode(bytes: &[u8]) -> Option<Self> {
        bytes.get(..4)?.try_into().ok()
    }
}

impl Record for u16 {
    const SIZE: usize = 2;

    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }

    fn decode(bytes: &[u8]) -> Option<Self> {
        u16_at(bytes, 0)
    }
}

impl Record for u32 {
    const SIZE: usize = 4;

    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }

    fn decode(bytes: &[u8]) -> Option<Self> {
        u32_at(bytes, 0)
    }
}

impl Record for i32 {
    const SIZE: usize = 4;

    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }

    fn decode(bytes: &[u8]) -> Option<Self> {
        i32_at(bytes, 0)
    }
}

impl Record for f32 {
    const SIZE: usize = 4;

    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }

    fn decode(bytes: &[u8]) -> Option<Self> {
        f32_at(bytes, 0)
    }
}

// ============================================================================
// Math records
// ============================================================================

impl Record for Vec2 {
    const SIZE: usize = 8;

    fn encode(&self, out: &mut Vec<u8>) {
        put_f32s(out, &self.to_array());
    }

    fn decode(bytes: &[u8]) -> Option<Self> {
        f32s_at::<2>(bytes, 0).map(Vec2::from_array)
    }
}

impl Record for Vec3 {
    const SIZE: usize = 12;

    fn encode(&self, out: &mut Vec<u8>) {
        put_f32s(out, &self.to_array());
    }

    fn decode(bytes: &[u8]) -> Option<Self> {
        f32s_at::<3>(bytes, 0).map(Vec3::from_array)
    }
}

impl Record for Vec4 {
    const SIZE: usize = 16;

    fn encode(&self, out: &mut Vec<u8>) {
        put_f32s(out, &self.to_array());
    }

    fn decode(bytes: &[u8]) -> Option<Self> {
        f32s_at::<4>(bytes, 0).map(Vec4::from_array)
    }
}

/// Quaternions are stored `<x, y, z, w>`.
impl Record for Quat {
    const SIZE: usize = 16;

    fn encode(&self, out: &mut Vec<u8>) {
        put_f32s(out, &self.to_array());
    }

    fn decode(bytes: &[u8]) -> Option<Self> {
        f32s_at::<4>(bytes, 0).map(Quat::from_array)
    }
}

/// 4×4 matrices are stored as 16 floats, column-major.
impl Record for Mat4 {
    const SIZE: usize = 64;

    fn encode(&self, out: &mut Vec<u8>) {
        put_f32s(out, &self.to_cols_array());
    }

    fn decode(bytes: &[u8]) -> Option<Self> {
        f32s_at::<16>(bytes, 0).map(|cols| Mat4::from_cols_array(&cols))
    }
}
