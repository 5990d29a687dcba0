//! Animation clip entity
//!
//! # Layout
//! ```text
//! name              string
//! bone_names        count:i32 + count × string
//! frames            count:i32 + count × (count:i32 + count × Mat4)
//! duration_ticks    f32
//! ticks_per_second  f32 (0 ⇒ caller substitutes a default rate)
//! ```
//!
//! Frame transforms are bone-local and ordered like `bone_names`.

use std::io::{Read, Seek, Write};

use glam::Mat4;

use super::serialization::{BinarySerializable, read_list, write_list};
use crate::cursor::{BinaryReader, BinaryWriter};
use crate::error::Result;

/// Playback rate used when a clip stores `ticks_per_second == 0`.
pub const DEFAULT_TICKS_PER_SECOND: f32 = 21.0;

/// One sampled pose: a local transform per clip bone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub transforms: Vec<Mat4>,
}

impl Frame {
    pub fn new(transforms: Vec<Mat4>) -> Self {
        Self { transforms }
    }
}

impl BinarySerializable for Frame {
    fn write_to<W: Write + Seek>(&self, w: &mut BinaryWriter<W>) -> Result<()> {
        w.write_record_array(&self.transforms)
    }

    fn read_from<R: Read + Seek>(r: &mut BinaryReader<R>) -> Result<Self> {
        Ok(Self {
            transforms: r.read_record_array()?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationClip {
    pub name: String,
    pub bone_names: Vec<String>,
    pub frames: Vec<Frame>,
    pub duration_ticks: f32,
    pub ticks_per_second: f32,
}

impl AnimationClip {
    pub fn new(
        name: impl Into<String>,
        bone_names: Vec<String>,
        frames: Vec<Frame>,
        duration_ticks: f32,
        ticks_per_second: f32,
    ) -> Self {
        Self {
            name: name.into(),
            bone_names,
            frames,
            duration_ticks,
            ticks_per_second,
        }
    }

    /// Position of `bone` in this clip's per-frame ordering.
    pub fn bone_slot(&self, bone: &str) -> Option<usize> {
        self.bone_names.iter().position(|n| n == bone)
    }

    /// Local transform of `bone` at `frame`.
    pub fn local_transform(&self, frame: usize, bone: &str) -> Option<Mat4> {
        let slot = self.bone_slot(bone)?;
        self.frames.get(frame)?.transforms.get(slot).copied()
    }

    /// Stored rate, or `default_rate` when the clip stores 0.
    pub fn effective_rate(&self, default_rate: f32) -> f32 {
        if self.ticks_per_second == 0.0 {
            default_rate
        } else {
            self.ticks_per_second
        }
    }

    /// Playback length in seconds.
    pub fn duration_seconds(&self, default_rate: f32) -> f32 {
        self.duration_ticks / self.effective_rate(default_rate)
    }

    /// Time each frame stays on screen. Returns 0 for an empty clip.
    pub fn seconds_per_frame(&self, default_rate: f32) -> f32 {
        if self.frames.is_empty() {
            return 0.0;
        }
        self.duration_seconds(default_rate) / self.frames.len() as f32
    }
}

impl BinarySerializable for AnimationClip {
    fn write_to<W: Write + Seek>(&self, w: &mut BinaryWriter<W>) -> Result<()> {
        w.write_string(&self.name)?;
        write_list(w, &self.bone_names)?;
        write_list(w, &self.frames)?;
        w.write_f32(self.duration_ticks)?;
        w.write_f32(self.ticks_per_second)
    }

    fn read_from<R: Read + Seek>(r: &mut BinaryReader<R>) -> Result<Self> {
        Ok(Self {
            name: r.read_string()?,
            bone_names: read_list(r)?,
            frames: read_list(r)?,
            duration_ticks: r.read_f32()?,
            ticks_per_second: r.read_f32()?,
        })
    }
}
