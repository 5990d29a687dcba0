//! IQM file header
//!
//! # Layout (124 bytes, all fields u32 LE after the magic)
//! ```text
//! 0x00: magic             [u8; 16] "INTERQUAKEMODEL\0"
//! 0x10: version           (2)
//! 0x14: filesize
//! 0x18: flags
//! 0x1C: num_text, ofs_text
//! 0x24: num_meshes, ofs_meshes
//! 0x2C: num_vertexarrays, num_vertexes, ofs_vertexarrays
//! 0x38: num_triangles, ofs_triangles, ofs_adjacency
//! 0x44: num_joints, ofs_joints
//! 0x4C: num_poses, ofs_poses
//! 0x54: num_anims, ofs_anims
//! 0x5C: num_frames, num_framechannels, ofs_frames, ofs_bounds
//! 0x6C: num_comment, ofs_comment
//! 0x74: num_extensions, ofs_extensions
//! ```
//!
//! Every `ofs_*` is an absolute offset from the start of the file and is 0
//! when the section is empty.

use foam_common::cursor::{Record, u32_at};

/// File signature, including the terminating NUL.
pub const IQM_MAGIC: &[u8; 16] = b"INTERQUAKEMODEL\0";

/// The only supported revision.
pub const IQM_VERSION: u32 = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IqmHeader {
    pub magic: [u8; 16],
    pub version: u32,
    pub filesize: u32,
    pub flags: u32,
    pub num_text: u32,
    pub ofs_text: u32,
    pub num_meshes: u32,
    pub ofs_meshes: u32,
    pub num_vertexarrays: u32,
    pub num_vertexes: u32,
    pub ofs_vertexarrays: u32,
    pub num_triangles: u32,
    pub ofs_triangles: u32,
    pub ofs_adjacency: u32,
    pub num_joints: u32,
    pub ofs_joints: u32,
    pub num_poses: u32,
    pub ofs_poses: u32,
    pub num_anims: u32,
    pub ofs_anims: u32,
    pub num_frames: u32,
    pub num_framechannels: u32,
    pub ofs_frames: u32,
    pub ofs_bounds: u32,
    pub num_comment: u32,
    pub ofs_comment: u32,
    pub num_extensions: u32,
    pub ofs_extensions: u32,
}

impl IqmHeader {
    pub fn has_valid_magic(&self) -> bool {
        &self.magic == IQM_MAGIC
    }

    fn fields(&self) -> [u32; 27] {
        [
            self.version,
            self.filesize,
            self.flags,
            self.num_text,
            self.ofs_text,
            self.num_meshes,
            self.ofs_meshes,
            self.num_vertexarrays,
            self.num_vertexes,
            self.ofs_vertexarrays,
            self.num_triangles,
            self.ofs_triangles,
            self.ofs_adjacency,
            self.num_joints,
            self.ofs_joints,
            self.num_poses,
            self.ofs_poses,
            self.num_anims,
            self.ofs_anims,
            self.num_frames,
            self.num_framechannels,
            self.ofs_frames,
            self.ofs_bounds,
            self.num_comment,
            self.ofs_comment,
            self.num_extensions,
            self.ofs_extensions,
        ]
    }
}

impl Record for IqmHeader {
    const SIZE: usize = 124;

    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.magic);
        for field in self.fields() {
            out.extend_from_slice(&field.to_le_bytes());
        }
    }

    fn decode(bytes: &[u8]) -> Option<Self> {
        let magic: [u8; 16] = bytes.get(..16)?.try_into().ok()?;
        let mut at = 16;
        let mut next = || {
            let value = u32_at(bytes, at);
            at += 4;
            value
        };
        Some(Self {
            magic,
            version: next()?,
            filesize: next()?,
            flags: next()?,
            num_text: next()?,
            ofs_text: next()?,
            num_meshes: next()?,
            ofs_meshes: next()?,
            num_vertexarrays: next()?,
            num_vertexes: next()?,
            ofs_vertexarrays: next()?,
            num_triangles: next()?,
            ofs_triangles: next()?,
            ofs_adjacency: next()?,
            num_joints: next()?,
            ofs_joints: next()?,
            num_poses: next()?,
            ofs_poses: next()?,
            num_anims: next()?,
            ofs_anims: next()?,
            num_frames: next()?,
            num_framechannels: next()?,
            ofs_frames: next()?,
            ofs_bounds: next()?,
            num_comment: next()?,
            ofs_comment: next()?,
            num_extensions: next()?,
            ofs_extensions: next()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_offsets() {
        let header = IqmHeader {
            magic: *IQM_MAGIC,
            version: IQM_VERSION,
            num_vertexes: 0xAABB,
            ofs_frames: 0x1234,
            ofs_extensions: 0xCAFE,
            ..Default::default()
        };
        let mut buf = Vec::new();
        header.encode(&mut buf);
        assert_eq!(buf.len(), IqmHeader::SIZE);
        assert_eq!(&buf[..16], IQM_MAGIC);
        assert_eq!(u32_at(&buf, 0x10), Some(2));
        assert_eq!(u32_at(&buf, 0x30), Some(0xAABB));
        assert_eq!(u32_at(&buf, 0x64), Some(0x1234));
        assert_eq!(u32_at(&buf, 0x78), Some(0xCAFE));
        assert_eq!(IqmHeader::decode(&buf), Some(header));
        assert!(IqmHeader::decode(&buf[..123]).is_none());
    }
}
