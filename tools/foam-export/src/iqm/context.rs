//! Section reader shared by every decode step.
//!
//! One [`DecodeContext`] is created per file. It owns the cursor and every
//! section read so far; the build steps borrow from it.

use std::io::Cursor;

use foam_common::cursor::{BinaryReader, Record};
use foam_common::{Color, FormatError, Result};
use glam::{Vec2, Vec3, Vec4};

use super::header::{IQM_VERSION, IqmHeader};
use super::records::{Anim, Joint, MeshEntry, Pose, Triangle, VertexArray, VertexArrayKind};

/// Raw per-vertex attribute arrays, each `num_vertexes` long when present.
#[derive(Debug, Default)]
pub struct VertexAttributes {
    pub positions: Option<Vec<Vec3>>,
    pub texcoords: Option<Vec<Vec2>>,
    pub normals: Option<Vec<Vec3>>,
    pub tangents: Option<Vec<Vec4>>,
    pub blend_indexes: Option<Vec<[u8; 4]>>,
    pub blend_weights: Option<Vec<[u8; 4]>>,
    pub colors: Option<Vec<Color>>,
}

pub struct DecodeContext<'a> {
    reader: BinaryReader<Cursor<&'a [u8]>>,
    len: u64,
    pub header: IqmHeader,
    pub text: Vec<u8>,
    pub comment: Vec<u8>,
    pub attributes: VertexAttributes,
    pub triangles: Vec<[u32; 3]>,
    pub meshes: Vec<MeshEntry>,
    pub joints: Vec<Joint>,
    pub poses: Vec<Pose>,
    pub anims: Vec<Anim>,
    pub frame_data: Vec<u16>,
}

impl<'a> DecodeContext<'a> {
    /// Read the header and check signature and version.
    pub fn open(bytes: &'a [u8]) -> Result<Self> {
        let mut reader = BinaryReader::new(Cursor::new(bytes));
        let header: IqmHeader = reader.read_record()?;

        if !header.has_valid_magic() {
            return Err(FormatError::InvalidSignature { what: "IQM" });
        }
        if header.version != IQM_VERSION {
            return Err(FormatError::UnsupportedSourceVersion {
                what: "IQM",
                found: header.version,
                expected: IQM_VERSION,
            });
        }

        Ok(Self {
            reader,
            len: bytes.len() as u64,
            header,
            text: Vec::new(),
            comment: Vec::new(),
            attributes: VertexAttributes::default(),
            triangles: Vec::new(),
            meshes: Vec::new(),
            joints: Vec::new(),
            poses: Vec::new(),
            anims: Vec::new(),
            frame_data: Vec::new(),
        })
    }

    /// Read every section the decoder uses.
    pub fn read_sections(&mut self) -> Result<()> {
        let h = self.header;

        self.text = self.read_section("text", h.num_text as usize, h.ofs_text)?;
        self.comment = self.read_section("comment", h.num_comment as usize, h.ofs_comment)?;
        self.read_vertex_arrays()?;

        self.triangles = self
            .read_section::<Triangle>("triangles", h.num_triangles as usize, h.ofs_triangles)?
            .into_iter()
            .map(|t| t.0)
            .collect();
        self.meshes = self.read_section("meshes", h.num_meshes as usize, h.ofs_meshes)?;
        self.joints = self.read_section("joints", h.num_joints as usize, h.ofs_joints)?;
        self.poses = self.read_section("poses", h.num_poses as usize, h.ofs_poses)?;
        self.anims = self.read_section("anims", h.num_anims as usize, h.ofs_anims)?;

        let values = u64::from(h.num_frames) * u64::from(h.num_framechannels);
        let values = usize::try_from(values)
            .map_err(|_| FormatError::Malformed(format!("{values} frame channels")))?;
        self.frame_data = self.read_section("frames", values, h.ofs_frames)?;

        tracing::debug!(
            "IQM sections: {} text bytes, {} vertices, {} triangles, {} meshes, {} joints, {} poses, {} anims, {} frames x {} channels",
            self.text.len(),
            h.num_vertexes,
            self.triangles.len(),
            self.meshes.len(),
            self.joints.len(),
            self.poses.len(),
            self.anims.len(),
            h.num_frames,
            h.num_framechannels
        );
        Ok(())
    }

    /// Null-terminated string at `offset` in the text table.
    pub fn text_at(&self, offset: u32) -> Result<String> {
        if offset == 0 && self.text.is_empty() {
            return Ok(String::new());
        }
        let tail = self
            .text
            .get(offset as usize..)
            .filter(|tail| !tail.is_empty())
            .ok_or(FormatError::OffsetOutOfRange {
                what: "text table",
                offset: u64::from(offset),
                len: self.text.len() as u64,
            })?;
        let end = tail.iter().position(|&b| b == 0).ok_or_else(|| {
            FormatError::Malformed(format!("Unterminated string at text offset {offset}"))
        })?;
        String::from_utf8(tail[..end].to_vec()).map_err(|_| FormatError::InvalidUtf8)
    }

    fn seek_to(&mut self, what: &'static str, offset: u32) -> Result<()> {
        if offset == 0 {
            return Err(FormatError::MissingSection(what));
        }
        if u64::from(offset) > self.len {
            return Err(FormatError::OffsetOutOfRange {
                what,
                offset: u64::from(offset),
                len: self.len,
            });
        }
        self.reader.seek(u64::from(offset))?;
        Ok(())
    }

    /// `count` records at an absolute offset. Empty sections are not sought.
    fn read_section<T: Record>(
        &mut self,
        what: &'static str,
        count: usize,
        offset: u32,
    ) -> Result<Vec<T>> {
        if count == 0 {
            return Ok(Vec::new());
        }
        self.seek_to(what, offset)?;
        self.reader.read_records(count)
    }

    fn read_vertex_arrays(&mut self) -> Result<()> {
        let h = self.header;
        let arrays: Vec<VertexArray> = self.read_section(
            "vertex arrays",
            h.num_vertexarrays as usize,
            h.ofs_vertexarrays,
        )?;
        let count = h.num_vertexes as usize;

        for array in arrays {
            let unsupported = FormatError::UnsupportedVertexArray {
                kind: array.kind.to_u32(),
                format: array.format,
                size: array.size,
            };
            match array.kind.expected_layout() {
                Some((format, size)) if array.format == format && array.size == size => {}
                _ => return Err(unsupported),
            }

            let at = array.offset;
            let what = "vertex array data";
            match array.kind {
                VertexArrayKind::Position => {
                    self.attributes.positions = Some(self.read_section(what, count, at)?);
                }
                VertexArrayKind::TexCoord => {
                    self.attributes.texcoords = Some(self.read_section(what, count, at)?);
                }
                VertexArrayKind::Normal => {
                    self.attributes.normals = Some(self.read_section(what, count, at)?);
                }
                VertexArrayKind::Tangent => {
                    self.attributes.tangents = Some(self.read_section(what, count, at)?);
                }
                VertexArrayKind::BlendIndexes => {
                    self.attributes.blend_indexes = Some(self.read_section(what, count, at)?);
                }
                VertexArrayKind::BlendWeights => {
                    self.attributes.blend_weights = Some(self.read_section(what, count, at)?);
                }
                VertexArrayKind::Color => {
                    self.attributes.colors = Some(self.read_section(what, count, at)?);
                }
                VertexArrayKind::Other(_) => return Err(unsupported),
            }
        }
        Ok(())
    }
}

