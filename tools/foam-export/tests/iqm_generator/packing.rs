//! Section layout for the generated file.
//!
//! Sections follow the 124-byte header, each 4-byte aligned. Empty sections
//! get offset 0.

use foam_common::cursor::Record;
use foam_export::iqm::records::{
    Anim, Joint, MeshEntry, Triangle, VertexArray, VertexArrayKind, component,
};
use foam_export::iqm::{IQM_MAGIC, IQM_VERSION, IqmHeader};

use super::mesh_data::{AnimationData, MeshData, SkeletonData};

/// String table with offset 0 reserved for the empty string.
struct TextTable(Vec<u8>);

impl TextTable {
    fn new() -> Self {
        Self(vec![0])
    }

    fn add(&mut self, s: &str) -> u32 {
        let at = self.0.len() as u32;
        self.0.extend_from_slice(s.as_bytes());
        self.0.push(0);
        at
    }
}

fn encode_all<T: Record>(items: &[T]) -> Vec<u8> {
    let mut out = Vec::with_capacity(items.len() * T::SIZE);
    for item in items {
        item.encode(&mut out);
    }
    out
}

fn place(out: &mut Vec<u8>, data: &[u8]) -> u32 {
    if data.is_empty() {
        return 0;
    }
    while out.len() % 4 != 0 {
        out.push(0);
    }
    let at = out.len() as u32;
    out.extend_from_slice(data);
    at
}

pub fn pack_iqm(
    mesh: &MeshData,
    skeleton: &SkeletonData,
    animation: &AnimationData,
    comment: &[u8],
) -> Vec<u8> {
    let mut text = TextTable::new();

    let meshes: Vec<MeshEntry> = mesh
        .submeshes
        .iter()
        .map(|s| MeshEntry {
            name: text.add(s.name),
            material: text.add(s.material),
            first_vertex: 0,
            num_vertexes: mesh.positions.len() as u32,
            first_triangle: s.first_triangle,
            num_triangles: s.num_triangles,
        })
        .collect();
    let joints: Vec<Joint> = skeleton
        .joints
        .iter()
        .map(|j| Joint {
            name: text.add(j.name),
            parent: j.parent,
            translate: j.translate,
            rotate: j.rotate,
            scale: j.scale,
        })
        .collect();
    let anims: Vec<Anim> = animation
        .clips
        .iter()
        .map(|c| Anim {
            name: text.add(c.name),
            first_frame: c.first_frame,
            num_frames: c.num_frames,
            framerate: c.framerate,
            flags: 0,
        })
        .collect();

    let mut out = vec![0u8; IqmHeader::SIZE];

    let mut arrays = vec![
        (
            VertexArrayKind::Position,
            component::FLOAT,
            3,
            encode_all(&mesh.positions),
        ),
        (
            VertexArrayKind::Normal,
            component::FLOAT,
            3,
            encode_all(&mesh.normals),
        ),
        (
            VertexArrayKind::TexCoord,
            component::FLOAT,
            2,
            encode_all(&mesh.uvs),
        ),
    ];
    if !mesh.blend_indexes.is_empty() {
        arrays.push((
            VertexArrayKind::BlendIndexes,
            component::UBYTE,
            4,
            encode_all(&mesh.blend_indexes),
        ));
        arrays.push((
            VertexArrayKind::BlendWeights,
            component::UBYTE,
            4,
            encode_all(&mesh.blend_weights),
        ));
    }
    let descriptors: Vec<VertexArray> = arrays
        .iter()
        .map(|(kind, format, size, data)| VertexArray {
            kind: *kind,
            flags: 0,
            format: *format,
            size: *size,
            offset: place(&mut out, data),
        })
        .collect();

    let triangles: Vec<Triangle> = mesh.triangles.iter().map(|t| Triangle(*t)).collect();
    let num_frames = if animation.num_framechannels == 0 {
        0
    } else {
        animation.frame_data.len() as u32 / animation.num_framechannels
    };

    let header = IqmHeader {
        magic: *IQM_MAGIC,
        version: IQM_VERSION,
        num_text: text.0.len() as u32,
        ofs_text: place(&mut out, &text.0),
        num_meshes: meshes.len() as u32,
        ofs_meshes: place(&mut out, &encode_all(&meshes)),
        num_vertexarrays: descriptors.len() as u32,
        num_vertexes: mesh.positions.len() as u32,
        ofs_vertexarrays: place(&mut out, &encode_all(&descriptors)),
        num_triangles: triangles.len() as u32,
        ofs_triangles: place(&mut out, &encode_all(&triangles)),
        num_joints: joints.len() as u32,
        ofs_joints: place(&mut out, &encode_all(&joints)),
        num_poses: skeleton.poses.len() as u32,
        ofs_poses: place(&mut out, &encode_all(&skeleton.poses)),
        num_anims: anims.len() as u32,
        ofs_anims: place(&mut out, &encode_all(&anims)),
        num_frames,
        num_framechannels: animation.num_framechannels,
        ofs_frames: place(&mut out, &encode_all(&animation.frame_data)),
        num_comment: comment.len() as u32,
        ofs_comment: place(&mut out, comment),
        ..Default::default()
    };

    let filesize = out.len() as u32;
    let mut head = Vec::with_capacity(IqmHeader::SIZE);
    IqmHeader { filesize, ..header }.encode(&mut head);
    out[..IqmHeader::SIZE].copy_from_slice(&head);
    out
}
