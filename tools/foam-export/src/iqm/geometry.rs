//! Vertex reconstruction and submesh extraction.

use foam_common::{BoneInfluence, Color, FormatError, Mesh, Result, Vertex};
use glam::{Vec2, Vec3};

use super::context::DecodeContext;
use crate::partition::{GlobalGeometry, MaterialTable, TriangleRange, convert_basis};

/// Build the global vertex buffer, defaulting absent attributes.
pub fn build_vertices(ctx: &DecodeContext) -> Result<Vec<Vertex>> {
    let count = ctx.header.num_vertexes as usize;
    if count == 0 {
        return Ok(Vec::new());
    }
    let attrs = &ctx.attributes;
    let positions = attrs
        .positions
        .as_deref()
        .ok_or(FormatError::MissingSection("position vertex array"))?;

    let vertices = positions
        .iter()
        .enumerate()
        .map(|(i, &position)| Vertex {
            position,
            normal: attribute(&attrs.normals, i).unwrap_or(Vec3::ZERO),
            tangent: attribute(&attrs.tangents, i).map_or(Vec3::ZERO, |t| t.truncate()),
            uv: attribute(&attrs.texcoords, i).unwrap_or(Vec2::ZERO),
            uv2: Vec2::ZERO,
            color: attribute(&attrs.colors, i).unwrap_or(Color::WHITE),
        })
        .collect();
    Ok(vertices)
}

fn attribute<T: Copy>(array: &Option<Vec<T>>, index: usize) -> Option<T> {
    array.as_ref()?.get(index).copied()
}

/// Per-vertex skinning data, present only when both blend arrays exist.
pub fn build_influences(ctx: &DecodeContext) -> Option<Vec<BoneInfluence>> {
    let attrs = &ctx.attributes;
    match (&attrs.blend_indexes, &attrs.blend_weights) {
        (Some(indexes), Some(weights)) => Some(
            indexes
                .iter()
                .zip(weights)
                .map(|(&bones, &w)| BoneInfluence::from_unorm8(bones, w))
                .collect(),
        ),
        (None, None) => None,
        (Some(_), None) | (None, Some(_)) => {
            tracing::warn!("IQM has blend indexes or blend weights but not both; skinning ignored");
            None
        }
    }
}

/// Partition every submesh directory entry into a local mesh.
pub fn build_meshes(
    ctx: &DecodeContext,
    vertices: &[Vertex],
    influences: Option<&[BoneInfluence]>,
    materials: &mut MaterialTable,
    convert: bool,
) -> Result<Vec<Mesh>> {
    let geometry = GlobalGeometry {
        vertices,
        influences,
        triangles: &ctx.triangles,
    };

    let mut meshes = Vec::with_capacity(ctx.meshes.len());
    for entry in &ctx.meshes {
        let name = ctx.text_at(entry.name)?;
        let material = ctx.text_at(entry.material)?;
        let material_index = materials.index_for(&material);

        let range = TriangleRange::new(entry.first_triangle, entry.num_triangles);
        let Some(mut mesh) = geometry.partition(&name, range, material_index)? else {
            tracing::warn!("Skipping empty submesh '{}'", name);
            continue;
        };
        if convert {
            convert_basis(&mut mesh);
        }
        tracing::debug!(
            "Submesh '{}': {} vertices, {} triangles, material '{}'",
            mesh.name,
            mesh.vertices.len(),
            mesh.triangle_count(),
            material
        );
        meshes.push(mesh);
    }
    Ok(meshes)
}
