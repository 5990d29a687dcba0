//! Submesh partitioning and basis conversion
//!
//! Source formats store one global vertex buffer and one global triangle
//! stream. Each submesh becomes a self-contained [`Mesh`] whose vertices are
//! the slice `[min_index, max_index]` of the global buffer and whose indices
//! are rebased to start at 0.

use foam_common::{BoneInfluence, FormatError, Material, Mesh, Vertex};
use glam::Vec3Swizzles;
use hashbrown::HashMap;

/// Largest vertex span a 16-bit index buffer can address.
pub const MAX_SUBMESH_VERTICES: usize = u16::MAX as usize + 1;

/// A contiguous range of the global triangle stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriangleRange {
    pub first: u32,
    pub count: u32,
}

impl TriangleRange {
    pub fn new(first: u32, count: u32) -> Self {
        Self { first, count }
    }

    fn end(&self) -> u64 {
        u64::from(self.first) + u64::from(self.count)
    }
}

/// Global buffers shared by every submesh of one source model.
pub struct GlobalGeometry<'a> {
    pub vertices: &'a [Vertex],
    pub influences: Option<&'a [BoneInfluence]>,
    pub triangles: &'a [[u32; 3]],
}

impl GlobalGeometry<'_> {
    /// Materialize the locally indexed mesh for `range`.
    ///
    /// Returns `Ok(None)` for an empty range.
    pub fn partition(
        &self,
        name: &str,
        range: TriangleRange,
        material_index: u32,
    ) -> Result<Option<Mesh>, FormatError> {
        let start = range.first as usize;
        let triangles = usize::try_from(range.end())
            .ok()
            .and_then(|end| self.triangles.get(start..end))
            .ok_or(FormatError::TriangleRangeOutOfBounds {
                first: range.first,
                end: range.end(),
                available: self.triangles.len(),
            })?;

        let Some((min, max)) = triangles
            .iter()
            .flatten()
            .fold(None, |acc: Option<(u32, u32)>, &i| match acc {
                Some((lo, hi)) => Some((lo.min(i), hi.max(i))),
                None => Some((i, i)),
            })
        else {
            return Ok(None);
        };

        if max as usize >= self.vertices.len() {
            return Err(FormatError::IndexOutOfRange {
                mesh: name.to_string(),
                index: max,
                vertex_count: self.vertices.len(),
            });
        }

        let (lo, hi) = (min as usize, max as usize);
        if hi - lo + 1 > MAX_SUBMESH_VERTICES {
            return Err(FormatError::IndexOverflow {
                mesh: name.to_string(),
                vertices: hi - lo + 1,
            });
        }

        // Fits in u16: the span check above bounds every difference.
        let indices = triangles
            .iter()
            .flatten()
            .map(|&i| (i - min) as u16)
            .collect();

        let mut mesh = Mesh::new(
            name,
            self.vertices[lo..=hi].to_vec(),
            Some(indices),
            material_index,
        );
        if let Some(influences) = self.influences {
            let slice = influences.get(lo..=hi).ok_or(FormatError::InfluenceCountMismatch {
                mesh: name.to_string(),
                influences: influences.len(),
                vertices: self.vertices.len(),
            })?;
            mesh.bone_influences = Some(slice.to_vec());
        }
        Ok(Some(mesh))
    }
}

/// Convert a mesh between handedness conventions.
///
/// Reverses triangle winding (`(a, b, c)` becomes `(c, b, a)`), flips the
/// primary texture V and swaps the Y/Z components of normal and tangent. Each
/// vertex is converted exactly once however many triangles share it.
pub fn convert_basis(mesh: &mut Mesh) {
    match &mut mesh.indices {
        Some(indices) => {
            for tri in indices.chunks_exact_mut(3) {
                tri.swap(0, 2);
            }
        }
        None => {
            for tri in mesh.vertices.chunks_exact_mut(3) {
                tri.swap(0, 2);
            }
            if let Some(influences) = &mut mesh.bone_influences {
                for tri in influences.chunks_exact_mut(3) {
                    tri.swap(0, 2);
                }
            }
        }
    }

    for v in &mut mesh.vertices {
        v.uv.y = 1.0 - v.uv.y;
        v.normal = v.normal.xzy();
        v.tangent = v.tangent.xzy();
    }
}

/// Material list that assigns one slot per distinct material name.
#[derive(Debug, Default)]
pub struct MaterialTable {
    materials: Vec<Material>,
    by_name: HashMap<String, u32>,
}

impl MaterialTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of `name`, appending a material with a single diffuse slot the
    /// first time it is seen.
    pub fn index_for(&mut self, name: &str) -> u32 {
        self.index_or_insert_with(name, || Material::with_default_diffuse(name))
    }

    /// Index of `name`, appending `make()` the first time it is seen.
    pub fn index_or_insert_with(&mut self, name: &str, make: impl FnOnce() -> Material) -> u32 {
        if let Some(&index) = self.by_name.get(name) {
            return index;
        }
        let index = self.materials.len() as u32;
        self.materials.push(make());
        self.by_name.insert(name.to_string(), index);
        index
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Finished list; `None` when no material was referenced.
    pub fn into_materials(self) -> Option<Vec<Material>> {
        if self.materials.is_empty() {
            None
        } else {
            Some(self.materials)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foam_common::TextureKind;
    use glam::{Vec2, Vec3};

    fn numbered_vertices(n: usize) -> Vec<Vertex> {
        (0..n)
            .map(|i| Vertex::new(Vec3::splat(i as f32), Vec2::new(0.0, 0.25)))
            .collect()
    }

    #[test]
    fn test_partition_rebases_indices() {
        let vertices = numbered_vertices(12);
        let triangles = [[0, 1, 2], [5, 6, 9], [5, 9, 6], [3, 4, 11]];
        let geometry = GlobalGeometry {
            vertices: &vertices,
            influences: None,
            triangles: &triangles,
        };

        let mesh = geometry
            .partition("sub", TriangleRange::new(1, 2), 3)
            .unwrap()
            .unwrap();

        assert_eq!(mesh.vertices.len(), 5);
        assert_eq!(mesh.vertices[0].position, Vec3::splat(5.0));
        assert_eq!(mesh.vertices[4].position, Vec3::splat(9.0));
        assert_eq!(mesh.indices, Some(vec![0, 1, 4, 0, 4, 1]));
        assert_eq!(mesh.material_index, 3);
        assert!(mesh.bone_influences.is_none());
    }

    #[test]
    fn test_partition_slices_influences() {
        let vertices = numbered_vertices(4);
        let influences: Vec<_> = (0..4u8)
            .map(|i| BoneInfluence::from_pairs(&[(i, 1.0)]))
            .collect();
        let triangles = [[1, 2, 3]];
        let geometry = GlobalGeometry {
            vertices: &vertices,
            influences: Some(&influences),
            triangles: &triangles,
        };

        let mesh = geometry
            .partition("skinned", TriangleRange::new(0, 1), 0)
            .unwrap()
            .unwrap();
        let bones: Vec<u8> = mesh
            .bone_influences
            .unwrap()
            .iter()
            .map(|b| b.bones[0])
            .collect();
        assert_eq!(bones, vec![1, 2, 3]);
    }

    #[test]
    fn test_partition_empty_range() {
        let vertices = numbered_vertices(3);
        let triangles = [[0, 1, 2]];
        let geometry = GlobalGeometry {
            vertices: &vertices,
            influences: None,
            triangles: &triangles,
        };
        assert!(geometry
            .partition("empty", TriangleRange::new(1, 0), 0)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_partition_rejects_bad_ranges() {
        let vertices = numbered_vertices(3);
        let triangles = [[0, 1, 2], [0, 1, 7]];
        let geometry = GlobalGeometry {
            vertices: &vertices,
            influences: None,
            triangles: &triangles,
        };

        let err = geometry
            .partition("past-end", TriangleRange::new(1, 5), 0)
            .unwrap_err();
        assert!(matches!(
            err,
            FormatError::TriangleRangeOutOfBounds { first: 1, end: 6, available: 2 }
        ));

        let err = geometry
            .partition("bad-index", TriangleRange::new(1, 1), 0)
            .unwrap_err();
        assert!(matches!(
            err,
            FormatError::IndexOutOfRange { index: 7, vertex_count: 3, .. }
        ));
    }

    #[test]
    fn test_partition_rejects_wide_span() {
        let vertices = numbered_vertices(MAX_SUBMESH_VERTICES + 1);
        let triangles = [[0, 1, MAX_SUBMESH_VERTICES as u32]];
        let geometry = GlobalGeometry {
            vertices: &vertices,
            influences: None,
            triangles: &triangles,
        };
        let err = geometry
            .partition("wide", TriangleRange::new(0, 1), 0)
            .unwrap_err();
        assert!(matches!(err, FormatError::IndexOverflow { vertices, .. } if vertices == MAX_SUBMESH_VERTICES + 1));
    }

    #[test]
    fn test_basis_conversion_touches_shared_vertices_once() {
        let mut vertices = numbered_vertices(4);
        for v in &mut vertices {
            v.normal = Vec3::new(1.0, 2.0, 3.0);
            v.tangent = Vec3::new(4.0, 5.0, 6.0);
        }
        // Vertices 0 and 2 are shared by both triangles.
        let mut mesh = Mesh::new("quad", vertices, Some(vec![0, 1, 2, 0, 2, 3]), 0);
        convert_basis(&mut mesh);

        assert_eq!(mesh.indices, Some(vec![2, 1, 0, 3, 2, 0]));
        for v in &mesh.vertices {
            assert_eq!(v.uv, Vec2::new(0.0, 0.75));
            assert_eq!(v.normal, Vec3::new(1.0, 3.0, 2.0));
            assert_eq!(v.tangent, Vec3::new(4.0, 6.0, 5.0));
        }
        assert_eq!(mesh.vertices[1].position, Vec3::splat(1.0));
    }

    #[test]
    fn test_basis_conversion_flat_mesh() {
        let mut mesh = Mesh::new("flat", numbered_vertices(6), None, 0);
        convert_basis(&mut mesh);
        let order: Vec<f32> = mesh.vertices.iter().map(|v| v.position.x).collect();
        assert_eq!(order, vec![2.0, 1.0, 0.0, 5.0, 4.0, 3.0]);
    }

    #[test]
    fn test_material_table_dedupes_by_name() {
        let mut table = MaterialTable::new();
        assert_eq!(table.index_for("skin"), 0);
        assert_eq!(table.index_for("cloth"), 1);
        assert_eq!(table.index_for("skin"), 0);
        assert_eq!(table.len(), 2);

        let materials = table.into_materials().unwrap();
        assert_eq!(materials[1].name, "cloth");
        assert_eq!(
            materials[1].find_texture(TextureKind::Diffuse).unwrap().name,
            "cloth"
        );
        assert!(MaterialTable::new().into_materials().is_none());
    }
}
