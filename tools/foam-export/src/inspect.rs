//! Human- and machine-readable container summaries.

use std::fmt;

use foam_common::{DEFAULT_TICKS_PER_SECOND, ModelContainer};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ModelSummary {
    pub name: String,
    pub version: i32,
    pub animated: bool,
    pub bounds: Option<[[f32; 3]; 2]>,
    pub meshes: Vec<MeshSummary>,
    pub bones: Vec<BoneSummary>,
    pub animations: Vec<ClipSummary>,
    pub materials: Vec<MaterialSummary>,
    pub extensions: Vec<ExtensionSummary>,
}

#[derive(Debug, Serialize)]
pub struct MeshSummary {
    pub name: String,
    pub material_index: u32,
    pub vertices: usize,
    pub indices: Option<usize>,
    pub triangles: usize,
    pub skinned: bool,
}

#[derive(Debug, Serialize)]
pub struct BoneSummary {
    pub name: String,
    pub parent: i32,
}

#[derive(Debug, Serialize)]
pub struct ClipSummary {
    pub name: String,
    pub frames: usize,
    pub bones: usize,
    pub ticks_per_second: f32,
    pub seconds: f32,
}

#[derive(Debug, Serialize)]
pub struct MaterialSummary {
    pub name: String,
    /// `(kind, file)` pairs
    pub textures: Vec<(String, String)>,
}

#[derive(Debug, Serialize)]
pub struct ExtensionSummary {
    pub name: String,
    pub bytes: usize,
}

impl ModelSummary {
    pub fn new(model: &ModelContainer) -> Self {
        Self {
            name: model.name.clone(),
            version: model.version,
            animated: model.flags.is_animated(),
            bounds: model
                .calc_bounds()
                .map(|(min, max)| [min.to_array(), max.to_array()]),
            meshes: model
                .meshes
                .iter()
                .map(|m| MeshSummary {
                    name: m.name.clone(),
                    material_index: m.material_index,
                    vertices: m.vertices.len(),
                    indices: m.indices.as_ref().map(Vec::len),
                    triangles: m.triangle_count(),
                    skinned: m.bone_influences.is_some(),
                })
                .collect(),
            bones: model
                .bones
                .iter()
                .flatten()
                .map(|b| BoneSummary {
                    name: b.name.clone(),
                    parent: b.parent,
                })
                .collect(),
            animations: model
                .animations
                .iter()
                .flatten()
                .map(|c| ClipSummary {
                    name: c.name.clone(),
                    frames: c.frames.len(),
                    bones: c.bone_names.len(),
                    ticks_per_second: c.effective_rate(DEFAULT_TICKS_PER_SECOND),
                    seconds: c.duration_seconds(DEFAULT_TICKS_PER_SECOND),
                })
                .collect(),
            materials: model
                .materials
                .iter()
                .flatten()
                .map(|m| MaterialSummary {
                    name: m.name.clone(),
                    textures: m
                        .textures
                        .iter()
                        .map(|t| (t.kind.to_string(), t.name.clone()))
                        .collect(),
                })
                .collect(),
            extensions: model
                .extensions
                .iter()
                .flatten()
                .map(|e| ExtensionSummary {
                    name: e.name.clone(),
                    bytes: e.data.len(),
                })
                .collect(),
        }
    }
}

impl fmt::Display for ModelSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} (version {}, {})",
            self.name,
            self.version,
            if self.animated { "animated" } else { "static" }
        )?;
        if let Some([min, max]) = self.bounds {
            writeln!(f, "  bounds: {:?} .. {:?}", min, max)?;
        }

        writeln!(f, "  meshes: {}", self.meshes.len())?;
        for m in &self.meshes {
            let indices = m
                .indices
                .map_or_else(|| "flat".to_string(), |n| format!("{} indices", n));
            writeln!(
                f,
                "    {}: {} vertices, {}, {} triangles, material {}{}",
                m.name,
                m.vertices,
                indices,
                m.triangles,
                m.material_index,
                if m.skinned { ", skinned" } else { "" }
            )?;
        }

        writeln!(f, "  bones: {}", self.bones.len())?;
        for (i, b) in self.bones.iter().enumerate() {
            writeln!(f, "    [{}] {} (parent {})", i, b.name, b.parent)?;
        }

        writeln!(f, "  animations: {}", self.animations.len())?;
        for c in &self.animations {
            writeln!(
                f,
                "    {}: {} frames x {} bones, {:.2}s at {} tps",
                c.name, c.frames, c.bones, c.seconds, c.ticks_per_second
            )?;
        }

        writeln!(f, "  materials: {}", self.materials.len())?;
        for m in &self.materials {
            writeln!(f, "    {}", m.name)?;
            for (kind, file) in &m.textures {
                writeln!(f, "      {}: {}", kind, file)?;
            }
        }

        writeln!(f, "  extensions: {}", self.extensions.len())?;
        for e in &self.extensions {
            writeln!(f, "    {}: {} bytes", e.name, e.bytes)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foam_common::{Extension, Material, Mesh, ModelFlags, Vertex};
    use glam::{Vec2, Vec3};

    #[test]
    fn test_summary_counts() {
        let mut model = ModelContainer::new("crate", ModelFlags::STATIC);
        let vertices = vec![
            Vertex::new(Vec3::ZERO, Vec2::ZERO),
            Vertex::new(Vec3::ONE, Vec2::ZERO),
            Vertex::new(Vec3::X, Vec2::ZERO),
        ];
        model.meshes.push(Mesh::new("box", vertices, Some(vec![0, 1, 2]), 0));
        model.materials = Some(vec![Material::with_default_diffuse("wood")]);
        model.add_extension(Extension::new("lightmap", vec![0; 16]));

        let summary = ModelSummary::new(&model);
        assert_eq!(summary.meshes[0].triangles, 1);
        assert_eq!(summary.meshes[0].indices, Some(3));
        assert_eq!(summary.bounds, Some([[0.0; 3], [1.0; 3]]));
        assert_eq!(summary.extensions[0].bytes, 16);

        let text = summary.to_string();
        assert!(text.contains("crate (version 2, static)"));
        assert!(text.contains("diffuse: wood"));
        assert!(text.contains("lightmap: 16 bytes"));

        let json: serde_json::Value = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["meshes"][0]["vertices"], 3);
        assert_eq!(json["materials"][0]["textures"][0][0], "diffuse");
    }
}
