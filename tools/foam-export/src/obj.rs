//! OBJ polygon-soup conversion
//!
//! Faces are fan-triangulated and grouped into one mesh per `usemtl` name
//! (faces before any `usemtl` go to `"default"`). Meshes carry no index
//! buffer: every triangle corner is its own vertex.

use foam_common::{FormatError, Material, Mesh, ModelContainer, ModelFlags, Texture, TextureKind, Vertex};
use glam::{Vec2, Vec3};
use hashbrown::{HashMap, HashSet};

use crate::loader::ConvertOptions;
use crate::partition::{MaterialTable, convert_basis};

/// Group name used for faces that precede any `usemtl`.
pub const DEFAULT_MATERIAL: &str = "default";

type ParseResult<T> = Result<T, FormatError>;

fn malformed(line: usize, what: impl std::fmt::Display) -> FormatError {
    FormatError::Malformed(format!("OBJ line {}: {}", line, what))
}

fn parse_floats<const N: usize>(parts: &[&str], line: usize) -> ParseResult<[f32; N]> {
    let mut out = [0.0; N];
    for (i, slot) in out.iter_mut().enumerate() {
        let token = parts
            .get(i)
            .ok_or_else(|| malformed(line, format!("expected {} components", N)))?;
        *slot = token
            .parse()
            .map_err(|_| malformed(line, format!("invalid number '{}'", token)))?;
    }
    Ok(out)
}

/// Resolve a 1-based (or negative, relative) OBJ reference against `len`.
fn resolve_index(token: &str, len: usize, line: usize) -> ParseResult<usize> {
    let raw: i64 = token
        .parse()
        .map_err(|_| malformed(line, format!("invalid index '{}'", token)))?;
    let resolved = match raw {
        0 => None,
        r if r > 0 => Some(r - 1),
        r => Some(len as i64 + r),
    };
    resolved
        .filter(|&i| i >= 0 && (i as usize) < len)
        .map(|i| i as usize)
        .ok_or_else(|| malformed(line, format!("index {} out of range ({} defined)", raw, len)))
}

#[derive(Default)]
struct ObjState {
    positions: Vec<Vec3>,
    uvs: Vec<Vec2>,
    normals: Vec<Vec3>,
    /// Triangle-list vertices per material, in first-use order
    groups: Vec<(String, Vec<Vertex>)>,
    current: Option<usize>,
    material_libs: Vec<String>,
    unknown: HashSet<String>,
}

impl ObjState {
    fn use_material(&mut self, name: &str) {
        let index = match self.groups.iter().position(|(n, _)| n == name) {
            Some(i) => i,
            None => {
                self.groups.push((name.to_string(), Vec::new()));
                self.groups.len() - 1
            }
        };
        self.current = Some(index);
    }

    /// Parse a face corner: `v`, `v/vt`, `v/vt/vn` or `v//vn`.
    fn corner(&self, token: &str, line: usize) -> ParseResult<Vertex> {
        let mut parts = token.split('/');
        let v = parts.next().unwrap_or_default();
        let position = self.positions[resolve_index(v, self.positions.len(), line)?];

        let mut vertex = Vertex::new(position, Vec2::ZERO);
        if let Some(vt) = parts.next().filter(|s| !s.is_empty()) {
            vertex.uv = self.uvs[resolve_index(vt, self.uvs.len(), line)?];
        }
        if let Some(vn) = parts.next().filter(|s| !s.is_empty()) {
            vertex.normal = self.normals[resolve_index(vn, self.normals.len(), line)?];
        }
        Ok(vertex)
    }

    fn face(&mut self, corners: &[&str], line: usize) -> ParseResult<()> {
        if corners.len() < 3 {
            tracing::warn!("OBJ line {}: face with {} corners skipped", line, corners.len());
            return Ok(());
        }
        let vertices = corners
            .iter()
            .map(|c| self.corner(c, line))
            .collect::<ParseResult<Vec<_>>>()?;

        if self.current.is_none() {
            self.use_material(DEFAULT_MATERIAL);
        }
        let Some((_, group)) = self.current.and_then(|i| self.groups.get_mut(i)) else {
            return Ok(());
        };
        // Fan triangulation for convex polygons
        for i in 1..vertices.len() - 1 {
            group.extend_from_slice(&[vertices[0], vertices[i], vertices[i + 1]]);
        }
        Ok(())
    }

    fn statement(&mut self, line: &str, number: usize) -> ParseResult<()> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&keyword, args)) = parts.split_first() else {
            return Ok(());
        };

        match keyword {
            "v" => self
                .positions
                .push(Vec3::from_array(parse_floats(args, number)?)),
            "vt" => self.uvs.push(Vec2::from_array(parse_floats(args, number)?)),
            "vn" => self
                .normals
                .push(Vec3::from_array(parse_floats(args, number)?)),
            "f" => self.face(args, number)?,
            "usemtl" => {
                let name = args.join(" ");
                self.use_material(if name.is_empty() { DEFAULT_MATERIAL } else { &name });
            }
            "mtllib" => self.material_libs.extend(args.iter().map(|s| s.to_string())),
            // Object and group names do not split meshes; smoothing groups are unused.
            "o" | "g" | "s" => {}
            other => {
                self.unknown.insert(other.to_string());
            }
        }
        Ok(())
    }
}

/// Parse a material library into materials keyed by name.
pub fn parse_mtl(source: &str) -> HashMap<String, Material> {
    let mut materials: HashMap<String, Material> = HashMap::new();
    let mut current: Option<String> = None;

    for line in source.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&keyword, args)) = parts.split_first() else {
            continue;
        };

        if keyword == "newmtl" {
            let name = args.join(" ");
            materials.insert(name.clone(), Material::new(name.clone(), Vec::new()));
            current = Some(name);
            continue;
        }

        let kind = match keyword {
            "map_Kd" => TextureKind::Diffuse,
            "map_Bump" | "map_bump" | "bump" | "norm" => TextureKind::Normal,
            "map_Ks" => TextureKind::Specular,
            "map_Ka" => TextureKind::Ambient,
            "map_d" => TextureKind::Opacity,
            "map_Ke" => TextureKind::Glow,
            "disp" => TextureKind::Displacement,
            _ => continue,
        };
        // Texture options (-bm 1.0 ...) come first; the file name is last.
        let (Some(file), Some(material)) = (
            args.last(),
            current.as_ref().and_then(|n| materials.get_mut(n)),
        ) else {
            continue;
        };
        material.textures.push(Texture::new(*file, kind));
    }
    materials
}

/// Decode OBJ text into a container.
///
/// `load_library` resolves a `mtllib` name to its contents; returning `None`
/// falls back to one diffuse texture named after each material.
pub fn decode_obj(
    source: &str,
    options: &ConvertOptions,
    mut load_library: impl FnMut(&str) -> Option<String>,
) -> ParseResult<ModelContainer> {
    let mut state = ObjState::default();
    for (i, line) in source.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        state.statement(line, i + 1)?;
    }

    for keyword in &state.unknown {
        tracing::warn!("Ignoring unsupported OBJ statement '{}'", keyword);
    }

    let mut library: HashMap<String, Material> = HashMap::new();
    for lib in &state.material_libs {
        if let Some(text) = load_library(lib) {
            library.extend(parse_mtl(&text));
        }
    }

    let mut materials = MaterialTable::new();
    let mut model = ModelContainer::new(options.name.clone(), ModelFlags::STATIC);
    for (name, vertices) in state.groups {
        if vertices.is_empty() {
            continue;
        }
        let material_index = materials.index_or_insert_with(&name, || {
            library
                .remove(&name)
                .unwrap_or_else(|| Material::with_default_diffuse(name.clone()))
        });
        let mut mesh = Mesh::new(name, vertices, None, material_index);
        if options.convert_basis {
            convert_basis(&mut mesh);
        }
        model.meshes.push(mesh);
    }
    model.materials = materials.into_materials();

    if model.meshes.is_empty() {
        return Err(FormatError::MissingSection("OBJ faces"));
    }
    tracing::info!(
        "Decoded OBJ '{}': {} meshes, {} triangles",
        model.name,
        model.meshes.len(),
        model.meshes.iter().map(Mesh::triangle_count).sum::<usize>()
    );
    Ok(model)
}
