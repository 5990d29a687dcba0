//! Material entity
//!
//! # Layout
//! ```text
//! name      string
//! textures  count:i32 + count × (name:string + kind:i32)
//! ```

use std::fmt;
use std::io::{Read, Seek, Write};

use super::serialization::{BinarySerializable, read_list, write_list};
use crate::cursor::{BinaryReader, BinaryWriter};
use crate::error::{FormatError, Result};

/// Semantic role of a texture within a material.
///
/// Discriminants are the wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum TextureKind {
    Diffuse = 0,
    Normal = 1,
    Specular = 2,
    Glow = 3,
    Reflection = 4,
    Height = 5,
    LightMap = 6,
    Displacement = 7,
    Ambient = 8,
    Opacity = 9,
}

impl TextureKind {
    pub const ALL: [TextureKind; 10] = [
        TextureKind::Diffuse,
        TextureKind::Normal,
        TextureKind::Specular,
        TextureKind::Glow,
        TextureKind::Reflection,
        TextureKind::Height,
        TextureKind::LightMap,
        TextureKind::Displacement,
        TextureKind::Ambient,
        TextureKind::Opacity,
    ];

    pub fn from_i32(value: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|k| *k as i32 == value)
    }
}

impl TryFrom<i32> for TextureKind {
    type Error = FormatError;

    fn try_from(value: i32) -> Result<Self> {
        Self::from_i32(value).ok_or(FormatError::UnknownTextureKind(value))
    }
}

impl fmt::Display for TextureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TextureKind::Diffuse => "diffuse",
            TextureKind::Normal => "normal",
            TextureKind::Specular => "specular",
            TextureKind::Glow => "glow",
            TextureKind::Reflection => "reflection",
            TextureKind::Height => "height",
            TextureKind::LightMap => "lightmap",
            TextureKind::Displacement => "displacement",
            TextureKind::Ambient => "ambient",
            TextureKind::Opacity => "opacity",
        };
        f.write_str(name)
    }
}

/// Texture reference (file name, resolved by the consumer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    pub name: String,
    pub kind: TextureKind,
}

impl Texture {
    pub fn new(name: impl Into<String>, kind: TextureKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

impl BinarySerializable for Texture {
    fn write_to<W: Write + Seek>(&self, w: &mut BinaryWriter<W>) -> Result<()> {
        w.write_string(&self.name)?;
        w.write_i32(self.kind as i32)
    }

    fn read_from<R: Read + Seek>(r: &mut BinaryReader<R>) -> Result<Self> {
        let name = r.read_string()?;
        let kind = TextureKind::try_from(r.read_i32()?)?;
        Ok(Self { name, kind })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Material {
    pub name: String,
    pub textures: Vec<Texture>,
}

impl Material {
    pub fn new(name: impl Into<String>, textures: Vec<Texture>) -> Self {
        Self {
            name: name.into(),
            textures,
        }
    }

    /// Material with a single diffuse slot named after the material.
    pub fn with_default_diffuse(name: impl Into<String>) -> Self {
        let name = name.into();
        let textures = vec![Texture::new(name.clone(), TextureKind::Diffuse)];
        Self { name, textures }
    }

    /// First texture with the given semantic.
    pub fn find_texture(&self, kind: TextureKind) -> Option<&Texture> {
        self.textures.iter().find(|t| t.kind == kind)
    }
}

impl BinarySerializable for Material {
    fn write_to<W: Write + Seek>(&self, w: &mut BinaryWriter<W>) -> Result<()> {
        w.write_string(&self.name)?;
        write_list(w, &self.textures)
    }

    fn read_from<R: Read + Seek>(r: &mut BinaryReader<R>) -> Result<Self> {
        Ok(Self {
            name: r.read_string()?,
            textures: read_list(r)?,
        })
    }
}
