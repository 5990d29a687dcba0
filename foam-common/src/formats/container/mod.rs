//! Model container codec
//!
//! # Layout
//! ```text
//! magic       i32  (FOAM_FORMAT.magic)
//! version     i32  (FOAM_FORMAT.version, exact match)
//! name        string
//! flags       i32  (ModelFlags)
//! meshes      count:i32 + count × Mesh
//! bones       count:i32 + count × Bone           (0 ⇒ None)
//! animations  count:i32 + count × AnimationClip  (0 ⇒ None)
//! materials   count:i32 + count × Material       (0 ⇒ None)
//! extensions  count:i32 + count × Extension      (0 ⇒ None)
//! ```
//!
//! A read either returns a fully validated container or an error; no partial
//! container is ever handed out.

mod query;
mod validate;


use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek, Write};
use std::path::Path;

use foam_shared::FOAM_FORMAT;

use super::animation::AnimationClip;
use super::bone::Bone;
use super::extension::Extension;
use super::material::Material;
use super::mesh::Mesh;
use super::serialization::{read_list, read_optional_list, write_list, write_optional_list};
use crate::cursor::{BinaryReader, BinaryWriter};
use crate::error::{FormatError, Result};

/// Container-level flag bitset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ModelFlags(pub i32);

impl ModelFlags {
    /// Rigid geometry, no skeleton playback.
    pub const STATIC: ModelFlags = ModelFlags(0);
    /// Skeleton/frame animated.
    pub const ANIMATED: ModelFlags = ModelFlags(1 << 0);

    pub const fn bits(self) -> i32 {
        self.0
    }

    pub const fn contains(self, other: ModelFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_animated(self) -> bool {
        self.contains(ModelFlags::ANIMATED)
    }
}

impl std::ops::BitOr for ModelFlags {
    type Output = ModelFlags;

    fn bitor(self, rhs: ModelFlags) -> ModelFlags {
        ModelFlags(self.0 | rhs.0)
    }
}

/// Root of the in-memory model graph.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelContainer {
    pub magic: i32,
    pub version: i32,
    pub name: String,
    pub flags: ModelFlags,
    pub meshes: Vec<Mesh>,
    pub bones: Option<Vec<Bone>>,
    pub animations: Option<Vec<AnimationClip>>,
    pub materials: Option<Vec<Material>>,
    pub extensions: Option<Vec<Extension>>,
}

impl ModelContainer {
    /// Empty container stamped with the current magic and version.
    pub fn new(name: impl Into<String>, flags: ModelFlags) -> Self {
        Self {
            magic: FOAM_FORMAT.magic,
            version: FOAM_FORMAT.version,
            name: name.into(),
            flags,
            meshes: Vec::new(),
            bones: None,
            animations: None,
            materials: None,
            extensions: None,
        }
    }

    /// Append an extension, creating the list if needed.
    pub fn add_extension(&mut self, extension: Extension) {
        self.extensions.get_or_insert_with(Vec::new).push(extension);
    }

    /// Encode the container. Fails before writing anything if it is invalid.
    pub fn write_to<W: Write + Seek>(&self, w: &mut BinaryWriter<W>) -> Result<()> {
        self.validate()?;

        w.write_i32(self.magic)?;
        w.write_i32(self.version)?;
        w.write_string(&self.name)?;
        w.write_i32(self.flags.bits())?;

        write_list(w, &self.meshes)?;
        write_optional_list(w, self.bones.as_deref())?;
        write_optional_list(w, self.animations.as_deref())?;
        write_optional_list(w, self.materials.as_deref())?;
        write_optional_list(w, self.extensions.as_deref())?;
        w.flush()
    }

    /// Decode and validate a container.
    pub fn read_from<R: Read + Seek>(r: &mut BinaryReader<R>) -> Result<Self> {
        let magic = r.read_i32()?;
        if magic != FOAM_FORMAT.magic {
            return Err(FormatError::InvalidMagic {
                found: magic,
                expected: FOAM_FORMAT.magic,
            });
        }

        let version = r.read_i32()?;
        if version != FOAM_FORMAT.version {
            return Err(FormatError::UnsupportedVersion {
                found: version,
                expected: FOAM_FORMAT.version,
            });
        }

        let container = Self {
            magic,
            version,
            name: r.read_string()?,
            flags: ModelFlags(r.read_i32()?),
            meshes: read_list(r)?,
            bones: read_optional_list(r)?,
            animations: read_optional_list(r)?,
            materials: read_optional_list(r)?,
            extensions: read_optional_list(r)?,
        };
        container.validate()?;
        Ok(container)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut w = BinaryWriter::new(Cursor::new(Vec::new()));
        self.write_to(&mut w)?;
        Ok(w.into_inner().into_inner())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::read_from(&mut BinaryReader::new(Cursor::new(bytes)))
    }

    /// Encode fully in memory, then write. A rejected model leaves `path` untouched.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::read_from(&mut BinaryReader::new(BufReader::new(file)))
    }

    /// True if the first four bytes are the container magic.
    pub fn can_load(header: &[u8]) -> bool {
        header.starts_with(&FOAM_FORMAT.magic_bytes())
    }
}
