//! Source-format dispatch
//!
//! Loaders are probed in a fixed order and the first whose sniff test matches
//! decodes the file:
//! 1. Foam container (4-byte magic)
//! 2. IQM (16-byte magic)
//! 3. OBJ (`.obj` file extension)
//!
//! No match is [`FormatError::UnrecognizedSource`].

use std::path::Path;

use anyhow::{Context, Result};
use foam_common::{FormatError, ModelContainer};

use crate::partition::convert_basis;
use crate::{iqm, obj};

/// Per-conversion settings shared by every loader.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Name stored in the produced container
    pub name: String,
    /// Reverse winding, flip V and swap Y/Z of normals and tangents
    pub convert_basis: bool,
}

impl ConvertOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            convert_basis: false,
        }
    }

    pub fn with_convert_basis(mut self, convert_basis: bool) -> Self {
        self.convert_basis = convert_basis;
        self
    }
}

/// A source format that can be converted into a container.
pub trait ModelLoader: Send + Sync {
    /// Short format name for logs.
    fn name(&self) -> &'static str;

    /// Quick check on the leading bytes (and path) without decoding.
    fn can_load(&self, header: &[u8], path: &Path) -> bool;

    /// Decode the whole file.
    ///
    /// `path` is used only to resolve companion files (OBJ material libraries).
    fn load(
        &self,
        bytes: &[u8],
        path: &Path,
        options: &ConvertOptions,
    ) -> Result<ModelContainer, FormatError>;
}

/// Re-reads an existing container. The stored name is kept.
pub struct FoamLoader;

impl ModelLoader for FoamLoader {
    fn name(&self) -> &'static str {
        "foam"
    }

    fn can_load(&self, header: &[u8], _path: &Path) -> bool {
        ModelContainer::can_load(header)
    }

    fn load(
        &self,
        bytes: &[u8],
        _path: &Path,
        options: &ConvertOptions,
    ) -> Result<ModelContainer, FormatError> {
        let mut model = ModelContainer::from_bytes(bytes)?;
        if options.convert_basis {
            model.meshes.iter_mut().for_each(convert_basis);
        }
        Ok(model)
    }
}

pub struct IqmLoader;

impl ModelLoader for IqmLoader {
    fn name(&self) -> &'static str {
        "iqm"
    }

    fn can_load(&self, header: &[u8], _path: &Path) -> bool {
        iqm::can_load(header)
    }

    fn load(
        &self,
        bytes: &[u8],
        _path: &Path,
        options: &ConvertOptions,
    ) -> Result<ModelContainer, FormatError> {
        iqm::decode_iqm(bytes, options)
    }
}

pub struct ObjLoader;

impl ModelLoader for ObjLoader {
    fn name(&self) -> &'static str {
        "obj"
    }

    fn can_load(&self, _header: &[u8], path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("obj"))
    }

    fn load(
        &self,
        bytes: &[u8],
        path: &Path,
        options: &ConvertOptions,
    ) -> Result<ModelContainer, FormatError> {
        let source = std::str::from_utf8(bytes).map_err(|_| FormatError::InvalidUtf8)?;
        let dir = path.parent().unwrap_or(Path::new(""));
        obj::decode_obj(source, options, |lib| {
            let mtl_path = dir.join(lib);
            match std::fs::read_to_string(&mtl_path) {
                Ok(text) => Some(text),
                Err(err) => {
                    tracing::warn!("Material library {:?} not loaded: {}", mtl_path, err);
                    None
                }
            }
        })
    }
}

/// Every loader, in probe order.
pub static LOADERS: &[&dyn ModelLoader] = &[&FoamLoader, &IqmLoader, &ObjLoader];

/// First loader whose sniff test accepts the file.
pub fn find_loader(header: &[u8], path: &Path) -> Option<&'static dyn ModelLoader> {
    LOADERS.iter().copied().find(|l| l.can_load(header, path))
}

/// Decode in-memory bytes with the first matching loader.
pub fn load_bytes(
    bytes: &[u8],
    path: &Path,
    options: &ConvertOptions,
) -> Result<ModelContainer, FormatError> {
    let loader = find_loader(bytes, path)
        .ok_or_else(|| FormatError::UnrecognizedSource(path.display().to_string()))?;
    tracing::debug!("Loading {:?} as {}", path, loader.name());
    loader.load(bytes, path, options)
}

/// Read and decode a source file.
pub fn load_model(path: &Path, options: &ConvertOptions) -> Result<ModelContainer> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read source: {:?}", path))?;
    load_bytes(&bytes, path, options).with_context(|| format!("Failed to load model: {:?}", path))
}
