//! File-level conversion entry points used by the CLI and the manifest build.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use foam_common::{Extension, ModelContainer};
use foam_shared::FOAM_FORMAT;

use crate::loader::{ConvertOptions, load_model};

/// Model name derived from a source path (its file stem).
pub fn default_name(input: &Path) -> String {
    input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("model")
        .to_string()
}

/// `<input stem>.foam` next to the input.
pub fn default_output(input: &Path) -> PathBuf {
    input.with_extension(FOAM_FORMAT.extension)
}

/// Convert a source file to an in-memory container.
pub fn convert_to_memory(input: &Path, name: Option<&str>, convert_basis: bool) -> Result<ModelContainer> {
    let options = ConvertOptions::new(name.map_or_else(|| default_name(input), str::to_string))
        .with_convert_basis(convert_basis);
    load_model(input, &options)
}

/// Convert a source file and write the container to `output`.
pub fn convert(
    input: &Path,
    output: &Path,
    name: Option<&str>,
    convert_basis: bool,
) -> Result<ModelContainer> {
    let model = convert_to_memory(input, name, convert_basis)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {:?}", parent))?;
    }
    model
        .save_to_file(output)
        .with_context(|| format!("Failed to write container: {:?}", output))?;

    tracing::info!(
        "Converted {:?} -> {:?}: {} meshes, {} vertices",
        input,
        output,
        model.meshes.len(),
        model.meshes.iter().map(|m| m.vertices.len()).sum::<usize>()
    );
    Ok(model)
}

/// Append an opaque extension blob to an existing container in place.
pub fn add_extension(container: &Path, name: &str, payload: &Path) -> Result<()> {
    let mut model = ModelContainer::from_file(container)
        .with_context(|| format!("Failed to load container: {:?}", container))?;
    let data = std::fs::read(payload)
        .with_context(|| format!("Failed to read extension payload: {:?}", payload))?;

    tracing::info!("Adding extension '{}' ({} bytes) to {:?}", name, data.len(), container);
    model.add_extension(Extension::new(name, data));
    model
        .save_to_file(container)
        .with_context(|| format!("Failed to write container: {:?}", container))?;
    Ok(())
}
