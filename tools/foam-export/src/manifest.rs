//! Manifest parsing and build orchestration
//!
//! Parses foam.toml and converts every listed model.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use foam_shared::FOAM_FORMAT;
use hashbrown::HashSet;
use serde::Deserialize;

use crate::convert;

/// Root manifest structure
#[derive(Debug, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default, rename = "model")]
    pub models: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("build")
}

/// One `[[model]]` table.
#[derive(Debug, Deserialize)]
pub struct ModelEntry {
    pub input: PathBuf,
    /// File name inside the output directory (default `<stem>.foam`)
    #[serde(default)]
    pub output: Option<PathBuf>,
    /// Container name (default: input file stem)
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub convert_basis: bool,
}

impl ModelEntry {
    pub fn name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| convert::default_name(&self.input))
    }

    /// Output path relative to `output_dir`.
    pub fn output_path(&self, output_dir: &Path) -> PathBuf {
        match &self.output {
            Some(output) => output_dir.join(output),
            None => output_dir.join(format!(
                "{}.{}",
                convert::default_name(&self.input),
                FOAM_FORMAT.extension
            )),
        }
    }
}

/// Load and parse a manifest file
///
/// Relative input paths are resolved against the manifest's directory.
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {:?}", path))?;
    let mut manifest = parse_manifest(&content)
        .with_context(|| format!("Failed to parse manifest: {:?}", path))?;

    if let Some(base) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        for entry in &mut manifest.models {
            if entry.input.is_relative() {
                entry.input = base.join(&entry.input);
            }
        }
        if manifest.output.dir.is_relative() {
            manifest.output.dir = base.join(&manifest.output.dir);
        }
    }
    Ok(manifest)
}

pub fn parse_manifest(content: &str) -> Result<Manifest> {
    Ok(toml::from_str(content)?)
}

/// Validate a manifest without building
pub fn validate(manifest: &Manifest) -> Result<()> {
    let mut outputs = HashSet::new();
    for entry in &manifest.models {
        if !entry.input.exists() {
            anyhow::bail!("Model source not found: {:?}", entry.input);
        }
        if entry.name.as_deref().is_some_and(str::is_empty) {
            anyhow::bail!("Model {:?} has an empty name", entry.input);
        }
        let output = entry.output_path(&manifest.output.dir);
        if !outputs.insert(output.clone()) {
            anyhow::bail!("Two models write to the same output: {:?}", output);
        }
    }
    Ok(())
}

/// Build all models from a manifest
pub fn build_all(manifest: &Manifest, output_override: Option<&Path>) -> Result<()> {
    validate(manifest)?;

    let output_dir = output_override.unwrap_or(&manifest.output.dir);
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", output_dir))?;

    for entry in &manifest.models {
        let output = entry.output_path(output_dir);
        tracing::info!("Converting model: {:?} -> {:?}", entry.input, output);
        convert::convert(
            &entry.input,
            &output,
            Some(&entry.name()),
            entry.convert_basis,
        )?;
    }

    tracing::info!("Built {} models into {:?}", manifest.models.len(), output_dir);
    Ok(())
}
