//! Loader-owned per-mesh annotations.
//!
//! Renderers attach transient data (GPU buffer handles, cached bounds) to the
//! meshes of a loaded container. The container itself never carries it, so it
//! can never leak into the encoded bytes.

use hashbrown::HashMap;

use crate::formats::ModelContainer;

/// Side table keyed by mesh index within one container.
#[derive(Debug, Clone)]
pub struct MeshAnnotations<T> {
    entries: HashMap<usize, T>,
    mesh_count: usize,
}

impl<T> MeshAnnotations<T> {
    /// Empty table sized for `container`'s meshes.
    pub fn for_container(container: &ModelContainer) -> Self {
        Self {
            entries: HashMap::with_capacity(container.meshes.len()),
            mesh_count: container.meshes.len(),
        }
    }

    /// Attach `value` to mesh `index`, returning any previous annotation.
    ///
    /// Returns `Err(value)` if the container has no such mesh.
    pub fn insert(&mut self, index: usize, value: T) -> Result<Option<T>, T> {
        if index >= self.mesh_count {
            return Err(value);
        }
        Ok(self.entries.insert(index, value))
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.entries.get(&index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.entries.get_mut(&index)
    }

    pub fn remove(&mut self, index: usize) -> Option<T> {
        self.entries.remove(&index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.entries.iter().map(|(&i, v)| (i, v))
    }
}
