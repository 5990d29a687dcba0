//! In-memory model graph and its binary encoding.

pub mod animation;
pub mod bone;
pub mod container;
pub mod extension;
pub mod material;
pub mod mesh;
pub mod serialization;
pub mod vertex;

pub use animation::{AnimationClip, DEFAULT_TICKS_PER_SECOND, Frame};
pub use bone::{Bone, ROOT_PARENT};
pub use container::{ModelContainer, ModelFlags};
pub use extension::Extension;
pub use material::{Material, Texture, TextureKind};
pub use mesh::Mesh;
pub use serialization::BinarySerializable;
pub use vertex::{BoneInfluence, Color, Vertex};
