//! Foam model container: data model, binary cursor and codec.
//!
//! The container is the only model format a runtime has to understand. Every
//! other source format is converted into it at build time by `foam-export`.

pub mod annotations;
pub mod cursor;
pub mod error;
pub mod formats;

pub use annotations::MeshAnnotations;
pub use cursor::{BinaryReader, BinaryWriter, Record};
pub use error::{FormatError, Result};
pub use formats::*;
