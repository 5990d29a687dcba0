//! foam-export library
//!
//! Converts source models (IQM, OBJ, existing containers) into Foam
//! containers. The CLI in `main.rs` is a thin wrapper over these modules.

pub mod convert;
pub mod inspect;
pub mod iqm;
pub mod loader;
pub mod manifest;
pub mod obj;
pub mod partition;

// Re-export container types from foam-common
pub use foam_common::{FormatError, ModelContainer};

// Re-export container constants from shared
pub use foam_shared::FOAM_FORMAT;

// Re-export key conversion entry points
pub use convert::{add_extension, convert, convert_to_memory};
pub use inspect::ModelSummary;
pub use iqm::decode_iqm;
pub use loader::{ConvertOptions, LOADERS, ModelLoader, find_loader, load_bytes, load_model};
pub use obj::decode_obj;
pub use partition::{GlobalGeometry, MaterialTable, TriangleRange, convert_basis};
