//! Shared constants for the Foam model container tools.
//!
//! Kept free of dependencies so both the codec and the converters can agree on
//! the container identity without pulling in each other.

pub mod model_format;

pub use model_format::{FOAM_FORMAT, ModelFormat};
