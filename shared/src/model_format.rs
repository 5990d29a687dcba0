//! Container format specification for Foam models.
//!
//! This module defines the `ModelFormat` struct which serves as the single source of truth
//! for all container-related constants (file extensions, magic, version).
//!
//! # Example
//!
//! ```
//! use foam_shared::FOAM_FORMAT;
//!
//! // Get the container file extension
//! assert_eq!(FOAM_FORMAT.extension, "foam");
//!
//! // The magic spells "Foam" when written little-endian
//! assert_eq!(FOAM_FORMAT.magic.to_le_bytes(), *b"Foam");
//! ```

/// Model container format specification.
///
/// Defines the constants every reader and writer of the container must agree on.
#[derive(Debug, Clone, Copy)]
pub struct ModelFormat {
    /// Container file extension without dot (e.g., "foam")
    pub extension: &'static str,

    /// Extension used for baked level geometry (same layout, different tooling)
    pub map_extension: &'static str,

    /// Magic value at the start of every container (little-endian i32)
    pub magic: i32,

    /// The single supported format version. Readers require an exact match.
    pub version: i32,
}

impl ModelFormat {
    /// Create a new model format specification.
    pub const fn new(
        extension: &'static str,
        map_extension: &'static str,
        magic: i32,
        version: i32,
    ) -> Self {
        Self {
            extension,
            map_extension,
            magic,
            version,
        }
    }

    /// Magic as it appears in the first four bytes of a file.
    pub const fn magic_bytes(&self) -> [u8; 4] {
        self.magic.to_le_bytes()
    }

    /// Returns true if `ext` (without dot, any case) names a container file.
    pub fn is_container_extension(&self, ext: &str) -> bool {
        ext.eq_ignore_ascii_case(self.extension) || ext.eq_ignore_ascii_case(self.map_extension)
    }
}

/// Foam model container format.
///
/// - Extension: `.foam` (models) and `.mapfoam` (baked levels)
/// - Magic: `0x6D616F46` (`"Foam"`)
/// - Version: `2`
pub const FOAM_FORMAT: ModelFormat = ModelFormat::new("foam", "mapfoam", 0x6D61_6F46, 2);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foam_format_extension() {
        assert_eq!(FOAM_FORMAT.extension, "foam");
        assert_eq!(FOAM_FORMAT.map_extension, "mapfoam");
    }

    #[test]
    fn test_foam_format_magic() {
        assert_eq!(FOAM_FORMAT.magic_bytes(), *b"Foam");
    }

    #[test]
    fn test_foam_format_version() {
        assert_eq!(FOAM_FORMAT.version, 2);
    }

    #[test]
    fn test_container_extension_matching() {
        assert!(FOAM_FORMAT.is_container_extension("foam"));
        assert!(FOAM_FORMAT.is_container_extension("MAPFOAM"));
        assert!(!FOAM_FORMAT.is_container_extension("iqm"));
    }
}
