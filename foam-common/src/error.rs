//! Error type for container and source-format decoding.
//!
//! Every variant is fatal for the load that raised it. Optional data that a
//! caller merely probes for (a bone by name, a texture by semantic) is reported
//! through `Option` instead and never reaches this type.

use std::io;

/// A violated format or referential invariant.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("I/O error: {0}")]
    Io(io::Error),

    #[error("Stream truncated at offset {offset}: needed {needed} more bytes")]
    Truncated { offset: u64, needed: usize },

    #[error("Invalid container: magic {found:#010x} does not match {expected:#010x}")]
    InvalidMagic { found: i32, expected: i32 },

    #[error("Unsupported container version {found} (only version {expected} is supported)")]
    UnsupportedVersion { found: i32, expected: i32 },

    #[error("Invalid {what} signature")]
    InvalidSignature { what: &'static str },

    #[error("Unsupported {what} version {found} (expected {expected})")]
    UnsupportedSourceVersion {
        what: &'static str,
        found: u32,
        expected: u32,
    },

    #[error("Negative {what}: {value}")]
    NegativeLength { what: &'static str, value: i32 },

    #[error("String is not valid UTF-8")]
    InvalidUtf8,

    #[error("Unknown texture type tag {0}")]
    UnknownTextureKind(i32),

    #[error("Unsupported vertex array: type {kind}, format {format}, {size} components")]
    UnsupportedVertexArray { kind: u32, format: u32, size: u32 },

    #[error("Missing mandatory section: {0}")]
    MissingSection(&'static str),

    #[error("Offset {offset} is outside the {len}-byte {what}")]
    OffsetOutOfRange {
        what: &'static str,
        offset: u64,
        len: u64,
    },

    #[error("Bone {bone} has parent {parent}, which is not an earlier bone")]
    InvalidParent { bone: usize, parent: i32 },

    #[error("Mesh '{mesh}' references vertex {index} but has only {vertex_count} vertices")]
    IndexOutOfRange {
        mesh: String,
        index: u32,
        vertex_count: usize,
    },

    #[error("Mesh '{mesh}' uses material {index} but the container has {available}")]
    InvalidMaterialIndex {
        mesh: String,
        index: u32,
        available: usize,
    },

    #[error("Mesh '{mesh}' vertex {vertex} is weighted to bone {bone} but the container has {available}")]
    InvalidInfluenceBone {
        mesh: String,
        vertex: usize,
        bone: u8,
        available: usize,
    },

    #[error("Mesh '{mesh}' has {influences} bone influences for {vertices} vertices")]
    InfluenceCountMismatch {
        mesh: String,
        influences: usize,
        vertices: usize,
    },

    #[error("Clip '{clip}' frame {frame} has {len} transforms, expected {expected}")]
    FrameLengthMismatch {
        clip: String,
        frame: usize,
        len: usize,
        expected: usize,
    },

    #[error("Clip '{clip}' spans frames {first}..{end} but only {available} were decoded")]
    ClipOutOfRange {
        clip: String,
        first: u32,
        end: u64,
        available: usize,
    },

    #[error("Pose channel masks select {masked} channels but frames carry {declared}")]
    FrameChannelMismatch { masked: usize, declared: usize },

    #[error("Frame data exhausted: frame {frame} needs more than {channels} channels")]
    FrameDataExhausted { frame: usize, channels: usize },

    #[error("Submesh '{mesh}' spans {vertices} vertices, more than a 16-bit index can address")]
    IndexOverflow { mesh: String, vertices: usize },

    #[error("Triangle range {first}..{end} is outside the {available}-triangle stream")]
    TriangleRangeOutOfBounds {
        first: u32,
        end: u64,
        available: usize,
    },

    #[error("No loader recognizes {0}")]
    UnrecognizedSource(String),

    #[error("{0}")]
    Malformed(String),
}

impl From<io::Error> for FormatError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            // Offset is unknown here; cursor reads attach it themselves.
            FormatError::Truncated {
                offset: 0,
                needed: 0,
            }
        } else {
            FormatError::Io(err)
        }
    }
}

/// Result alias used throughout the codec.
pub type Result<T> = std::result::Result<T, FormatError>;
