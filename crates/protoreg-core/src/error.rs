//! Error types for descriptor-set operations.

use thiserror::Error;

/// Errors that can occur while reading, merging, or indexing descriptor sets.
#[derive(Debug, Error)]
pub enum DescriptorError {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed descriptor-set bytes.
    #[error("Malformed descriptor set: {0}")]
    Decode(#[from] prost::DecodeError),

    /// A descriptor entry that cannot be indexed (e.g. a file without a path).
    #[error("Invalid descriptor: {0}")]
    InvalidDescriptor(String),

    /// Two sources define the same proto file path with different content.
    #[error("Conflicting definitions of proto file {path}: {first_source} vs {second_source}")]
    ConflictingFile {
        path: String,
        first_source: String,
        second_source: String,
    },

    /// The accumulated files do not form a linkable descriptor pool,
    /// typically because an imported file is missing from the merged set.
    #[error("Descriptor pool link error: {0}")]
    Link(#[from] prost_reflect::DescriptorError),
}

/// Result type for descriptor-set operations.
pub type DescriptorResult<T> = Result<T, DescriptorError>;
