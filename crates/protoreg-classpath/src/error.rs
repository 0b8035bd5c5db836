//! Error types for classpath scanning.

use thiserror::Error;

/// Errors that can occur while collecting descriptor sources.
#[derive(Debug, Error)]
pub enum ClasspathError {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Archive cannot be opened or read.
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// A collected payload is not a valid descriptor set.
    #[error(transparent)]
    Descriptor(#[from] protoreg_core::DescriptorError),
}

/// Result type for classpath operations.
pub type ClasspathResult<T> = Result<T, ClasspathError>;
