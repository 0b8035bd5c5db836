//! Reading and writing binary descriptor-set files.
//!
//! A descriptor-set file is a serialized [`FileDescriptorSet`] as produced by
//! `protoc --descriptor_set_out`. It is immutable once read; all merging
//! happens on the decoded representation.

use crate::DescriptorResult;
use prost::Message;
use prost_types::FileDescriptorSet;
use std::fs;
use std::path::Path;

/// Decode a descriptor set from its binary wire format.
pub fn decode_descriptor_set(bytes: &[u8]) -> DescriptorResult<FileDescriptorSet> {
    Ok(FileDescriptorSet::decode(bytes)?)
}

/// Encode a descriptor set into its binary wire format.
#[must_use]
pub fn encode_descriptor_set(set: &FileDescriptorSet) -> Vec<u8> {
    set.encode_to_vec()
}

/// Read and decode a descriptor-set file from disk.
pub fn read_descriptor_set_file<P: AsRef<Path>>(path: P) -> DescriptorResult<FileDescriptorSet> {
    let bytes = fs::read(path)?;
    decode_descriptor_set(&bytes)
}

/// Write a descriptor set to disk in binary wire format.
///
/// Parent directories are created if missing.
pub fn write_descriptor_set_file<P: AsRef<Path>>(
    path: P,
    set: &FileDescriptorSet,
) -> DescriptorResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, encode_descriptor_set(set))?;
    Ok(())
}
