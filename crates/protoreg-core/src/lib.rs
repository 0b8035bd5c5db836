//! protoreg-core - Descriptor-set merging and the known-type registry
//!
//! This crate provides the in-memory pipeline that makes every Protobuf type
//! on a module's classpath visible to downstream code generators:
//! - [`FileDescriptorSuperset`] accumulates descriptor sets from multiple
//!   sources and merges them into one deduplicated set
//! - [`MergePolicy`] controls what happens when two sources define the same
//!   proto file path
//! - [`KnownTypes`] resolves fully-qualified type names against the merged
//!   result
//! - [`DescriptorError`] for error handling
//!
//! # Example
//!
//! ```
//! use protoreg_core::{FileDescriptorSuperset, KnownTypes};
//! use prost_types::{DescriptorProto, FileDescriptorProto, FileDescriptorSet};
//!
//! let file = FileDescriptorProto {
//!     name: Some("acme/user.proto".to_string()),
//!     package: Some("acme".to_string()),
//!     message_type: vec![DescriptorProto {
//!         name: Some("User".to_string()),
//!         ..Default::default()
//!     }],
//!     ..Default::default()
//! };
//!
//! let mut superset = FileDescriptorSuperset::new();
//! superset.add_set(FileDescriptorSet { file: vec![file] })?;
//!
//! let mut known_types = KnownTypes::new();
//! known_types.extend_with(&superset.merge());
//! assert!(known_types.contains("acme.User"));
//! # Ok::<(), protoreg_core::DescriptorError>(())
//! ```

mod error;
mod registry;
mod set;
mod superset;

pub use error::{DescriptorError, DescriptorResult};
pub use registry::{KnownTypes, TypeEntry, TypeKind};
pub use set::{
    decode_descriptor_set, encode_descriptor_set, read_descriptor_set_file,
    write_descriptor_set_file,
};
pub use superset::{FileDescriptorSuperset, MergePolicy};
