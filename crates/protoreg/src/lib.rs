//! protoreg - Descriptor-set merging and the known-type registry
//!
//! A build pipeline that generates code from Protobuf definitions needs to
//! see every type on the module's classpath, not only the types the module
//! compiles itself. protoreg collects the binary descriptor sets shipped by
//! dependency artifacts, merges them with the module's own `protoc` output,
//! and loads the result into a [`KnownTypes`] registry that downstream
//! generators query by fully-qualified name.
//!
//! # Pipeline
//!
//! ```text
//! classpath artifacts ──┐
//!                       ├──> DescriptorCollector ──> FileDescriptorSuperset ──> KnownTypes
//! local descriptor ─────┘         (ordered)              (deduplicated)         (indexed)
//! ```
//!
//! # Example
//!
//! ```no_run
//! use protoreg::{DescriptorCollector, FileDescriptorSuperset, KnownTypes, MergePolicy};
//!
//! let mut collector = DescriptorCollector::new();
//! collector.add_artifact("lib/events-1.2.jar")?;
//! collector.add_local_descriptor("build/descriptors/main/known_types_main.desc")?;
//!
//! let mut superset = FileDescriptorSuperset::with_policy(MergePolicy::Overwrite);
//! collector.merge_into(&mut superset)?;
//!
//! let mut known_types = KnownTypes::new();
//! known_types.extend_with(&superset.merge());
//! assert!(known_types.contains("acme.events.OrderPlaced"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use protoreg_classpath::{
    ClasspathEntry, ClasspathError, ClasspathResult, DescriptorCollector, DescriptorSource,
};
pub use protoreg_core::{
    DescriptorError, DescriptorResult, FileDescriptorSuperset, KnownTypes, MergePolicy, TypeEntry,
    TypeKind, decode_descriptor_set, encode_descriptor_set, read_descriptor_set_file,
    write_descriptor_set_file,
};

// Re-export key dependencies so plugin and generator crates can use the
// same versions without declaring them separately.
pub use prost_reflect;
pub use prost_types;
pub use tracing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        DescriptorCollector, DescriptorError, DescriptorResult, FileDescriptorSuperset,
        KnownTypes, MergePolicy, TypeKind,
    };
}
