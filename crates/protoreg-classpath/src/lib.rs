//! Descriptor source collection for protoreg
//!
//! This crate resolves which binary descriptor-set payloads a module's
//! dependency classpath contributes. Classpath entries can be jar/zip
//! archives shipping descriptor files under `META-INF/`, directories laid out
//! the same way, or plain descriptor-set files.
//!
//! # Collection order
//!
//! Sources are collected in classpath order, and the module's own descriptor
//! file is added last, so local definitions override external ones under the
//! default last-wins merge policy.
//!
//! # Example
//!
//! ```no_run
//! use protoreg_classpath::DescriptorCollector;
//! use protoreg_core::FileDescriptorSuperset;
//!
//! let mut collector = DescriptorCollector::new();
//! collector.add_artifact("lib/events-1.2.jar")?;
//! collector.add_artifact("lib/base-0.9.jar")?;
//! collector.add_local_descriptor("build/descriptors/main/known_types_main.desc")?;
//!
//! let mut superset = FileDescriptorSuperset::new();
//! collector.merge_into(&mut superset)?;
//! let merged = superset.merge();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod collector;
mod entry;
mod error;

pub use collector::{DescriptorCollector, DescriptorSource};
pub use entry::ClasspathEntry;
pub use error::{ClasspathError, ClasspathResult};

/// File extension of binary descriptor-set files.
pub const DESCRIPTOR_EXTENSION: &str = "desc";

/// Directory inside archives and resource roots holding shipped descriptors.
pub const DESCRIPTOR_DIR: &str = "META-INF";
