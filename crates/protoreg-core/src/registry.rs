//! The known-type registry.
//!
//! [`KnownTypes`] is an owned lookup table mapping fully-qualified Protobuf
//! type names to their defining file. It is populated from merged descriptor
//! sets and passed explicitly to the code-generation stages that need it; it
//! deliberately carries no global or shared state, so concurrent builds and
//! tests stay isolated.

use crate::superset::sort_by_dependency;
use crate::{DescriptorResult, decode_descriptor_set};
use prost_reflect::DescriptorPool;
use prost_types::{DescriptorProto, FileDescriptorProto, FileDescriptorSet};
use std::collections::BTreeMap;
use tracing::debug;

/// The kind of a registered Protobuf type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Message,
    Enum,
    Service,
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeKind::Message => write!(f, "message"),
            TypeKind::Enum => write!(f, "enum"),
            TypeKind::Service => write!(f, "service"),
        }
    }
}

/// A registered type: its kind and the proto file that defines it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeEntry {
    kind: TypeKind,
    file: String,
}

impl TypeEntry {
    /// The kind of the type.
    #[must_use]
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Path of the proto file defining the type.
    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }
}

/// Registry of every Protobuf type known to the current build.
///
/// Populated once per source set from the merged descriptor superset and read
/// many times by downstream generators. Extending with a newer version of an
/// already-known file replaces that file's types.
///
/// # Example
///
/// ```
/// use protoreg_core::KnownTypes;
/// use prost_types::{DescriptorProto, FileDescriptorProto, FileDescriptorSet};
///
/// let set = FileDescriptorSet {
///     file: vec![FileDescriptorProto {
///         name: Some("acme/user.proto".to_string()),
///         package: Some("acme".to_string()),
///         message_type: vec![DescriptorProto {
///             name: Some("User".to_string()),
///             ..Default::default()
///         }],
///         ..Default::default()
///     }],
/// };
///
/// let mut known_types = KnownTypes::new();
/// known_types.extend_with(&set);
/// assert!(known_types.contains("acme.User"));
/// assert_eq!(known_types.defining_file("acme.User"), Some("acme/user.proto"));
/// ```
#[derive(Debug, Default)]
pub struct KnownTypes {
    files: BTreeMap<String, FileDescriptorProto>,
    index: BTreeMap<String, TypeEntry>,
}

impl KnownTypes {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Extend the registry with every file of a merged descriptor set.
    ///
    /// A file path already present in the registry is replaced by the
    /// incoming descriptor, and the type index is rebuilt so stale entries
    /// from the replaced file disappear.
    pub fn extend_with(&mut self, set: &FileDescriptorSet) {
        for file in &set.file {
            self.files.insert(file.name().to_string(), file.clone());
        }
        self.reindex();
        debug!(
            files = self.files.len(),
            types = self.index.len(),
            "extended known types"
        );
    }

    /// Decode a binary descriptor set and extend the registry with it.
    pub fn extend_with_bytes(&mut self, bytes: &[u8]) -> DescriptorResult<()> {
        let set = decode_descriptor_set(bytes)?;
        self.extend_with(&set);
        Ok(())
    }

    /// Whether a fully-qualified type name is known.
    ///
    /// A leading dot (`.pkg.Foo`) is accepted and ignored.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(normalize(name))
    }

    /// Look up a type by fully-qualified name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TypeEntry> {
        self.index.get(normalize(name))
    }

    /// Path of the proto file defining the named type, if known.
    #[must_use]
    pub fn defining_file(&self, name: &str) -> Option<&str> {
        self.get(name).map(TypeEntry::file)
    }

    /// Iterate all known types in lexicographic name order.
    pub fn types(&self) -> impl Iterator<Item = (&str, &TypeEntry)> {
        self.index.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Number of known types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the registry holds no types.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Drop all registered files and types.
    pub fn clear(&mut self) {
        self.files.clear();
        self.index.clear();
    }

    /// The registry content as a descriptor set, dependencies first.
    #[must_use]
    pub fn to_file_descriptor_set(&self) -> FileDescriptorSet {
        FileDescriptorSet {
            file: sort_by_dependency(self.files.values().cloned().collect()),
        }
    }

    /// Build a full reflection pool over the registry content.
    ///
    /// Fails when the accumulated files do not link, e.g. when an imported
    /// file was never contributed by any classpath source.
    pub fn descriptor_pool(&self) -> DescriptorResult<DescriptorPool> {
        Ok(DescriptorPool::from_file_descriptor_set(
            self.to_file_descriptor_set(),
        )?)
    }

    fn reindex(&mut self) {
        self.index.clear();
        for file in self.files.values() {
            index_file(file, &mut self.index);
        }
    }
}

fn normalize(name: &str) -> &str {
    name.strip_prefix('.').unwrap_or(name)
}

fn index_file(file: &FileDescriptorProto, index: &mut BTreeMap<String, TypeEntry>) {
    let path = file.name();
    let package = file.package();
    for message in &file.message_type {
        index_message(message, package, path, index);
    }
    for enum_type in &file.enum_type {
        insert(index, package, enum_type.name(), TypeKind::Enum, path);
    }
    for service in &file.service {
        insert(index, package, service.name(), TypeKind::Service, path);
    }
}

fn index_message(
    message: &DescriptorProto,
    scope: &str,
    path: &str,
    index: &mut BTreeMap<String, TypeEntry>,
) {
    let fq_name = qualified(scope, message.name());
    insert(index, scope, message.name(), TypeKind::Message, path);
    for nested in &message.nested_type {
        index_message(nested, &fq_name, path, index);
    }
    for enum_type in &message.enum_type {
        insert(index, &fq_name, enum_type.name(), TypeKind::Enum, path);
    }
}

fn insert(
    index: &mut BTreeMap<String, TypeEntry>,
    scope: &str,
    name: &str,
    kind: TypeKind,
    path: &str,
) {
    index.insert(
        qualified(scope, name),
        TypeEntry {
            kind,
            file: path.to_string(),
        },
    );
}

fn qualified(scope: &str, name: &str) -> String {
    if scope.is_empty() {
        name.to_string()
    } else {
        format!("{scope}.{name}")
    }
}
