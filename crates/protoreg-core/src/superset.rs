//! Merging descriptor sets from multiple classpath sources.
//!
//! The [`FileDescriptorSuperset`] accumulates [`FileDescriptorProto`] entries
//! keyed by proto file path and produces one consolidated
//! [`FileDescriptorSet`]. Sources are added in classpath order, with the
//! module's own descriptor file added last so local definitions take
//! precedence under the default [`MergePolicy::Overwrite`].

use crate::{DescriptorError, DescriptorResult, decode_descriptor_set};
use prost_types::{FileDescriptorProto, FileDescriptorSet};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Policy applied when two sources define the same proto file path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergePolicy {
    /// The entry added later wins, reflecting classpath order.
    ///
    /// This reproduces the historical behavior of descriptor merging in
    /// JVM build tooling, where a local descriptor overrides external ones.
    #[default]
    Overwrite,

    /// Re-adding an identical descriptor for a path is a no-op; re-adding a
    /// structurally different one fails with
    /// [`DescriptorError::ConflictingFile`].
    ErrorOnConflict,
}

impl MergePolicy {
    /// Parse a policy from its configuration string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "overwrite" => Some(Self::Overwrite),
            "error-on-conflict" => Some(Self::ErrorOnConflict),
            _ => None,
        }
    }

    /// The configuration string for this policy.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overwrite => "overwrite",
            Self::ErrorOnConflict => "error-on-conflict",
        }
    }
}

/// A descriptor entry together with the source that contributed it.
#[derive(Debug)]
struct Entry {
    descriptor: FileDescriptorProto,
    source: String,
}

/// Accumulator for descriptor sets contributed by multiple sources.
///
/// # Example
///
/// ```
/// use protoreg_core::{FileDescriptorSuperset, MergePolicy};
/// use prost_types::FileDescriptorSet;
///
/// let mut superset = FileDescriptorSuperset::with_policy(MergePolicy::Overwrite);
/// superset.add_set_from("events-1.2.jar", FileDescriptorSet::default())?;
/// let merged = superset.merge();
/// assert!(merged.file.is_empty());
/// # Ok::<(), protoreg_core::DescriptorError>(())
/// ```
#[derive(Debug, Default)]
pub struct FileDescriptorSuperset {
    policy: MergePolicy,
    files: BTreeMap<String, Entry>,
}

impl FileDescriptorSuperset {
    /// Create an empty superset with the default [`MergePolicy::Overwrite`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty superset with an explicit merge policy.
    #[must_use]
    pub fn with_policy(policy: MergePolicy) -> Self {
        Self {
            policy,
            files: BTreeMap::new(),
        }
    }

    /// The merge policy in effect.
    #[must_use]
    pub fn policy(&self) -> MergePolicy {
        self.policy
    }

    /// Add every file of a decoded descriptor set, in iteration order.
    pub fn add_set(&mut self, set: FileDescriptorSet) -> DescriptorResult<()> {
        self.add_set_from("<unnamed>", set)
    }

    /// Add every file of a decoded descriptor set, recording the contributing
    /// source for conflict reporting.
    pub fn add_set_from(&mut self, source: &str, set: FileDescriptorSet) -> DescriptorResult<()> {
        for file in set.file {
            self.insert(source, file)?;
        }
        Ok(())
    }

    /// Decode a binary descriptor set and add every file in it.
    pub fn add_bytes_from(&mut self, source: &str, bytes: &[u8]) -> DescriptorResult<()> {
        let set = decode_descriptor_set(bytes)?;
        self.add_set_from(source, set)
    }

    fn insert(&mut self, source: &str, file: FileDescriptorProto) -> DescriptorResult<()> {
        let path = file.name().to_string();
        if path.is_empty() {
            return Err(DescriptorError::InvalidDescriptor(format!(
                "descriptor contributed by {source} has a file entry without a name"
            )));
        }

        match self.files.get(&path) {
            None => {}
            Some(existing) if self.policy == MergePolicy::Overwrite => {
                debug!(
                    path = %path,
                    previous = %existing.source,
                    replacement = %source,
                    "replacing descriptor entry"
                );
            }
            Some(existing) if existing.descriptor == file => {
                debug!(path = %path, source = %source, "skipping identical duplicate descriptor entry");
                return Ok(());
            }
            Some(existing) => {
                return Err(DescriptorError::ConflictingFile {
                    path,
                    first_source: existing.source.clone(),
                    second_source: source.to_string(),
                });
            }
        }

        self.files.insert(
            path,
            Entry {
                descriptor: file,
                source: source.to_string(),
            },
        );
        Ok(())
    }

    /// Whether a proto file path is present in the superset.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// Number of distinct proto file paths accumulated so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether no descriptors have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Produce the consolidated descriptor set.
    ///
    /// Files are ordered so that dependencies precede their dependents, which
    /// lets the result load directly into a reflection pool. Files whose
    /// imports are absent from the superset keep their relative order.
    #[must_use]
    pub fn merge(self) -> FileDescriptorSet {
        let files: Vec<FileDescriptorProto> = self
            .files
            .into_values()
            .map(|entry| entry.descriptor)
            .collect();
        FileDescriptorSet {
            file: sort_by_dependency(files),
        }
    }
}

/// Order files so that each file appears after the files it imports.
///
/// Proto imports are acyclic by the language rules; if a cycle sneaks in via
/// hand-crafted descriptors, traversal breaks it at the back edge rather
/// than recursing forever.
pub(crate) fn sort_by_dependency(files: Vec<FileDescriptorProto>) -> Vec<FileDescriptorProto> {
    let index: HashMap<&str, usize> = files
        .iter()
        .enumerate()
        .map(|(i, file)| (file.name(), i))
        .collect();

    let mut state = vec![VisitState::Unvisited; files.len()];
    let mut order = Vec::with_capacity(files.len());
    for i in 0..files.len() {
        visit(i, &files, &index, &mut state, &mut order);
    }

    // Take files out in emission order without cloning descriptors.
    let mut slots: Vec<Option<FileDescriptorProto>> = files.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    InProgress,
    Done,
}

fn visit(
    i: usize,
    files: &[FileDescriptorProto],
    index: &HashMap<&str, usize>,
    state: &mut [VisitState],
    order: &mut Vec<usize>,
) {
    if state[i] != VisitState::Unvisited {
        return;
    }
    state[i] = VisitState::InProgress;
    for dep in &files[i].dependency {
        if let Some(&j) = index.get(dep.as_str()) {
            visit(j, files, index, state, order);
        }
    }
    state[i] = VisitState::Done;
    order.push(i);
}
