//! Ordered collection of descriptor sources for one source set.
//!
//! The [`DescriptorCollector`] walks the resolved dependency classpath and
//! gathers every contributed descriptor payload, then takes the module's own
//! descriptor file last. The order is significant: under the last-wins merge
//! policy, later sources override earlier ones.

use crate::{ClasspathEntry, ClasspathResult};
use protoreg_core::{DescriptorResult, FileDescriptorSuperset, decode_descriptor_set};
use prost_types::FileDescriptorSet;
use std::path::Path;
use tracing::{debug, warn};

/// One collected descriptor payload and where it came from.
///
/// The origin is a human-readable label used in logs and conflict errors,
/// e.g. `lib/events-1.2.jar!META-INF/known_types.desc`.
#[derive(Debug, Clone)]
pub struct DescriptorSource {
    origin: String,
    bytes: Vec<u8>,
}

impl DescriptorSource {
    /// Label of the classpath element that contributed this payload.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// The raw descriptor-set bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Decode the payload into a [`FileDescriptorSet`].
    pub fn decode(&self) -> DescriptorResult<FileDescriptorSet> {
        decode_descriptor_set(&self.bytes)
    }
}

/// Collector of descriptor sources for a single module and build variant.
#[derive(Debug, Default)]
pub struct DescriptorCollector {
    sources: Vec<DescriptorSource>,
}

impl DescriptorCollector {
    /// Create an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one classpath artifact (jar, directory, or descriptor file).
    ///
    /// Returns the number of descriptor payloads the artifact contributed.
    /// Artifacts without descriptors are normal and contribute zero.
    pub fn add_artifact<P: AsRef<Path>>(&mut self, path: P) -> ClasspathResult<usize> {
        let entry = ClasspathEntry::classify(path.as_ref());
        let payloads = entry.descriptor_payloads()?;
        let count = payloads.len();
        debug!(
            artifact = %entry.path().display(),
            descriptors = count,
            "collected classpath artifact"
        );
        for (origin, bytes) in payloads {
            self.sources.push(DescriptorSource { origin, bytes });
        }
        Ok(count)
    }

    /// Add the module's locally-built descriptor file.
    ///
    /// Must be called after all classpath artifacts so local definitions win
    /// the merge. A missing file is not an error: the build continues without
    /// this module's types known, so `false` is returned and a warning logged
    /// for the caller to skip merging this variant.
    pub fn add_local_descriptor<P: AsRef<Path>>(&mut self, path: P) -> ClasspathResult<bool> {
        let path = path.as_ref();
        if !path.is_file() {
            warn!(
                descriptor = %path.display(),
                "local descriptor file not found; skipping descriptor merge for this variant"
            );
            return Ok(false);
        }
        let bytes = std::fs::read(path)?;
        self.sources.push(DescriptorSource {
            origin: path.display().to_string(),
            bytes,
        });
        Ok(true)
    }

    /// The collected sources, in merge order.
    #[must_use]
    pub fn sources(&self) -> &[DescriptorSource] {
        &self.sources
    }

    /// Number of collected descriptor payloads.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether nothing was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Feed every collected source into a superset, in collection order.
    pub fn merge_into(&self, superset: &mut FileDescriptorSuperset) -> DescriptorResult<()> {
        for source in &self.sources {
            superset.add_bytes_from(&source.origin, &source.bytes)?;
        }
        Ok(())
    }
}
