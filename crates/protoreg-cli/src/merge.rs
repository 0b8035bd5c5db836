//! The `merge` subcommand.
//!
//! Runs the collector -> superset -> registry pipeline once per source set:
//! classpath descriptors first, the locally-built descriptor last, the merged
//! set link-validated and written to disk for downstream generators.

use crate::config::{CONFIG_FILE, ProjectConfig, SourceSetConfig};
use anyhow::Context;
use protoreg_classpath::DescriptorCollector;
use protoreg_core::{
    FileDescriptorSuperset, KnownTypes, MergePolicy, write_descriptor_set_file,
};
use std::path::{Path, PathBuf};
use tracing::info;

/// Entry point of the config-driven `merge` subcommand.
pub fn run(config_path: Option<String>, only_source_set: Option<String>) -> anyhow::Result<()> {
    let path = config_path.unwrap_or_else(|| CONFIG_FILE.to_string());
    let config = ProjectConfig::load(&path)?;

    match only_source_set {
        Some(name) => {
            let source_set = config
                .source_sets
                .get(&name)
                .with_context(|| format!("source set {name} not found in {path}"))?;
            merge_source_set(&config.project.name, &name, source_set)?;
        }
        None => {
            for (name, source_set) in &config.source_sets {
                merge_source_set(&config.project.name, name, source_set)?;
            }
        }
    }
    Ok(())
}

/// Entry point of the flag-driven `merge` subcommand.
pub fn run_direct(
    classpath: &[PathBuf],
    descriptor: &Path,
    out: &Path,
    policy: &str,
) -> anyhow::Result<()> {
    let policy =
        MergePolicy::parse(policy).with_context(|| format!("unknown merge policy: {policy}"))?;
    let source_set = SourceSetConfig {
        classpath: classpath.to_vec(),
        descriptor: descriptor.to_path_buf(),
        output: out.to_path_buf(),
        policy: policy.as_str().to_string(),
    };
    merge_source_set("<direct>", "main", &source_set)?;
    Ok(())
}

fn merge_source_set(
    project: &str,
    name: &str,
    source_set: &SourceSetConfig,
) -> anyhow::Result<Option<KnownTypes>> {
    let mut collector = DescriptorCollector::new();
    for artifact in &source_set.classpath {
        collector
            .add_artifact(artifact)
            .with_context(|| format!("scanning classpath artifact {}", artifact.display()))?;
    }
    if !collector.add_local_descriptor(&source_set.descriptor)? {
        // Already warned by the collector; the build goes on without this
        // source set's types known.
        return Ok(None);
    }

    let mut superset = FileDescriptorSuperset::with_policy(source_set.merge_policy()?);
    collector
        .merge_into(&mut superset)
        .with_context(|| format!("merging descriptors of source set {name}"))?;
    let merged = superset.merge();

    let mut known_types = KnownTypes::new();
    known_types.extend_with(&merged);
    // A set that does not link (an import never contributed by any source)
    // must not reach downstream generators.
    known_types
        .descriptor_pool()
        .with_context(|| format!("linking merged descriptors of source set {name}"))?;

    write_descriptor_set_file(&source_set.output, &merged).with_context(|| {
        format!(
            "writing merged descriptor set to {}",
            source_set.output.display()
        )
    })?;

    info!(
        project,
        source_set = name,
        files = merged.file.len(),
        types = known_types.len(),
        output = %source_set.output.display(),
        "merged descriptor sets"
    );
    Ok(Some(known_types))
}
