//! The protoreg.toml project config.
//!
//! The config declares, per source set, which classpath elements contribute
//! descriptors, where the locally-built descriptor file lives, and where the
//! merged result goes:
//!
//! ```toml
//! [project]
//! name = "acme-server"
//!
//! [source-sets.main]
//! classpath = ["lib/events-1.2.jar", "lib/base-0.9.jar"]
//! descriptor = "build/descriptors/main/known_types_main.desc"
//! output = "build/descriptors/main/merged.desc"
//! policy = "overwrite"
//! ```

use anyhow::{Context, bail};
use protoreg_core::MergePolicy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file name.
pub const CONFIG_FILE: &str = "protoreg.toml";

/// The parsed protoreg.toml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project metadata.
    pub project: ProjectInfo,

    /// Source-set configurations, keyed by source-set name ("main", "test").
    #[serde(rename = "source-sets", default)]
    pub source_sets: BTreeMap<String, SourceSetConfig>,
}

/// Project metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectInfo {
    /// Project name, used in log output only.
    pub name: String,
}

/// Per-source-set merge configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSetConfig {
    /// Classpath elements contributing descriptors, in classpath order.
    #[serde(default)]
    pub classpath: Vec<PathBuf>,

    /// The locally-built descriptor file for this source set.
    pub descriptor: PathBuf,

    /// Where to write the merged descriptor set.
    pub output: PathBuf,

    /// Duplicate-path policy: "overwrite" or "error-on-conflict".
    #[serde(default = "default_policy")]
    pub policy: String,
}

fn default_policy() -> String {
    MergePolicy::Overwrite.as_str().to_string()
}

impl SourceSetConfig {
    /// The parsed merge policy.
    pub fn merge_policy(&self) -> anyhow::Result<MergePolicy> {
        MergePolicy::parse(&self.policy)
            .with_context(|| format!("unknown merge policy: {}", self.policy))
    }
}

impl ProjectConfig {
    /// Load and validate a config file.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Self = toml::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate structural requirements beyond what serde enforces.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.project.name.is_empty() {
            bail!("project.name is required");
        }
        if self.source_sets.is_empty() {
            bail!("at least one source set must be configured");
        }
        for (name, source_set) in &self.source_sets {
            if source_set.descriptor.as_os_str().is_empty() {
                bail!("source set {name}: descriptor path is required");
            }
            if source_set.output.as_os_str().is_empty() {
                bail!("source set {name}: output path is required");
            }
            source_set
                .merge_policy()
                .with_context(|| format!("source set {name}"))?;
        }
        Ok(())
    }
}

/// Entry point of the `check` subcommand.
pub fn check(config_path: Option<String>) -> anyhow::Result<()> {
    let path = config_path.unwrap_or_else(|| CONFIG_FILE.to_string());
    let config = ProjectConfig::load(&path)?;
    println!(
        "{path}: OK ({} source set{})",
        config.source_sets.len(),
        if config.source_sets.len() == 1 { "" } else { "s" }
    );
    Ok(())
}
