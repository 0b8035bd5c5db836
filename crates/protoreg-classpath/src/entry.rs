//! Classpath entry classification and per-entry descriptor extraction.

use crate::{ClasspathResult, DESCRIPTOR_DIR, DESCRIPTOR_EXTENSION};
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;
use zip::ZipArchive;

/// A resolved entry on the dependency classpath.
///
/// Entries are classified by shape, not by content: an archive may turn out
/// to contain no descriptors at all, which is normal for most jars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClasspathEntry {
    /// A jar or zip artifact; descriptors are looked up under `META-INF/`.
    Archive(PathBuf),
    /// A resource directory laid out like an exploded archive.
    Directory(PathBuf),
    /// A plain binary descriptor-set file.
    DescriptorFile(PathBuf),
    /// Anything else; contributes no descriptors.
    Other(PathBuf),
}

impl ClasspathEntry {
    /// Classify a classpath element by its filesystem shape and extension.
    #[must_use]
    pub fn classify<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        if path.is_dir() {
            return Self::Directory(path);
        }
        match path.extension().and_then(|e| e.to_str()) {
            Some("jar" | "zip") => Self::Archive(path),
            Some(ext) if ext == DESCRIPTOR_EXTENSION => Self::DescriptorFile(path),
            Some("pb" | "bin") => Self::DescriptorFile(path),
            _ => Self::Other(path),
        }
    }

    /// The underlying filesystem path.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Archive(p) | Self::Directory(p) | Self::DescriptorFile(p) | Self::Other(p) => p,
        }
    }

    /// Extract every descriptor payload this entry contributes, as
    /// `(origin label, bytes)` pairs in deterministic order.
    pub fn descriptor_payloads(&self) -> ClasspathResult<Vec<(String, Vec<u8>)>> {
        match self {
            Self::Archive(path) => scan_archive(path),
            Self::Directory(path) => scan_directory(path),
            Self::DescriptorFile(path) => {
                let bytes = fs::read(path)?;
                Ok(vec![(path.display().to_string(), bytes)])
            }
            Self::Other(path) => {
                debug!(path = %path.display(), "classpath entry contributes no descriptors");
                Ok(Vec::new())
            }
        }
    }
}

fn is_descriptor_resource(name: &str) -> bool {
    name.strip_prefix(DESCRIPTOR_DIR)
        .is_some_and(|rest| rest.starts_with('/'))
        && Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| ext == DESCRIPTOR_EXTENSION)
}

fn scan_archive(path: &Path) -> ClasspathResult<Vec<(String, Vec<u8>)>> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file)?;

    // Archive entry order is arbitrary; sort names for deterministic merging.
    let mut names: Vec<String> = (0..archive.len())
        .filter_map(|i| archive.name_for_index(i).map(String::from))
        .filter(|name| is_descriptor_resource(name))
        .collect();
    names.sort_unstable();

    let mut payloads = Vec::with_capacity(names.len());
    for name in names {
        let mut entry = archive.by_name(&name)?;
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes)?;
        payloads.push((format!("{}!{name}", path.display()), bytes));
    }
    Ok(payloads)
}

fn scan_directory(path: &Path) -> ClasspathResult<Vec<(String, Vec<u8>)>> {
    let mut files = descriptor_files_in(path)?;
    files.extend(descriptor_files_in(&path.join(DESCRIPTOR_DIR))?);
    files.sort_unstable();

    let mut payloads = Vec::with_capacity(files.len());
    for file in files {
        let bytes = fs::read(&file)?;
        payloads.push((file.display().to_string(), bytes));
    }
    Ok(payloads)
}

fn descriptor_files_in(dir: &Path) -> ClasspathResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_descriptor = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| ext == DESCRIPTOR_EXTENSION);
        if path.is_file() && is_descriptor {
            files.push(path);
        }
    }
    Ok(files)
}
