//! The `types` subcommand.
//!
//! Lists every fully-qualified type of a merged descriptor set, the way
//! downstream generators will see it through the known-type registry.

use anyhow::Context;
use protoreg_core::{KnownTypes, read_descriptor_set_file};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct TypeRecord<'a> {
    name: &'a str,
    kind: String,
    file: &'a str,
}

/// Entry point of the `types` subcommand.
pub fn run(set_path: &Path, json: bool) -> anyhow::Result<()> {
    let set = read_descriptor_set_file(set_path)
        .with_context(|| format!("reading descriptor set {}", set_path.display()))?;

    let mut known_types = KnownTypes::new();
    known_types.extend_with(&set);

    if json {
        let records: Vec<TypeRecord<'_>> = known_types
            .types()
            .map(|(name, entry)| TypeRecord {
                name,
                kind: entry.kind().to_string(),
                file: entry.file(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        for (name, entry) in known_types.types() {
            println!("{:<8} {name} ({})", entry.kind().to_string(), entry.file());
        }
    }
    Ok(())
}
