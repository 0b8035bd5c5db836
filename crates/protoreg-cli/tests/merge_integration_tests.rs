//! Integration tests for the merge pipeline.
//!
//! Exercises the full collector -> superset -> registry flow against real
//! jar archives and descriptor files on disk, the way the `merge` subcommand
//! drives it.

#![allow(non_snake_case)]

use prost_types::{DescriptorProto, FileDescriptorProto, FileDescriptorSet};
use protoreg_classpath::DescriptorCollector;
use protoreg_core::{
    DescriptorError, FileDescriptorSuperset, KnownTypes, MergePolicy, encode_descriptor_set,
    read_descriptor_set_file, write_descriptor_set_file,
};
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Helper to build a single-file descriptor set.
fn descriptor_set(path: &str, package: &str, messages: &[&str]) -> FileDescriptorSet {
    FileDescriptorSet {
        file: vec![FileDescriptorProto {
            name: Some(path.to_string()),
            package: Some(package.to_string()),
            message_type: messages
                .iter()
                .map(|m| DescriptorProto {
                    name: Some((*m).to_string()),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }],
    }
}

/// Helper to create a jar shipping a descriptor set under META-INF.
fn create_jar(temp_dir: &TempDir, jar_name: &str, set: &FileDescriptorSet) -> PathBuf {
    let jar_path = temp_dir.path().join(jar_name);
    let file = File::create(&jar_path).unwrap();
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default();
    zip.start_file("META-INF/known_types.desc", options).unwrap();
    zip.write_all(&encode_descriptor_set(set)).unwrap();
    zip.finish().unwrap();
    jar_path
}

fn run_pipeline(
    classpath: &[PathBuf],
    descriptor: &PathBuf,
    output: &PathBuf,
    policy: MergePolicy,
) -> Result<Option<KnownTypes>, DescriptorError> {
    let mut collector = DescriptorCollector::new();
    for artifact in classpath {
        collector.add_artifact(artifact).unwrap();
    }
    if !collector.add_local_descriptor(descriptor).unwrap() {
        return Ok(None);
    }

    let mut superset = FileDescriptorSuperset::with_policy(policy);
    collector.merge_into(&mut superset)?;
    let merged = superset.merge();

    let mut known_types = KnownTypes::new();
    known_types.extend_with(&merged);
    known_types.descriptor_pool()?;

    write_descriptor_set_file(output, &merged)?;
    Ok(Some(known_types))
}

#[test]
fn pipeline___two_jars_and_local___all_types_known() {
    let temp_dir = TempDir::new().unwrap();
    let jar_a = create_jar(
        &temp_dir,
        "events-1.2.jar",
        &descriptor_set("acme/events.proto", "acme.events", &["OrderPlaced"]),
    );
    let jar_b = create_jar(
        &temp_dir,
        "base-0.9.jar",
        &descriptor_set("acme/base.proto", "acme.base", &["Money"]),
    );
    let local = temp_dir.path().join("known_types_main.desc");
    write_descriptor_set_file(
        &local,
        &descriptor_set("acme/server.proto", "acme.server", &["CreateOrder"]),
    )
    .unwrap();
    let output = temp_dir.path().join("merged.desc");

    let known_types = run_pipeline(
        &[jar_a, jar_b],
        &local,
        &output,
        MergePolicy::Overwrite,
    )
    .unwrap()
    .unwrap();

    assert_eq!(known_types.len(), 3);
    assert!(known_types.contains("acme.events.OrderPlaced"));
    assert!(known_types.contains("acme.base.Money"));
    assert!(known_types.contains("acme.server.CreateOrder"));
}

#[test]
fn pipeline___written_output___reloads_to_identical_registry() {
    let temp_dir = TempDir::new().unwrap();
    let jar = create_jar(
        &temp_dir,
        "events.jar",
        &descriptor_set("acme/events.proto", "acme.events", &["OrderPlaced"]),
    );
    let local = temp_dir.path().join("known_types_main.desc");
    write_descriptor_set_file(
        &local,
        &descriptor_set("acme/server.proto", "acme.server", &["CreateOrder"]),
    )
    .unwrap();
    let output = temp_dir.path().join("merged.desc");

    run_pipeline(&[jar], &local, &output, MergePolicy::Overwrite)
        .unwrap()
        .unwrap();

    let reloaded = read_descriptor_set_file(&output).unwrap();
    let mut known_types = KnownTypes::new();
    known_types.extend_with(&reloaded);

    assert!(known_types.contains("acme.events.OrderPlaced"));
    assert!(known_types.contains("acme.server.CreateOrder"));
}

#[test]
fn pipeline___missing_local_descriptor___skips_variant_without_output() {
    let temp_dir = TempDir::new().unwrap();
    let jar = create_jar(
        &temp_dir,
        "events.jar",
        &descriptor_set("acme/events.proto", "acme.events", &["OrderPlaced"]),
    );
    let local = temp_dir.path().join("never-built.desc");
    let output = temp_dir.path().join("merged.desc");

    let result = run_pipeline(&[jar], &local, &output, MergePolicy::Overwrite).unwrap();

    assert!(result.is_none());
    assert!(!output.exists());
}

#[test]
fn pipeline___local_overrides_classpath___under_overwrite_policy() {
    let temp_dir = TempDir::new().unwrap();
    let jar = create_jar(
        &temp_dir,
        "base.jar",
        &descriptor_set("acme/user.proto", "acme", &["User"]),
    );
    let local = temp_dir.path().join("known_types_main.desc");
    write_descriptor_set_file(
        &local,
        &descriptor_set("acme/user.proto", "acme", &["UserV2"]),
    )
    .unwrap();
    let output = temp_dir.path().join("merged.desc");

    let known_types = run_pipeline(&[jar], &local, &output, MergePolicy::Overwrite)
        .unwrap()
        .unwrap();

    assert!(known_types.contains("acme.UserV2"));
    assert!(!known_types.contains("acme.User"));
}

#[test]
fn pipeline___conflicting_definitions___fail_under_error_policy() {
    let temp_dir = TempDir::new().unwrap();
    let jar = create_jar(
        &temp_dir,
        "base.jar",
        &descriptor_set("acme/user.proto", "acme", &["User"]),
    );
    let local = temp_dir.path().join("known_types_main.desc");
    write_descriptor_set_file(
        &local,
        &descriptor_set("acme/user.proto", "acme", &["UserV2"]),
    )
    .unwrap();
    let output = temp_dir.path().join("merged.desc");

    let result = run_pipeline(&[jar], &local, &output, MergePolicy::ErrorOnConflict);

    assert!(matches!(
        result,
        Err(DescriptorError::ConflictingFile { .. })
    ));
    assert!(!output.exists());
}

#[test]
fn pipeline___same_definition_in_two_jars___succeeds_under_error_policy() {
    let temp_dir = TempDir::new().unwrap();
    let shared = descriptor_set("acme/base.proto", "acme.base", &["Money"]);
    let jar_a = create_jar(&temp_dir, "lib-a.jar", &shared);
    let jar_b = create_jar(&temp_dir, "lib-b.jar", &shared);
    let local = temp_dir.path().join("known_types_main.desc");
    write_descriptor_set_file(
        &local,
        &descriptor_set("acme/server.proto", "acme.server", &["CreateOrder"]),
    )
    .unwrap();
    let output = temp_dir.path().join("merged.desc");

    let known_types = run_pipeline(
        &[jar_a, jar_b],
        &local,
        &output,
        MergePolicy::ErrorOnConflict,
    )
    .unwrap()
    .unwrap();

    assert!(known_types.contains("acme.base.Money"));
}

#[test]
fn pipeline___corrupt_descriptor_in_jar___is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let jar_path = temp_dir.path().join("broken.jar");
    let file = File::create(&jar_path).unwrap();
    let mut zip = ZipWriter::new(file);
    zip.start_file("META-INF/known_types.desc", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(b"\xff\xff\xff\xff").unwrap();
    zip.finish().unwrap();

    let local = temp_dir.path().join("known_types_main.desc");
    write_descriptor_set_file(
        &local,
        &descriptor_set("acme/server.proto", "acme.server", &["CreateOrder"]),
    )
    .unwrap();
    let output = temp_dir.path().join("merged.desc");

    let result = run_pipeline(&[jar_path], &local, &output, MergePolicy::Overwrite);

    assert!(matches!(result, Err(DescriptorError::Decode(_))));
}

#[test]
fn pipeline___unlinkable_merged_set___fails_without_output() {
    let temp_dir = TempDir::new().unwrap();
    // The jar's file imports a proto no source ever contributes.
    let unlinkable = FileDescriptorSet {
        file: vec![FileDescriptorProto {
            name: Some("acme/events.proto".to_string()),
            package: Some("acme.events".to_string()),
            dependency: vec!["acme/never_shipped.proto".to_string()],
            ..Default::default()
        }],
    };
    let jar = create_jar(&temp_dir, "events.jar", &unlinkable);
    let local = temp_dir.path().join("known_types_main.desc");
    write_descriptor_set_file(
        &local,
        &descriptor_set("acme/server.proto", "acme.server", &["CreateOrder"]),
    )
    .unwrap();
    let output = temp_dir.path().join("merged.desc");

    let result = run_pipeline(&[jar], &local, &output, MergePolicy::Overwrite);

    assert!(matches!(result, Err(DescriptorError::Link(_))));
    assert!(!output.exists());
}

#[test]
fn pipeline___classpath_directory___contributes_descriptors() {
    let temp_dir = TempDir::new().unwrap();
    let resources = temp_dir.path().join("resources");
    let meta_inf = resources.join("META-INF");
    fs::create_dir_all(&meta_inf).unwrap();
    fs::write(
        meta_inf.join("known_types.desc"),
        encode_descriptor_set(&descriptor_set("acme/dir.proto", "acme.dir", &["FromDir"])),
    )
    .unwrap();

    let local = temp_dir.path().join("known_types_main.desc");
    write_descriptor_set_file(
        &local,
        &descriptor_set("acme/server.proto", "acme.server", &["CreateOrder"]),
    )
    .unwrap();
    let output = temp_dir.path().join("merged.desc");

    let known_types = run_pipeline(&[resources], &local, &output, MergePolicy::Overwrite)
        .unwrap()
        .unwrap();

    assert!(known_types.contains("acme.dir.FromDir"));
}
