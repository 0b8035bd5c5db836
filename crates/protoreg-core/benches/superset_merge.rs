//! Superset Merge Benchmarks
//!
//! Measures descriptor-set merging across classpath sizes typical of real
//! builds: a handful of dependency jars up to a deep enterprise classpath.
//!
//! # Workload Sizes
//!
//! - **Small**: 5 sources x 10 files (a lean service)
//! - **Medium**: 20 sources x 50 files (a typical backend module)
//! - **Large**: 50 sources x 200 files (a monolith-scale classpath)

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use prost_types::{DescriptorProto, FileDescriptorProto, FileDescriptorSet};
use protoreg_core::{FileDescriptorSuperset, KnownTypes};

fn synthetic_set(source: usize, files: usize) -> FileDescriptorSet {
    let file = (0..files)
        .map(|i| FileDescriptorProto {
            name: Some(format!("bench/src{source}/file{i}.proto")),
            package: Some(format!("bench.src{source}")),
            message_type: vec![DescriptorProto {
                name: Some(format!("Message{i}")),
                ..Default::default()
            }],
            ..Default::default()
        })
        .collect();
    FileDescriptorSet { file }
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("superset_merge");

    for (label, sources, files) in [
        ("small", 5usize, 10usize),
        ("medium", 20, 50),
        ("large", 50, 200),
    ] {
        let sets: Vec<FileDescriptorSet> =
            (0..sources).map(|s| synthetic_set(s, files)).collect();

        group.bench_with_input(BenchmarkId::new("merge", label), &sets, |b, sets| {
            b.iter(|| {
                let mut superset = FileDescriptorSuperset::new();
                for set in sets {
                    superset.add_set(black_box(set.clone())).unwrap();
                }
                black_box(superset.merge())
            });
        });
    }

    group.finish();
}

fn bench_registry_load(c: &mut Criterion) {
    let mut superset = FileDescriptorSuperset::new();
    for s in 0..20 {
        superset.add_set(synthetic_set(s, 50)).unwrap();
    }
    let merged = superset.merge();

    c.bench_function("known_types_extend", |b| {
        b.iter(|| {
            let mut known_types = KnownTypes::new();
            known_types.extend_with(black_box(&merged));
            black_box(known_types.len())
        });
    });
}

criterion_group!(benches, bench_merge, bench_registry_load);
criterion_main!(benches);
