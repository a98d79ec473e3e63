//! Common utilities for benchmarks

use criterion::Criterion;
use pprof::criterion::{Output, PProfProfiler};

use packit_core::types::{PackageMetadata, Version};
use packit_registry::{CatalogRecord, MemoryStore};
use packit_resolver::VersionSet;

/// Configure criterion with flamegraph profiling support
pub fn criterion_config() -> Criterion {
    Criterion::default()
        .warm_up_time(std::time::Duration::from_secs(3))
        .measurement_time(std::time::Duration::from_secs(10))
        .sample_size(100)
        .with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)))
}

/// Deterministic version strings, with a prerelease every seventh entry
pub fn create_version_strings(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let major = i / 100;
            let minor = (i / 10) % 10;
            let patch = i % 10;
            if i % 7 == 0 {
                format!("{}.{}.{}-beta.{}", major, minor, patch, i % 3)
            } else {
                format!("{}.{}.{}", major, minor, patch)
            }
        })
        .collect()
}

/// Parsed counterpart of `create_version_strings`
pub fn create_versions(count: usize) -> Vec<Version> {
    create_version_strings(count)
        .iter()
        .filter_map(|raw| raw.parse().ok())
        .collect()
}

pub fn create_version_set(count: usize) -> VersionSet {
    create_versions(count).into_iter().collect()
}

/// In-memory catalog with `packages` names of `versions_per_package` rows each
pub fn create_store(packages: usize, versions_per_package: usize) -> MemoryStore {
    let versions = create_version_strings(versions_per_package);
    let mut records = Vec::with_capacity(packages * versions_per_package);

    for p in 0..packages {
        let name = format!("package-{}", p);
        for (v, version) in versions.iter().enumerate() {
            let id = format!("{}-{}", p, v);
            records.push(CatalogRecord::new(PackageMetadata::new(id, name.as_str(), version.as_str())));
        }
    }

    MemoryStore::from_records(records)
}
