//! Missing-dependency reporting.
//!
//! Re-runs the dependency resolver over a collected graph and surfaces
//! every record declaring a dependency that resolves to no installed
//! package.

use serde::Serialize;
use std::collections::BTreeMap;

use super::graph::PackageDependencies;
use super::record::{ManifestRecord, PackageKey};
use super::resolve::resolve_dependencies;

/// Unresolvable declared dependencies of one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingDependencies {
    /// Identity of the declaring package.
    pub package: PackageKey,
    /// Missing runtime dependencies (name -> specifier).
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub missing: BTreeMap<String, String>,
    /// Missing development dependencies (name -> specifier).
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub missing_dev: BTreeMap<String, String>,
    /// Missing optional dependencies (name -> specifier).
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub missing_optional: BTreeMap<String, String>,
}

/// Report every record with at least one unresolvable dependency.
///
/// The resolver runs against the given record set itself, so the report
/// reflects exactly what graph building saw. Output order follows the
/// input record order.
#[must_use]
pub fn find_missing_dependencies(
    packages: &[PackageDependencies],
    exact_only: bool,
) -> Vec<MissingDependencies> {
    let records: Vec<ManifestRecord> = packages.iter().map(|p| p.record.clone()).collect();

    packages
        .iter()
        .filter_map(|package| {
            let record = &package.record;
            let runtime = resolve_dependencies(&record.dependencies, &records, exact_only);
            let dev = resolve_dependencies(&record.dev_dependencies, &records, exact_only);
            let optional =
                resolve_dependencies(&record.optional_dependencies, &records, exact_only);

            if runtime.is_fully_resolved() && dev.is_fully_resolved() && optional.is_fully_resolved()
            {
                return None;
            }

            Some(MissingDependencies {
                package: record.key(),
                missing: runtime.missing,
                missing_dev: dev.missing,
                missing_optional: optional.missing,
            })
        })
        .collect()
}
