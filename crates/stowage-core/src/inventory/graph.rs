//! Dependency graph construction and pruning.
//!
//! Two-phase build: immutable [`ManifestRecord`]s come in, and the builder
//! produces [`PackageDependencies`] nodes carrying the three resolved-edge
//! sequences. Edges are (name, version) identity keys into the same flat
//! record set, not owned subtrees — the graph is a general directed graph
//! and may contain cycles, including self-references.

use serde::Serialize;

use super::record::{ManifestRecord, PackageKey};
use super::resolve::resolve_dependencies;

/// A record plus its resolved dependency edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageDependencies {
    /// The underlying manifest record.
    pub record: ManifestRecord,
    /// Resolved runtime dependency edges, ordered by dependency name.
    pub resolved_dependencies: Vec<PackageKey>,
    /// Resolved development dependency edges, ordered by dependency name.
    pub resolved_dev_dependencies: Vec<PackageKey>,
    /// Resolved optional dependency edges, ordered by dependency name.
    pub resolved_optional_dependencies: Vec<PackageKey>,
}

impl PackageDependencies {
    /// The (name, version) identity of the underlying record.
    #[must_use]
    pub fn key(&self) -> PackageKey {
        self.record.key()
    }

    /// Whether any of the three edge sequences lists `key` as a target.
    #[must_use]
    pub fn references(&self, key: &PackageKey) -> bool {
        self.resolved_dependencies.contains(key)
            || self.resolved_dev_dependencies.contains(key)
            || self.resolved_optional_dependencies.contains(key)
    }
}

/// Resolve every record's three dependency maps against the full record set.
///
/// The full set — including the record itself — serves as the known set for
/// each resolution, so self-references are legitimate edges. Output order is
/// input order.
#[must_use]
pub fn build_dependency_graph(records: Vec<ManifestRecord>) -> Vec<PackageDependencies> {
    records
        .iter()
        .map(|record| {
            let runtime = resolve_dependencies(&record.dependencies, &records, false);
            let dev = resolve_dependencies(&record.dev_dependencies, &records, false);
            let optional = resolve_dependencies(&record.optional_dependencies, &records, false);

            PackageDependencies {
                record: record.clone(),
                resolved_dependencies: runtime.resolved.into_values().collect(),
                resolved_dev_dependencies: dev.resolved.into_values().collect(),
                resolved_optional_dependencies: optional.resolved.into_values().collect(),
            }
        })
        .collect()
}

/// Filter the graph down to the root and every referenced node.
///
/// A node survives when it is the root, or when at least one *other* node in
/// the unpruned graph lists it in any of its three edge sequences. Retention
/// is evaluated once against the full unpruned edge set, not recomputed
/// iteratively: a cluster of packages that reference only each other
/// survives even with no path from the root. Output order preserves input
/// order.
#[must_use]
pub fn prune_unreferenced(
    nodes: Vec<PackageDependencies>,
    root: Option<&PackageKey>,
) -> Vec<PackageDependencies> {
    let retained: Vec<bool> = nodes
        .iter()
        .map(|node| {
            let key = node.key();
            if root == Some(&key) {
                return true;
            }
            nodes
                .iter()
                .any(|other| other.key() != key && other.references(&key))
        })
        .collect();

    nodes
        .into_iter()
        .zip(retained)
        .filter_map(|(node, keep)| keep.then_some(node))
        .collect()
}
