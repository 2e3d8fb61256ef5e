//! The inventory orchestrator.

use serde::Serialize;
use std::path::{Path, PathBuf};

use super::dedupe::dedupe_records;
use super::discover::{discover_manifests, load_manifest};
use super::error::InventoryError;
use super::graph::{build_dependency_graph, prune_unreferenced, PackageDependencies};
use super::record::InvalidManifest;

/// The pruned dependency graph plus the manifests that failed to parse.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CollectedPackages {
    /// Pruned graph: the product record plus every referenced package.
    pub result: Vec<PackageDependencies>,
    /// Manifest files whose content could not be parsed into a record.
    pub invalid_packages: Vec<InvalidManifest>,
}

/// Inventory the bundled packages reachable from the product manifest.
///
/// Reads every `package.json` under `module_roots` plus the product's own
/// manifest, deduplicates the records, resolves the three dependency maps
/// of each record into graph edges, and prunes the graph to the product
/// record plus everything referenced.
///
/// Manifests with unparseable content are excluded from the graph and
/// surfaced in `invalid_packages`; their dependents simply report them
/// missing. If the product manifest itself fails to parse, its path is
/// appended to `invalid_packages` and pruning runs without a root.
///
/// # Errors
/// Filesystem access failures — an untraversable module root, an unreadable
/// manifest file, an absent product manifest path — fail the whole run.
pub fn collect_package_infos(
    module_roots: &[PathBuf],
    product_manifest: &Path,
) -> Result<CollectedPackages, InventoryError> {
    let mut invalid_packages = Vec::new();
    let mut records = Vec::new();

    for path in discover_manifests(module_roots)? {
        match load_manifest(&path)? {
            Some(record) => records.push(record),
            None => invalid_packages.push(InvalidManifest::new(&path)),
        }
    }

    let mut records = dedupe_records(records);

    // The product manifest is read directly, not searched for, and is
    // appended after dedup so it is always the last record: the root.
    let root_key = match load_manifest(product_manifest)? {
        Some(record) => {
            let key = record.key();
            records.push(record);
            Some(key)
        }
        None => {
            invalid_packages.push(InvalidManifest::new(product_manifest));
            None
        }
    };

    let nodes = build_dependency_graph(records);
    let result = prune_unreferenced(nodes, root_key.as_ref());

    Ok(CollectedPackages {
        result,
        invalid_packages,
    })
}
