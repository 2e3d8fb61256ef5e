//! Bundled-package inventory and dependency resolution.
//!
//! Provides utilities for:
//! - Discovering `package.json` manifests under bundled module roots
//! - Parsing manifests into records with normalized license fields
//! - Deduplicating records that share a (name, version) identity
//! - Matching dependency specifiers (exact string or semver range)
//! - Building a directed dependency graph with three edge kinds
//! - Pruning the graph down to the packages referenced from the product
//! - Auditing licenses against an allow-list
//! - Reporting dependencies that resolve to no installed package

pub mod collect;
pub mod dedupe;
pub mod discover;
pub mod error;
pub mod graph;
pub mod license;
pub mod matcher;
pub mod missing;
pub mod record;
pub mod report;
pub mod resolve;

pub use collect::{collect_package_infos, CollectedPackages};
pub use dedupe::dedupe_records;
pub use discover::discover_manifests;
pub use error::{codes as inventory_codes, InventoryError};
pub use graph::{build_dependency_graph, prune_unreferenced, PackageDependencies};
pub use license::{audit_licenses, LicenseAudit, LicenseFinding};
pub use matcher::{range_satisfies, specifier_matches};
pub use missing::{find_missing_dependencies, MissingDependencies};
pub use record::{InvalidManifest, ManifestRecord, PackageKey};
pub use report::render_license_report;
pub use resolve::{resolve_dependencies, ResolutionOutcome};
