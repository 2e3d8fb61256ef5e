#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::too_many_lines)]

pub mod config;
pub mod error;
pub mod inventory;
pub mod version;

pub use config::Config;
pub use error::Error;
pub use inventory::{
    audit_licenses, build_dependency_graph, collect_package_infos, dedupe_records,
    find_missing_dependencies, inventory_codes, prune_unreferenced, render_license_report,
    resolve_dependencies, specifier_matches, CollectedPackages, InvalidManifest, InventoryError,
    LicenseAudit, ManifestRecord, MissingDependencies, PackageDependencies, PackageKey,
    ResolutionOutcome,
};
pub use version::VERSION;
