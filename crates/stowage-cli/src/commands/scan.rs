//! `stowage scan` command implementation.

use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use stowage_core::version::SCHEMA_VERSION;
use stowage_core::{collect_package_infos, InvalidManifest, PackageDependencies};

/// Scan result for JSON output (locked format: `{ ok, inventory, error? }`).
#[derive(Serialize)]
struct ScanJsonResult {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    inventory: Option<Inventory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// The inventory payload.
#[derive(Serialize)]
struct Inventory {
    schema_version: u32,
    manifest: String,
    module_roots: Vec<String>,
    packages: Vec<PackageDependencies>,
    invalid_packages: Vec<InvalidManifest>,
}

/// Run the scan command.
pub fn run(modules: &[PathBuf], manifest: &Path, json: bool) -> Result<()> {
    match collect_package_infos(modules, manifest) {
        Ok(collected) => {
            tracing::debug!(
                packages = collected.result.len(),
                invalid = collected.invalid_packages.len(),
                "inventory collected"
            );

            if json {
                let result = ScanJsonResult {
                    ok: true,
                    inventory: Some(Inventory {
                        schema_version: SCHEMA_VERSION,
                        manifest: manifest.to_string_lossy().into_owned(),
                        module_roots: modules
                            .iter()
                            .map(|m| m.to_string_lossy().into_owned())
                            .collect(),
                        packages: collected.result,
                        invalid_packages: collected.invalid_packages,
                    }),
                    error: None,
                };
                println!(
                    "{}",
                    serde_json::to_string_pretty(&result).into_diagnostic()?
                );
            } else {
                for package in &collected.result {
                    let license = package.record.license.as_deref().unwrap_or("UNKNOWN");
                    println!("{} {license}", package.key());
                }
                if !collected.invalid_packages.is_empty() {
                    println!();
                    println!("Invalid manifests:");
                    for invalid in &collected.invalid_packages {
                        println!("  {}", invalid.package_file_path);
                    }
                }
            }
            Ok(())
        }
        Err(e) => {
            if json {
                let result = ScanJsonResult {
                    ok: false,
                    inventory: None,
                    error: Some(e.to_string()),
                };
                println!(
                    "{}",
                    serde_json::to_string_pretty(&result).into_diagnostic()?
                );
                std::process::exit(1);
            }
            Err(miette::miette!("{e}"))
        }
    }
}
