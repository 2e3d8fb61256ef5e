//! `stowage missing` command implementation.

use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use stowage_core::version::SCHEMA_VERSION;
use stowage_core::{collect_package_infos, find_missing_dependencies, MissingDependencies};

/// Missing result for JSON output (locked format: `{ ok, missing, error? }`).
#[derive(Serialize)]
struct MissingJsonResult {
    ok: bool,
    schema_version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    missing: Option<Vec<MissingDependencies>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Run the missing command.
///
/// Exits non-zero when any package declares an unresolvable dependency.
pub fn run(modules: &[PathBuf], manifest: &Path, exact: bool, json: bool) -> Result<()> {
    let collected = match collect_package_infos(modules, manifest) {
        Ok(collected) => collected,
        Err(e) => {
            if json {
                let result = MissingJsonResult {
                    ok: false,
                    schema_version: SCHEMA_VERSION,
                    missing: None,
                    error: Some(e.to_string()),
                };
                println!(
                    "{}",
                    serde_json::to_string_pretty(&result).into_diagnostic()?
                );
                std::process::exit(1);
            }
            return Err(miette::miette!("{e}"));
        }
    };

    let missing = find_missing_dependencies(&collected.result, exact);
    let clean = missing.is_empty();

    if json {
        let result = MissingJsonResult {
            ok: clean,
            schema_version: SCHEMA_VERSION,
            missing: Some(missing),
            error: None,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&result).into_diagnostic()?
        );
    } else if clean {
        println!("All declared dependencies resolve");
    } else {
        for report in &missing {
            println!("{}:", report.package);
            for (name, specifier) in &report.missing {
                println!("  {name} {specifier}");
            }
            for (name, specifier) in &report.missing_dev {
                println!("  {name} {specifier} (dev)");
            }
            for (name, specifier) in &report.missing_optional {
                println!("  {name} {specifier} (optional)");
            }
        }
    }

    if !clean {
        std::process::exit(1);
    }
    Ok(())
}
