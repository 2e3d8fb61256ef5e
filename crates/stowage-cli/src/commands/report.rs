//! `stowage report` command implementation.

use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use stowage_core::version::SCHEMA_VERSION;
use stowage_core::{collect_package_infos, render_license_report};

/// Report result for JSON output (locked format: `{ ok, report, error? }`).
#[derive(Serialize)]
struct ReportJsonResult {
    ok: bool,
    schema_version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Run the report command.
pub fn run(
    modules: &[PathBuf],
    manifest: &Path,
    output: Option<&Path>,
    json: bool,
) -> Result<()> {
    let collected = match collect_package_infos(modules, manifest) {
        Ok(collected) => collected,
        Err(e) => {
            if json {
                let result = ReportJsonResult {
                    ok: false,
                    schema_version: SCHEMA_VERSION,
                    report: None,
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

    let report = render_license_report(&collected.result);

    if let Some(path) = output {
        fs::write(path, &report).into_diagnostic()?;
        tracing::info!(path = %path.display(), "report written");
    }

    if json {
        let result = ReportJsonResult {
            ok: true,
            schema_version: SCHEMA_VERSION,
            report: Some(report),
            error: None,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&result).into_diagnostic()?
        );
    } else if output.is_none() {
        print!("{report}");
    }

    Ok(())
}
