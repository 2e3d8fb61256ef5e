//! `stowage licenses` command implementation.

use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use stowage_core::version::SCHEMA_VERSION;
use stowage_core::{audit_licenses, collect_package_infos, Error, LicenseAudit};

/// Licenses result for JSON output (locked format: `{ ok, audit, error? }`).
#[derive(Serialize)]
struct LicensesJsonResult {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    audit: Option<AuditPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// The audit payload.
#[derive(Serialize)]
struct AuditPayload {
    schema_version: u32,
    allowlist: Vec<String>,
    #[serde(flatten)]
    audit: LicenseAudit,
}

/// Run the licenses command.
///
/// Exits non-zero when the audit reports any violation.
pub fn run(
    modules: &[PathBuf],
    manifest: &Path,
    mut allow: Vec<String>,
    allow_file: Option<&Path>,
    json: bool,
) -> Result<()> {
    if let Some(path) = allow_file {
        allow.extend(read_allow_file(path).into_diagnostic()?);
    }

    let collected = match collect_package_infos(modules, manifest) {
        Ok(collected) => collected,
        Err(e) => return fail(&e.to_string(), json),
    };

    // No copyright evaluator is wired up at the CLI; records passing the
    // allow-list are accepted as-is.
    let audit = audit_licenses(&collected.result, &allow, |_| true);
    let clean = audit.is_clean();

    if json {
        let result = LicensesJsonResult {
            ok: clean,
            audit: Some(AuditPayload {
                schema_version: SCHEMA_VERSION,
                allowlist: allow,
                audit,
            }),
            error: None,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&result).into_diagnostic()?
        );
    } else if clean {
        println!("All {} packages pass the allow-list", collected.result.len());
    } else {
        for finding in &audit.license_violations {
            let license = finding.license.as_deref().unwrap_or("no license");
            println!("{}: {license}", finding.package);
        }
        for package in &audit.copyright_violations {
            println!("{package}: copyright rejected");
        }
    }

    if !clean {
        std::process::exit(1);
    }
    Ok(())
}

/// Read an allow-list file: a JSON array of license name strings.
fn read_allow_file(path: &Path) -> Result<Vec<String>, Error> {
    let content = fs::read_to_string(path).map_err(|source| Error::AllowListRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| Error::AllowListParse {
        path: path.to_path_buf(),
        source,
    })
}

fn fail(message: &str, json: bool) -> Result<()> {
    if json {
        let result = LicensesJsonResult {
            ok: false,
            audit: None,
            error: Some(message.to_string()),
        };
        if let Ok(rendered) = serde_json::to_string_pretty(&result) {
            println!("{rendered}");
        }
        std::process::exit(1);
    }
    Err(miette::miette!("{message}"))
}
