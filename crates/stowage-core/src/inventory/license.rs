//! License allow-list auditing.
//!
//! Read-only analysis over a collected graph: each record is checked
//! against an allow-list of license names, and records with an acceptable
//! license are then handed to a caller-supplied copyright evaluator.

use serde::Serialize;

use super::graph::PackageDependencies;
use super::record::{ManifestRecord, PackageKey};

/// A package whose license failed the allow-list check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LicenseFinding {
    /// Identity of the violating package.
    pub package: PackageKey,
    /// The license the package declared, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

/// Partition of the record set into compliance violations.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LicenseAudit {
    /// Packages with no license or a license outside the allow-list.
    pub license_violations: Vec<LicenseFinding>,
    /// Packages with an acceptable license but a rejected copyright notice.
    pub copyright_violations: Vec<PackageKey>,
}

impl LicenseAudit {
    /// Whether the audit found nothing to report.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.license_violations.is_empty() && self.copyright_violations.is_empty()
    }
}

/// Audit the record set against a license allow-list.
///
/// A record violates the license check when it declares no license or a
/// license not present in `allowlist`. Records that pass are then handed
/// to `copyright_ok`; those it rejects become copyright violations. The
/// two sets are disjoint. Output order follows the input record order.
pub fn audit_licenses<F>(
    packages: &[PackageDependencies],
    allowlist: &[String],
    copyright_ok: F,
) -> LicenseAudit
where
    F: Fn(&ManifestRecord) -> bool,
{
    let mut audit = LicenseAudit::default();

    for package in packages {
        let record = &package.record;
        let allowed = record
            .license
            .as_ref()
            .is_some_and(|license| allowlist.iter().any(|allow| allow == license));

        if !allowed {
            audit.license_violations.push(LicenseFinding {
                package: record.key(),
                license: record.license.clone(),
            });
        } else if !copyright_ok(record) {
            audit.copyright_violations.push(record.key());
        }
    }

    audit
}
