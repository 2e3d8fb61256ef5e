//! License-grouped inventory reporting.

use std::collections::BTreeMap;
use std::fmt::Write;

use super::graph::PackageDependencies;

/// Group label for records that declare no license.
pub const UNKNOWN_LICENSE: &str = "UNKNOWN";

/// Render the inventory as a text report grouped by license.
///
/// Groups are ordered by license string, packages sorted within each group.
/// Records without a license land under [`UNKNOWN_LICENSE`]. The output is
/// deterministic for a given input set.
#[must_use]
pub fn render_license_report(packages: &[PackageDependencies]) -> String {
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for package in packages {
        let license = package
            .record
            .license
            .clone()
            .unwrap_or_else(|| UNKNOWN_LICENSE.to_string());
        groups
            .entry(license)
            .or_default()
            .push(package.key().to_string());
    }

    let mut out = String::new();
    for (license, mut members) in groups {
        members.sort();
        members.dedup();

        let _ = writeln!(out, "{license}");
        for member in members {
            let _ = writeln!(out, "  {member}");
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::record::ManifestRecord;
    use std::collections::BTreeMap;

    fn package(name: &str, version: &str, license: Option<&str>) -> PackageDependencies {
        PackageDependencies {
            record: ManifestRecord {
                name: name.to_string(),
                version: version.to_string(),
                license: license.map(String::from),
                provenance: vec![format!("/pkgs/{name}/package.json")],
                dependencies: BTreeMap::new(),
                dev_dependencies: BTreeMap::new(),
                optional_dependencies: BTreeMap::new(),
            },
            resolved_dependencies: Vec::new(),
            resolved_dev_dependencies: Vec::new(),
            resolved_optional_dependencies: Vec::new(),
        }
    }

    #[test]
    fn test_groups_by_license() {
        let report = render_license_report(&[
            package("b", "1.0.0", Some("MIT")),
            package("a", "2.0.0", Some("MIT")),
            package("c", "1.0.0", Some("ISC")),
        ]);

        let isc_at = report.find("ISC").unwrap();
        let mit_at = report.find("MIT").unwrap();
        assert!(isc_at < mit_at, "groups ordered by license string");
        assert!(report.contains("  a@2.0.0\n  b@1.0.0"), "members sorted");
        assert!(report.contains("  c@1.0.0"));
    }

    #[test]
    fn test_unlicensed_grouped_under_unknown() {
        let report = render_license_report(&[package("mystery", "0.1.0", None)]);
        assert!(report.contains(UNKNOWN_LICENSE));
        assert!(report.contains("  mystery@0.1.0"));
    }

    #[test]
    fn test_empty_inventory_renders_empty() {
        assert!(render_license_report(&[]).is_empty());
    }
}
