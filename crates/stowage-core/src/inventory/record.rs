//! Manifest records.
//!
//! A [`ManifestRecord`] is one `package.json`'s content plus bookkeeping:
//! the (name, version) identity, the normalized license, the filesystem
//! paths the record was read from, and the three declared dependency maps.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Identity of a package: its name and exact installed version.
///
/// After deduplication no two records in a run share both fields, so a key
/// uniquely addresses a record in the flat record set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PackageKey {
    /// Package name (e.g., "react" or "@types/node").
    pub name: String,
    /// Package version (e.g., "18.2.0").
    pub version: String,
}

impl PackageKey {
    /// Create a new package key.
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for PackageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

/// One parsed `package.json` plus bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRecord {
    /// Package name.
    pub name: String,
    /// Package version.
    pub version: String,
    /// Normalized license expression, if the manifest declared one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    /// Filesystem paths this logical record was read from, in first-seen
    /// order. Starts as one path and grows when duplicates merge.
    pub provenance: Vec<String>,
    /// Declared runtime dependencies (name -> specifier).
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub dependencies: BTreeMap<String, String>,
    /// Declared development dependencies (name -> specifier).
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub dev_dependencies: BTreeMap<String, String>,
    /// Declared optional dependencies (name -> specifier).
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub optional_dependencies: BTreeMap<String, String>,
}

impl ManifestRecord {
    /// The (name, version) identity of this record.
    #[must_use]
    pub fn key(&self) -> PackageKey {
        PackageKey::new(self.name.clone(), self.version.clone())
    }

    /// Build a record from a parsed manifest value.
    ///
    /// Returns `None` when the manifest lacks a string `name` or `version`;
    /// such a manifest cannot participate in identity-based deduplication
    /// and is treated like unparseable content by the caller.
    #[must_use]
    pub fn from_json(manifest: &Value, path: &Path) -> Option<Self> {
        let name = manifest.get("name")?.as_str()?.to_string();
        let version = manifest.get("version")?.as_str()?.to_string();

        Some(Self {
            name,
            version,
            license: normalize_license(manifest),
            provenance: vec![path.to_string_lossy().into_owned()],
            dependencies: extract_section(manifest, "dependencies"),
            dev_dependencies: extract_section(manifest, "devDependencies"),
            optional_dependencies: extract_section(manifest, "optionalDependencies"),
        })
    }
}

/// A manifest file whose content could not be parsed into a record.
///
/// Carries only the path; it never enters the record set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidManifest {
    /// Path of the unreadable manifest file.
    pub package_file_path: String,
}

impl InvalidManifest {
    /// Create a new invalid-manifest entry for the given path.
    #[must_use]
    pub fn new(path: &Path) -> Self {
        Self {
            package_file_path: path.to_string_lossy().into_owned(),
        }
    }
}

/// Normalize the license declaration of a manifest to a single string.
///
/// A modern string `license` field wins. Otherwise the legacy shapes are
/// collected by their `type` fields: a single legacy `license` object, or a
/// `licenses` array of objects. Zero types leaves the license absent, one
/// type yields the bare type string, more than one joins the types as
/// `(A OR B OR ...)`.
fn normalize_license(manifest: &Value) -> Option<String> {
    if let Some(license) = manifest.get("license").and_then(Value::as_str) {
        return Some(license.to_string());
    }

    let mut types: Vec<String> = Vec::new();

    if let Some(Value::Object(obj)) = manifest.get("license") {
        if let Some(ty) = obj.get("type").and_then(Value::as_str) {
            types.push(ty.to_string());
        }
    }

    if let Some(entries) = manifest.get("licenses").and_then(Value::as_array) {
        for entry in entries {
            if let Some(ty) = entry.get("type").and_then(Value::as_str) {
                types.push(ty.to_string());
            }
        }
    }

    match types.len() {
        0 => None,
        1 => Some(types.remove(0)),
        _ => Some(format!("({})", types.join(" OR "))),
    }
}

/// Extract one dependency section as a name -> specifier map.
///
/// An absent section yields an empty map; entries whose specifier is not a
/// string are skipped.
fn extract_section(manifest: &Value, section: &str) -> BTreeMap<String, String> {
    manifest
        .get(section)
        .and_then(Value::as_object)
        .map(|obj| {
            obj.iter()
                .filter_map(|(name, specifier)| {
                    specifier
                        .as_str()
                        .map(|s| (name.clone(), s.to_string()))
                })
                .collect()
        })
        .unwrap_or_default()
}
