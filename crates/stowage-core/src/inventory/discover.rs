//! Manifest discovery and loading.
//!
//! Module roots are walked recursively for files named exactly
//! `package.json` (case-sensitive). Traversal is sorted and reads are
//! sequential, so downstream output ordering is deterministic. Traversal
//! and read failures are hard errors; content that fails to parse is soft
//! (the caller records the path and moves on).

use serde_json::Value;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::error::InventoryError;
use super::record::ManifestRecord;

const MANIFEST_FILE_NAME: &str = "package.json";

/// Find every `package.json` under the given module roots.
///
/// Paths are returned in traversal order, roots in the order given.
pub fn discover_manifests(module_roots: &[PathBuf]) -> Result<Vec<PathBuf>, InventoryError> {
    let mut manifests = Vec::new();

    for root in module_roots {
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(|e| InventoryError::scan_failed(root, &e))?;
            if entry.file_type().is_file() && entry.file_name() == OsStr::new(MANIFEST_FILE_NAME) {
                manifests.push(entry.into_path());
            }
        }
    }

    Ok(manifests)
}

/// Read and parse one manifest file.
///
/// Returns `Ok(None)` when the content is not valid JSON or lacks a string
/// name/version — the caller records the path as an invalid manifest. A
/// file that cannot be read at all is a hard error.
pub fn load_manifest(path: &Path) -> Result<Option<ManifestRecord>, InventoryError> {
    let bytes = fs::read(path).map_err(|e| InventoryError::manifest_read_failed(path, &e))?;
    let text = String::from_utf8_lossy(&bytes);

    match serde_json::from_str::<Value>(&text) {
        Ok(manifest) => Ok(ManifestRecord::from_json(&manifest, path)),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_manifest(dir: &Path, content: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join("package.json"), content).unwrap();
    }

    #[test]
    fn test_discovers_nested_manifests() {
        let dir = tempdir().unwrap();
        write_manifest(&dir.path().join("a"), r#"{"name":"a","version":"1.0.0"}"#);
        write_manifest(
            &dir.path().join("a/node_modules/b"),
            r#"{"name":"b","version":"1.0.0"}"#,
        );

        let found = discover_manifests(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_only_exact_filename_considered() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("package.json5"), "{}").unwrap();
        fs::write(dir.path().join("Package.json"), "{}").unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"name":"a","version":"1.0.0"}"#,
        )
        .unwrap();

        let found = discover_manifests(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with("package.json"));
    }

    #[test]
    fn test_deterministic_order() {
        let dir = tempdir().unwrap();
        for name in ["zebra", "alpha", "mango"] {
            write_manifest(
                &dir.path().join(name),
                &format!(r#"{{"name":"{name}","version":"1.0.0"}}"#),
            );
        }

        let first = discover_manifests(&[dir.path().to_path_buf()]).unwrap();
        let second = discover_manifests(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(first, second);

        let names: Vec<String> = first
            .iter()
            .map(|p| {
                p.parent()
                    .unwrap()
                    .file_name()
                    .unwrap()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        assert_eq!(names, vec!["alpha", "mango", "zebra"]);
    }

    #[test]
    fn test_missing_root_is_hard_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("no-such-dir");
        let result = discover_manifests(&[missing]);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_valid_manifest() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("package.json");
        fs::write(&path, r#"{"name":"a","version":"1.0.0","license":"MIT"}"#).unwrap();

        let record = load_manifest(&path).unwrap().unwrap();
        assert_eq!(record.name, "a");
        assert_eq!(record.license.as_deref(), Some("MIT"));
        assert_eq!(record.provenance, vec![path.to_string_lossy().into_owned()]);
    }

    #[test]
    fn test_load_malformed_manifest_is_soft() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("package.json");
        fs::write(&path, "not valid json {{{").unwrap();

        assert!(load_manifest(&path).unwrap().is_none());
    }

    #[test]
    fn test_load_missing_file_is_hard_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("package.json");
        assert!(load_manifest(&path).is_err());
    }
}
