//! Integration tests for `stowage scan`.
//!
//! These tests create bundled-package trees and verify the inventory output.

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn cargo_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO"));
    cmd.args(["run", "-p", "stowage-cli", "--bin", "stowage", "--"]);
    cmd
}

fn write_package(dir: &Path, json: &serde_json::Value) {
    fs::create_dir_all(dir).unwrap();
    fs::write(
        dir.join("package.json"),
        serde_json::to_string_pretty(json).unwrap(),
    )
    .unwrap();
}

/// Create a product with a populated module tree.
fn create_project(
    deps: &[(&str, &str)],
    packages: &[(&str, &str, &[(&str, &str)])], // (name, version, deps)
) -> TempDir {
    let dir = tempfile::tempdir().unwrap();

    let mut product = serde_json::json!({
        "name": "test-product",
        "version": "1.0.0",
        "license": "MIT"
    });
    if !deps.is_empty() {
        let deps_obj: serde_json::Map<String, serde_json::Value> = deps
            .iter()
            .map(|(name, range)| ((*name).to_string(), serde_json::json!(range)))
            .collect();
        product["dependencies"] = serde_json::Value::Object(deps_obj);
    }
    write_package(dir.path(), &product);

    for (name, version, pkg_deps) in packages {
        let mut pkg = serde_json::json!({
            "name": name,
            "version": version,
            "license": "MIT"
        });
        if !pkg_deps.is_empty() {
            let deps_obj: serde_json::Map<String, serde_json::Value> = pkg_deps
                .iter()
                .map(|(n, r)| ((*n).to_string(), serde_json::json!(r)))
                .collect();
            pkg["dependencies"] = serde_json::Value::Object(deps_obj);
        }
        write_package(&dir.path().join("node_modules").join(name), &pkg);
    }

    dir
}

fn run_scan(project: &TempDir) -> serde_json::Value {
    let output = cargo_bin()
        .args([
            "--json",
            "scan",
            "--modules",
            project.path().join("node_modules").to_str().unwrap(),
            "--manifest",
            project.path().join("package.json").to_str().unwrap(),
        ])
        .output()
        .expect("Failed to run scan");

    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("Should be valid JSON")
}

#[test]
fn test_scan_resolves_chain() {
    // product -> a (range) -> b (exact)
    let project = create_project(
        &[("lib-a", "^1.0.0")],
        &[("lib-a", "1.2.0", &[("lib-b", "1.0.0")]), ("lib-b", "1.0.0", &[])],
    );

    let json = run_scan(&project);
    assert_eq!(json["ok"].as_bool(), Some(true));

    let inventory = &json["inventory"];
    assert_eq!(inventory["schema_version"].as_u64(), Some(1));

    let packages = inventory["packages"].as_array().unwrap();
    assert_eq!(packages.len(), 3);

    // The product record is last: the root.
    let root = packages.last().unwrap();
    assert_eq!(root["record"]["name"].as_str(), Some("test-product"));
    let root_edges = root["resolved_dependencies"].as_array().unwrap();
    assert_eq!(root_edges.len(), 1);
    assert_eq!(root_edges[0]["name"].as_str(), Some("lib-a"));
    assert_eq!(root_edges[0]["version"].as_str(), Some("1.2.0"));

    let invalid = inventory["invalid_packages"].as_array().unwrap();
    assert!(invalid.is_empty());
}

#[test]
fn test_scan_prunes_unreferenced() {
    let project = create_project(
        &[("lib-a", "^1.0.0")],
        &[("lib-a", "1.0.0", &[]), ("stray", "1.0.0", &[])],
    );

    let json = run_scan(&project);
    let packages = json["inventory"]["packages"].as_array().unwrap();

    let names: Vec<&str> = packages
        .iter()
        .map(|p| p["record"]["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"lib-a"));
    assert!(!names.contains(&"stray"));
}

#[test]
fn test_scan_reports_invalid_manifest() {
    let project = create_project(&[], &[]);
    let broken = project.path().join("node_modules/broken");
    fs::create_dir_all(&broken).unwrap();
    fs::write(broken.join("package.json"), "not valid json {{{").unwrap();

    let json = run_scan(&project);
    assert_eq!(json["ok"].as_bool(), Some(true));

    let invalid = json["inventory"]["invalid_packages"].as_array().unwrap();
    assert_eq!(invalid.len(), 1);
    assert!(invalid[0]["package_file_path"]
        .as_str()
        .unwrap()
        .contains("broken"));
}

#[test]
fn test_scan_missing_module_root_fails() {
    let project = create_project(&[], &[]);

    let output = cargo_bin()
        .args([
            "--json",
            "scan",
            "--modules",
            project.path().join("no-such-dir").to_str().unwrap(),
            "--manifest",
            project.path().join("package.json").to_str().unwrap(),
        ])
        .output()
        .expect("Failed to run scan");

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("Should be valid JSON");
    assert_eq!(json["ok"].as_bool(), Some(false));
    assert!(json["error"].as_str().is_some());
}

#[test]
fn test_scan_deterministic_output() {
    let project = create_project(
        &[("zebra", "*"), ("alpha", "*"), ("mango", "*")],
        &[
            ("zebra", "1.0.0", &[]),
            ("alpha", "1.0.0", &[]),
            ("mango", "1.0.0", &[]),
        ],
    );

    let first = run_scan(&project);
    let second = run_scan(&project);
    assert_eq!(first["inventory"], second["inventory"]);
}

#[test]
fn test_scan_human_output() {
    let project = create_project(&[("lib-a", "^1.0.0")], &[("lib-a", "1.2.0", &[])]);

    let output = cargo_bin()
        .args([
            "scan",
            "--modules",
            project.path().join("node_modules").to_str().unwrap(),
            "--manifest",
            project.path().join("package.json").to_str().unwrap(),
        ])
        .output()
        .expect("Failed to run scan");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("lib-a@1.2.0"));
    assert!(stdout.contains("test-product@1.0.0"));
}
