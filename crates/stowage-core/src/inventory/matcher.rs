//! Dependency specifier matching.
//!
//! A specifier matches a candidate either byte-for-byte or, failing that,
//! as an npm-flavored semver range. Many bundled packages declare a
//! non-semver specifier (a local path, or the literal installed version);
//! the byte-equal fast path is checked first and unconditionally so a
//! stricter range engine can never reject it.

use semver::{Version, VersionReq};

/// Decide whether a candidate's installed version matches a specifier.
///
/// # Rules
/// - Byte-equal strings match, independent of `exact_only`.
/// - Otherwise, with `exact_only` set, no match.
/// - Otherwise the specifier is evaluated as a semver range; a specifier
///   that is not a valid range (or a candidate version that is not valid
///   semver) is a no-match, never an error.
#[must_use]
pub fn specifier_matches(candidate_version: &str, specifier: &str, exact_only: bool) -> bool {
    if candidate_version == specifier {
        return true;
    }
    if exact_only {
        return false;
    }
    range_satisfies(candidate_version, specifier)
}

/// Evaluate whether `version` satisfies the npm-flavored range `range`.
///
/// Handles the range syntax found in real manifests:
/// - Standard semver ranges: `^1.0.0`, `~1.0.0`, `>=1.0.0`
/// - OR alternatives: `^1.0.0 || ^2.0.0`
/// - Hyphen ranges: `1.0.0 - 2.0.0`
/// - X-ranges: `1.x`, `1.0.x`, `*`
/// - Space-separated AND comparators: `>= 2.1.2 < 3.0.0`
///
/// Anything unparseable evaluates to `false`.
#[must_use]
pub fn range_satisfies(version: &str, range: &str) -> bool {
    let Ok(version) = Version::parse(version) else {
        return false;
    };

    let range = range.trim();
    if range.contains("||") {
        return range
            .split("||")
            .map(str::trim)
            .filter(|alt| !alt.is_empty())
            .filter_map(parse_range)
            .any(|req| req.matches(&version));
    }

    parse_range(range).is_some_and(|req| req.matches(&version))
}

/// Parse a single range alternative, handling npm-specific syntax.
///
/// Returns `None` when the range is not valid syntax.
fn parse_range(range: &str) -> Option<VersionReq> {
    let range = range.trim();

    // Hyphen ranges: "1.0.0 - 2.0.0" -> ">=1.0.0, <=2.0.0"
    if let Some((start, end)) = split_hyphen_range(range) {
        return VersionReq::parse(&format!(">={start}, <={end}")).ok();
    }

    // X-ranges: "1.x" -> ">=1.0.0, <2.0.0"
    if range.contains(['x', 'X']) || range == "*" {
        return VersionReq::parse(&expand_x_range(range)).ok();
    }

    // npm allows spaces between comparators to mean AND; the semver crate
    // wants commas.
    VersionReq::parse(&join_comparators(range)).ok()
}

/// Split a hyphen range like "1.0.0 - 2.0.0" into its endpoints.
fn split_hyphen_range(range: &str) -> Option<(&str, &str)> {
    let (start, end) = range.split_once(" - ")?;
    let (start, end) = (start.trim(), end.trim());
    if start.is_empty() || end.is_empty() {
        return None;
    }
    Some((start, end))
}

/// Rewrite space-separated AND comparators as comma-separated.
///
/// `">= 2.1.2 < 3.0.0"` and `">=2.1.2 <3.0.0"` both become
/// `">=2.1.2, <3.0.0"`. A bare operator token attaches to the version
/// token that follows it.
fn join_comparators(range: &str) -> String {
    let mut comparators: Vec<String> = Vec::new();
    let mut pending = String::new();

    for token in range.split_whitespace() {
        pending.push_str(token);
        if token.chars().any(|c| c.is_ascii_digit()) {
            comparators.push(std::mem::take(&mut pending));
        }
    }
    if !pending.is_empty() {
        comparators.push(pending);
    }

    comparators.join(", ")
}

/// Expand an x-range to an explicit semver range.
fn expand_x_range(range: &str) -> String {
    let range = range.trim();

    if range == "*" || range == "x" || range == "X" {
        return ">=0.0.0".to_string();
    }

    let parts: Vec<&str> = range.split('.').collect();
    match parts.as_slice() {
        [major, "x" | "X" | "*"] => {
            if let Ok(m) = major.parse::<u64>() {
                return format!(">={m}.0.0, <{}.0.0", m + 1);
            }
        }
        [major, minor, "x" | "X" | "*"] => {
            if let (Ok(m), Ok(n)) = (major.parse::<u64>(), minor.parse::<u64>()) {
                return format!(">={m}.{n}.0, <{m}.{}.0", n + 1);
            }
        }
        _ => {}
    }

    range.replace(['x', 'X'], "0")
}
