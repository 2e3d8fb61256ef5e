//! Dependency resolution against the installed record set.

use serde::Serialize;
use std::collections::BTreeMap;

use super::matcher::specifier_matches;
use super::record::{ManifestRecord, PackageKey};

/// Outcome of resolving one dependency map against the known record set.
///
/// Every `(name, specifier)` pair of the input lands in exactly one of the
/// two maps: `resolved` when an installed record matched, `missing` when
/// none did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolutionOutcome {
    /// Dependencies matched to an installed record, by dependency name.
    pub resolved: BTreeMap<String, PackageKey>,
    /// Dependencies with no matching installed record (name -> specifier).
    pub missing: BTreeMap<String, String>,
}

impl ResolutionOutcome {
    /// Whether nothing was classified as missing.
    #[must_use]
    pub fn is_fully_resolved(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Resolve a specifier map against the known record set.
///
/// For each `(name, specifier)` pair the known records are scanned in
/// iteration order for the first record whose name matches and whose
/// version satisfies the specifier. First match wins; no tie-break among
/// several installed candidates with the same name is attempted. Never
/// fails: an invalid specifier simply cannot match.
#[must_use]
pub fn resolve_dependencies(
    specifiers: &BTreeMap<String, String>,
    known: &[ManifestRecord],
    exact_only: bool,
) -> ResolutionOutcome {
    let mut outcome = ResolutionOutcome::default();

    for (name, specifier) in specifiers {
        let target = known
            .iter()
            .find(|record| record.name == *name && specifier_matches(&record.version, specifier, exact_only));

        match target {
            Some(record) => {
                outcome.resolved.insert(name.clone(), record.key());
            }
            None => {
                outcome.missing.insert(name.clone(), specifier.clone());
            }
        }
    }

    outcome
}
