//! Record deduplication.
//!
//! Bundled trees routinely carry the same package at the same version in
//! several places; those manifests describe one logical record.

use super::record::ManifestRecord;

/// Collapse records that share a (name, version) identity.
///
/// First-seen wins for every field except provenance: a duplicate's
/// provenance paths are appended, in order, onto the record already in the
/// output sequence. Output order is the first-seen order of the input.
///
/// Quadratic in record count; package counts are bounded by filesystem
/// scale, not throughput.
#[must_use]
pub fn dedupe_records(records: Vec<ManifestRecord>) -> Vec<ManifestRecord> {
    let mut unique: Vec<ManifestRecord> = Vec::new();

    for record in records {
        match unique
            .iter_mut()
            .find(|u| u.name == record.name && u.version == record.version)
        {
            Some(existing) => existing.provenance.extend(record.provenance),
            None => unique.push(record),
        }
    }

    unique
}
