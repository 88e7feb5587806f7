//! Groups flattened fields into per-variant candidate records.

use super::flatten::{FlatRecord, Scalar};

/// Final path segments containing one of these mark a variant-shaped cluster.
const SIZE_KEY_TOKENS: [&str; 5] = ["size", "variant", "sku", "label", "name"];

/// The fields of one [`FlatRecord`] that share a path prefix, e.g. every
/// `offers[2].*` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRecord {
    pub(crate) entries: Vec<(String, Scalar)>,
}

impl CandidateRecord {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Finds candidate records in `flat`, appending new ones to `records`.
///
/// Every path whose last `.segment` looks like a size/variant/name field
/// seeds a cluster of all entries under its parent path. Root-level paths
/// have no parent and are skipped. A cluster already present in `records`
/// is not added again, so callers can accumulate across several blocks.
///
/// The parent match is a plain string prefix: `variants[1]` also captures
/// `variants[10].*`.
pub fn collect_size_records(flat: &FlatRecord, records: &mut Vec<CandidateRecord>) {
    for (path, _) in flat.iter() {
        let Some((parent, segment)) = path.rsplit_once('.') else {
            continue;
        };
        if parent.is_empty() {
            continue;
        }

        let segment = segment.to_lowercase();
        if !SIZE_KEY_TOKENS.iter().any(|tok| segment.contains(tok)) {
            continue;
        }

        let entries: Vec<(String, Scalar)> = flat
            .iter()
            .filter(|(k, _)| k.starts_with(parent))
            .map(|(k, v)| (k.to_owned(), v.clone()))
            .collect();
        if entries.is_empty() {
            continue;
        }

        let record = CandidateRecord { entries };
        if !records.contains(&record) {
            records.push(record);
        }
    }
}

/// Candidate records for a single flat record, in first-encounter order.
#[must_use]
pub fn find_size_records(flat: &FlatRecord) -> Vec<CandidateRecord> {
    let mut records = Vec::new();
    collect_size_records(flat, &mut records);
    records
}
