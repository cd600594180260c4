//! Per-parent grouping of revision records

use crate::{HistoryError, RevisionRecord};
use std::collections::BTreeMap;

/// Revision histories keyed by parent item id
///
/// Each group is sorted ascending by timestamp, id breaking ties.
#[derive(Debug, Default)]
pub struct RevisionHistory {
    groups: BTreeMap<u64, Vec<RevisionRecord>>,
}

impl RevisionHistory {
    /// Number of distinct parent items
    pub fn parent_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of revisions across all parents
    pub fn revision_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// One parent's ordered revision list
    pub fn get(&self, parent_id: u64) -> Option<&[RevisionRecord]> {
        self.groups.get(&parent_id).map(Vec::as_slice)
    }

    /// Iterate groups in ascending parent id order
    pub fn iter(&self) -> impl Iterator<Item = (u64, &[RevisionRecord])> + '_ {
        self.groups.iter().map(|(id, revs)| (*id, revs.as_slice()))
    }
}

/// Group raw rows by parent item
///
/// Rows that do not look like revision rows are skipped (debug log only);
/// rows that match the revision name pattern but carry a malformed id or
/// timestamp are errors. Pure function of the input.
pub fn group(rows: Vec<Vec<String>>) -> Result<RevisionHistory, HistoryError> {
    let mut groups: BTreeMap<u64, Vec<RevisionRecord>> = BTreeMap::new();

    for fields in rows {
        if let Some(record) = RevisionRecord::from_row(fields)? {
            groups.entry(record.parent_id).or_default().push(record);
        }
    }

    // Multiple revisions may share an identical timestamp; id keeps the
    // order deterministic.
    for revisions in groups.values_mut() {
        revisions.sort_by_key(|r| (r.timestamp, r.id));
    }

    Ok(RevisionHistory { groups })
}
