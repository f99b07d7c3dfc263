//! Outcome counters for a sync pass

use serde::{Deserialize, Serialize};

/// What happened to the source elements of one kind.
///
/// An element merged onto an existing one and then dropped counts in both
/// `updated` and `dropped`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementCounts {
    /// Source elements visited.
    pub visited: usize,
    /// Merged and absent from the target beforehand.
    pub created: usize,
    /// Merged onto an element the target already held.
    pub updated: usize,
    pub dropped: usize,
    /// Neither merged nor dropped.
    pub untouched: usize,
}

impl ElementCounts {
    /// `merged` is `Some(created)` when the element was merged.
    pub(crate) fn record(&mut self, merged: Option<bool>, dropped: bool) {
        self.visited += 1;
        match merged {
            Some(true) => self.created += 1,
            Some(false) => self.updated += 1,
            None if !dropped => self.untouched += 1,
            None => {}
        }
        if dropped {
            self.dropped += 1;
        }
    }
}

/// Summary returned by [`crate::sync`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    pub nodes: ElementCounts,
    pub edges: ElementCounts,
}

impl SyncReport {
    /// True if no node or edge was written or removed.
    pub fn is_noop(&self) -> bool {
        let quiet = |c: &ElementCounts| c.created == 0 && c.updated == 0 && c.dropped == 0;
        quiet(&self.nodes) && quiet(&self.edges)
    }
}
