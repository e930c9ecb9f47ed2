//! Engine types

use crate::pagination::PageMode;

/// Statistics from one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStats {
    /// Traversal strategy the run used
    pub mode: PageMode,
    /// Pages fetched, page 1 included
    pub pages_fetched: usize,
    /// Entries returned
    pub entries: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}
