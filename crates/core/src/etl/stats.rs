//! Run statistics accumulated by the batch orchestrator.

use serde::Serialize;

use super::dimension::DimensionKind;

/// Per-dimension creation counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DimensionCounts {
    /// Project dimension rows created.
    pub projects: usize,
    /// Client dimension rows created.
    pub clients: usize,
    /// Account dimension rows created.
    pub accounts: usize,
    /// Period dimension rows created.
    pub periods: usize,
    /// Resource dimension rows created.
    pub resources: usize,
}

impl DimensionCounts {
    /// Records one created dimension row.
    pub const fn record(&mut self, kind: DimensionKind) {
        match kind {
            DimensionKind::Project => self.projects += 1,
            DimensionKind::Client => self.clients += 1,
            DimensionKind::Account => self.accounts += 1,
            DimensionKind::Period => self.periods += 1,
            DimensionKind::Resource => self.resources += 1,
        }
    }

    /// Total rows created across all five dimensions.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.projects + self.clients + self.accounts + self.periods + self.resources
    }
}

/// Statistics for one engine invocation.
///
/// Owned exclusively by the orchestrator; resolvers and the hasher never
/// touch it. One instance per invocation, discarded after the response.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessingStats {
    /// Rows received from the source.
    pub rows_seen: usize,
    /// Rows whose fact reached the warehouse.
    pub rows_processed: usize,
    /// Rows skipped, unresolvable, or lost to a failed batch load.
    pub rows_failed: usize,
    /// Dimension rows created during this run.
    pub dimensions_created: DimensionCounts,
    /// Wall-clock duration of the run in milliseconds.
    pub elapsed_ms: u64,
    /// Ordered human-readable failure messages.
    pub errors: Vec<String>,
}

impl ProcessingStats {
    /// Records a failed row together with its diagnostic message.
    pub fn record_failure(&mut self, message: String) {
        self.rows_failed += 1;
        self.errors.push(message);
    }

    /// True when every row seen is accounted for as processed or failed.
    #[must_use]
    pub const fn is_conserved(&self) -> bool {
        self.rows_processed + self.rows_failed == self.rows_seen
    }
}
