//! Run statistics
//!
//! Aggregated while the pipeline runs, logged and printed at the end.

use crate::models::ResultSet;

/// Result of processing one work item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    /// Page scraped; `records` soundtrack entries appended
    Completed { records: usize },
    /// Processing stopped early; the `records` appended before the failure are kept
    Failed { records: usize, error: String },
}

impl ItemOutcome {
    pub fn records(&self) -> usize {
        match self {
            ItemOutcome::Completed { records } | ItemOutcome::Failed { records, .. } => *records,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ItemOutcome::Failed { .. })
    }
}

/// Result of one persist call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    Written { rows: usize },
    /// Nothing to write; destination left as it was
    SkippedEmpty,
}

/// Whole-run summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Work items found on the catalog page
    pub items_discovered: usize,
    /// Items whose page was fully processed
    pub items_completed: usize,
    /// Items abandoned part-way
    pub items_failed: usize,
    /// Track records in the final result set
    pub records: usize,
    /// Records flagged `missing`
    pub records_missing: usize,
    /// Records built from the soundtrack listing only
    pub fallback_records: usize,
    /// Persist calls that wrote the table
    pub persists: usize,
    /// Persist calls that failed
    pub persist_failures: usize,
}

impl RunSummary {
    pub fn record_item(&mut self, outcome: &ItemOutcome) {
        if outcome.is_failed() {
            self.items_failed += 1;
        } else {
            self.items_completed += 1;
        }
    }

    pub fn record_persist(&mut self, outcome: Option<PersistOutcome>) {
        match outcome {
            Some(PersistOutcome::Written { .. }) => self.persists += 1,
            Some(PersistOutcome::SkippedEmpty) => {}
            None => self.persist_failures += 1,
        }
    }

    /// Fill record counts from the final result set
    pub fn finish(&mut self, results: &ResultSet) {
        self.records = results.len();
        self.records_missing = results.records().iter().filter(|r| r.missing).count();
        self.fallback_records = results.records().iter().filter(|r| r.is_fallback()).count();
    }

    pub fn display_string(&self) -> String {
        format!(
            "{} videos found, {} scraped, {} failed; \
             {} tracks ({} incomplete, {} without Last.fm data)",
            self.items_discovered,
            self.items_completed,
            self.items_failed,
            self.records,
            self.records_missing,
            self.fallback_records
        )
    }
}
