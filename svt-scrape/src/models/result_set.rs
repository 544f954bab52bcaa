//! Accumulated track records for one run

use crate::models::{Column, TrackRecord, LEADING_COLUMNS};

/// Append-only record set, threaded by value through the pipeline
///
/// Insertion order is preserved; [`ResultSet::sorted`] produces the persisted
/// order without reordering storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    records: Vec<TrackRecord>,
    /// Columns in the order they were first seen
    discovered: Vec<Column>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: TrackRecord) {
        for column in record.columns() {
            if !self.discovered.contains(column) {
                self.discovered.push(*column);
            }
        }
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[TrackRecord] {
        &self.records
    }

    /// Output columns: the video trio first, then the rest in discovery order
    pub fn columns(&self) -> Vec<Column> {
        let mut columns = LEADING_COLUMNS.to_vec();
        columns.extend(
            self.discovered
                .iter()
                .filter(|c| !LEADING_COLUMNS.contains(c))
                .copied(),
        );
        columns
    }

    /// Records with their insertion index, stably sorted by `video_year`
    ///
    /// Years compare as strings, not numbers.
    pub fn sorted(&self) -> Vec<(usize, &TrackRecord)> {
        let mut rows: Vec<(usize, &TrackRecord)> = self.records.iter().enumerate().collect();
        rows.sort_by(|(_, a), (_, b)| a.video_year.cmp(&b.video_year));
        rows
    }
}
