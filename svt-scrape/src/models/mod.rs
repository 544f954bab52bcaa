//! Data models for svt-scrape

pub mod metadata;
pub mod result_set;
pub mod track_record;
pub mod work_item;

pub use metadata::RawMetadataResult;
pub use result_set::ResultSet;
pub use track_record::{Column, RecordSource, TrackFields, TrackRecord, LEADING_COLUMNS};
pub use work_item::{ArtistTrackPair, WorkItem};
