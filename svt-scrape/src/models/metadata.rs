//! Raw Last.fm lookup result

use crate::models::ArtistTrackPair;
use serde_json::{Map, Value};

/// Outcome of a metadata lookup
///
/// `Structured` carries the service's `track` object untouched; the
/// normalizer decides what it means. `Fallback` carries the request pair when
/// the lookup produced nothing usable.
#[derive(Debug, Clone, PartialEq)]
pub enum RawMetadataResult {
    Structured(Map<String, Value>),
    Fallback(ArtistTrackPair),
}

impl RawMetadataResult {
    pub fn is_fallback(&self) -> bool {
        matches!(self, RawMetadataResult::Fallback(_))
    }
}
