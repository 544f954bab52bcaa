//! Lookup result → track record
//!
//! A structured Last.fm `track` object is reduced to six fields:
//!
//! | field      | source path                    |
//! |------------|--------------------------------|
//! | `name`     | `name`                         |
//! | `artist`   | `album.artist`                 |
//! | `album`    | `album.title`                  |
//! | `img`      | `album.image[0]["#text"]`      |
//! | `duration` | `duration`                     |
//! | `tags`     | `toptags.tag[*].name`, `\|\|`-joined |
//!
//! A missing key anywhere on those paths makes the whole record fall back to
//! the request's artist and title.

use crate::error::{ScrapeError, ScrapeResult};
use crate::models::{ArtistTrackPair, RawMetadataResult, TrackFields, TrackRecord, WorkItem};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Separator between tag names in the `tags` column
pub const TAG_SEPARATOR: &str = "||";

/// Fields that must be non-empty for a record to be complete
pub const REQUIRED_FIELDS: [&str; 6] = ["name", "artist", "album", "img", "duration", "tags"];

/// Stateless normalizer
#[derive(Debug, Clone, Default)]
pub struct TrackRecordNormalizer;

impl TrackRecordNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Build the record for one soundtrack entry
    ///
    /// `pair` is the originating request; it supplies the fallback fields
    /// when the structured payload cannot be read.
    pub fn normalize(
        &self,
        raw: RawMetadataResult,
        pair: &ArtistTrackPair,
        item: &WorkItem,
    ) -> TrackRecord {
        match raw {
            RawMetadataResult::Fallback(fallback) => {
                TrackRecord::fallback(&fallback.artist, &fallback.title, item)
            }
            RawMetadataResult::Structured(track) => match extract_fields(&track) {
                Ok(values) => {
                    let missing = has_missing_info(&values);
                    TrackRecord::from_lookup(to_track_fields(&values), missing, item)
                }
                Err(e) => {
                    warn!(
                        artist = %pair.artist,
                        title = %pair.title,
                        error = %e,
                        "Could not parse the track info, using fallback record"
                    );
                    TrackRecord::fallback(&pair.artist, &pair.title, item)
                }
            },
        }
    }
}

/// Pull the six required fields out of a Last.fm `track` object
pub fn extract_fields(track: &Map<String, Value>) -> ScrapeResult<Map<String, Value>> {
    let name = require(track, "name", "track")?;
    let album = as_object(require(track, "album", "track")?, "album")?;
    let artist = require(album, "artist", "album")?;
    let album_title = require(album, "title", "album")?;

    let images = as_array(require(album, "image", "album")?, "album.image")?;
    let first_image = images
        .first()
        .ok_or_else(|| ScrapeError::Normalize("album.image is empty".to_string()))?;
    let img = require(as_object(first_image, "album.image[0]")?, "#text", "album.image[0]")?;

    let toptags = as_object(require(track, "toptags", "track")?, "toptags")?;
    let tag_list = as_array(require(toptags, "tag", "toptags")?, "toptags.tag")?;
    let tag_names = tag_list
        .iter()
        .map(|tag| {
            let name = require(as_object(tag, "toptags.tag[]")?, "name", "toptags.tag[]")?;
            name.as_str().map(str::to_string).ok_or_else(|| {
                ScrapeError::Normalize(format!("tag name is not a string: {}", name))
            })
        })
        .collect::<ScrapeResult<Vec<String>>>()?;

    let duration = require(track, "duration", "track")?;

    let mut values = Map::new();
    values.insert("name".to_string(), name.clone());
    values.insert("artist".to_string(), artist.clone());
    values.insert("album".to_string(), album_title.clone());
    values.insert("img".to_string(), img.clone());
    values.insert("duration".to_string(), duration.clone());
    values.insert("tags".to_string(), Value::String(tag_names.join(TAG_SEPARATOR)));
    Ok(values)
}

/// True when any required field is absent or empty
///
/// Empty means `null`, `""`, `"0"`, `[]`, `{}`, zero or `false`.
pub fn has_missing_info(values: &Map<String, Value>) -> bool {
    for key in REQUIRED_FIELDS {
        let empty = values.get(key).map_or(true, is_empty_value);
        if empty {
            debug!(field = key, "Missing or empty track field");
            return true;
        }
    }
    false
}

/// Emptiness test applied to each required field
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn to_track_fields(values: &Map<String, Value>) -> TrackFields {
    let text = |key: &str| values.get(key).and_then(render);
    TrackFields {
        name: text("name"),
        artist: text("artist"),
        album: text("album"),
        img: text("img"),
        duration: text("duration"),
        tags: text("tags"),
    }
}

/// Cell text for a JSON value; `null` has none
fn render(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn require<'a>(
    object: &'a Map<String, Value>,
    key: &str,
    context: &str,
) -> ScrapeResult<&'a Value> {
    object
        .get(key)
        .ok_or_else(|| ScrapeError::Normalize(format!("{} has no '{}'", context, key)))
}

fn as_object<'a>(value: &'a Value, context: &str) -> ScrapeResult<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| ScrapeError::Normalize(format!("{} is not an object", context)))
}

fn as_array<'a>(value: &'a Value, context: &str) -> ScrapeResult<&'a Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| ScrapeError::Normalize(format!("{} is not a list", context)))
}
