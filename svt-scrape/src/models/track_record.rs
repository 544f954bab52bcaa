//! Normalized track rows

use crate::models::WorkItem;

/// Output table column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    VideoName,
    VideoYear,
    VideoLink,
    Name,
    Artist,
    Album,
    Img,
    Duration,
    Tags,
    Missing,
}

/// Columns always written first, in this order
pub const LEADING_COLUMNS: [Column; 3] = [Column::VideoName, Column::VideoYear, Column::VideoLink];

/// Field order of a record built from a complete lookup
const STRUCTURED_COLUMNS: [Column; 10] = [
    Column::Name,
    Column::Artist,
    Column::Album,
    Column::Img,
    Column::Duration,
    Column::Tags,
    Column::Missing,
    Column::VideoName,
    Column::VideoYear,
    Column::VideoLink,
];

/// Field order of a fallback record
const FALLBACK_COLUMNS: [Column; 6] = [
    Column::Name,
    Column::Artist,
    Column::Missing,
    Column::VideoName,
    Column::VideoYear,
    Column::VideoLink,
];

impl Column {
    /// Header cell text
    pub fn header(&self) -> &'static str {
        match self {
            Column::VideoName => "video_name",
            Column::VideoYear => "video_year",
            Column::VideoLink => "video_link",
            Column::Name => "name",
            Column::Artist => "artist",
            Column::Album => "album",
            Column::Img => "img",
            Column::Duration => "duration",
            Column::Tags => "tags",
            Column::Missing => "missing",
        }
    }
}

/// Track metadata as extracted from a complete lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackFields {
    pub name: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub img: Option<String>,
    pub duration: Option<String>,
    /// Tag names joined with `||`
    pub tags: Option<String>,
}

/// Whether the record came from a complete lookup or the request pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordSource {
    Lookup,
    Fallback,
}

/// One output row: a soundtrack entry plus the video it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRecord {
    pub fields: TrackFields,
    pub missing: bool,
    pub video_name: String,
    pub video_year: String,
    pub video_link: String,
    pub source: RecordSource,
}

impl TrackRecord {
    /// Record built from a complete lookup
    pub fn from_lookup(fields: TrackFields, missing: bool, item: &WorkItem) -> Self {
        Self {
            fields,
            missing,
            video_name: item.video_name.clone(),
            video_year: item.video_year.clone(),
            video_link: item.video_link.clone(),
            source: RecordSource::Lookup,
        }
    }

    /// Record carrying only the requested artist and title
    pub fn fallback(artist: &str, title: &str, item: &WorkItem) -> Self {
        let fields = TrackFields {
            name: Some(title.to_string()),
            artist: Some(artist.to_string()),
            ..TrackFields::default()
        };
        Self {
            fields,
            missing: true,
            video_name: item.video_name.clone(),
            video_year: item.video_year.clone(),
            video_link: item.video_link.clone(),
            source: RecordSource::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == RecordSource::Fallback
    }

    /// Columns this record carries, in field order
    pub fn columns(&self) -> &'static [Column] {
        match self.source {
            RecordSource::Lookup => &STRUCTURED_COLUMNS,
            RecordSource::Fallback => &FALLBACK_COLUMNS,
        }
    }

    /// Cell value for `column`; `None` renders as an empty cell
    pub fn cell(&self, column: Column) -> Option<String> {
        match column {
            Column::VideoName => Some(self.video_name.clone()),
            Column::VideoYear => Some(self.video_year.clone()),
            Column::VideoLink => Some(self.video_link.clone()),
            Column::Name => self.fields.name.clone(),
            Column::Artist => self.fields.artist.clone(),
            Column::Album => self.fields.album.clone(),
            Column::Img => self.fields.img.clone(),
            Column::Duration => self.fields.duration.clone(),
            Column::Tags => self.fields.tags.clone(),
            Column::Missing => Some(if self.missing { "True" } else { "False" }.to_string()),
        }
    }
}
