//! Catalog work items and soundtrack entries

/// One catalog entry (a video) to scrape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub video_name: String,
    /// Release year as printed on the catalog page, parentheses stripped
    pub video_year: String,
    /// Absolute URL of the video detail page
    pub video_link: String,
}

impl WorkItem {
    pub fn new(
        video_name: impl Into<String>,
        video_year: impl Into<String>,
        video_link: impl Into<String>,
    ) -> Self {
        Self {
            video_name: video_name.into(),
            video_year: video_year.into(),
            video_link: video_link.into(),
        }
    }
}

/// One soundtrack line split into artist and title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistTrackPair {
    pub artist: String,
    pub title: String,
}

impl ArtistTrackPair {
    pub fn new(artist: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            title: title.into(),
        }
    }

    /// Split `"Artist - Title"` on the first `-`
    ///
    /// Both trimmed halves must be non-empty. Titles may contain further
    /// dashes; artists cannot.
    pub fn parse(line: &str) -> Option<Self> {
        let (artist, title) = line.trim().split_once('-')?;
        let (artist, title) = (artist.trim(), title.trim());
        if artist.is_empty() || title.is_empty() {
            return None;
        }
        Some(Self::new(artist, title))
    }
}
