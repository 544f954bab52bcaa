//! Soundtrack extraction from a video detail page
//!
//! The soundtrack is the first `div.mb-2.w-full` on the page; each song is a
//! `div.italic` inside it reading `Artist - Title`.

use crate::error::{ScrapeError, ScrapeResult};
use crate::models::ArtistTrackPair;
use scraper::{Html, Selector};
use tracing::warn;

const CONTAINER_SELECTOR: &str = "div.mb-2.w-full";
const ENTRY_SELECTOR: &str = "div.italic";

pub struct VideoPageExtractor {
    container: Selector,
    entry: Selector,
}

impl VideoPageExtractor {
    pub fn new() -> ScrapeResult<Self> {
        Ok(Self {
            container: parse_selector(CONTAINER_SELECTOR)?,
            entry: parse_selector(ENTRY_SELECTOR)?,
        })
    }

    /// Soundtrack entries of `document` in page order
    ///
    /// Blank and unsplittable entries are skipped with a warning. Fails only
    /// when the page has no soundtrack container at all. `page_link` is used
    /// for diagnostics.
    pub fn pairs<'a>(
        &'a self,
        document: &'a Html,
        page_link: &'a str,
    ) -> ScrapeResult<impl Iterator<Item = ArtistTrackPair> + 'a> {
        let container = document.select(&self.container).next().ok_or_else(|| {
            ScrapeError::MissingElement(format!("soundtrack container on {}", page_link))
        })?;

        Ok(container.select(&self.entry).filter_map(move |entry| {
            let text: String = entry.text().collect();
            let text = text.trim();

            if text.is_empty() {
                warn!(link = %page_link, "Skipping empty soundtrack entry");
                return None;
            }

            let pair = ArtistTrackPair::parse(text);
            if pair.is_none() {
                warn!(
                    link = %page_link,
                    entry = %text,
                    "Something went wrong in unpacking artist and song, skipping entry"
                );
            }
            pair
        }))
    }
}

pub(crate) fn parse_selector(selector: &str) -> ScrapeResult<Selector> {
    Selector::parse(selector).map_err(|e| ScrapeError::Parse(format!("{}: {}", selector, e)))
}
