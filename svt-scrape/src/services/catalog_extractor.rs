//! Work item discovery from the filmmaker catalog page
//!
//! Each video card is a `div.flex.h-full.flex-col` holding the title link and
//! a `(year)` span.

use crate::error::{ScrapeError, ScrapeResult};
use crate::models::WorkItem;
use crate::services::video_page_extractor::parse_selector;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

const ENTRY_SELECTOR: &str = "div.flex.h-full.flex-col";
const LINK_SELECTOR: &str = "a.font-semibold.text-primary.underline";
const YEAR_SELECTOR: &str = "span.ml-2.text-base.font-semibold";

pub struct CatalogIndexExtractor {
    base_url: Url,
    entry: Selector,
    link: Selector,
    year: Selector,
}

impl CatalogIndexExtractor {
    /// `base_url` is the site root that relative video links resolve against
    pub fn new(base_url: &str) -> ScrapeResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ScrapeError::Parse(format!("Invalid base URL {}: {}", base_url, e)))?;

        Ok(Self {
            base_url,
            entry: parse_selector(ENTRY_SELECTOR)?,
            link: parse_selector(LINK_SELECTOR)?,
            year: parse_selector(YEAR_SELECTOR)?,
        })
    }

    /// Work items in page order; malformed cards are skipped with a warning
    pub fn extract(&self, document: &Html) -> Vec<WorkItem> {
        let items: Vec<WorkItem> = document
            .select(&self.entry)
            .filter_map(|entry| match self.extract_entry(entry) {
                Ok(item) => Some(item),
                Err(e) => {
                    let text: String = entry.text().collect();
                    warn!(
                        entry = %collapse_whitespace(&text),
                        error = %e,
                        "Something went wrong in getting video link, skipping catalog entry"
                    );
                    None
                }
            })
            .collect();

        debug!(count = items.len(), "Catalog entries extracted");
        items
    }

    fn extract_entry(&self, entry: ElementRef<'_>) -> ScrapeResult<WorkItem> {
        let link_tag = entry
            .select(&self.link)
            .next()
            .ok_or_else(|| ScrapeError::MissingElement("video link".to_string()))?;

        let href = link_tag
            .value()
            .attr("href")
            .ok_or_else(|| ScrapeError::MissingElement("video link href".to_string()))?;

        let video_link = self
            .base_url
            .join(href)
            .map_err(|e| ScrapeError::Parse(format!("Unresolvable link {}: {}", href, e)))?;

        let video_name = link_tag.text().collect::<String>().trim().to_string();

        let year_text: String = entry
            .select(&self.year)
            .next()
            .ok_or_else(|| ScrapeError::MissingElement("video year".to_string()))?
            .text()
            .collect();
        let video_year = strip_parentheses(year_text.trim());

        Ok(WorkItem {
            video_name,
            video_year,
            video_link: video_link.to_string(),
        })
    }
}

/// `(2014)` → `2014`
fn strip_parentheses(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, '(' | ')')).collect()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
