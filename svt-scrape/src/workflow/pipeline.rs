//! Scrape pipeline orchestrator
//!
//! Drives one pass over the catalog:
//! - **Discover**: fetch the filmmaker index and extract the work items
//! - **Process**: per item, fetch the detail page, look up every soundtrack
//!   entry and append the normalized records
//! - **Persist**: sort and write the accumulated table
//!
//! # Error Handling
//! Nothing escapes `run()`. A discovery failure yields no work, an item
//! failure keeps the records appended before it, a persist failure is logged
//! and the next persist retries with the full table.
//!
//! # Example
//! ```rust,ignore
//! let pipeline = ScrapePipeline::new(settings, fetcher, lookup)?;
//! let summary = pipeline.run().await;
//! ```

use super::statistics::{ItemOutcome, PersistOutcome, RunSummary};
use crate::error::ScrapeResult;
use crate::models::{ArtistTrackPair, ResultSet, WorkItem};
use crate::services::{
    write_table, CatalogIndexExtractor, PageFetcher, TrackLookup, TrackRecordNormalizer,
    VideoPageExtractor,
};
use scraper::Html;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// When the table is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersistMode {
    /// Rewrite the table after every work item
    #[default]
    EachItem,
    /// Write once after the last work item
    AtEnd,
}

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Filmmaker catalog page
    pub index_url: String,
    /// Site root for resolving relative video links
    pub base_url: String,
    /// Destination table
    pub output_path: PathBuf,
    pub persist_mode: PersistMode,
}

pub struct ScrapePipeline {
    settings: PipelineSettings,
    fetcher: Arc<dyn PageFetcher>,
    lookup: Arc<dyn TrackLookup>,
    catalog_extractor: CatalogIndexExtractor,
    video_extractor: VideoPageExtractor,
    normalizer: TrackRecordNormalizer,
}

impl ScrapePipeline {
    /// Fails only on an unusable base URL
    pub fn new(
        settings: PipelineSettings,
        fetcher: Arc<dyn PageFetcher>,
        lookup: Arc<dyn TrackLookup>,
    ) -> ScrapeResult<Self> {
        let catalog_extractor = CatalogIndexExtractor::new(&settings.base_url)?;
        let video_extractor = VideoPageExtractor::new()?;

        Ok(Self {
            settings,
            fetcher,
            lookup,
            catalog_extractor,
            video_extractor,
            normalizer: TrackRecordNormalizer::new(),
        })
    }

    /// Work items on the catalog page; empty if the page cannot be read
    pub async fn discover(&self) -> Vec<WorkItem> {
        match self.try_discover().await {
            Ok(items) => {
                info!(
                    url = %self.settings.index_url,
                    count = items.len(),
                    "Discovered videos"
                );
                items
            }
            Err(e) => {
                error!(
                    url = %self.settings.index_url,
                    error = %e,
                    "Failed to read the catalog page, nothing to scrape"
                );
                Vec::new()
            }
        }
    }

    async fn try_discover(&self) -> ScrapeResult<Vec<WorkItem>> {
        let body = self
            .fetcher
            .fetch(&self.settings.index_url)
            .await?
            .into_success_body()?;
        let document = Html::parse_document(&body);
        Ok(self.catalog_extractor.extract(&document))
    }

    /// Scrape one video and append its records
    ///
    /// The result set is handed back in every case; on failure it holds the
    /// records appended before the failure.
    pub async fn process_item(
        &self,
        item: &WorkItem,
        mut results: ResultSet,
    ) -> (ResultSet, ItemOutcome) {
        info!(
            video = %item.video_name,
            year = %item.video_year,
            link = %item.video_link,
            "Processing video"
        );

        let before = results.len();
        let outcome = match self.try_process_item(item, &mut results).await {
            Ok(()) => ItemOutcome::Completed {
                records: results.len() - before,
            },
            Err(e) => {
                error!(
                    video = %item.video_name,
                    link = %item.video_link,
                    error = %e,
                    "Failed to process video, moving on"
                );
                ItemOutcome::Failed {
                    records: results.len() - before,
                    error: e.to_string(),
                }
            }
        };

        (results, outcome)
    }

    async fn try_process_item(
        &self,
        item: &WorkItem,
        results: &mut ResultSet,
    ) -> ScrapeResult<()> {
        let body = self
            .fetcher
            .fetch(&item.video_link)
            .await?
            .into_success_body()?;

        let pairs = self.soundtrack_pairs(&body, &item.video_link)?;
        debug!(
            video = %item.video_name,
            entries = pairs.len(),
            "Soundtrack entries found"
        );

        for pair in pairs {
            let raw = self.lookup.lookup(&pair.artist, &pair.title).await;
            if raw.is_fallback() {
                debug!(
                    artist = %pair.artist,
                    title = %pair.title,
                    "No track info, using fallback"
                );
            }
            results.push(self.normalizer.normalize(raw, &pair, item));
        }

        Ok(())
    }

    /// Parse a detail page into its soundtrack entries
    ///
    /// The parsed document never outlives this call, so no lookup is awaited
    /// while it is alive.
    fn soundtrack_pairs(
        &self,
        body: &str,
        page_link: &str,
    ) -> ScrapeResult<Vec<ArtistTrackPair>> {
        let document = Html::parse_document(body);
        let pairs: Vec<ArtistTrackPair> =
            self.video_extractor.pairs(&document, page_link)?.collect();
        Ok(pairs)
    }

    /// Sort and write the whole table, overwriting the destination
    ///
    /// An empty set is not written; the destination is left untouched.
    pub fn persist(&self, results: &ResultSet) -> ScrapeResult<PersistOutcome> {
        if results.is_empty() {
            debug!("No records yet, skipping persist");
            return Ok(PersistOutcome::SkippedEmpty);
        }

        write_table(results, &self.settings.output_path)?;
        debug!(
            path = %self.settings.output_path.display(),
            rows = results.len(),
            "Table written"
        );
        Ok(PersistOutcome::Written { rows: results.len() })
    }

    fn persist_logged(&self, results: &ResultSet, summary: &mut RunSummary) {
        match self.persist(results) {
            Ok(outcome) => summary.record_persist(Some(outcome)),
            Err(e) => {
                error!(
                    path = %self.settings.output_path.display(),
                    error = %e,
                    "Failed to write the table"
                );
                summary.record_persist(None);
            }
        }
    }

    /// Full pass: discover, process every item, persist
    pub async fn run(&self) -> RunSummary {
        info!(url = %self.settings.index_url, "Starting scrape");

        let mut summary = RunSummary::default();
        let items = self.discover().await;
        summary.items_discovered = items.len();

        if items.is_empty() {
            warn!("No videos discovered");
        }

        let total = items.len();
        let mut results = ResultSet::new();
        for (i, item) in items.iter().enumerate() {
            debug!(item = i + 1, total, "Next video");
            let (next, outcome) = self.process_item(item, results).await;
            results = next;
            summary.record_item(&outcome);

            if self.settings.persist_mode == PersistMode::EachItem {
                self.persist_logged(&results, &mut summary);
            }
        }

        if self.settings.persist_mode == PersistMode::AtEnd {
            self.persist_logged(&results, &mut summary);
        }

        summary.finish(&results);
        info!(
            discovered = summary.items_discovered,
            completed = summary.items_completed,
            failed = summary.items_failed,
            records = summary.records,
            missing = summary.records_missing,
            fallback = summary.fallback_records,
            "Scrape finished"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawMetadataResult;
    use crate::services::FetchedPage;
    use async_trait::async_trait;

    const LINK: &str = "https://site.test/v/a";

    struct SinglePage(String);

    #[async_trait]
    impl PageFetcher for SinglePage {
        async fn fetch(&self, url: &str) -> ScrapeResult<FetchedPage> {
            Ok(FetchedPage {
                url: url.to_string(),
                status: 200,
                body: self.0.clone(),
            })
        }
    }

    struct NoTrackInfo;

    #[async_trait]
    impl TrackLookup for NoTrackInfo {
        async fn lookup(&self, artist: &str, title: &str) -> RawMetadataResult {
            RawMetadataResult::Fallback(ArtistTrackPair::new(artist, title))
        }
    }

    fn detail_page(lines: &[&str]) -> String {
        let entries: String = lines
            .iter()
            .map(|line| format!(r#"<div class="italic">{}</div>"#, line))
            .collect();
        format!(r#"<html><body><div class="mb-2 w-full">{}</div></body></html>"#, entries)
    }

    fn pipeline(body: String) -> ScrapePipeline {
        let settings = PipelineSettings {
            index_url: "https://site.test/filmmakers/someone".to_string(),
            base_url: "https://site.test".to_string(),
            output_path: PathBuf::from("unused.csv"),
            persist_mode: PersistMode::EachItem,
        };
        ScrapePipeline::new(settings, Arc::new(SinglePage(body)), Arc::new(NoTrackInfo)).unwrap()
    }

    #[test]
    fn test_soundtrack_pairs_from_detail_page() {
        let pipeline = pipeline(String::new());
        let pairs = pipeline
            .soundtrack_pairs(&detail_page(&["Malformed", "Artist - Song"]), LINK)
            .unwrap();
        assert_eq!(pairs, vec![ArtistTrackPair::new("Artist", "Song")]);
    }

    #[test]
    fn test_soundtrack_pairs_without_container_is_error() {
        let pipeline = pipeline(String::new());
        assert!(pipeline.soundtrack_pairs("<html><body></body></html>", LINK).is_err());
    }

    #[tokio::test]
    async fn test_process_item_appends_records_in_page_order() {
        let pipeline = pipeline(detail_page(&["One - First", "Two - Second"]));
        let item = WorkItem::new("A", "2019", LINK);

        let (results, outcome) = pipeline.process_item(&item, ResultSet::new()).await;

        assert_eq!(outcome, ItemOutcome::Completed { records: 2 });
        let titles: Vec<Option<&str>> = results
            .records()
            .iter()
            .map(|r| r.fields.name.as_deref())
            .collect();
        assert_eq!(titles, vec![Some("First"), Some("Second")]);
    }
}
