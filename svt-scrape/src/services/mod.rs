//! Pipeline components
//!
//! Leaves of the scrape: page fetching, the two HTML extractors, the Last.fm
//! client, record normalization and CSV persistence.

pub mod catalog_extractor;
pub mod lastfm_client;
pub mod page_fetcher;
pub mod table_writer;
pub mod track_normalizer;
pub mod video_page_extractor;

pub use catalog_extractor::CatalogIndexExtractor;
pub use lastfm_client::{LastFmClient, TrackLookup, LASTFM_API_URL};
pub use page_fetcher::{build_http_client, FetchedPage, HttpFetcher, PageFetcher};
pub use table_writer::{write_records, write_table};
pub use track_normalizer::{has_missing_info, TrackRecordNormalizer};
pub use video_page_extractor::VideoPageExtractor;
