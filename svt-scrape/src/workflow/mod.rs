//! Scrape workflow
//!
//! `pipeline` sequences discovery, per-video processing and persistence;
//! `statistics` tallies what happened.

pub mod pipeline;
pub mod statistics;

pub use pipeline::{PersistMode, PipelineSettings, ScrapePipeline};
pub use statistics::{ItemOutcome, PersistOutcome, RunSummary};
