//! svt-scrape library interface
//!
//! Scrapes a filmmaker's video catalog, enriches every soundtrack entry with
//! Last.fm track metadata and persists the result as a CSV table. The binary
//! in `main.rs` wires the reqwest-backed services into `ScrapePipeline`;
//! integration tests drive the same pipeline with in-memory fakes.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod workflow;

pub use crate::error::{ScrapeError, ScrapeResult};
