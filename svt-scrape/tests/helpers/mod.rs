//! Test Helper Utilities
//!
//! In-memory stand-ins for the network seams plus HTML and JSON builders.

#![allow(dead_code)]

pub mod log_capture;

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use svt_scrape::models::{ArtistTrackPair, RawMetadataResult};
use svt_scrape::services::{FetchedPage, PageFetcher, TrackLookup};
use svt_scrape::workflow::{PersistMode, PipelineSettings, ScrapePipeline};
use svt_scrape::{ScrapeError, ScrapeResult};

pub const BASE_URL: &str = "https://site.test";
pub const INDEX_URL: &str = "https://site.test/filmmakers/someone";

enum FakeResponse {
    Page { status: u16, body: String },
    TransportError(String),
}

/// Serves canned pages by URL; unknown URLs fail like an unreachable host
#[derive(Default)]
pub struct FakeFetcher {
    responses: HashMap<String, FakeResponse>,
    requests: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, body: impl Into<String>) -> Self {
        self.responses.insert(
            url.to_string(),
            FakeResponse::Page {
                status: 200,
                body: body.into(),
            },
        );
        self
    }

    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.responses.insert(
            url.to_string(),
            FakeResponse::Page {
                status,
                body: String::new(),
            },
        );
        self
    }

    pub fn with_error(mut self, url: &str, message: &str) -> Self {
        self.responses
            .insert(url.to_string(), FakeResponse::TransportError(message.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> ScrapeResult<FetchedPage> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.responses.get(url) {
            Some(FakeResponse::Page { status, body }) => Ok(FetchedPage {
                url: url.to_string(),
                status: *status,
                body: body.clone(),
            }),
            Some(FakeResponse::TransportError(message)) => {
                Err(ScrapeError::Network(message.clone()))
            }
            None => Err(ScrapeError::Network(format!("no route to {}", url))),
        }
    }
}

/// Answers from a fixed table; anything else is a fallback
#[derive(Default)]
pub struct FakeLookup {
    tracks: HashMap<(String, String), Map<String, Value>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl FakeLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_track(mut self, artist: &str, title: &str, track: Value) -> Self {
        if let Value::Object(map) = track {
            self.tracks.insert((artist.to_string(), title.to_string()), map);
        }
        self
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TrackLookup for FakeLookup {
    async fn lookup(&self, artist: &str, title: &str) -> RawMetadataResult {
        self.calls
            .lock()
            .unwrap()
            .push((artist.to_string(), title.to_string()));
        match self.tracks.get(&(artist.to_string(), title.to_string())) {
            Some(track) => RawMetadataResult::Structured(track.clone()),
            None => RawMetadataResult::Fallback(ArtistTrackPair::new(artist, title)),
        }
    }
}

/// A Last.fm `track` object with every required field populated
pub fn complete_track(name: &str, artist: &str) -> Value {
    json!({
        "name": name,
        "duration": "215000",
        "album": {
            "artist": artist,
            "title": "Some Album",
            "image": [
                {"#text": "https://img.test/small.png", "size": "small"},
                {"#text": "https://img.test/large.png", "size": "large"}
            ]
        },
        "toptags": {
            "tag": [
                {"name": "punk", "url": "https://www.last.fm/tag/punk"},
                {"name": "rock", "url": "https://www.last.fm/tag/rock"}
            ]
        }
    })
}

/// Catalog page with one card per `(name, year, href)`
pub fn catalog_page(entries: &[(&str, &str, &str)]) -> String {
    let cards: String = entries
        .iter()
        .map(|(name, year, href)| {
            format!(
                r#"<div class="flex h-full flex-col">
                    <a class="font-semibold text-primary underline" href="{}">{}</a>
                    <span class="ml-2 text-base font-semibold">({})</span>
                </div>"#,
                href, name, year
            )
        })
        .collect();
    format!("<html><body><main>{}</main></body></html>", cards)
}

/// Video page whose soundtrack lists `lines` verbatim
pub fn video_page(lines: &[&str]) -> String {
    let entries: String = lines
        .iter()
        .map(|line| format!(r#"<div class="italic">{}</div>"#, line))
        .collect();
    format!(
        r#"<html><body>
            <h1>Video</h1>
            <div class="mb-2 w-full"><h3>Soundtrack</h3>{}</div>
        </body></html>"#,
        entries
    )
}

pub fn video_url(href: &str) -> String {
    format!("{}{}", BASE_URL, href)
}

pub fn pipeline_settings(output: &Path, persist_mode: PersistMode) -> PipelineSettings {
    PipelineSettings {
        index_url: INDEX_URL.to_string(),
        base_url: BASE_URL.to_string(),
        output_path: output.to_path_buf(),
        persist_mode,
    }
}

pub fn create_test_pipeline(
    output: &Path,
    persist_mode: PersistMode,
    fetcher: Arc<FakeFetcher>,
    lookup: Arc<FakeLookup>,
) -> ScrapePipeline {
    ScrapePipeline::new(pipeline_settings(output, persist_mode), fetcher, lookup).unwrap()
}
