//! Last.fm API client
//!
//! Looks up `track.getInfo` for one artist/title pair. Every failure mode
//! (no key, transport, status, body shape) turns into
//! [`RawMetadataResult::Fallback`] so callers never see an error.

use crate::models::{ArtistTrackPair, RawMetadataResult};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

/// Last.fm API base URL
pub const LASTFM_API_URL: &str = "http://ws.audioscrobbler.com/2.0/";

/// Track metadata lookup
#[async_trait]
pub trait TrackLookup: Send + Sync {
    async fn lookup(&self, artist: &str, title: &str) -> RawMetadataResult;
}

/// Last.fm `track.getInfo` client
pub struct LastFmClient {
    http_client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

impl LastFmClient {
    /// Without an API key every lookup is a fallback
    pub fn new(
        http_client: reqwest::Client,
        api_url: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            http_client,
            api_url: api_url.into(),
            api_key,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl TrackLookup for LastFmClient {
    async fn lookup(&self, artist: &str, title: &str) -> RawMetadataResult {
        let pair = ArtistTrackPair::new(artist, title);

        let Some(api_key) = self.api_key.as_deref() else {
            debug!(artist = %artist, title = %title, "No API key, skipping Last.fm lookup");
            return RawMetadataResult::Fallback(pair);
        };

        let params = [
            ("method", "track.getInfo"),
            ("autocorrect", "1"),
            ("api_key", api_key),
            ("artist", artist),
            ("track", title),
            ("format", "json"),
        ];

        debug!(artist = %artist, title = %title, "Querying Last.fm track.getInfo");

        let response = match self.http_client.get(&self.api_url).query(&params).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(artist = %artist, title = %title, error = %e, "Last.fm request failed");
                return RawMetadataResult::Fallback(pair);
            }
        };

        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => interpret_response(status, &body, pair),
            Err(e) => {
                warn!(
                    artist = %artist,
                    title = %title,
                    error = %e,
                    "Failed to read Last.fm response"
                );
                RawMetadataResult::Fallback(pair)
            }
        }
    }
}

/// Turn a Last.fm response into a lookup result
///
/// Only a 2xx JSON body with a `track` object is structured; Last.fm reports
/// unknown tracks as `{"error": 6, "message": "Track not found"}`.
pub fn interpret_response(status: u16, body: &str, pair: ArtistTrackPair) -> RawMetadataResult {
    if !(200..300).contains(&status) {
        warn!(
            artist = %pair.artist,
            title = %pair.title,
            status,
            "Last.fm request returned non-success status"
        );
        return RawMetadataResult::Fallback(pair);
    }

    let json: Value = match serde_json::from_str(body) {
        Ok(json) => json,
        Err(e) => {
            warn!(
                artist = %pair.artist,
                title = %pair.title,
                error = %e,
                "Unparseable Last.fm response"
            );
            return RawMetadataResult::Fallback(pair);
        }
    };

    match json.get("track").and_then(Value::as_object) {
        Some(track) => RawMetadataResult::Structured(track.clone()),
        None => {
            let reason = json
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("No info");
            warn!(
                artist = %pair.artist,
                title = %pair.title,
                reason = %reason,
                "Track not found on Last.fm"
            );
            RawMetadataResult::Fallback(pair)
        }
    }
}
