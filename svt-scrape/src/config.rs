//! Settings resolution for svt-scrape
//!
//! **Priority:** command line (or its ENV alias) → config.json → built-in default
//!
//! The Last.fm API key goes through `svt_common::config::resolve_api_key`,
//! which also consults `SVT_LAST_FM_API_KEY`.

use crate::services::LASTFM_API_URL;
use crate::workflow::{PersistMode, PipelineSettings};
use chrono::NaiveDate;
use std::path::PathBuf;
use std::time::Duration;
use svt_common::config::{resolve_api_key, JsonConfig, RunLayout};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://www.skatevideosite.com";
pub const DEFAULT_FILMMAKER_PATH: &str = "/filmmakers/william-strobeck-fat-bill";

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub base_url: Option<String>,
    pub filmmaker_path: Option<String>,
    pub lastfm_api_url: Option<String>,
    pub api_key: Option<String>,
    pub output: Option<PathBuf>,
    pub http_timeout_secs: Option<u64>,
    pub persist_at_end: bool,
}

/// Fully resolved run settings
#[derive(Debug, Clone)]
pub struct ScrapeSettings {
    pub base_url: String,
    pub filmmaker_path: String,
    pub lastfm_api_url: String,
    pub api_key: Option<String>,
    pub http_timeout: Option<Duration>,
    pub output_path: PathBuf,
    pub persist_mode: PersistMode,
}

impl ScrapeSettings {
    /// `{base_url}{filmmaker_path}` with exactly one slash between them
    pub fn index_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = self.filmmaker_path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            index_url: self.index_url(),
            base_url: self.base_url.clone(),
            output_path: self.output_path.clone(),
            persist_mode: self.persist_mode,
        }
    }
}

/// Merge command line, config file and defaults
///
/// `date` names the default output file under the layout's data directory.
pub fn resolve_settings(
    overrides: SettingsOverrides,
    config: &JsonConfig,
    layout: &RunLayout,
    date: NaiveDate,
) -> ScrapeSettings {
    let base_url = pick(overrides.base_url, config.base_url.as_ref(), DEFAULT_BASE_URL);
    let filmmaker_path = pick(
        overrides.filmmaker_path,
        config.filmmaker_path.as_ref(),
        DEFAULT_FILMMAKER_PATH,
    );
    let lastfm_api_url = pick(
        overrides.lastfm_api_url,
        config.lastfm_api_url.as_ref(),
        LASTFM_API_URL,
    );

    let api_key = resolve_api_key(overrides.api_key.as_deref(), config);

    // Zero disables the timeout
    let http_timeout = overrides
        .http_timeout_secs
        .or(config.http_timeout_secs)
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs);

    let output_path = overrides
        .output
        .unwrap_or_else(|| layout.data_path(date));

    let persist_mode = if overrides.persist_at_end {
        PersistMode::AtEnd
    } else {
        PersistMode::EachItem
    };

    let settings = ScrapeSettings {
        base_url,
        filmmaker_path,
        lastfm_api_url,
        api_key,
        http_timeout,
        output_path,
        persist_mode,
    };
    debug!(
        index_url = %settings.index_url(),
        output = %settings.output_path.display(),
        "Settings resolved"
    );
    settings
}

fn pick(explicit: Option<String>, configured: Option<&String>, default: &str) -> String {
    explicit
        .filter(|v| !v.trim().is_empty())
        .or_else(|| configured.filter(|v| !v.trim().is_empty()).cloned())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use svt_common::config::API_KEY_ENV;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    #[serial]
    fn test_defaults() {
        std::env::remove_var(API_KEY_ENV);
        let layout = RunLayout::new("/tmp/run");
        let settings = resolve_settings(
            SettingsOverrides::default(),
            &JsonConfig::default(),
            &layout,
            date(),
        );

        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.filmmaker_path, DEFAULT_FILMMAKER_PATH);
        assert_eq!(settings.lastfm_api_url, LASTFM_API_URL);
        assert_eq!(settings.api_key, None);
        assert_eq!(settings.http_timeout, None);
        assert_eq!(settings.persist_mode, PersistMode::EachItem);
        assert_eq!(
            settings.output_path,
            PathBuf::from("/tmp/run/data/2024-03-09_strobeck_track_data.csv")
        );
        assert_eq!(
            settings.index_url(),
            "https://www.skatevideosite.com/filmmakers/william-strobeck-fat-bill"
        );
    }

    #[test]
    #[serial]
    fn test_command_line_beats_config() {
        std::env::remove_var(API_KEY_ENV);
        let config = JsonConfig {
            last_fm_api_key: Some("file-key".to_string()),
            base_url: Some("https://config.example".to_string()),
            filmmaker_path: Some("/config/path".to_string()),
            http_timeout_secs: Some(30),
            ..Default::default()
        };
        let overrides = SettingsOverrides {
            base_url: Some("https://cli.example".to_string()),
            api_key: Some("cli-key".to_string()),
            output: Some(PathBuf::from("/out/tracks.csv")),
            http_timeout_secs: Some(5),
            persist_at_end: true,
            ..Default::default()
        };

        let settings = resolve_settings(overrides, &config, &RunLayout::new("/tmp/run"), date());
        assert_eq!(settings.base_url, "https://cli.example");
        assert_eq!(settings.filmmaker_path, "/config/path");
        assert_eq!(settings.api_key.as_deref(), Some("cli-key"));
        assert_eq!(settings.http_timeout, Some(Duration::from_secs(5)));
        assert_eq!(settings.output_path, PathBuf::from("/out/tracks.csv"));
        assert_eq!(settings.persist_mode, PersistMode::AtEnd);
        assert_eq!(settings.index_url(), "https://cli.example/config/path");
    }

    #[test]
    #[serial]
    fn test_blank_values_fall_through() {
        std::env::remove_var(API_KEY_ENV);
        let config = JsonConfig {
            base_url: Some("   ".to_string()),
            http_timeout_secs: Some(0),
            ..Default::default()
        };
        let overrides = SettingsOverrides {
            filmmaker_path: Some(String::new()),
            ..Default::default()
        };

        let settings = resolve_settings(overrides, &config, &RunLayout::new("/tmp/run"), date());
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.filmmaker_path, DEFAULT_FILMMAKER_PATH);
        assert_eq!(settings.http_timeout, None);
    }

    #[test]
    fn test_index_url_joins_slashes() {
        let mut settings = resolve_settings(
            SettingsOverrides {
                api_key: Some("k".to_string()),
                ..Default::default()
            },
            &JsonConfig::default(),
            &RunLayout::new("/tmp/run"),
            date(),
        );
        settings.base_url = "https://site.example/".to_string();
        settings.filmmaker_path = "filmmakers/someone".to_string();
        assert_eq!(settings.index_url(), "https://site.example/filmmakers/someone");
    }

    #[test]
    fn test_pipeline_settings_carry_paths() {
        let settings = resolve_settings(
            SettingsOverrides {
                api_key: Some("k".to_string()),
                persist_at_end: true,
                ..Default::default()
            },
            &JsonConfig::default(),
            &RunLayout::new("/tmp/run"),
            date(),
        );
        let pipeline = settings.pipeline_settings();
        assert_eq!(pipeline.index_url, settings.index_url());
        assert_eq!(pipeline.base_url, DEFAULT_BASE_URL);
        assert_eq!(pipeline.output_path, settings.output_path);
        assert_eq!(pipeline.persist_mode, PersistMode::AtEnd);
    }
}
