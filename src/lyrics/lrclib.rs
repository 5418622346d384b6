//! LRCLIB API client
//!
//! LRCLIB is a free lyrics API that provides synchronized (LRC format) lyrics.
//! API Documentation: https://lrclib.net/docs

use super::{LyricsCandidate, LyricsProvider};
use crate::config::LrclibConfig;
use anyhow::Context;
use serde::Deserialize;

/// LRCLIB search response row
#[derive(Debug, Deserialize, Clone)]
pub struct LrclibResponse {
    #[serde(rename = "trackName")]
    track_name: Option<String>,
    #[serde(rename = "artistName", default)]
    artist_name: Option<String>,
    #[serde(default)]
    duration: Option<f64>,
    #[serde(rename = "syncedLyrics", default)]
    synced_lyrics: Option<String>,
}

impl LrclibResponse {
    /// Rows without a track name are useless for matching.
    fn into_candidate(self) -> Option<LyricsCandidate> {
        let track_name = self.track_name.filter(|t| !t.trim().is_empty())?;
        Some(LyricsCandidate {
            track_name,
            artist_name: self.artist_name.unwrap_or_default(),
            duration_secs: self.duration,
            synced_lyrics: self.synced_lyrics,
        })
    }
}

/// LRCLIB API client
#[derive(Debug, Clone)]
pub struct LrclibClient {
    client: reqwest::Client,
    base_url: String,
}

impl LrclibClient {
    pub fn new(cfg: &LrclibConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(cfg.user_agent.as_str())
            .timeout(std::time::Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("build lrclib http client")?;
        Ok(Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn search_url(&self, song: &str, artist: Option<&str>) -> String {
        let mut url = format!(
            "{}/search?track_name={}",
            self.base_url,
            urlencoding::encode(song)
        );
        if let Some(artist) = artist {
            url.push_str(&format!("&artist_name={}", urlencoding::encode(artist)));
        }
        url
    }
}

impl LyricsProvider for LrclibClient {
    async fn search(
        &self,
        song: &str,
        artist: Option<&str>,
    ) -> anyhow::Result<Vec<LyricsCandidate>> {
        let url = self.search_url(song, artist);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("lrclib search request")?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if !response.status().is_success() {
            anyhow::bail!("LRCLIB search error: {}", response.status());
        }

        let rows: Vec<LrclibResponse> = response.json().await.context("decode lrclib search")?;
        Ok(parse_rows(rows))
    }
}

fn parse_rows(rows: Vec<LrclibResponse>) -> Vec<LyricsCandidate> {
    rows.into_iter().filter_map(LrclibResponse::into_candidate).collect()
}
