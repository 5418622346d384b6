//! Lyrics module for fetching, choosing and retiming synchronized lyrics
//!
//! This module provides:
//! - LRCLIB API client for searching lyrics
//! - LRC format parser for synchronized lyrics
//! - Candidate selection among same-named search results
//! - Timestamp scaling for tempo-altered playback

pub mod lrclib;
pub mod matcher;
pub mod parser;
pub mod scale;

pub use lrclib::LrclibClient;
pub use matcher::{CandidateMatcher, MatchTuning};
pub use parser::{LrcLine, ParsedLyrics};
pub use scale::{ScaleDecision, ScalePolicy};

use serde::Serialize;

/// One search result from a lyrics source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LyricsCandidate {
    pub track_name: String,
    pub artist_name: String,
    /// Duration of the original recording, in seconds.
    pub duration_secs: Option<f64>,
    /// LRC document, when the source has a synchronized version.
    #[serde(skip)]
    pub synced_lyrics: Option<String>,
}

impl LyricsCandidate {
    /// The synchronized document, if present and non-blank.
    pub fn synced_text(&self) -> Option<&str> {
        self.synced_lyrics
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}

/// A searchable lyrics database.
pub trait LyricsProvider {
    /// Search by song name, optionally narrowed by artist.
    ///
    /// Results keep the source's order. Rows without synchronized lyrics are
    /// returned too; callers decide what is eligible.
    async fn search(
        &self,
        song: &str,
        artist: Option<&str>,
    ) -> anyhow::Result<Vec<LyricsCandidate>>;
}
