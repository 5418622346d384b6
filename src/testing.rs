//! In-memory stand-ins for the player, lyrics source, store and screen.

use crate::lyrics::{LrcLine, LyricsCandidate, LyricsProvider};
use crate::player::{PlayerSource, TrackMetadata};
use crate::storage::LyricStore;
use crate::tui::DisplaySink;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

pub fn candidate(track: &str, artist: &str, duration: Option<f64>, lyrics: Option<&str>) -> LyricsCandidate {
    LyricsCandidate {
        track_name: track.to_string(),
        artist_name: artist.to_string(),
        duration_secs: duration,
        synced_lyrics: lyrics.map(str::to_string),
    }
}

pub fn metadata(title: &str, artist: &str, duration_secs: Option<u64>) -> TrackMetadata {
    TrackMetadata {
        title: title.to_string(),
        artist: artist.to_string(),
        duration_ms: duration_secs.map(|s| s * 1000),
    }
}

type Query = (String, Option<String>);

/// Answers searches from a table; unknown queries return no rows.
#[derive(Default)]
pub struct FakeProvider {
    answers: HashMap<Query, Result<Vec<LyricsCandidate>, String>>,
    pub queries: Mutex<Vec<Query>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, song: &str, artist: Option<&str>, rows: Vec<LyricsCandidate>) -> Self {
        self.answers
            .insert((song.to_string(), artist.map(str::to_string)), Ok(rows));
        self
    }

    pub fn failing(mut self, song: &str, artist: Option<&str>, error: &str) -> Self {
        self.answers.insert(
            (song.to_string(), artist.map(str::to_string)),
            Err(error.to_string()),
        );
        self
    }

    pub fn queries(&self) -> Vec<Query> {
        self.queries.lock().unwrap().clone()
    }
}

impl LyricsProvider for FakeProvider {
    async fn search(&self, song: &str, artist: Option<&str>) -> anyhow::Result<Vec<LyricsCandidate>> {
        let key = (song.to_string(), artist.map(str::to_string));
        self.queries.lock().unwrap().push(key.clone());
        match self.answers.get(&key) {
            Some(Ok(rows)) => Ok(rows.clone()),
            Some(Err(e)) => Err(anyhow::anyhow!("{e}")),
            None => Ok(Vec::new()),
        }
    }
}

/// A player whose state the test sets directly.
#[derive(Default)]
pub struct FakePlayer {
    metadata: Mutex<Option<TrackMetadata>>,
    position_ms: Mutex<Option<u64>>,
}

impl FakePlayer {
    pub fn set_track(&self, meta: Option<TrackMetadata>) {
        *self.metadata.lock().unwrap() = meta;
    }

    pub fn set_position(&self, position_ms: Option<u64>) {
        *self.position_ms.lock().unwrap() = position_ms;
    }
}

impl PlayerSource for FakePlayer {
    async fn metadata(&self) -> Option<TrackMetadata> {
        self.metadata.lock().unwrap().clone()
    }

    async fn position_ms(&self) -> Option<u64> {
        *self.position_ms.lock().unwrap()
    }
}

#[derive(Default)]
pub struct MemoryStore {
    pub docs: Mutex<HashMap<String, String>>,
    pub fail_saves: bool,
}

impl LyricStore for MemoryStore {
    fn save(&self, track_title: &str, document: &str) -> anyhow::Result<PathBuf> {
        if self.fail_saves {
            anyhow::bail!("disk full");
        }
        self.docs
            .lock()
            .unwrap()
            .insert(track_title.to_string(), document.to_string());
        Ok(PathBuf::from(format!("{track_title}.lrc")))
    }

    fn load(&self, track_title: &str) -> anyhow::Result<Option<String>> {
        Ok(self.docs.lock().unwrap().get(track_title).cloned())
    }

    fn clear_all(&self) -> anyhow::Result<usize> {
        let mut docs = self.docs.lock().unwrap();
        let n = docs.len();
        docs.clear();
        Ok(n)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Lines {
        texts: Vec<String>,
        current: Option<usize>,
        header: String,
    },
    Idle(String),
}

/// Remembers every frame it was asked to draw.
#[derive(Default)]
pub struct RecordingDisplay {
    pub frames: Vec<Frame>,
}

impl RecordingDisplay {
    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }
}

impl DisplaySink for RecordingDisplay {
    fn render_lines(&mut self, lines: &[LrcLine], current: Option<usize>, header: &str) {
        self.frames.push(Frame::Lines {
            texts: lines.iter().map(|l| l.text.clone()).collect(),
            current,
            header: header.to_string(),
        });
    }

    fn render_idle(&mut self, message: &str) {
        self.frames.push(Frame::Idle(message.to_string()));
    }
}
