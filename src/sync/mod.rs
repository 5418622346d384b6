//! Following playback position through a list of timed lyric lines.

use crate::lyrics::LrcLine;

/// The highlighted line moved; the view needs a redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineChange {
    /// `None` while playback is before the first timed line.
    pub index: Option<usize>,
}

/// Lyrics and position state for the track currently being followed.
///
/// Lives only as long as one track keeps playing.
#[derive(Debug, Clone)]
pub struct SyncEngine {
    lines: Vec<LrcLine>,
    title: String,
    artist: String,
    /// Last index handed out; `None` inside means "before the first line",
    /// the outer `None` means nothing was reported yet.
    current: Option<Option<usize>>,
}

impl SyncEngine {
    /// `lines` must be sorted by time.
    pub fn new(lines: Vec<LrcLine>, title: String, artist: String) -> Self {
        Self {
            lines,
            title,
            artist,
            current: None,
        }
    }

    pub fn lines(&self) -> &[LrcLine] {
        &self.lines
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// `title - artist`, or just the title when the artist is unknown.
    pub fn header(&self) -> String {
        if self.artist.trim().is_empty() {
            self.title.clone()
        } else {
            format!("{} - {}", self.title, self.artist)
        }
    }

    /// Index of the last line starting at or before `position_ms`.
    pub fn line_at(&self, position_ms: u64) -> Option<usize> {
        self.lines
            .partition_point(|l| l.time_ms <= position_ms)
            .checked_sub(1)
    }

    /// The line index reported last, if any.
    pub fn current(&self) -> Option<usize> {
        self.current.flatten()
    }

    /// Feed a position sample; returns a change only when the line moved.
    pub fn update(&mut self, position_ms: u64) -> Option<LineChange> {
        let index = self.line_at(position_ms);
        if self.current == Some(index) {
            return None;
        }
        self.current = Some(index);
        Some(LineChange { index })
    }

    /// Treat the view as showing `index` already, without reporting a change.
    pub fn mark_shown(&mut self, index: Option<usize>) {
        self.current = Some(index);
    }
}
