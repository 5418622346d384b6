use crate::sync::SyncEngine;

/// Titles the browser reports before the real song info has loaded.
const PLACEHOLDER_TITLES: [&str; 3] = ["youtube music", "youtube", ""];

pub fn is_placeholder_title(title: &str) -> bool {
    let title = title.trim().to_lowercase();
    PLACEHOLDER_TITLES.contains(&title.as_str())
}

#[derive(Debug)]
pub enum Phase {
    /// Polling the player for a track worth looking up.
    AwaitingTrack,
    /// Lyrics are on screen; following the playback position.
    TrackingPosition(SyncEngine),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LyricsStatus {
    Synced,
    NotFound,
}

/// The last track a lookup was run for.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackState {
    pub title: String,
    pub altered: bool,
    pub lyrics: LyricsStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleReason {
    NoPlayer,
    WaitingForInfo,
    LyricsUnavailable,
    PlaybackStopped,
}

impl IdleReason {
    pub fn message(self) -> &'static str {
        match self {
            IdleReason::NoPlayer => "No music playing",
            IdleReason::WaitingForInfo => "Waiting for song info...",
            IdleReason::LyricsUnavailable => "Lyrics not available",
            IdleReason::PlaybackStopped => "Playback stopped",
        }
    }
}

#[derive(Debug)]
pub struct AppState {
    pub phase: Phase,
    pub track: Option<TrackState>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            phase: Phase::AwaitingTrack,
            track: None,
        }
    }

    /// Lookup already failed for `title`; don't search again until it changes.
    pub fn gave_up_on(&self, title: &str) -> bool {
        matches!(
            &self.track,
            Some(t) if t.lyrics == LyricsStatus::NotFound && t.title == title
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_titles() {
        assert!(is_placeholder_title("YouTube Music"));
        assert!(is_placeholder_title(" youtube "));
        assert!(is_placeholder_title(""));
        assert!(!is_placeholder_title("YouTube Music Awards Medley"));
    }

    #[test]
    fn test_default_awaits_track() {
        let state = AppState::default();
        assert!(matches!(state.phase, Phase::AwaitingTrack));
        assert!(state.track.is_none());
    }

    #[test]
    fn test_gave_up_only_on_same_failed_title() {
        let mut state = AppState::new();
        assert!(!state.gave_up_on("Song"));

        state.track = Some(TrackState {
            title: "Song".to_string(),
            altered: false,
            lyrics: LyricsStatus::NotFound,
        });
        assert!(state.gave_up_on("Song"));
        assert!(!state.gave_up_on("Other Song"));

        state.track.as_mut().unwrap().lyrics = LyricsStatus::Synced;
        assert!(!state.gave_up_on("Song"));
    }
}
