pub mod lookup;
pub mod state;

use crate::config::Config;
use crate::lyrics::{LrcLine, LyricsProvider, ParsedLyrics};
use crate::player::{PlayerSource, TrackMetadata};
use crate::storage::LyricStore;
use crate::sync::SyncEngine;
use crate::tui::DisplaySink;
use state::{AppState, IdleReason, LyricsStatus, Phase, TrackState, is_placeholder_title};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Drives lookups and the lyrics view from what the player reports.
pub struct App<P, L, S, D> {
    cfg: Config,
    state: AppState,
    player: P,
    provider: L,
    store: S,
    display: D,
}

impl<P, L, S, D> App<P, L, S, D>
where
    P: PlayerSource,
    L: LyricsProvider,
    S: LyricStore,
    D: DisplaySink,
{
    pub fn new(cfg: Config, player: P, provider: L, store: S, display: D) -> Self {
        Self {
            cfg,
            state: AppState::new(),
            player,
            provider,
            store,
            display,
        }
    }

    /// Poll forever. Returns only when the future is dropped.
    pub async fn run(&mut self) {
        info!("waiting for a player");
        loop {
            let wait = self.step().await;
            if !wait.is_zero() {
                tokio::time::sleep(wait).await;
            }
        }
    }

    /// One poll of the current phase. Returns how long to wait before the next.
    pub async fn step(&mut self) -> Duration {
        match std::mem::replace(&mut self.state.phase, Phase::AwaitingTrack) {
            Phase::AwaitingTrack => self.await_track().await,
            Phase::TrackingPosition(engine) => self.track_position(engine).await,
        }
    }

    async fn await_track(&mut self) -> Duration {
        let poll = self.cfg.timing.track_poll();

        let Some(track) = self.player.metadata().await else {
            self.idle(IdleReason::NoPlayer);
            return poll;
        };
        if is_placeholder_title(&track.title) {
            self.idle(IdleReason::WaitingForInfo);
            return poll;
        }
        if self.state.gave_up_on(&track.title) {
            self.display
                .render_idle(IdleReason::LyricsUnavailable.message());
            return poll;
        }

        info!(title = %track.title, artist = %track.artist, "new track");
        let Some(lines) = self.prepare(&track).await else {
            self.display
                .render_idle(IdleReason::LyricsUnavailable.message());
            return poll;
        };

        info!(
            lines = lines.len(),
            altered = self.state.track.as_ref().is_some_and(|t| t.altered),
            "showing lyrics"
        );
        let mut engine = SyncEngine::new(lines, track.title, track.artist);
        self.display
            .render_lines(engine.lines(), None, &engine.header());
        engine.mark_shown(None);
        self.state.phase = Phase::TrackingPosition(engine);
        self.cfg.timing.position_poll()
    }

    async fn track_position(&mut self, mut engine: SyncEngine) -> Duration {
        match self.player.metadata().await {
            Some(track) if track.same_track(engine.title()) => {}
            Some(track) => {
                info!(from = %engine.title(), to = %track.title, "track changed");
                self.state.track = None;
                return Duration::ZERO;
            }
            None => {
                debug!("player went away");
                self.state.track = None;
                return Duration::ZERO;
            }
        }

        let Some(position_ms) = self.player.position_ms().await else {
            info!(title = %engine.title(), "playback stopped");
            self.idle(IdleReason::PlaybackStopped);
            return self.cfg.timing.track_poll();
        };

        if let Some(change) = engine.update(position_ms) {
            debug!(position_ms, line = ?change.index, "line changed");
            self.display
                .render_lines(engine.lines(), change.index, &engine.header());
        }
        self.state.phase = Phase::TrackingPosition(engine);
        self.cfg.timing.position_poll()
    }

    /// Look up, persist and parse lyrics for a newly seen track.
    ///
    /// Records the outcome so a failed title is not searched again.
    async fn prepare(&mut self, track: &TrackMetadata) -> Option<Vec<LrcLine>> {
        let report = lookup::resolve(
            &self.provider,
            track,
            self.cfg.matching,
            &self.cfg.scaling,
        )
        .await;

        let lines = report.matched.and_then(|m| {
            let document = self.persist(&track.title, m.document);
            let parsed = ParsedLyrics::parse(&document);
            if parsed.is_empty() {
                warn!(title = %track.title, "matched lyrics have no timed lines");
                None
            } else {
                Some(parsed.lines)
            }
        });

        self.state.track = Some(TrackState {
            title: track.title.clone(),
            altered: report.altered,
            lyrics: if lines.is_some() {
                LyricsStatus::Synced
            } else {
                LyricsStatus::NotFound
            },
        });
        lines
    }

    /// Replace the stored document and read it back.
    ///
    /// Storage problems are logged and the in-memory document is used instead.
    fn persist(&self, title: &str, document: String) -> String {
        match self.store.clear_all() {
            Ok(removed) if removed > 0 => debug!(removed, "cleared stored lyrics"),
            Ok(_) => {}
            Err(e) => warn!(error = %format!("{e:#}"), "clearing stored lyrics failed"),
        }

        match self.store.save(title, &document) {
            Ok(path) => info!(path = %path.display(), "lyrics saved"),
            Err(e) => {
                warn!(error = %format!("{e:#}"), "saving lyrics failed");
                return document;
            }
        }

        match self.store.load(title) {
            Ok(Some(stored)) => stored,
            Ok(None) => {
                warn!(title, "saved lyrics not found on reload");
                document
            }
            Err(e) => {
                warn!(error = %format!("{e:#}"), "reloading lyrics failed");
                document
            }
        }
    }

    fn idle(&mut self, reason: IdleReason) {
        self.state.track = None;
        self.display.render_idle(reason.message());
    }
}
