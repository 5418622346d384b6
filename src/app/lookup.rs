//! From a player title to a ready-to-display LRC document.

use crate::lyrics::scale::scale_document;
use crate::lyrics::{CandidateMatcher, LyricsCandidate, LyricsProvider, MatchTuning, ScaleDecision, ScalePolicy};
use crate::player::TrackMetadata;
use crate::title::normalize::{normalize, split};
use crate::title::planner::plan;
use crate::title::{ParsedTitle, SearchAttempt, is_tempo_altered};
use serde::Serialize;
use tracing::{debug, info};

/// Everything a lookup worked out, in order.
#[derive(Debug, Clone, Serialize)]
pub struct LookupReport {
    pub raw_title: String,
    pub normalized: String,
    pub parsed: ParsedTitle,
    pub altered: bool,
    pub attempts: Vec<SearchAttempt>,
    pub matched: Option<MatchedLyrics>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchedLyrics {
    pub attempt: SearchAttempt,
    pub candidate: LyricsCandidate,
    pub scale: ScaleDecision,
    /// Scaled when `scale` says so.
    #[serde(skip)]
    pub document: String,
}

/// Run the search attempts for `track` in order and stop at the first match.
pub async fn resolve<P: LyricsProvider>(
    provider: &P,
    track: &TrackMetadata,
    tuning: MatchTuning,
    policy: &ScalePolicy,
) -> LookupReport {
    let altered = is_tempo_altered(&track.title);
    let normalized = normalize(&track.title);
    let parsed = split(&normalized);
    let attempts = plan(&parsed, track.artist(), altered);
    debug!(
        %normalized,
        part_a = ?parsed.part_a,
        part_b = %parsed.part_b,
        altered,
        attempts = attempts.len(),
        "planned lookup"
    );

    // The band only makes sense against a stretched duration.
    let expected = if altered { track.duration_secs() } else { None };
    let matcher = CandidateMatcher::new(provider, tuning);

    let mut matched = None;
    for attempt in &attempts {
        if let Some(candidate) = matcher.find(attempt, expected).await {
            matched = Some(prepare(attempt.clone(), candidate, altered, track, policy));
            break;
        }
    }
    if matched.is_none() {
        info!(title = %track.title, "no synced lyrics found");
    }

    LookupReport {
        raw_title: track.title.clone(),
        normalized,
        parsed,
        altered,
        attempts,
        matched,
    }
}

fn prepare(
    attempt: SearchAttempt,
    candidate: LyricsCandidate,
    altered: bool,
    track: &TrackMetadata,
    policy: &ScalePolicy,
) -> MatchedLyrics {
    let scale = policy.decide(altered, candidate.duration_secs, track.duration_secs());
    let original = candidate.synced_text().unwrap_or_default();
    let document = match scale.factor() {
        Some(factor) => {
            info!(factor = %format!("{factor:.3}"), "scaling timestamps");
            scale_document(original, factor)
        }
        None => {
            debug!(?scale, "timestamps left as is");
            original.to_string()
        }
    };
    info!(
        %attempt,
        track = %candidate.track_name,
        artist = %candidate.artist_name,
        "matched lyrics"
    );

    MatchedLyrics {
        attempt,
        candidate,
        scale,
        document,
    }
}
