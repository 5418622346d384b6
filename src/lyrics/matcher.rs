//! Choosing one lyrics candidate for a search attempt.
//!
//! With an artist the match must be exact. Without one, several artists may
//! have recorded a song with the same name; the stretched playback duration
//! is then used to guess which recording the altered upload was made from.

use super::{LyricsCandidate, LyricsProvider};
use crate::title::SearchAttempt;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Altered uploads are assumed to run about this much longer than the original.
pub const DURATION_TARGET_DIVISOR: f64 = 1.3;
/// Originals shorter than `expected / 1.8` are considered too short.
pub const DURATION_BAND_MIN_DIVISOR: f64 = 1.8;
/// Originals longer than `expected / 1.05` are considered too long.
pub const DURATION_BAND_MAX_DIVISOR: f64 = 1.05;

/// Empirically chosen duration thresholds; tunable, not derived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchTuning {
    pub target_divisor: f64,
    pub band_min_divisor: f64,
    pub band_max_divisor: f64,
}

impl Default for MatchTuning {
    fn default() -> Self {
        Self {
            target_divisor: DURATION_TARGET_DIVISOR,
            band_min_divisor: DURATION_BAND_MIN_DIVISOR,
            band_max_divisor: DURATION_BAND_MAX_DIVISOR,
        }
    }
}

pub struct CandidateMatcher<'a, P> {
    provider: &'a P,
    tuning: MatchTuning,
}

impl<'a, P: LyricsProvider> CandidateMatcher<'a, P> {
    pub fn new(provider: &'a P, tuning: MatchTuning) -> Self {
        Self { provider, tuning }
    }

    /// Query the provider for `attempt` and pick at most one candidate.
    ///
    /// `expected_duration_secs` is the observed (stretched) duration and is
    /// only used to break ties between artists when no artist was given.
    /// Provider failures count as "no candidate".
    pub async fn find(
        &self,
        attempt: &SearchAttempt,
        expected_duration_secs: Option<f64>,
    ) -> Option<LyricsCandidate> {
        let results = match self
            .provider
            .search(&attempt.song, attempt.artist.as_deref())
            .await
        {
            Ok(results) => results,
            Err(e) => {
                warn!(%attempt, error = %format!("{e:#}"), "lyrics search failed");
                return None;
            }
        };
        debug!(%attempt, results = results.len(), "lyrics search returned");

        match attempt.artist.as_deref() {
            Some(artist) => select_exact(results, &attempt.song, artist),
            None => select_by_song(results, &attempt.song, expected_duration_secs, &self.tuning),
        }
    }
}

/// First synced result whose track and artist both equal the query.
pub fn select_exact(
    results: Vec<LyricsCandidate>,
    song: &str,
    artist: &str,
) -> Option<LyricsCandidate> {
    let found = results.into_iter().find(|c| {
        c.synced_text().is_some()
            && names_match(&c.track_name, song)
            && names_match(&c.artist_name, artist)
    });
    if let Some(c) = &found {
        info!(artist = %c.artist_name, "found lyrics");
    }
    found
}

/// Pick among synced results named `song`, grouping them by artist.
pub fn select_by_song(
    results: Vec<LyricsCandidate>,
    song: &str,
    expected_duration_secs: Option<f64>,
    tuning: &MatchTuning,
) -> Option<LyricsCandidate> {
    let candidates: Vec<LyricsCandidate> = results
        .into_iter()
        .filter(|c| c.synced_text().is_some() && names_match(&c.track_name, song))
        .collect();

    let mut artists: Vec<String> = Vec::new();
    for c in &candidates {
        if !artists.contains(&c.artist_name) {
            artists.push(c.artist_name.clone());
        }
    }

    match artists.len() {
        0 => {
            debug!(song, "no synced lyrics with a matching name");
            return None;
        }
        1 => return candidates.into_iter().next(),
        n => debug!(song, artists = n, first = ?&artists[..n.min(3)], "several artists"),
    }

    if let Some(expected) = expected_duration_secs
        && let Some(best) = closest_by_duration(&candidates, expected, tuning)
    {
        info!(
            artist = %best.artist_name,
            duration = best.duration_secs.unwrap_or_default(),
            "best duration match"
        );
        return Some(best.clone());
    }

    let first = candidates.into_iter().next();
    if let Some(c) = &first {
        warn!(artist = %c.artist_name, "several artists and no duration hint, using first");
    }
    first
}

/// The candidate nearest to `expected / target_divisor` inside the plausible band.
fn closest_by_duration<'c>(
    candidates: &'c [LyricsCandidate],
    expected: f64,
    tuning: &MatchTuning,
) -> Option<&'c LyricsCandidate> {
    let min = expected / tuning.band_min_divisor;
    let max = expected / tuning.band_max_divisor;
    let target = expected / tuning.target_divisor;

    candidates
        .iter()
        .filter_map(|c| {
            let d = c.duration_secs.filter(|d| *d > 0.0)?;
            (min..=max).contains(&d).then_some((c, (d - target).abs()))
        })
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(c, _)| c)
}

/// Case-insensitive equality, also accepted when only spacing differs.
fn names_match(found: &str, wanted: &str) -> bool {
    let found = found.trim().to_lowercase();
    let wanted = wanted.trim().to_lowercase();
    if found == wanted {
        return true;
    }
    let squash = |s: &str| s.chars().filter(|c| !c.is_whitespace()).collect::<String>();
    squash(&found) == squash(&wanted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeProvider;

    fn candidate(track: &str, artist: &str, duration: Option<f64>, synced: bool) -> LyricsCandidate {
        let lyrics = format!("[00:01.00]{artist}");
        crate::testing::candidate(track, artist, duration, synced.then_some(lyrics.as_str()))
    }

    #[test]
    fn test_names_match() {
        assert!(names_match("Song Name", "song name"));
        assert!(names_match(" SongName ", "song name"));
        assert!(!names_match("Song Name (Remix)", "song name"));
    }

    #[test]
    fn test_exact_rejects_other_artist_even_if_alone() {
        let results = vec![candidate("Song", "Somebody Else", Some(200.0), true)];
        assert_eq!(select_exact(results, "Song", "Artist"), None);
    }

    #[test]
    fn test_exact_skips_unsynced_and_wrong_titles() {
        let results = vec![
            candidate("Song", "Artist", Some(100.0), false),
            candidate("Song (Live)", "Artist", Some(110.0), true),
            candidate("song", "ARTIST", Some(120.0), true),
        ];
        let chosen = select_exact(results, "Song", "Artist").unwrap();
        assert_eq!(chosen.duration_secs, Some(120.0));
    }

    #[test]
    fn test_single_artist_returns_first() {
        let results = vec![
            candidate("Song", "A", Some(100.0), true),
            candidate("Song", "A", Some(300.0), true),
        ];
        let chosen = select_by_song(results, "Song", Some(390.0), &MatchTuning::default()).unwrap();
        assert_eq!(chosen.duration_secs, Some(100.0));
    }

    #[test]
    fn test_duration_picks_closest_in_band() {
        let results = vec![
            candidate("Song", "Short", Some(180.0), true),
            candidate("Song", "Right", Some(240.0), true),
            candidate("Song", "Long", Some(300.0), true),
        ];
        let chosen = select_by_song(results, "Song", Some(312.0), &MatchTuning::default()).unwrap();
        assert_eq!(chosen.artist_name, "Right");
    }

    #[test]
    fn test_band_excludes_everyone_falls_back_to_first() {
        let results = vec![
            candidate("Song", "First", Some(50.0), true),
            candidate("Song", "Second", Some(400.0), true),
            candidate("Song", "NoDuration", None, true),
        ];
        let chosen = select_by_song(results, "Song", Some(312.0), &MatchTuning::default()).unwrap();
        assert_eq!(chosen.artist_name, "First");
    }

    #[test]
    fn test_multiple_artists_without_duration() {
        let results = vec![
            candidate("Other", "Zero", Some(240.0), true),
            candidate("Song", "Unsynced", Some(240.0), false),
            candidate("Song", "First", Some(100.0), true),
            candidate("Song", "Second", Some(240.0), true),
        ];
        let chosen = select_by_song(results, "Song", None, &MatchTuning::default()).unwrap();
        assert_eq!(chosen.artist_name, "First");
    }

    #[test]
    fn test_no_eligible_candidates() {
        let results = vec![candidate("Song", "A", Some(100.0), false)];
        assert_eq!(select_by_song(results, "Song", None, &MatchTuning::default()), None);
    }

    #[tokio::test]
    async fn test_find_passes_artist_to_provider() {
        let provider = FakeProvider::new().with(
            "Song",
            Some("Artist"),
            vec![candidate("Song", "Artist", Some(200.0), true)],
        );
        let matcher = CandidateMatcher::new(&provider, MatchTuning::default());

        let chosen = matcher
            .find(&SearchAttempt::new("Song", Some("Artist")), Some(260.0))
            .await;

        assert_eq!(chosen.map(|c| c.artist_name), Some("Artist".to_string()));
        assert_eq!(
            provider.queries(),
            vec![("Song".to_string(), Some("Artist".to_string()))]
        );
    }

    #[tokio::test]
    async fn test_find_provider_error_is_no_candidate() {
        let provider = FakeProvider::new().failing("Song", None, "timed out");
        let matcher = CandidateMatcher::new(&provider, MatchTuning::default());

        assert_eq!(matcher.find(&SearchAttempt::new("Song", None), None).await, None);
    }
}
