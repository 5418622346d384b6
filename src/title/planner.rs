//! Ordering of (song, artist) hypotheses to try against the lyrics source.

use super::ParsedTitle;
use serde::Serialize;
use std::fmt;

/// One hypothesis to search for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchAttempt {
    pub song: String,
    pub artist: Option<String>,
}

impl SearchAttempt {
    pub fn new(song: &str, artist: Option<&str>) -> Self {
        Self {
            song: song.to_string(),
            artist: artist.map(str::to_string),
        }
    }
}

impl fmt::Display for SearchAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.artist {
            Some(artist) => write!(f, "'{}' by '{}'", self.song, artist),
            None => write!(f, "'{}' by any artist", self.song),
        }
    }
}

/// Build the ordered, de-duplicated attempt list for a parsed title.
///
/// Altered uploads usually carry the real artist inside the title, so the
/// title halves are paired first. Normal uploads usually come from the
/// artist's own channel, so the reported artist goes first.
pub fn plan(parsed: &ParsedTitle, metadata_artist: Option<&str>, altered: bool) -> Vec<SearchAttempt> {
    let part_a = parsed.part_a.as_deref();
    let part_b = parsed.part_b.as_str();
    let metadata_artist = metadata_artist.map(str::trim).filter(|a| !a.is_empty());

    let mut plan = Plan::default();

    if altered {
        plan.title_pairs(part_a, part_b);
        plan.with_artist(part_a, part_b, metadata_artist);
    } else {
        plan.with_artist(part_a, part_b, metadata_artist);
        plan.title_pairs(part_a, part_b);
    }

    if let Some(a) = part_a {
        plan.push(a, None);
    }
    plan.push(part_b, None);

    plan.attempts
}

#[derive(Default)]
struct Plan {
    attempts: Vec<SearchAttempt>,
}

impl Plan {
    fn push(&mut self, song: &str, artist: Option<&str>) {
        if song.is_empty() {
            return;
        }
        let attempt = SearchAttempt::new(song, artist);
        if !self.attempts.contains(&attempt) {
            self.attempts.push(attempt);
        }
    }

    fn title_pairs(&mut self, part_a: Option<&str>, part_b: &str) {
        if let Some(a) = part_a {
            self.push(a, Some(part_b));
            self.push(part_b, Some(a));
        }
    }

    fn with_artist(&mut self, part_a: Option<&str>, part_b: &str, artist: Option<&str>) {
        let Some(artist) = artist else {
            return;
        };
        if let Some(a) = part_a {
            self.push(a, Some(artist));
        }
        self.push(part_b, Some(artist));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(a: Option<&str>, b: &str) -> ParsedTitle {
        ParsedTitle {
            part_a: a.map(str::to_string),
            part_b: b.to_string(),
        }
    }

    fn pairs(attempts: &[SearchAttempt]) -> Vec<(&str, Option<&str>)> {
        attempts
            .iter()
            .map(|a| (a.song.as_str(), a.artist.as_deref()))
            .collect()
    }

    #[test]
    fn test_altered_order() {
        let attempts = plan(&parsed(Some("Song"), "Artist"), Some("Uploader"), true);
        assert_eq!(
            pairs(&attempts),
            vec![
                ("Song", Some("Artist")),
                ("Artist", Some("Song")),
                ("Song", Some("Uploader")),
                ("Artist", Some("Uploader")),
                ("Song", None),
                ("Artist", None),
            ]
        );
    }

    #[test]
    fn test_normal_order() {
        let attempts = plan(&parsed(Some("Song"), "Artist"), Some("Uploader"), false);
        assert_eq!(
            pairs(&attempts),
            vec![
                ("Song", Some("Uploader")),
                ("Artist", Some("Uploader")),
                ("Song", Some("Artist")),
                ("Artist", Some("Song")),
                ("Song", None),
                ("Artist", None),
            ]
        );
    }

    #[test]
    fn test_without_part_a() {
        for altered in [true, false] {
            let attempts = plan(&parsed(None, "Whole Title"), Some("Uploader"), altered);
            assert_eq!(
                pairs(&attempts),
                vec![("Whole Title", Some("Uploader")), ("Whole Title", None)]
            );
        }
    }

    #[test]
    fn test_blank_metadata_artist_is_ignored() {
        let attempts = plan(&parsed(None, "Whole Title"), Some("   "), false);
        assert_eq!(pairs(&attempts), vec![("Whole Title", None)]);
    }

    #[test]
    fn test_no_duplicates() {
        // Metadata artist equal to a title half collapses with the title pairing.
        let attempts = plan(&parsed(Some("Song"), "Artist"), Some("Artist"), true);
        assert_eq!(
            pairs(&attempts),
            vec![
                ("Song", Some("Artist")),
                ("Artist", Some("Song")),
                ("Artist", Some("Artist")),
                ("Song", None),
                ("Artist", None),
            ]
        );
        for (i, a) in attempts.iter().enumerate() {
            assert!(!attempts[i + 1..].contains(a));
        }
    }

    #[test]
    fn test_empty_title_plans_nothing() {
        assert!(plan(&parsed(None, ""), None, true).is_empty());
    }
}
