//! Detection of tempo-altered ("slowed") uploads.

use once_cell::sync::Lazy;
use regex::Regex;

/// Marker patterns, matched case-insensitively against the raw title.
static MARKERS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // (slowed + reverb), (super slowed & reverb)
        r"(?i)\((super\s*)?slowed\s*[\+&]?\s*reverb\)",
        // (slowed), (super slowed)
        r"(?i)\((super\s*)?slowed\)",
        r"(?i)\[(super\s*)?slowed\s*[\+&]?\s*reverb\]",
        r"(?i)\[(super\s*)?slowed\]",
        // ~ slowed, - super slowed
        r"(?i)~\s*(super\s*)?slowed",
        r"(?i)-\s*(super\s*)?slowed",
        r"(?i)(super\s*)?slowed\s*(and|\+|&)?\s*reverb",
        r"(?i)(super\s*)?slowed\s*version",
        r"(?i)☆\s*deluxe",
        r"(?i)sped\s*down",
        r"(?i)pitched\s*down",
    ]
    .into_iter()
    .map(|p| Regex::new(p).unwrap_or_else(|e| panic!("invalid tempo marker {p:?}: {e}")))
    .collect()
});

/// Whether `raw_title` carries any tempo-alteration marker.
pub fn is_tempo_altered(raw_title: &str) -> bool {
    match MARKERS.iter().find(|re| re.is_match(raw_title)) {
        Some(re) => {
            tracing::debug!(marker = re.as_str(), "tempo marker matched");
            true
        }
        None => false,
    }
}
