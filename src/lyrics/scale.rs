//! Retiming synchronized lyrics for playback at a different tempo.

use super::parser::{format_timestamp, leading_timestamps};
use serde::{Deserialize, Serialize};

/// Observed duration below `original * 0.9` is not actually slower.
pub const MIN_SCALE_RATIO: f64 = 0.9;
/// Observed duration above `original * 2.5` is more likely a wrong match.
pub const MAX_SCALE_RATIO: f64 = 2.5;

/// Empirically chosen sanity bounds for the stretch ratio; tunable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalePolicy {
    pub min_ratio: f64,
    pub max_ratio: f64,
}

impl Default for ScalePolicy {
    fn default() -> Self {
        Self {
            min_ratio: MIN_SCALE_RATIO,
            max_ratio: MAX_SCALE_RATIO,
        }
    }
}

/// What happened to the lyric timing for one track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum ScaleDecision {
    /// The track is not tempo-altered; lyrics are used as published.
    NotAltered,
    /// One of the two durations is unknown.
    UnknownDuration,
    /// Playback is not meaningfully longer than the original.
    NotSlower { ratio: f64 },
    /// The stretch is too large to be the same recording.
    Implausible { ratio: f64 },
    Scaled { factor: f64 },
}

impl ScaleDecision {
    pub fn factor(&self) -> Option<f64> {
        match self {
            Self::Scaled { factor } => Some(*factor),
            _ => None,
        }
    }
}

impl ScalePolicy {
    /// Decide whether lyrics for an original of `original_secs` should be
    /// stretched to the observed `current_secs`.
    pub fn decide(
        &self,
        altered: bool,
        original_secs: Option<f64>,
        current_secs: Option<f64>,
    ) -> ScaleDecision {
        if !altered {
            return ScaleDecision::NotAltered;
        }
        let (Some(original), Some(current)) = (
            original_secs.filter(|d| *d > 0.0),
            current_secs.filter(|d| *d > 0.0),
        ) else {
            return ScaleDecision::UnknownDuration;
        };

        let ratio = current / original;
        if current < original * self.min_ratio {
            ScaleDecision::NotSlower { ratio }
        } else if current > original * self.max_ratio {
            ScaleDecision::Implausible { ratio }
        } else {
            ScaleDecision::Scaled { factor: ratio }
        }
    }
}

/// Multiply every leading timestamp in an LRC document by `factor`.
///
/// Line count and order are preserved exactly. Lines without a leading
/// timestamp, and timestamps whose value does not change, are left as
/// written.
pub fn scale_document(document: &str, factor: f64) -> String {
    document
        .split('\n')
        .map(|line| scale_line(line, factor))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Indentation before the first tag is kept; the parser trims it too.
fn scale_line(line: &str, factor: f64) -> String {
    let body = line.trim_start();
    let (timestamps, rest) = leading_timestamps(body);
    if timestamps.is_empty() {
        return line.to_string();
    }

    let mut out = String::with_capacity(line.len());
    out.push_str(&line[..line.len() - body.len()]);
    for (ms, tag) in timestamps {
        let scaled = (ms as f64 * factor) as u64;
        if scaled == ms {
            out.push_str(tag);
        } else {
            out.push_str(&format_timestamp(scaled));
        }
    }
    out.push_str(rest);
    out
}
