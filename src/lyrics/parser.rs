//! LRC format parser
//!
//! Parses synchronized lyrics in LRC format:
//! [mm:ss.xx] Lyrics line here
//!
//! Example:
//! [00:12.34] Hello world
//! [00:15.00] Another line

/// A single line of lyrics with timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LrcLine {
    /// Timestamp in milliseconds from start
    pub time_ms: u64,
    /// The lyrics text
    pub text: String,
}

impl LrcLine {
    pub fn new(time_ms: u64, text: String) -> Self {
        Self { time_ms, text }
    }
}

/// Timed lines of a synchronized lyrics document, ordered by time.
#[derive(Debug, Clone, Default)]
pub struct ParsedLyrics {
    pub lines: Vec<LrcLine>,
}

impl ParsedLyrics {
    /// Parse LRC formatted lyrics. Lines without a leading timestamp are
    /// kept in the document but have no place in the timeline.
    pub fn parse(content: &str) -> Self {
        let mut lines = Vec::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let (timestamps, text) = leading_timestamps(line);
            if timestamps.is_empty() {
                continue;
            }

            let text = text.trim();
            lines.extend(
                timestamps
                    .into_iter()
                    .map(|(ms, _)| LrcLine::new(ms, text.to_string())),
            );
        }

        // Stable, so lines sharing a timestamp keep document order.
        lines.sort_by_key(|l| l.time_ms);

        Self { lines }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Split off every timestamp tag at the start of `line`.
///
/// Returns each timestamp in milliseconds together with its raw tag
/// (brackets included) and the remainder of the line. Metadata tags like
/// `[ar:Artist]` stop the scan.
pub fn leading_timestamps(line: &str) -> (Vec<(u64, &str)>, &str) {
    let mut timestamps = Vec::new();
    let mut rest = line;

    while let Some(inner) = rest.strip_prefix('[') {
        let Some(end) = inner.find(']') else {
            break;
        };
        let Some(ms) = parse_timestamp(&inner[..end]) else {
            break;
        };
        let tag_len = end + 2;
        timestamps.push((ms, &rest[..tag_len]));
        rest = &rest[tag_len..];
    }

    (timestamps, rest)
}

/// Parse timestamp string like "00:12.34" to milliseconds
///
/// The fraction is normalized to milliseconds: one digit is tenths, two
/// digits are hundredths, and anything past the third digit is truncated.
/// Values that do not fit in a `u64` of milliseconds are rejected.
pub fn parse_timestamp(s: &str) -> Option<u64> {
    let (min, rest) = s.split_once(':')?;
    let (sec, frac) = rest.split_once('.')?;

    let min = parse_digits(min)?;
    let sec = parse_digits(sec)?;
    parse_digits(frac)?;

    let ms = match frac.len() {
        1 => parse_digits(frac)? * 100,
        2 => parse_digits(frac)? * 10,
        _ => parse_digits(&frac[..3])?,
    };

    min.checked_mul(60_000)?
        .checked_add(sec.checked_mul(1000)?)?
        .checked_add(ms)
}

/// Render milliseconds as `[mm:ss.xx]`, rounded to the nearest hundredth.
pub fn format_timestamp(ms: u64) -> String {
    let centis = ms.saturating_add(5) / 10;
    let min = centis / 6000;
    let sec = (centis % 6000) / 100;
    let frac = centis % 100;
    format!("[{min:02}:{sec:02}.{frac:02}]")
}

fn parse_digits(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
