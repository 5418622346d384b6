//! Title cleanup for browser-reported track titles.
//!
//! Uploads of altered songs tend to look like
//! `Song - Artist (Slowed + Reverb) [Lyrics]` or `Artist ~ Song ～ super slowed`.
//! Normalization strips everything that is not song or artist text and the
//! splitter then cuts the remainder into two halves whose roles are unknown.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Suffix the YouTube Music tab appends to its document title.
const PLATFORM_SUFFIX: &str = r"\s*-\s*YouTube Music$";

/// Separators tried in order; the first one producing two non-empty halves wins.
pub const SEPARATORS: [&str; 9] = [" - ", " － ", " ~ ", " | ", "- ", " -", "－", " / ", "／"];

/// Characters trimmed from both ends of the cleaned title.
const EDGE_SEPARATORS: [char; 5] = ['~', '-', '|', '/', '／'];

static PLATFORM_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| compile(PLATFORM_SUFFIX));

/// Bracketed annotations, removed with their content.
static BRACKETS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\s*\([^)]*\)",
        r"\s*\[[^\]]*\]",
        r"\s*\{[^}]*\}",
        r"\s*「[^」]*」",
        r"\s*『[^』]*』",
    ]
    .into_iter()
    .map(compile)
    .collect()
});

/// Tempo clauses left outside brackets, removed through the end of the title.
static TEMPO_CLAUSES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\s*~\s*(super\s*)?slowed.*$",
        r"(?i)\s*-\s*(super\s*)?slowed.*$",
        r"(?i)\s*(super\s*)?slowed\s*(and|\+|&)?\s*reverb.*$",
        r"(?i)\s*(super\s*)?slowed\s*version.*$",
        r"(?i)\s*(sped|pitched)\s*down.*$",
    ]
    .into_iter()
    .map(compile)
    .collect()
});

/// Anything outside ASCII and Latin-1/Latin Extended-A/B is treated as noise.
/// The two full-width separators survive so the splitter can still use them.
static NOISE: Lazy<Regex> = Lazy::new(|| compile(r"[^\x00-\x7F\u{00C0}-\u{024F}－／]+"));

static WHITESPACE: Lazy<Regex> = Lazy::new(|| compile(r"\s+"));

fn compile(pattern: &str) -> Regex {
    // Patterns are literals in this file; a failure here is a programming error.
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid title pattern {pattern:?}: {e}"))
}

/// The two halves of a cleaned title.
///
/// `part_a` is `None` when no separator split the title, in which case
/// `part_b` holds the whole normalized title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedTitle {
    pub part_a: Option<String>,
    pub part_b: String,
}

/// Run every cleanup step over `raw_title`. Applying it twice is a no-op.
pub fn normalize(raw_title: &str) -> String {
    // Dropping noise can expose a tempo clause that an earlier step already
    // passed over, so repeat until nothing changes. Each pass only shrinks.
    let mut current = clean_once(raw_title);
    loop {
        let next = clean_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn clean_once(raw_title: &str) -> String {
    let mut title = to_standard_width(raw_title);

    title = PLATFORM_SUFFIX_RE.replace(&title, "").into_owned();

    for re in BRACKETS.iter() {
        title = re.replace_all(&title, "").into_owned();
    }
    for re in TEMPO_CLAUSES.iter() {
        title = re.replace(&title, "").into_owned();
    }

    title = NOISE.replace_all(&title, "").into_owned();
    title = WHITESPACE.replace_all(&title, " ").into_owned();

    title
        .trim_matches(|c: char| c.is_whitespace() || EDGE_SEPARATORS.contains(&c))
        .to_string()
}

/// Split a normalized title on the highest-priority separator that works.
pub fn split(normalized: &str) -> ParsedTitle {
    for sep in SEPARATORS {
        if let Some((a, b)) = normalized.split_once(sep) {
            let (a, b) = (a.trim(), b.trim());
            if !a.is_empty() && !b.is_empty() {
                return ParsedTitle {
                    part_a: Some(a.to_string()),
                    part_b: b.to_string(),
                };
            }
        }
    }

    ParsedTitle {
        part_a: None,
        part_b: normalized.trim().to_string(),
    }
}

/// Map full-width Latin letters, digits and the ideographic space to ASCII.
fn to_standard_width(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'Ａ'..='Ｚ' | 'ａ'..='ｚ' | '０'..='９' => {
                char::from_u32(c as u32 - 0xFEE0).unwrap_or(c)
            }
            '\u{3000}' => ' ',
            _ => c,
        })
        .collect()
}
