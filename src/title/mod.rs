//! Turning a noisy platform title into lyrics search hypotheses
//!
//! This module provides:
//! - Title normalization and splitting into two unordered halves
//! - Tempo-alteration marker detection
//! - Attempt planning for the lyrics search

pub mod normalize;
pub mod planner;
pub mod tempo;

pub use normalize::ParsedTitle;
pub use planner::SearchAttempt;
pub use tempo::is_tempo_altered;
