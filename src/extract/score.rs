//! Review score parsing

use once_cell::sync::Lazy;
use regex::Regex;

/// Leading ASCII numeric run, optionally followed by a percent sign.
static SCORE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9.]+)\s*(%)?").unwrap());

/// Outcome of reading the score cell text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreParse {
    /// Fraction of 1
    Score(f64),
    /// No leading number, or a fraction outside `[0, 1]`
    Absent,
    /// A numeric-looking run that is not a valid number, e.g. `1.2.3`
    Invalid,
}

/// Parse a score cell's text into a fraction.
///
/// Workbooks store the score as a fraction (`0.97`). Text ending in `%` is a
/// percentage literal and is scaled down (`97.5%` -> `0.975`).
pub fn parse_score(text: &str) -> ScoreParse {
    let Some(caps) = SCORE_PATTERN.captures(text.trim()) else {
        return ScoreParse::Absent;
    };
    let Ok(value) = caps[1].parse::<f64>() else {
        return ScoreParse::Invalid;
    };
    let fraction = if caps.get(2).is_some() { value / 100.0 } else { value };
    if !(0.0..=1.0).contains(&fraction) {
        tracing::warn!("Review score '{}' is outside 0-100%, treating as absent", text.trim());
        return ScoreParse::Absent;
    }
    ScoreParse::Score(fraction)
}
