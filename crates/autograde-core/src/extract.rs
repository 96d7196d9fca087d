//! Answer extraction strategies.
//!
//! Extraction is an ordered list of pure strategies tried per question id;
//! the first capture wins and a miss on every strategy binds the id to an
//! empty string. Strategies never fail: a malformed or empty document simply
//! yields no capture. A missing document is the caller's condition, not this
//! module's.

use std::collections::BTreeMap;

use regex::Regex;

/// How far past the `N)` delimiter the cue strategy may look.
const CUE_LOOKAHEAD_CHARS: usize = 200;

/// The free-text prompt that marks an answer line in fill-in templates.
const ANSWER_CUE: &str = "Answer Here:";

/// A single extraction strategy: document text and question id in, captured
/// raw answer out.
pub type Strategy = fn(&str, &str) -> Option<String>;

/// Strategies for submitter documents, in priority order.
pub const SUBMISSION_STRATEGIES: &[Strategy] = &[labeled_line, answer_cue];

/// Strategies for instructor documents: the single-line form only.
pub const KEY_STRATEGIES: &[Strategy] = &[labeled_line];

/// Match a line that begins (after optional leading whitespace) with the
/// `<id>)` delimiter and capture the remainder of that line.
pub fn labeled_line(text: &str, id: &str) -> Option<String> {
    let pattern = format!(r"(?m)^[ \t]*{}\)[ \t]*(.+)$", regex::escape(id));
    let re = Regex::new(&pattern).ok()?;
    re.captures(text).map(|c| c[1].trim().to_string())
}

/// From the `<id>)` delimiter, look ahead a bounded window for the literal
/// answer cue and capture the remainder of the cue's line.
pub fn answer_cue(text: &str, id: &str) -> Option<String> {
    let pattern = format!(
        r"(?m){}\)[\s\S]{{0,{}}}?{}[ \t]*(.*)$",
        regex::escape(id),
        CUE_LOOKAHEAD_CHARS,
        regex::escape(ANSWER_CUE),
    );
    let re = Regex::new(&pattern).ok()?;
    re.captures(text).map(|c| c[1].trim().to_string())
}

/// Run `strategies` in order against `text`; the first capture wins, and no
/// capture at all yields an empty string.
pub fn extract_answer(text: &str, id: &str, strategies: &[Strategy]) -> String {
    strategies
        .iter()
        .find_map(|strategy| strategy(text, id))
        .unwrap_or_default()
}

/// Extract every question id into a map. Ids with no capture are bound to
/// empty strings rather than omitted.
pub fn extract_all<I>(text: &str, ids: I, strategies: &[Strategy]) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = String>,
{
    ids.into_iter()
        .map(|id| {
            let answer = extract_answer(text, &id, strategies);
            (id, answer)
        })
        .collect()
}
