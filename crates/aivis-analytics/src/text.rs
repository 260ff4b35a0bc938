//! Small text helpers shared by the analytics reports.

use std::sync::LazyLock;

use regex::Regex;

static INTEGER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("valid integer regex"));

/// Text from `window` chars before the match at byte offset `pos` to
/// `window` chars after its end, trimmed.
pub(crate) fn char_window(text: &str, pos: usize, match_len: usize, window: usize) -> String {
    let start_char = text[..pos].chars().count();
    let match_chars = text[pos..pos + match_len].chars().count();
    let from = start_char.saturating_sub(window);
    let to = start_char + match_chars + window;
    text.chars()
        .skip(from)
        .take(to - from)
        .collect::<String>()
        .trim()
        .to_string()
}

/// `part / total` as a percentage rounded to one decimal; zero when `total` is 0.
pub(crate) fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let raw = part as f64 / total as f64 * 100.0;
    round1(raw)
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// First run of ASCII digits in `text`, parsed.
pub(crate) fn first_integer(text: &str) -> Option<u32> {
    INTEGER_RE.find(text)?.as_str().parse().ok()
}
