//! Organisation-name recognition as an optional capability.
//!
//! Competitor extraction asks an [`EntityRecognizer`] for organisation names
//! first. A recognizer may report that it is unavailable, in which case the
//! extractor falls back to its capitalisation heuristics alone.

use regex::Regex;

/// Source of organisation entities in free text.
pub trait EntityRecognizer: Send + Sync {
    /// Organisation names found in `text`, in order of appearance.
    ///
    /// Returns `None` when the capability is not available; callers must treat
    /// that as "no extra recall", never as a failure.
    fn organizations(&self, text: &str) -> Option<Vec<String>>;
}

/// Recognizer used when no NER capability is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

impl EntityRecognizer for Unavailable {
    fn organizations(&self, _text: &str) -> Option<Vec<String>> {
        None
    }
}

/// Dictionary-backed recognizer over a fixed list of known organisation names.
///
/// Matches whole words case-insensitively and reports names in the
/// gazetteer's own spelling.
#[derive(Debug, Clone)]
pub struct GazetteerRecognizer {
    entries: Vec<(String, Regex)>,
}

impl GazetteerRecognizer {
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = names
            .into_iter()
            .filter_map(|name| {
                let name = name.as_ref().trim();
                if name.is_empty() {
                    return None;
                }
                let re = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(name))).ok()?;
                Some((name.to_string(), re))
            })
            .collect();
        Self { entries }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl EntityRecognizer for GazetteerRecognizer {
    fn organizations(&self, text: &str) -> Option<Vec<String>> {
        let mut found: Vec<(usize, &str)> = self
            .entries
            .iter()
            .filter_map(|(name, re)| re.find(text).map(|m| (m.start(), name.as_str())))
            .collect();
        found.sort_by_key(|(pos, _)| *pos);
        Some(found.into_iter().map(|(_, name)| name.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_reports_no_capability() {
        assert!(Unavailable.organizations("Blue Apron").is_none());
    }

    #[test]
    fn gazetteer_finds_names_in_text_order() {
        let gazetteer = GazetteerRecognizer::new(["Home Chef", "Blue Apron", "Sunbasket"]);
        let orgs = gazetteer
            .organizations("Try blue apron first, then HOME CHEF.")
            .unwrap();
        assert_eq!(orgs, vec!["Blue Apron", "Home Chef"]);
    }

    #[test]
    fn gazetteer_requires_whole_words() {
        let gazetteer = GazetteerRecognizer::new(["Factor"]);
        let orgs = gazetteer.organizations("the factory floor").unwrap();
        assert!(orgs.is_empty());
    }

    #[test]
    fn blank_entries_are_skipped() {
        let gazetteer = GazetteerRecognizer::new(["", "  "]);
        assert!(gazetteer.is_empty());
    }
}
