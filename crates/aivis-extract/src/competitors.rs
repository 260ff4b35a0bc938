//! Competitor name extraction.
//!
//! Three heuristics are unioned in a fixed order: organisation entities from
//! the configured [`EntityRecognizer`], capitalised word runs, and capitalised
//! phrases right after a numbered-list marker. The result keeps first-seen
//! order, is deduplicated by exact string, and is capped at
//! [`MAX_COMPETITORS`].

use std::collections::HashSet;
use std::sync::LazyLock;

use aivis_core::BrandIdentity;
use regex::Regex;

use crate::entities::EntityRecognizer;

pub const MAX_COMPETITORS: usize = 10;

/// Capitalised words that start sentences far more often than they name brands.
const CAPITALIZED_STOPLIST: &[&str] = &[
    "The", "This", "That", "These", "Those", "When", "Where", "What", "Which",
];

/// Entity texts too generic to be an organisation.
const ENTITY_STOPLIST: &[&str] = &["the", "a", "an", "inc", "llc"];

static CAPITALIZED_RUN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)\b").expect("valid capitalised run regex")
});
static NUMBERED_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+[.)]\s*\*?\*?([A-Z][a-zA-Z\s]+?)(?:\s*[-–—:]|\n|$)")
        .expect("valid numbered name regex")
});

/// Extract competitor names from `text`, excluding any surface form of
/// `brand`.
#[must_use]
pub fn extract_competitors(
    text: &str,
    brand: &BrandIdentity,
    recognizer: &dyn EntityRecognizer,
) -> Vec<String> {
    let mut collector = Collector::new(brand);

    if let Some(orgs) = recognizer.organizations(text) {
        for org in orgs {
            let name = org.trim();
            if !ENTITY_STOPLIST.contains(&name.to_lowercase().as_str()) && name.chars().count() > 2 {
                collector.push(name);
            }
        }
    }

    for caps in CAPITALIZED_RUN_RE.captures_iter(text) {
        let Some(run) = caps.get(1) else { continue };
        let name = run.as_str();
        if name.chars().count() > 3 && !CAPITALIZED_STOPLIST.contains(&name) {
            collector.push(name);
        }
    }

    for caps in NUMBERED_NAME_RE.captures_iter(text) {
        let Some(phrase) = caps.get(1) else { continue };
        let name = phrase.as_str().trim();
        if name.chars().count() > 3 {
            collector.push(name);
        }
    }

    collector.finish()
}

/// Insertion-ordered, exact-string set that drops the brand's own names.
struct Collector<'a> {
    brand: &'a BrandIdentity,
    seen: HashSet<String>,
    names: Vec<String>,
}

impl<'a> Collector<'a> {
    fn new(brand: &'a BrandIdentity) -> Self {
        Self {
            brand,
            seen: HashSet::new(),
            names: Vec::new(),
        }
    }

    fn push(&mut self, name: &str) {
        let lower = name.to_lowercase();
        if self.brand.variations().iter().any(|v| *v == lower) {
            return;
        }
        if self.seen.insert(name.to_string()) {
            self.names.push(name.to_string());
        }
    }

    fn finish(mut self) -> Vec<String> {
        self.names.truncate(MAX_COMPETITORS);
        self.names
    }
}
