//! Canonical brand name plus the surface forms used for exact matching.

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Corporate suffixes stripped to widen exact-match recall.
const STRIPPABLE_SUFFIXES: &[&str] = &[" inc", " llc", " corp", " co", ".com", " inc.", " llc."];

/// A brand's canonical name and its lowercase variations.
///
/// Variations are generated once, in a fixed order: the lowercase canonical
/// name first, then suffix-stripped forms, then the space-removed form.
/// Exact matching walks them in that order, so the order is part of the
/// contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredIdentity")]
pub struct BrandIdentity {
    canonical: String,
    variations: Vec<String>,
}

/// Serialized shape. Stored variations are ignored and regenerated.
#[derive(Deserialize)]
struct StoredIdentity {
    canonical: String,
}

impl TryFrom<StoredIdentity> for BrandIdentity {
    type Error = CoreError;

    fn try_from(stored: StoredIdentity) -> Result<Self, Self::Error> {
        Self::new(&stored.canonical)
    }
}

impl BrandIdentity {
    /// Build an identity from a canonical brand name.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyBrandName`] if `name` is blank.
    pub fn new(name: &str) -> Result<Self, CoreError> {
        let canonical = name.trim();
        if canonical.is_empty() {
            return Err(CoreError::EmptyBrandName);
        }

        Ok(Self {
            canonical: canonical.to_string(),
            variations: generate_variations(canonical),
        })
    }

    /// The brand name as supplied (trimmed).
    #[must_use]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Lowercase canonical name.
    #[must_use]
    pub fn lowercase(&self) -> &str {
        // Always the first variation.
        &self.variations[0]
    }

    /// All lowercase surface forms in generation order.
    #[must_use]
    pub fn variations(&self) -> &[String] {
        &self.variations
    }

    /// Number of whitespace-separated words in the canonical name (min 1).
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.canonical.split_whitespace().count().max(1)
    }
}

fn generate_variations(canonical: &str) -> Vec<String> {
    let lower = canonical.to_lowercase();
    let mut variations = vec![lower.clone()];

    for suffix in STRIPPABLE_SUFFIXES {
        if let Some(stripped) = lower.strip_suffix(suffix) {
            let clean = stripped.trim().to_string();
            if !clean.is_empty() && !variations.contains(&clean) {
                variations.push(clean);
            }
        }
    }

    let no_space: String = lower.chars().filter(|c| *c != ' ').collect();
    if !variations.contains(&no_space) {
        variations.push(no_space);
    }

    variations
}
