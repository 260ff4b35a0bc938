use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{BrandIdentity, ConfigError, CoreError};

/// Analysis profile for one tracked brand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandProfile {
    pub name: String,
    pub industry: String,
    /// Query terms describing features the brand plausibly offers.
    #[serde(default)]
    pub feature_keywords: Vec<String>,
    /// Query terms that mark a query as belonging to the brand's industry.
    #[serde(default)]
    pub industry_keywords: Vec<String>,
    /// Organisation names fed to the gazetteer entity recognizer.
    #[serde(default)]
    pub known_competitors: Vec<String>,
    pub notes: Option<String>,
}

impl BrandProfile {
    /// Minimal profile with no keyword overrides.
    #[must_use]
    pub fn new(name: &str, industry: &str) -> Self {
        Self {
            name: name.to_string(),
            industry: industry.to_string(),
            feature_keywords: Vec::new(),
            industry_keywords: Vec::new(),
            known_competitors: Vec::new(),
            notes: None,
        }
    }

    /// Generate a URL-safe slug from the brand name.
    #[must_use]
    pub fn slug(&self) -> String {
        self.name
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' {
                    c
                } else if c == ' ' {
                    '-'
                } else {
                    '\0'
                }
            })
            .filter(|&c| c != '\0')
            .collect::<String>()
            .split('-')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Build the matching identity for this brand.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyBrandName`] if the profile name is blank.
    pub fn identity(&self) -> Result<BrandIdentity, CoreError> {
        BrandIdentity::new(&self.name)
    }
}

#[derive(Debug, Deserialize)]
pub struct BrandsFile {
    pub brands: Vec<BrandProfile>,
}

impl BrandsFile {
    /// Case-insensitive lookup by brand name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&BrandProfile> {
        let wanted = name.trim().to_lowercase();
        self.brands
            .iter()
            .find(|b| b.name.trim().to_lowercase() == wanted)
    }
}

/// Load and validate brand profiles from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_brands(path: &Path) -> Result<BrandsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::BrandsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let brands_file: BrandsFile =
        serde_yaml::from_str(&content).map_err(ConfigError::BrandsFileParse)?;

    validate_brands(&brands_file)?;

    Ok(brands_file)
}

fn validate_brands(brands_file: &BrandsFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();
    let mut seen_slugs = HashSet::new();

    for brand in &brands_file.brands {
        if brand.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "brand name must be non-empty".to_string(),
            ));
        }

        if brand.industry.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "brand '{}' must declare an industry",
                brand.name
            )));
        }

        let lower_name = brand.name.to_lowercase();
        if !seen_names.insert(lower_name) {
            return Err(ConfigError::Validation(format!(
                "duplicate brand name: '{}'",
                brand.name
            )));
        }

        let slug = brand.slug();
        if !seen_slugs.insert(slug.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate brand slug: '{}' (from brand '{}')",
                slug, brand.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "brands_test.rs"]
mod tests;
