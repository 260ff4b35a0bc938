//! Time-expiring response cache for deduplicating collaborator calls.
//!
//! Entries are keyed by the SHA-256 of `"{model}:{normalized query}"`, where
//! normalization lowercases and collapses whitespace, so near-identical
//! prompts share an entry.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::InsightError;
use crate::provider::InsightProvider;

pub const DEFAULT_TTL_HOURS: u64 = 24;

/// Keyed store of cached responses.
pub trait ResponseCache: Send + Sync {
    fn get(&self, query: &str, model: &str) -> Option<String>;
    fn set(&self, query: &str, model: &str, response: String);
    fn clear(&self);
    /// Drop expired entries; returns how many were removed.
    fn cleanup_expired(&self) -> usize;
    fn stats(&self) -> CacheStats;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStats {
    pub total_entries: usize,
    pub active_entries: usize,
    pub expired_entries: usize,
    pub ttl_hours: f64,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    response: String,
    expires_at: DateTime<Utc>,
}

/// In-process [`ResponseCache`] with a fixed TTL.
#[derive(Debug)]
pub struct QueryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL_HOURS)
    }
}

impl QueryCache {
    #[must_use]
    pub fn new(ttl_hours: u64) -> Self {
        let hours = i64::try_from(ttl_hours).unwrap_or(i64::MAX);
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl: Duration::try_hours(hours).unwrap_or(Duration::MAX),
        }
    }

    /// Cache key for a (query, model) pair.
    #[must_use]
    pub fn key(query: &str, model: &str) -> String {
        let normalized = normalize_query(query);
        format!("{:x}", Sha256::digest(format!("{model}:{normalized}").as_bytes()))
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn get_at(&self, query: &str, model: &str, now: DateTime<Utc>) -> Option<String> {
        let key = Self::key(query, model);
        let mut entries = self.lock();
        match entries.get(&key) {
            Some(entry) if now > entry.expires_at => {
                entries.remove(&key);
                None
            }
            Some(entry) => Some(entry.response.clone()),
            None => None,
        }
    }

    pub(crate) fn set_at(&self, query: &str, model: &str, response: String, now: DateTime<Utc>) {
        let expires_at = now.checked_add_signed(self.ttl).unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.lock()
            .insert(Self::key(query, model), CacheEntry { response, expires_at });
    }

    pub(crate) fn cleanup_expired_at(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| now <= entry.expires_at);
        before - entries.len()
    }

    pub(crate) fn stats_at(&self, now: DateTime<Utc>) -> CacheStats {
        let entries = self.lock();
        let active = entries.values().filter(|e| now <= e.expires_at).count();
        #[allow(clippy::cast_precision_loss)]
        let ttl_hours = self.ttl.num_seconds() as f64 / 3600.0;
        CacheStats {
            total_entries: entries.len(),
            active_entries: active,
            expired_entries: entries.len() - active,
            ttl_hours,
        }
    }
}

impl ResponseCache for QueryCache {
    fn get(&self, query: &str, model: &str) -> Option<String> {
        self.get_at(query, model, Utc::now())
    }

    fn set(&self, query: &str, model: &str, response: String) {
        self.set_at(query, model, response, Utc::now());
    }

    fn clear(&self) {
        self.lock().clear();
    }

    fn cleanup_expired(&self) -> usize {
        self.cleanup_expired_at(Utc::now())
    }

    fn stats(&self) -> CacheStats {
        self.stats_at(Utc::now())
    }
}

/// Lowercase, trim, and collapse runs of whitespace to single spaces.
#[must_use]
pub fn normalize_query(query: &str) -> String {
    query
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Provider decorator that serves repeated prompts from a cache.
///
/// Only successful completions are cached.
#[derive(Debug)]
pub struct CachingProvider<P, C = QueryCache> {
    inner: P,
    cache: C,
    model: String,
}

impl<P: InsightProvider, C: ResponseCache> CachingProvider<P, C> {
    /// `model` namespaces cache keys so different backends never share entries.
    pub fn new(inner: P, cache: C, model: &str) -> Self {
        Self {
            inner,
            cache,
            model: model.to_string(),
        }
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }
}

impl<P: InsightProvider, C: ResponseCache> InsightProvider for CachingProvider<P, C> {
    async fn generate(&self, prompt: &str) -> Result<String, InsightError> {
        if let Some(hit) = self.cache.get(prompt, &self.model) {
            tracing::debug!(model = %self.model, "insight cache hit");
            return Ok(hit);
        }
        let text = self.inner.generate(prompt).await?;
        self.cache.set(prompt, &self.model, text.clone());
        Ok(text)
    }
}
