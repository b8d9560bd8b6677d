// core/src/engine.rs
//
// Per-session prediction front end: a shared, read-only PredictionIndex plus
// a private LRU cache of prefix -> candidates.

use crate::prediction::PredictionIndex;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Prediction engine owned by one composition session.
///
/// The index is shared between sessions; the cache and its counters are not,
/// so no interior mutability or locking is needed.
pub struct Engine {
    index: Arc<PredictionIndex>,
    cache: Option<LruCache<String, Vec<String>>>,
    cache_hits: usize,
    cache_misses: usize,
}

impl Engine {
    /// Create an engine over `index` caching up to `cache_size` prefixes.
    ///
    /// A `cache_size` of 0 disables caching.
    pub fn new(index: Arc<PredictionIndex>, cache_size: usize) -> Self {
        Self {
            index,
            cache: NonZeroUsize::new(cache_size).map(LruCache::new),
            cache_hits: 0,
            cache_misses: 0,
        }
    }

    /// The shared index this engine queries.
    pub fn index(&self) -> &Arc<PredictionIndex> {
        &self.index
    }

    /// Candidates for `prefix`, served from the cache when possible.
    pub fn predict(&mut self, prefix: &str) -> Vec<String> {
        let Some(cache) = self.cache.as_mut() else {
            return self.index.predict(prefix);
        };

        if let Some(cached) = cache.get(prefix) {
            self.cache_hits += 1;
            return cached.clone();
        }

        self.cache_misses += 1;
        let candidates = self.index.predict(prefix);
        cache.put(prefix.to_string(), candidates.clone());
        candidates
    }

    /// Get cache statistics for monitoring.
    ///
    /// Returns (hits, misses) tuple.
    pub fn cache_stats(&self) -> (usize, usize) {
        (self.cache_hits, self.cache_misses)
    }

    /// Get cache hit rate as a percentage (0.0 to 100.0).
    ///
    /// Returns None if no cache accesses have been made yet.
    pub fn cache_hit_rate(&self) -> Option<f32> {
        let total = self.cache_hits + self.cache_misses;
        if total == 0 {
            None
        } else {
            Some((self.cache_hits as f32 / total as f32) * 100.0)
        }
    }

    /// Current number of cached prefixes.
    pub fn cache_size(&self) -> usize {
        self.cache.as_ref().map_or(0, |c| c.len())
    }

    /// Maximum number of cached prefixes (0 when caching is disabled).
    pub fn cache_capacity(&self) -> usize {
        self.cache.as_ref().map_or(0, |c| c.cap().get())
    }

    /// Clear the cache and its counters.
    pub fn clear_cache(&mut self) {
        if let Some(cache) = self.cache.as_mut() {
            cache.clear();
        }
        self.cache_hits = 0;
        self.cache_misses = 0;
    }
}
