//! Query cache counters.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters owned by one [`QueryCache`](super::QueryCache).
#[derive(Debug, Default)]
pub struct CacheMetrics {
    /// Reads answered from the cache, fresh or stale
    hits: AtomicUsize,

    /// Reads that found nothing usable and had to wait for the network
    misses: AtomicUsize,

    /// Network fetches, foreground and background
    fetches: AtomicUsize,

    /// Fetches that failed after retries
    fetch_failures: AtomicUsize,

    /// Entries dropped by invalidation
    invalidated: AtomicUsize,
}

impl CacheMetrics {
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fetch(&self) {
        self.fetches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fetch_failure(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_invalidated(&self, entries: usize) {
        self.invalidated.fetch_add(entries, Ordering::Relaxed);
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }

    pub fn fetch_failures(&self) -> usize {
        self.fetch_failures.load(Ordering::Relaxed)
    }

    pub fn invalidated(&self) -> usize {
        self.invalidated.load(Ordering::Relaxed)
    }

    pub fn report(&self) -> CacheMetricsReport {
        let hits = self.hits();
        let misses = self.misses();
        let reads = hits + misses;
        let hit_rate = if reads > 0 {
            (hits as f64 / reads as f64) * 100.0
        } else {
            0.0
        };

        let fetches = self.fetches();
        let fetch_failures = self.fetch_failures();
        let fetch_success_rate = if fetches > 0 {
            (fetches.saturating_sub(fetch_failures) as f64 / fetches as f64) * 100.0
        } else {
            0.0
        };

        CacheMetricsReport {
            hits,
            misses,
            hit_rate,
            fetches,
            fetch_failures,
            fetch_success_rate,
            invalidated: self.invalidated(),
        }
    }
}

/// Snapshot of the cache counters.
#[derive(Debug, Clone, Serialize)]
pub struct CacheMetricsReport {
    pub hits: usize,
    pub misses: usize,

    /// Percentage of reads served from the cache (0-100)
    pub hit_rate: f64,

    pub fetches: usize,
    pub fetch_failures: usize,

    /// Percentage of fetches that succeeded (0-100)
    pub fetch_success_rate: f64,

    pub invalidated: usize,
}
