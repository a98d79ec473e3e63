//! Row caching with TTL support

use std::time::{Duration, SystemTime};
use dashmap::DashMap;
use packit_core::types::PackageMetadata;

/// Default time-to-live for cached rows
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Cache entry with TTL
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Cached rows for one package name
    pub rows: Vec<PackageMetadata>,
    /// When the entry was stored
    pub stored_at: SystemTime,
    /// Time-to-live duration
    pub ttl: Duration,
}

impl CacheEntry {
    /// Create cache entry with custom TTL
    pub fn with_ttl(rows: Vec<PackageMetadata>, ttl: Duration) -> Self {
        Self {
            rows,
            stored_at: SystemTime::now(),
            ttl,
        }
    }

    /// Check if cache entry is still fresh
    pub fn is_fresh(&self) -> bool {
        match self.stored_at.elapsed() {
            Ok(elapsed) => elapsed < self.ttl,
            Err(_) => false, // Clock went backwards, consider stale
        }
    }
}

/// In-memory cache of registry rows keyed by package name
#[derive(Debug)]
pub struct RowCache {
    cache: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl RowCache {
    /// Create a row cache with the default TTL
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Create a row cache; a zero TTL disables caching
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            cache: DashMap::new(),
            ttl,
        }
    }

    /// Whether inserts are kept at all
    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// Get cached rows if fresh
    pub fn get(&self, package_name: &str) -> Option<Vec<PackageMetadata>> {
        let fresh = self.cache.get(package_name)?.is_fresh();
        if fresh {
            self.cache.get(package_name).map(|entry| entry.rows.clone())
        } else {
            // Remove stale entry
            self.cache.remove(package_name);
            None
        }
    }

    /// Store rows for a package name
    pub fn insert(&self, package_name: String, rows: Vec<PackageMetadata>) {
        if self.is_enabled() {
            self.cache.insert(package_name, CacheEntry::with_ttl(rows, self.ttl));
        }
    }
}

impl Default for RowCache {
    fn default() -> Self {
        Self::new()
    }
}
