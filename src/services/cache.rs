//! Extraction result caching
//!
//! Provides an in-memory caching layer for extraction results so that
//! repeated uploads of the same document skip the parse entirely. Keys
//! are content digests, so the cache is immune to filename games.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use sha2::{Digest, Sha256};
use tokio::sync::RwLock;
use tracing::debug;

use crate::config::CacheConfig;
use crate::models::Extraction;

/// Cache entry with expiration tracking
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub data: T,
    pub inserted_at: Instant,
    pub ttl: Duration,
}

impl<T> CacheEntry<T> {
    pub fn new(data: T, ttl: Duration) -> Self {
        Self {
            data,
            inserted_at: Instant::now(),
            ttl,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.inserted_at.elapsed() > self.ttl
    }
}

/// Generic cache storage with TTL support
#[derive(Debug)]
pub struct Cache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    entries: RwLock<HashMap<K, CacheEntry<V>>>,
    max_entries: usize,
    default_ttl: Duration,
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(max_entries: usize, default_ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_entries,
            default_ttl,
        }
    }

    /// Get a value from cache if it exists and is not expired
    pub async fn get(&self, key: &K) -> Option<V> {
        let entries = self.entries.read().await;
        if let Some(entry) = entries.get(key) {
            if !entry.is_expired() {
                return Some(entry.data.clone());
            }
        }
        None
    }

    /// Set a value in cache with the default TTL
    pub async fn set(&self, key: K, value: V) {
        self.set_with_ttl(key, value, self.default_ttl).await;
    }

    /// Set a value in cache with a custom TTL
    pub async fn set_with_ttl(&self, key: K, value: V, ttl: Duration) {
        let mut entries = self.entries.write().await;

        // Evict expired entries if we're at capacity
        if entries.len() >= self.max_entries {
            self.evict_expired_locked(&mut entries);
        }

        // If still at capacity, remove the oldest entry
        if entries.len() >= self.max_entries {
            if let Some(oldest_key) = self.find_oldest_key(&entries) {
                entries.remove(&oldest_key);
            }
        }

        entries.insert(key, CacheEntry::new(value, ttl));
    }

    /// Clear all entries from cache
    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        entries.clear();
    }

    /// Remove all expired entries
    pub async fn evict_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        self.evict_expired_locked(&mut entries)
    }

    fn evict_expired_locked(&self, entries: &mut HashMap<K, CacheEntry<V>>) -> usize {
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired());
        before - entries.len()
    }

    fn find_oldest_key(&self, entries: &HashMap<K, CacheEntry<V>>) -> Option<K> {
        entries
            .iter()
            .min_by_key(|(_, entry)| entry.inserted_at)
            .map(|(k, _)| k.clone())
    }

    /// Get cache statistics
    pub async fn stats(&self) -> CacheStats {
        let entries = self.entries.read().await;
        let total = entries.len();
        let expired = entries.values().filter(|e| e.is_expired()).count();

        CacheStats {
            total_entries: total,
            expired_entries: expired,
            valid_entries: total - expired,
            max_entries: self.max_entries,
        }
    }
}

/// Cache statistics snapshot
#[derive(Debug, Clone, serde::Serialize)]
pub struct CacheStats {
    pub total_entries: usize,
    pub expired_entries: usize,
    pub valid_entries: usize,
    pub max_entries: usize,
}

/// Content-addressed cache of extraction results
#[derive(Debug)]
pub struct TextCache {
    inner: Cache<String, Extraction>,
}

impl TextCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            inner: Cache::new(config.max_entries, Duration::from_secs(config.ttl_secs)),
        }
    }

    /// Cache key for a document: hex SHA-256 of its bytes
    pub fn content_key(data: &[u8]) -> String {
        hex::encode(Sha256::digest(data))
    }

    pub async fn get(&self, key: &str) -> Option<Extraction> {
        let hit = self.inner.get(&key.to_string()).await;
        if hit.is_some() {
            debug!(key = %key, "extraction cache hit");
        }
        hit
    }

    pub async fn set(&self, key: String, extraction: Extraction) {
        self.inner.set(key, extraction).await;
    }

    pub async fn clear(&self) {
        self.inner.clear().await;
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.stats().await
    }
}
