//! Rendered-glyph caching
//!
//! Rasterizing the same character at the same size over and over is wasted
//! work, so finished bitmaps are kept in an LRU keyed by (size, character).
//!
//! A miss computes the value while holding the cache lock. That gives every
//! key a single writer: two threads asking for the same glyph at once will
//! rasterize it once, and nobody ever sees a half-built bitmap.

use lru::LruCache;
use parking_lot::Mutex;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::Arc;

use crate::config::DEFAULT_BITMAP_CACHE_CAPACITY;
use crate::types::CoverageBitmap;

/// Identifies one rendered glyph
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct BitmapKey {
    /// Effective pixel size after any per-character scaling
    pub pixel_size: u32,
    pub ch: char,
}

impl BitmapKey {
    pub fn new(pixel_size: u32, ch: char) -> Self {
        Self { pixel_size, ch }
    }
}

/// Hit/miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheMetrics {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
    pub capacity: usize,
}

impl CacheMetrics {
    pub fn total_requests(&self) -> u64 {
        self.hits + self.misses
    }

    pub fn hit_rate(&self) -> f64 {
        let total = self.total_requests();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

struct Inner<K: Hash + Eq, V> {
    entries: LruCache<K, V>,
    hits: u64,
    misses: u64,
}

/// LRU cache with at-most-one computation per key
pub struct RenderCache<K: Hash + Eq, V: Clone> {
    inner: Mutex<Inner<K, V>>,
    capacity: NonZeroUsize,
}

/// Fallback when a caller asks for zero capacity
const FALLBACK_CAPACITY: NonZeroUsize = match NonZeroUsize::new(DEFAULT_BITMAP_CACHE_CAPACITY) {
    Some(v) => v,
    None => unreachable!(),
};

impl<K: Hash + Eq, V: Clone> RenderCache<K, V> {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(FALLBACK_CAPACITY);
        Self {
            inner: Mutex::new(Inner {
                entries: LruCache::new(capacity),
                hits: 0,
                misses: 0,
            }),
            capacity,
        }
    }

    /// Look up a value, counting the hit or miss
    pub fn get(&self, key: &K) -> Option<V> {
        let mut inner = self.inner.lock();
        match inner.entries.get(key).cloned() {
            Some(value) => {
                inner.hits += 1;
                Some(value)
            },
            None => {
                inner.misses += 1;
                None
            },
        }
    }

    /// Store a value, evicting the least recently used entry when full
    pub fn insert(&self, key: K, value: V) {
        self.inner.lock().entries.put(key, value);
    }

    /// Return the cached value or build, store and return a new one
    ///
    /// `build` runs with the lock held. Failures are not cached, so a later
    /// call will try again.
    pub fn get_or_try_insert_with<E>(
        &self,
        key: K,
        build: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E> {
        let mut inner = self.inner.lock();
        if let Some(value) = inner.entries.get(&key).cloned() {
            inner.hits += 1;
            return Ok(value);
        }

        inner.misses += 1;
        let value = build()?;
        inner.entries.put(key, value.clone());
        Ok(value)
    }

    pub fn clear(&self) {
        self.inner.lock().entries.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn metrics(&self) -> CacheMetrics {
        let inner = self.inner.lock();
        CacheMetrics {
            hits: inner.hits,
            misses: inner.misses,
            entries: inner.entries.len(),
            capacity: self.capacity.get(),
        }
    }
}

/// The cache every font program keeps for its rendered glyphs
pub type BitmapCache = RenderCache<BitmapKey, Arc<CoverageBitmap>>;
