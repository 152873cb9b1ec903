//! Image Cache Module
//!
//! Bounded store of decoded images keyed by filesystem path, combining
//! HashMap storage with FIFO insertion-order eviction.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::cache::{CacheStats, FifoTracker};
use crate::error::{RelayError, Result};
use crate::image::ImageHandle;

// == Image Cache ==
/// Fixed-capacity store of decoded image handles.
///
/// Paths are used verbatim as keys; no normalization is applied, so
/// `./a.png` and `a.png` are distinct entries. When an insert would push
/// the resident count past capacity, the least recently inserted entry is
/// evicted first. Handles are shared out as `Arc` so lookups are cheap and
/// evicted images stay alive for callers still holding them.
#[derive(Debug)]
pub struct ImageCache {
    /// Path-to-handle storage
    entries: HashMap<String, Arc<ImageHandle>>,
    /// Insertion-order tracker
    order: FifoTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of images allowed
    capacity: usize,
}

impl ImageCache {
    // == Constructor ==
    /// Creates a new ImageCache holding at most `capacity` images.
    ///
    /// A capacity of zero is clamped to one; the cache must be able to
    /// hold the image a load just produced.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: FifoTracker::new(),
            stats: CacheStats::new(),
            capacity: capacity.max(1),
        }
    }

    // == Insert ==
    /// Inserts or replaces the image under `path`.
    ///
    /// Replacing an existing path does not change the resident count but
    /// does refresh the entry's insertion position. When a new path would
    /// exceed capacity, the oldest-inserted entry is evicted first.
    pub fn insert(&mut self, path: String, handle: Arc<ImageHandle>) {
        let is_replace = self.entries.contains_key(&path);

        if !is_replace && self.entries.len() >= self.capacity {
            if let Some(evicted) = self.order.evict_oldest() {
                self.entries.remove(&evicted);
                self.stats.record_eviction();
                debug!(path = %evicted, "evicted image from cache");
            }
        }

        self.entries.insert(path.clone(), handle);
        self.order.record_insert(&path);
        self.stats.record_load();
        self.stats.set_resident(self.entries.len());
    }

    // == Get ==
    /// Retrieves the image handle for `path`.
    ///
    /// Lookups do not affect eviction order. Absence is a recoverable
    /// condition: the caller is expected to load the path first.
    pub fn get(&mut self, path: &str) -> Result<Arc<ImageHandle>> {
        match self.entries.get(path) {
            Some(handle) => {
                self.stats.record_hit();
                Ok(Arc::clone(handle))
            }
            None => {
                self.stats.record_miss();
                Err(RelayError::NotFound(path.to_string()))
            }
        }
    }

    // == Contains ==
    /// Returns true if `path` is currently resident.
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_resident(self.entries.len());
        stats
    }

    // == Capacity ==
    /// Returns the configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Length ==
    /// Returns the current number of resident images.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    use crate::image::Header;

    fn handle() -> Arc<ImageHandle> {
        let data = array![[1.0, 2.0], [3.0, 4.0]].into_dyn();
        Arc::new(ImageHandle::new(data, Header::new()))
    }

    #[test]
    fn test_cache_new() {
        let cache = ImageCache::new(10);
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 10);
    }

    #[test]
    fn test_cache_zero_capacity_clamped() {
        let cache = ImageCache::new(0);
        assert_eq!(cache.capacity(), 1);
    }

    #[test]
    fn test_cache_insert_and_get() {
        let mut cache = ImageCache::new(10);

        cache.insert("img.png".to_string(), handle());
        let found = cache.get("img.png").unwrap();

        assert_eq!(found.shape(), vec![2, 2]);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_get_missing() {
        let mut cache = ImageCache::new(10);

        let result = cache.get("nowhere.png");
        assert!(matches!(result, Err(RelayError::NotFound(_))));
    }

    #[test]
    fn test_cache_capacity_invariant() {
        let mut cache = ImageCache::new(3);

        for i in 0..7 {
            cache.insert(format!("img{i}.png"), handle());
            assert!(cache.len() <= 3);
        }
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_cache_fifo_eviction_order() {
        let mut cache = ImageCache::new(3);

        cache.insert("a.png".to_string(), handle());
        cache.insert("b.png".to_string(), handle());
        cache.insert("c.png".to_string(), handle());

        // Cache is full; inserting a fourth path evicts the first inserted
        cache.insert("d.png".to_string(), handle());

        assert_eq!(cache.len(), 3);
        assert!(!cache.contains("a.png"));
        assert!(cache.contains("b.png"));
        assert!(cache.contains("c.png"));
        assert!(cache.contains("d.png"));
    }

    #[test]
    fn test_cache_lookup_does_not_reorder() {
        let mut cache = ImageCache::new(2);

        cache.insert("a.png".to_string(), handle());
        cache.insert("b.png".to_string(), handle());

        // Under LRU this lookup would save "a.png"; FIFO ignores it
        cache.get("a.png").unwrap();
        cache.insert("c.png".to_string(), handle());

        assert!(!cache.contains("a.png"));
        assert!(cache.contains("b.png"));
        assert!(cache.contains("c.png"));
    }

    #[test]
    fn test_cache_replace_keeps_resident_count() {
        let mut cache = ImageCache::new(3);

        cache.insert("a.png".to_string(), handle());
        cache.insert("b.png".to_string(), handle());
        cache.insert("a.png".to_string(), handle());

        assert_eq!(cache.len(), 2);
        let stats = cache.stats();
        assert_eq!(stats.evictions, 0);
        assert_eq!(stats.loads, 3);
    }

    #[test]
    fn test_cache_replace_refreshes_insertion_order() {
        let mut cache = ImageCache::new(2);

        cache.insert("a.png".to_string(), handle());
        cache.insert("b.png".to_string(), handle());
        // Re-loading "a.png" makes it the newest insertion
        cache.insert("a.png".to_string(), handle());

        cache.insert("c.png".to_string(), handle());

        assert!(cache.contains("a.png"));
        assert!(!cache.contains("b.png"));
        assert!(cache.contains("c.png"));
    }

    #[test]
    fn test_cache_stats() {
        let mut cache = ImageCache::new(10);

        cache.insert("a.png".to_string(), handle());
        cache.get("a.png").unwrap(); // hit
        let _ = cache.get("missing.png"); // miss

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.loads, 1);
        assert_eq!(stats.resident, 1);
    }

    #[test]
    fn test_cache_evicted_handle_stays_alive_for_holders() {
        let mut cache = ImageCache::new(1);

        cache.insert("a.png".to_string(), handle());
        let held = cache.get("a.png").unwrap();

        cache.insert("b.png".to_string(), handle());

        // "a.png" is gone from the cache, but the held Arc is still valid
        assert!(!cache.contains("a.png"));
        assert_eq!(held.shape(), vec![2, 2]);
    }
}
