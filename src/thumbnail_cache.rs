// SPDX-License-Identifier: MPL-2.0
//! Bounded cache of decoded grid thumbnails.
//!
//! Thumbnails are fetched over HTTP and decoded off the UI thread; the
//! resulting widget handles are kept in an LRU keyed by photo ID so
//! scrolling back through the grid does not refetch. A pending set prevents
//! duplicate in-flight fetches; a failed fetch stays pending, so it is not
//! hammered again (nothing in this layer retries automatically).

use crate::api::types::PhotoId;
use iced::widget::image;
use lru::LruCache;
use std::collections::HashSet;
use std::num::NonZeroUsize;

/// Default number of decoded thumbnails kept in memory.
pub const DEFAULT_CAPACITY: usize = 512;

#[derive(Debug)]
pub struct ThumbnailCache {
    cache: LruCache<PhotoId, image::Handle>,
    pending: HashSet<PhotoId>,
}

impl Default for ThumbnailCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl ThumbnailCache {
    /// Creates a cache holding at most `capacity` decoded thumbnails.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).expect("capacity is at least 1");
        Self {
            cache: LruCache::new(capacity),
            pending: HashSet::new(),
        }
    }

    /// Returns the cached handle, refreshing its recency.
    pub fn get(&mut self, id: PhotoId) -> Option<image::Handle> {
        self.cache.get(&id).cloned()
    }

    /// Returns the cached handle without touching recency; usable from
    /// rendering code that only holds a shared reference.
    #[must_use]
    pub fn peek(&self, id: PhotoId) -> Option<&image::Handle> {
        self.cache.peek(&id)
    }

    /// Marks a fetch as in flight. Returns `true` when the caller should
    /// actually spawn the fetch (not cached, not already pending).
    pub fn begin_fetch(&mut self, id: PhotoId) -> bool {
        if self.cache.contains(&id) {
            return false;
        }
        self.pending.insert(id)
    }

    /// Stores a decoded thumbnail and clears its pending mark.
    pub fn insert(&mut self, id: PhotoId, handle: image::Handle) {
        self.pending.remove(&id);
        self.cache.put(id, handle);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

/// Decodes fetched thumbnail bytes into a widget handle.
pub fn handle_from_bytes(bytes: &[u8]) -> crate::error::Result<image::Handle> {
    let decoded = image_rs::load_from_memory(bytes)?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(image::Handle::from_rgba(width, height, rgba.into_raw()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle() -> image::Handle {
        image::Handle::from_rgba(1, 1, vec![255, 0, 0, 255])
    }

    #[test]
    fn begin_fetch_dedupes_in_flight_requests() {
        let mut cache = ThumbnailCache::new(4);
        assert!(cache.begin_fetch(1));
        assert!(!cache.begin_fetch(1));
    }

    #[test]
    fn insert_makes_handle_available_and_clears_pending() {
        let mut cache = ThumbnailCache::new(4);
        cache.begin_fetch(1);
        cache.insert(1, handle());

        assert!(cache.get(1).is_some());
        // Cached now, so no new fetch is requested.
        assert!(!cache.begin_fetch(1));
    }

    #[test]
    fn capacity_evicts_least_recently_used() {
        let mut cache = ThumbnailCache::new(2);
        cache.insert(1, handle());
        cache.insert(2, handle());

        // Touch 1 so that 2 is the eviction candidate.
        cache.get(1);
        cache.insert(3, handle());

        assert!(cache.get(1).is_some());
        assert!(cache.get(2).is_none());
        assert!(cache.get(3).is_some());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn failed_fetch_is_not_retried() {
        let mut cache = ThumbnailCache::new(4);
        assert!(cache.begin_fetch(9));
        // No insert ever happens (the fetch failed); the ID stays pending.
        assert!(!cache.begin_fetch(9));
    }
}
