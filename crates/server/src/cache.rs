//! Short-lived cache for resolved media assets.
//!
//! Bounds the number of catalog calls when the same movies come up in
//! consecutive requests. Process-local, never persisted.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::types::{MediaAssets, MediaKey};

/// Mapping with expiry used by the enricher
pub trait MetadataCache: Send + Sync {
    /// A live entry for `key`, if any
    fn get(&self, key: &MediaKey) -> Option<MediaAssets>;

    /// Store `assets` under `key`; the last writer wins
    fn insert(&self, key: MediaKey, assets: MediaAssets);
}

/// In-memory [`MetadataCache`] whose entries expire `ttl` after insertion.
pub struct TtlCache {
    ttl: Duration,
    entries: Mutex<HashMap<MediaKey, (Instant, MediaAssets)>>,
}

impl TtlCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of stored entries, expired ones included until the next insert
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MetadataCache for TtlCache {
    fn get(&self, key: &MediaKey) -> Option<MediaAssets> {
        let mut entries = self.entries.lock();
        let expired = match entries.get(key) {
            Some((stored_at, assets)) if stored_at.elapsed() < self.ttl => {
                return Some(assets.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.remove(key);
        }
        None
    }

    fn insert(&self, key: MediaKey, assets: MediaAssets) {
        let mut entries = self.entries.lock();
        let ttl = self.ttl;
        entries.retain(|_, (stored_at, _)| stored_at.elapsed() < ttl);
        entries.insert(key, (Instant::now(), assets));
    }
}
