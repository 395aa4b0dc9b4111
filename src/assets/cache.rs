use std::collections::HashMap;
use std::sync::Arc;

use crate::assets::decode::DecalImage;

#[derive(Clone, Debug)]
struct CachedDecal {
    revision: u64,
    image: Arc<DecalImage>,
}

/// Decoded decal pixels shared across renders, keyed by url.
///
/// Each entry remembers the decal revision it was loaded for. A lookup with any other revision
/// misses, so re-setting the same url forces a fresh load.
#[derive(Clone, Debug, Default)]
pub struct DecalCache {
    entries: HashMap<String, CachedDecal>,
}

impl DecalCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the decal loaded for `url` at `revision`, if any.
    pub fn get(&self, url: &str, revision: u64) -> Option<Arc<DecalImage>> {
        self.entries
            .get(url)
            .filter(|e| e.revision == revision)
            .map(|e| e.image.clone())
    }

    /// Store a freshly loaded decal, replacing whatever was cached for `url`.
    pub fn insert(&mut self, url: impl Into<String>, revision: u64, image: Arc<DecalImage>) {
        self.entries
            .insert(url.into(), CachedDecal { revision, image });
    }

    /// Keep only the entry for `url`, dropping pixels of decals no longer configured.
    pub fn retain_only(&mut self, url: Option<&str>) {
        self.entries.retain(|k, _| Some(k.as_str()) == url);
    }

    /// Number of cached decals.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/cache.rs"]
mod tests;
