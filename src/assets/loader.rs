use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::assets::decode::{DecalImage, decode_decal, rasterize_svg};
use crate::foundation::error::{BadgeError, BadgeResult};

/// Asynchronous source of decal images.
///
/// A loader turns a decal url into decoded pixels or an error. Returning is the loader's only
/// obligation: the render pipeline waits on the returned future and treats any error as "no
/// decal" for that render.
pub trait DecalLoader {
    /// Load and decode the decal behind `url`.
    fn load(&self, url: &str) -> impl Future<Output = BadgeResult<DecalImage>>;
}

impl<L: DecalLoader + ?Sized> DecalLoader for &L {
    fn load(&self, url: &str) -> impl Future<Output = BadgeResult<DecalImage>> {
        (**self).load(url)
    }
}

impl<L: DecalLoader + ?Sized> DecalLoader for Arc<L> {
    fn load(&self, url: &str) -> impl Future<Output = BadgeResult<DecalImage>> {
        (**self).load(url)
    }
}

/// Loads decals from the local filesystem.
///
/// Relative urls resolve against `root`; `file://` urls and absolute paths are used as-is.
#[derive(Clone, Debug)]
pub struct FsDecalLoader {
    root: PathBuf,
}

impl FsDecalLoader {
    /// Create a loader resolving relative urls against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Map a decal url onto a filesystem path.
    pub fn resolve(&self, url: &str) -> BadgeResult<PathBuf> {
        if let Some(path) = url.strip_prefix("file://") {
            return Ok(PathBuf::from(path));
        }
        if let Some((scheme, _)) = url.split_once("://") {
            return Err(BadgeError::decal_load(
                url,
                format!("unsupported url scheme '{scheme}'"),
            ));
        }
        if Path::new(url).is_absolute() {
            return Ok(PathBuf::from(url));
        }
        let norm =
            normalize_rel_path(url).map_err(|e| BadgeError::decal_load(url, e.to_string()))?;
        Ok(self.root.join(Path::new(&norm)))
    }
}

impl DecalLoader for FsDecalLoader {
    async fn load(&self, url: &str) -> BadgeResult<DecalImage> {
        let path = self.resolve(url)?;
        tracing::debug!(url, path = %path.display(), "reading decal");
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| BadgeError::decal_load(url, format!("{}: {e}", path.display())))?;
        decode_for_url(url, &bytes)
    }
}

/// In-memory decal source keyed by url.
#[derive(Clone, Debug, Default)]
pub struct MemoryDecalLoader {
    entries: HashMap<String, Arc<Vec<u8>>>,
}

impl MemoryDecalLoader {
    /// Create an empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register encoded image bytes for `url`.
    pub fn insert(&mut self, url: impl Into<String>, bytes: Vec<u8>) {
        self.entries.insert(url.into(), Arc::new(bytes));
    }

    /// Builder-style variant of [`MemoryDecalLoader::insert`].
    pub fn with(mut self, url: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.insert(url, bytes);
        self
    }
}

impl DecalLoader for MemoryDecalLoader {
    async fn load(&self, url: &str) -> BadgeResult<DecalImage> {
        let bytes = self
            .entries
            .get(url)
            .cloned()
            .ok_or_else(|| BadgeError::decal_load(url, "no such entry"))?;
        decode_for_url(url, &bytes)
    }
}

fn decode_for_url(url: &str, bytes: &[u8]) -> BadgeResult<DecalImage> {
    let is_svg = Path::new(url.split(['?', '#']).next().unwrap_or(url))
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
    let decoded = if is_svg {
        rasterize_svg(bytes)
    } else {
        decode_decal(bytes)
    };
    decoded.map_err(|e| match e {
        e @ BadgeError::DecalLoad { .. } => e,
        other => BadgeError::decal_load(url, format!("{other:#}")),
    })
}

/// Normalize and validate root-relative decal paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub(crate) fn normalize_rel_path(source: &str) -> BadgeResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(BadgeError::validation("decal paths must be relative"));
    }
    if s.is_empty() {
        return Err(BadgeError::validation("decal path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(BadgeError::validation("decal paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(BadgeError::validation("decal path must contain a file name"));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
