use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::assets::cache::DecalCache;
use crate::assets::decode::DecalImage;
use crate::assets::loader::DecalLoader;
use crate::badge::request::DecalRequest;
use crate::foundation::core::Rect;
use crate::foundation::error::{BadgeError, BadgeResult};

/// Destination rectangle of a `width`x`height` decal on a badge of the given radius.
///
/// The longer image side spans `floor(radius * scale)` pixels and the other side keeps the
/// aspect ratio; the rectangle is centered on `(radius, radius)`.
pub fn fit_decal(radius: f64, scale: f64, width: u32, height: u32) -> Rect {
    let fit = (radius * scale).floor();
    let (w, h) = (f64::from(width), f64::from(height));
    let aspect = w / h;
    let (dw, dh) = if aspect > 1.0 {
        (fit, fit * (h / w))
    } else {
        (fit * aspect, fit)
    };
    let x0 = radius - dw / 2.0;
    let y0 = radius - dh / 2.0;
    Rect::new(x0, y0, x0 + dw, y0 + dh)
}

/// How the decal layer of a render was resolved.
#[derive(Debug)]
pub enum DecalOutcome {
    /// No decal configured.
    None,
    /// Pixels came from the decal cache; no load happened.
    Cached,
    /// Pixels were loaded during this render.
    Loaded,
    /// The load failed; the badge was painted without a decal.
    Failed(BadgeError),
}

impl DecalOutcome {
    /// Whether decal pixels were painted.
    pub fn drawn(&self) -> bool {
        matches!(self, Self::Cached | Self::Loaded)
    }

    /// Load error, if the load failed.
    pub fn error(&self) -> Option<&BadgeError> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Cancels the decal load of the render in flight on the renderer it came from.
///
/// Cancelling while no load is pending has no effect on later renders.
#[derive(Clone, Debug)]
pub struct CancelHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    pub(crate) fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Abort the pending decal load; the render returns [`BadgeError::Cancelled`].
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    /// Re-arm the handle for a new render and subscribe to it.
    pub(crate) fn arm(&self) -> watch::Receiver<bool> {
        self.tx.send_replace(false);
        self.tx.subscribe()
    }
}

/// Long-lived decal state a render borrows: cache, loader and load policy.
pub(crate) struct DecalSource<'a, L> {
    pub(crate) cache: &'a mut DecalCache,
    pub(crate) loader: &'a L,
    pub(crate) timeout: Option<Duration>,
    pub(crate) cancel: Option<watch::Receiver<bool>>,
}

impl<L: DecalLoader> DecalSource<'_, L> {
    /// Cached pixels for `req`, without suspending.
    pub(crate) fn cached(&self, req: &DecalRequest) -> Option<Arc<DecalImage>> {
        self.cache.get(&req.url, req.revision)
    }

    /// Load `req` through the loader, bounded by the timeout and the cancel signal.
    ///
    /// Successful loads are written to the cache. Errors other than cancellation are
    /// [`BadgeError::DecalLoad`].
    pub(crate) async fn load(&mut self, req: &DecalRequest) -> BadgeResult<Arc<DecalImage>> {
        let load = bounded_load(self.loader, &req.url, self.timeout);
        let image = match self.cancel.as_mut() {
            Some(rx) => {
                tokio::select! {
                    biased;
                    _ = cancelled(rx) => return Err(BadgeError::Cancelled),
                    res = load => res?,
                }
            }
            None => load.await?,
        };
        if image.width == 0 || image.height == 0 {
            return Err(BadgeError::decal_load(&req.url, "decal has zero size"));
        }

        let image = Arc::new(image);
        self.cache.retain_only(Some(&req.url));
        self.cache.insert(req.url.clone(), req.revision, image.clone());
        Ok(image)
    }
}

async fn bounded_load<L: DecalLoader>(
    loader: &L,
    url: &str,
    timeout: Option<Duration>,
) -> BadgeResult<DecalImage> {
    let res = match timeout {
        Some(limit) => match tokio::time::timeout(limit, loader.load(url)).await {
            Ok(res) => res,
            Err(_) => {
                return Err(BadgeError::decal_load(
                    url,
                    format!("timed out after {} ms", limit.as_millis()),
                ));
            }
        },
        None => loader.load(url).await,
    };
    res.map_err(|e| match e {
        e @ (BadgeError::DecalLoad { .. } | BadgeError::Cancelled) => e,
        other => BadgeError::decal_load(url, other),
    })
}

async fn cancelled(rx: &mut watch::Receiver<bool>) {
    if rx.wait_for(|c| *c).await.is_err() {
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/badge/decal.rs"]
mod tests;
