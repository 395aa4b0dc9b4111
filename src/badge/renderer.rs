use crate::assets::cache::DecalCache;
use crate::assets::loader::DecalLoader;
use crate::badge::decal::{CancelHandle, DecalSource};
use crate::badge::pipeline::{RenderReport, RenderState, render_badge};
use crate::badge::request::RenderRequest;
use crate::config::badge::BadgeConfig;
use crate::config::opts::RendererOpts;
use crate::config::patch::BadgePatch;
use crate::foundation::error::BadgeResult;
use crate::render::surface::Surface;

/// Long-lived badge renderer.
///
/// Owns the configuration, the decal loader and the decal cache. Each [`BadgeRenderer::make`]
/// snapshots the configuration into a [`RenderRequest`] and runs the render pipeline on it.
/// `make` borrows the renderer mutably until the render finishes, so renders of one instance
/// never interleave and the configuration cannot change under an in-flight render.
pub struct BadgeRenderer<L> {
    config: BadgeConfig,
    loader: L,
    cache: DecalCache,
    opts: RendererOpts,
    state: RenderState,
    cancel: CancelHandle,
}

impl<L: std::fmt::Debug> std::fmt::Debug for BadgeRenderer<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BadgeRenderer")
            .field("config", &self.config)
            .field("loader", &self.loader)
            .field("state", &self.state)
            .field("cached_decals", &self.cache.len())
            .finish_non_exhaustive()
    }
}

impl<L: DecalLoader> BadgeRenderer<L> {
    /// Renderer with the default configuration.
    pub fn new(loader: L) -> Self {
        Self::with_config(BadgeConfig::default(), loader)
    }

    /// Renderer with `config` and default options.
    pub fn with_config(config: BadgeConfig, loader: L) -> Self {
        Self {
            config,
            loader,
            cache: DecalCache::new(),
            opts: RendererOpts::default(),
            state: RenderState::Idle,
            cancel: CancelHandle::new(),
        }
    }

    /// Replace the renderer options.
    pub fn with_opts(mut self, opts: RendererOpts) -> Self {
        self.opts = opts;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &BadgeConfig {
        &self.config
    }

    /// Mutable configuration, for the per-field setters.
    pub fn config_mut(&mut self) -> &mut BadgeConfig {
        &mut self.config
    }

    /// Apply the truthy fields of `patch`.
    pub fn apply(&mut self, patch: &BadgePatch) {
        self.config.apply(patch);
    }

    /// Renderer options.
    pub fn opts(&self) -> RendererOpts {
        self.opts
    }

    /// State reached by the current or most recent render.
    pub fn state(&self) -> RenderState {
        self.state
    }

    /// Decal pixels retained across renders.
    pub fn cache(&self) -> &DecalCache {
        &self.cache
    }

    /// Handle that cancels a pending decal load of this renderer.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Render the badge into `surface`.
    ///
    /// Completes without suspending when no decal load is needed. A failed decal load does not
    /// fail the render; see [`RenderReport::decal`]. Dropping the returned future cancels the
    /// pending load.
    #[tracing::instrument(level = "debug", skip_all, fields(size = self.config.size))]
    pub async fn make<S: Surface + ?Sized>(&mut self, surface: &mut S) -> BadgeResult<RenderReport> {
        self.state = RenderState::Idle;
        let req = RenderRequest::from_config(&self.config)?;
        self.cache
            .retain_only(req.decal.as_ref().map(|d| d.url.as_str()));

        let Self {
            loader,
            cache,
            opts,
            state,
            cancel,
            ..
        } = &mut *self;
        let mut decals = DecalSource {
            cache,
            loader: &*loader,
            timeout: opts.decal_timeout,
            cancel: Some(cancel.arm()),
        };
        let res = render_badge(&req, surface, &mut decals, |next| {
            tracing::debug!(state = ?next, "render state");
            *state = next;
        })
        .await;

        match res {
            Ok(report) => {
                if let (Some(d), Some((w, h))) = (&req.decal, report.decal_pixels)
                    && d.revision == self.config.decal.revision
                {
                    self.config.decal.mark_loaded(w, h);
                }
                Ok(report)
            }
            Err(e) => {
                tracing::debug!(error = %e, "render aborted");
                self.state = RenderState::Idle;
                Err(e)
            }
        }
    }

    /// Render like [`BadgeRenderer::make`], then call `on_complete` once if the render succeeded.
    pub async fn make_with<S, F>(
        &mut self,
        surface: &mut S,
        on_complete: F,
    ) -> BadgeResult<RenderReport>
    where
        S: Surface + ?Sized,
        F: FnOnce(),
    {
        let report = self.make(surface).await?;
        on_complete();
        Ok(report)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/badge/renderer.rs"]
mod tests;
