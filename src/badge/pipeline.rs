use crate::assets::loader::DecalLoader;
use crate::badge::decal::{DecalOutcome, DecalSource};
use crate::badge::geometry::Geometry;
use crate::badge::paint::{paint_decal, paint_disc, paint_outline};
use crate::badge::request::RenderRequest;
use crate::badge::text::{ArcSide, paint_decoration, paint_text};
use crate::foundation::core::Rect;
use crate::foundation::error::{BadgeError, BadgeResult};
use crate::render::surface::Surface;

/// Progress of a render.
///
/// `DecalPending` is the only state in which a render can suspend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RenderState {
    /// No render has started, or the last one was aborted.
    Idle,
    /// Radius and outline width are known.
    GeometryComputed,
    /// Surface sized, cleared and the disc filled.
    DiscFilled,
    /// Waiting on the decal loader.
    DecalPending,
    /// Decal painted.
    DecalResolved,
    /// No decal painted (none configured, or its load failed).
    DecalSkipped,
    /// Double outline stroked.
    OutlineStroked,
    /// Name and title painted.
    TextPainted,
    /// Bridging arcs stroked.
    DecorationPainted,
    /// Render finished.
    Done,
}

/// Summary of a finished render.
#[derive(Debug)]
pub struct RenderReport {
    /// Final state, always [`RenderState::Done`].
    pub state: RenderState,
    /// Geometry the badge was laid out with.
    pub geometry: Geometry,
    /// How the decal layer was resolved.
    pub decal: DecalOutcome,
    /// Destination of the decal, when one was painted.
    pub decal_rect: Option<Rect>,
    /// Decoded decal size, when one was painted.
    pub decal_pixels: Option<(u32, u32)>,
    /// Angular span of the name arc.
    pub name_span: f64,
    /// Angular span of the title arc.
    pub title_span: f64,
}

/// Paint the badge described by `req` into `surface`.
///
/// Runs without suspending unless the decal has to be loaded. A failed load is logged, reported in
/// [`RenderReport::decal`], and the badge is finished without a decal. Surface errors and
/// cancellation abort the render with `Err`. `on_state` observes every state transition.
pub(crate) async fn render_badge<S, L>(
    req: &RenderRequest,
    surface: &mut S,
    decals: &mut DecalSource<'_, L>,
    mut on_state: impl FnMut(RenderState),
) -> BadgeResult<RenderReport>
where
    S: Surface + ?Sized,
    L: DecalLoader,
{
    let geometry = Geometry::compute(req.size, req.font.size_px());
    on_state(RenderState::GeometryComputed);

    surface.resize(req.size, req.size)?;
    surface.clear();
    paint_disc(surface, &geometry, req.background_color)?;
    on_state(RenderState::DiscFilled);

    let mut decal_rect = None;
    let mut decal_pixels = None;
    let decal = match &req.decal {
        None => {
            on_state(RenderState::DecalSkipped);
            DecalOutcome::None
        }
        Some(d) => {
            let (image, outcome) = match decals.cached(d) {
                Some(image) => (Some(image), DecalOutcome::Cached),
                None => {
                    on_state(RenderState::DecalPending);
                    tracing::debug!(url = %d.url, "waiting on decal");
                    match decals.load(d).await {
                        Ok(image) => (Some(image), DecalOutcome::Loaded),
                        Err(BadgeError::Cancelled) => return Err(BadgeError::Cancelled),
                        Err(e) => {
                            tracing::warn!(url = %d.url, error = %e, "decal skipped");
                            (None, DecalOutcome::Failed(e))
                        }
                    }
                }
            };
            match image {
                Some(image) => {
                    decal_rect = Some(paint_decal(surface, &geometry, d.scale, &image)?);
                    decal_pixels = Some((image.width, image.height));
                    on_state(RenderState::DecalResolved);
                }
                None => on_state(RenderState::DecalSkipped),
            }
            outcome
        }
    };

    paint_outline(
        surface,
        &geometry,
        req.outline_color,
        req.background_color,
    )?;
    on_state(RenderState::OutlineStroked);

    let name_span = paint_text(
        surface,
        &req.name,
        ArcSide::Bottom,
        &geometry,
        &req.font,
        req.font_color,
    )?;
    let title_span = paint_text(
        surface,
        &req.title,
        ArcSide::Top,
        &geometry,
        &req.font,
        req.font_color,
    )?;
    on_state(RenderState::TextPainted);

    paint_decoration(
        surface,
        &geometry,
        title_span,
        name_span,
        req.font_size(),
        req.outline_color,
    )?;
    on_state(RenderState::DecorationPainted);

    on_state(RenderState::Done);
    Ok(RenderReport {
        state: RenderState::Done,
        geometry,
        decal,
        decal_rect,
        decal_pixels,
        name_span,
        title_span,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/badge/pipeline.rs"]
mod tests;
