use crate::assets::decode::DecalImage;
use crate::badge::decal::fit_decal;
use crate::badge::geometry::Geometry;
use crate::foundation::core::{Color, Rect};
use crate::foundation::error::BadgeResult;
use crate::render::surface::Surface;

/// Fill the base disc.
pub fn paint_disc<S: Surface + ?Sized>(
    surface: &mut S,
    geom: &Geometry,
    background: Color,
) -> BadgeResult<()> {
    surface.fill_arc(&geom.disc(), background)
}

/// Draw `image` fitted and centered on the disc; returns the destination rectangle.
pub fn paint_decal<S: Surface + ?Sized>(
    surface: &mut S,
    geom: &Geometry,
    scale: f64,
    image: &DecalImage,
) -> BadgeResult<Rect> {
    let dst = fit_decal(geom.radius, scale, image.width, image.height);
    surface.draw_image(image, dst)?;
    Ok(dst)
}

/// Stroke the double outline over the disc edge.
///
/// The narrower background stroke cuts the inner band of the ring, masking decal pixels that
/// reach past it.
pub fn paint_outline<S: Surface + ?Sized>(
    surface: &mut S,
    geom: &Geometry,
    outline: Color,
    background: Color,
) -> BadgeResult<()> {
    let disc = geom.disc();
    surface.stroke_arc(&disc, geom.outline_width, outline)?;
    surface.stroke_arc(&disc, (geom.outline_width * 0.7).floor(), background)
}

#[cfg(test)]
#[path = "../../tests/unit/badge/paint.rs"]
mod tests;
