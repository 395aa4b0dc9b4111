use std::f64::consts::TAU;

use kurbo::Shape;

use crate::assets::decode::DecalImage;
use crate::config::font::FontDescriptor;
use crate::foundation::core::{Color, Point, Rect, Vec2};
use crate::foundation::error::BadgeResult;

/// Flattening tolerance used when arcs are turned into Bézier paths.
pub(crate) const ARC_TOLERANCE: f64 = 0.1;

/// Circular arc in surface coordinates.
///
/// Angles are in radians, measured from the positive x axis towards the positive y axis (y
/// points down), so a positive sweep runs clockwise on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcPath {
    /// Circle center.
    pub center: Point,
    /// Circle radius.
    pub radius: f64,
    /// Start angle.
    pub start_angle: f64,
    /// Signed sweep from `start_angle`.
    pub sweep_angle: f64,
}

impl ArcPath {
    /// Full circle.
    pub fn circle(center: Point, radius: f64) -> Self {
        Self {
            center,
            radius,
            start_angle: 0.0,
            sweep_angle: TAU,
        }
    }

    /// Arc from `start` to `end`, sweeping `end - start`.
    pub fn between(center: Point, radius: f64, start: f64, end: f64) -> Self {
        Self {
            center,
            radius,
            start_angle: start,
            sweep_angle: end - start,
        }
    }

    /// End angle (`start_angle + sweep_angle`).
    pub fn end_angle(&self) -> f64 {
        self.start_angle + self.sweep_angle
    }

    /// Whether the arc covers the whole circle.
    pub fn is_full_circle(&self) -> bool {
        self.sweep_angle.abs() >= TAU
    }

    /// Flatten into a Bézier path.
    pub fn to_bez_path(&self, tolerance: f64) -> kurbo::BezPath {
        if self.is_full_circle() {
            return kurbo::Circle::new(self.center, self.radius.max(0.0)).to_path(tolerance);
        }
        kurbo::Arc {
            center: self.center,
            radii: Vec2::new(self.radius, self.radius),
            start_angle: self.start_angle,
            sweep_angle: self.sweep_angle,
            x_rotation: 0.0,
        }
        .to_path(tolerance)
    }
}

/// Drawing surface the badge pipeline paints into.
///
/// The surface owns a transform stack with canvas semantics: `translate` and `rotate`
/// post-multiply the current transform, `save` pushes it and `restore` pops it. Every drawing
/// command uses the transform current at the time of the call.
pub trait Surface {
    /// Resize the raster, discarding content and resetting the transform stack.
    fn resize(&mut self, width: u32, height: u32) -> BadgeResult<()>;

    /// Clear all content to transparent.
    fn clear(&mut self);

    /// Push the current transform.
    fn save(&mut self);

    /// Pop the most recently saved transform; a no-op on an empty stack.
    fn restore(&mut self);

    /// Translate the current transform.
    fn translate(&mut self, offset: Vec2);

    /// Rotate the current transform by `radians`.
    fn rotate(&mut self, radians: f64);

    /// Fill the closed region bounded by `arc`.
    fn fill_arc(&mut self, arc: &ArcPath, color: Color) -> BadgeResult<()>;

    /// Stroke `arc` with butt caps.
    fn stroke_arc(&mut self, arc: &ArcPath, width: f64, color: Color) -> BadgeResult<()>;

    /// Fill `text` with its baseline-left origin at `origin`.
    fn fill_text(
        &mut self,
        text: &str,
        origin: Point,
        font: &FontDescriptor,
        color: Color,
    ) -> BadgeResult<()>;

    /// Draw `image` stretched into `dst`.
    fn draw_image(&mut self, image: &DecalImage, dst: Rect) -> BadgeResult<()>;
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn resize(&mut self, width: u32, height: u32) -> BadgeResult<()> {
        (**self).resize(width, height)
    }

    fn clear(&mut self) {
        (**self).clear();
    }

    fn save(&mut self) {
        (**self).save();
    }

    fn restore(&mut self) {
        (**self).restore();
    }

    fn translate(&mut self, offset: Vec2) {
        (**self).translate(offset);
    }

    fn rotate(&mut self, radians: f64) {
        (**self).rotate(radians);
    }

    fn fill_arc(&mut self, arc: &ArcPath, color: Color) -> BadgeResult<()> {
        (**self).fill_arc(arc, color)
    }

    fn stroke_arc(&mut self, arc: &ArcPath, width: f64, color: Color) -> BadgeResult<()> {
        (**self).stroke_arc(arc, width, color)
    }

    fn fill_text(
        &mut self,
        text: &str,
        origin: Point,
        font: &FontDescriptor,
        color: Color,
    ) -> BadgeResult<()> {
        (**self).fill_text(text, origin, font, color)
    }

    fn draw_image(&mut self, image: &DecalImage, dst: Rect) -> BadgeResult<()> {
        (**self).draw_image(image, dst)
    }
}

/// Canvas-style transform stack shared by the surface implementations.
#[derive(Clone, Debug, Default)]
pub(crate) struct TransformStack {
    current: kurbo::Affine,
    saved: Vec<kurbo::Affine>,
}

impl TransformStack {
    pub(crate) fn current(&self) -> kurbo::Affine {
        self.current
    }

    pub(crate) fn reset(&mut self) {
        self.current = kurbo::Affine::IDENTITY;
        self.saved.clear();
    }

    pub(crate) fn save(&mut self) {
        self.saved.push(self.current);
    }

    pub(crate) fn restore(&mut self) {
        if let Some(t) = self.saved.pop() {
            self.current = t;
        }
    }

    pub(crate) fn translate(&mut self, offset: Vec2) {
        self.current = self.current * kurbo::Affine::translate(offset);
    }

    pub(crate) fn rotate(&mut self, radians: f64) {
        self.current = self.current * kurbo::Affine::rotate(radians);
    }

    pub(crate) fn depth(&self) -> usize {
        self.saved.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
