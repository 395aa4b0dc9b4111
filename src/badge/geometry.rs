use crate::foundation::core::Point;
use crate::render::surface::ArcPath;

/// Per-render layout derived from the badge size and font size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    /// `floor(size / 2)`.
    pub radius: f64,
    /// `floor(font_size * 1.25)`.
    pub outline_width: f64,
    /// Radius of the disc path shared by fill, outline and bridges.
    pub disc_radius: f64,
    /// Disc center, `(radius, radius)`.
    pub center: Point,
}

impl Geometry {
    /// Derive the layout for a `size`x`size` badge with `font_size` text.
    ///
    /// An outline wider than the radius is not rejected; it only degrades the picture.
    pub fn compute(size: u32, font_size: u32) -> Self {
        let radius = f64::from(size / 2);
        let outline_width = (f64::from(font_size) * 1.25).floor();
        Self {
            radius,
            outline_width,
            disc_radius: radius - outline_width / 2.0,
            center: Point::new(radius, radius),
        }
    }

    /// Full circle at the disc radius.
    pub fn disc(&self) -> ArcPath {
        ArcPath::circle(self.center, self.disc_radius)
    }

    /// Arc on the disc circle from `start` to `end`.
    pub fn disc_arc(&self, start: f64, end: f64) -> ArcPath {
        ArcPath::between(self.center, self.disc_radius, start, end)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/badge/geometry.rs"]
mod tests;
