use std::f64::consts::{FRAC_PI_2, PI};

use crate::badge::geometry::Geometry;
use crate::config::font::FontDescriptor;
use crate::foundation::core::{Color, Point};
use crate::foundation::error::BadgeResult;
use crate::render::surface::{ArcPath, Surface};

/// Which arc a string is laid out on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArcSide {
    /// The name arc.
    Bottom,
    /// The title arc.
    Top,
}

impl ArcSide {
    /// Direction sign used by the placement formulas (`-1` bottom, `+1` top).
    pub fn sign(self) -> f64 {
        match self {
            Self::Bottom => -1.0,
            Self::Top => 1.0,
        }
    }

    fn outline_factor(self) -> f64 {
        match self {
            Self::Bottom => 0.35,
            Self::Top => 0.15,
        }
    }
}

/// Angle one glyph occupies on the circle.
pub fn angle_per_char(font_size: f64, radius: f64) -> f64 {
    font_size / radius
}

/// Total angle a string of `len` glyphs occupies, including half a glyph of padding per side.
pub fn angular_span(len: usize, font_size: f64, radius: f64) -> f64 {
    angle_per_char(font_size, radius) * (len as f64 + 1.0)
}

/// Where one glyph of a curved string lands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphPlacement {
    /// The glyph.
    pub ch: char,
    /// Rotation about the disc center, relative to the unrotated frame.
    pub rotation: f64,
    /// Baseline-left origin in the rotated, center-relative frame.
    pub origin: Point,
}

/// Layout of `text` along `side`, one entry per `char`.
///
/// Each rotation is measured from the string's start rotation, never from the previous glyph.
pub fn glyph_placements(
    text: &str,
    side: ArcSide,
    geom: &Geometry,
    font_size: f64,
) -> Vec<GlyphPlacement> {
    let sign = side.sign();
    let rads = angle_per_char(font_size, geom.radius);
    let len = text.chars().count();
    let start = start_rotation(sign, rads, len);
    let origin = glyph_origin(side, geom, font_size);
    text.chars()
        .enumerate()
        .map(|(i, ch)| GlyphPlacement {
            ch,
            rotation: start - sign * i as f64 * rads,
            origin,
        })
        .collect()
}

/// Paint `text` curved along `side` and return its angular span.
pub fn paint_text<S: Surface + ?Sized>(
    surface: &mut S,
    text: &str,
    side: ArcSide,
    geom: &Geometry,
    font: &FontDescriptor,
    color: Color,
) -> BadgeResult<f64> {
    let font_size = f64::from(font.size_px());
    let sign = side.sign();
    let rads = angle_per_char(font_size, geom.radius);
    let len = text.chars().count();
    let origin = glyph_origin(side, geom, font_size);

    surface.save();
    surface.translate(geom.center.to_vec2());
    surface.rotate(start_rotation(sign, rads, len));

    let mut buf = [0u8; 4];
    for (i, ch) in text.chars().enumerate() {
        surface.save();
        surface.rotate(-sign * i as f64 * rads);
        let res = surface.fill_text(ch.encode_utf8(&mut buf), origin, font, color);
        surface.restore();
        if let Err(e) = res {
            surface.restore();
            return Err(e);
        }
    }

    surface.restore();
    Ok(angular_span(len, font_size, geom.radius))
}

/// The two bridging arcs between the text arcs, `(right, left)`.
///
/// Each spans `PI - (top_span + bottom_span) / 2`; a negative gap inverts both arcs.
pub fn bridge_arcs(geom: &Geometry, top_span: f64, bottom_span: f64) -> (ArcPath, ArcPath) {
    let gap = PI - (top_span + bottom_span) / 2.0;

    let right_start = bottom_span / 2.0 - FRAC_PI_2;
    let right = geom.disc_arc(right_start, right_start + gap);

    let left_end = -bottom_span / 2.0 - FRAC_PI_2;
    let left = geom.disc_arc(left_end - gap, left_end);

    (right, left)
}

/// Stroke the bridging arcs with `outline` at a tenth of the font size.
pub fn paint_decoration<S: Surface + ?Sized>(
    surface: &mut S,
    geom: &Geometry,
    top_span: f64,
    bottom_span: f64,
    font_size: f64,
    outline: Color,
) -> BadgeResult<()> {
    let (right, left) = bridge_arcs(geom, top_span, bottom_span);
    let width = font_size / 10.0;
    surface.stroke_arc(&right, width, outline)?;
    surface.stroke_arc(&left, width, outline)
}

fn start_rotation(sign: f64, rads: f64, len: usize) -> f64 {
    sign * (rads * (len as f64 - 1.5) / 2.0)
}

fn glyph_origin(side: ArcSide, geom: &Geometry, font_size: f64) -> Point {
    let sign = side.sign();
    let y = sign * geom.radius - sign * font_size / 2.0
        + geom.outline_width * side.outline_factor();
    Point::new(-font_size / 2.0, y)
}

#[cfg(test)]
#[path = "../../tests/unit/badge/text.rs"]
mod tests;
