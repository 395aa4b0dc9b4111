use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::assets::decode::DecalImage;
use crate::assets::fonts::{FontBook, TextLayoutEngine};
use crate::config::font::FontDescriptor;
use crate::foundation::core::{Affine, Color, Point, Rect, Vec2};
use crate::foundation::error::{BadgeError, BadgeResult};
use crate::render::frame::FrameRGBA;
use crate::render::surface::{ARC_TOLERANCE, ArcPath, Surface, TransformStack};

/// CPU raster surface powered by `vello_cpu`.
///
/// Commands are encoded as they arrive and rasterized in order by [`CpuSurface::frame`].
pub struct CpuSurface {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    stack: TransformStack,
    fonts: FontBook,
    text_engine: TextLayoutEngine,
    font_data: HashMap<u64, vello_cpu::peniko::FontData>,
}

impl std::fmt::Debug for CpuSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl CpuSurface {
    /// Create a surface that resolves fonts from the system font database.
    pub fn new(width: u32, height: u32) -> BadgeResult<Self> {
        Self::with_font_book(width, height, FontBook::new())
    }

    /// Create a surface that draws all text with the face in `font_bytes`.
    pub fn with_font_bytes(width: u32, height: u32, font_bytes: Vec<u8>) -> BadgeResult<Self> {
        Self::with_font_book(width, height, FontBook::pinned(font_bytes))
    }

    /// Create a surface that draws all text with the face stored at `path`.
    pub fn with_font_file(width: u32, height: u32, path: impl AsRef<Path>) -> BadgeResult<Self> {
        Self::with_font_book(width, height, FontBook::from_font_file(path.as_ref())?)
    }

    fn with_font_book(width: u32, height: u32, fonts: FontBook) -> BadgeResult<Self> {
        let (w, h) = surface_dims(width, height)?;
        Ok(Self {
            width: w,
            height: h,
            ctx: vello_cpu::RenderContext::new(w, h),
            stack: TransformStack::default(),
            fonts,
            text_engine: TextLayoutEngine::new(),
            font_data: HashMap::new(),
        })
    }

    /// Current raster size.
    pub fn size(&self) -> (u32, u32) {
        (u32::from(self.width), u32::from(self.height))
    }

    /// Rasterize everything drawn since the last resize/clear.
    pub fn frame(&mut self) -> FrameRGBA {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    fn begin_draw(&mut self, transform: Affine) {
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(transform));
    }
}

impl Surface for CpuSurface {
    fn resize(&mut self, width: u32, height: u32) -> BadgeResult<()> {
        let (w, h) = surface_dims(width, height)?;
        if w == self.width && h == self.height {
            self.ctx.reset();
        } else {
            self.ctx = vello_cpu::RenderContext::new(w, h);
            self.width = w;
            self.height = h;
        }
        self.stack.reset();
        Ok(())
    }

    fn clear(&mut self) {
        self.ctx.reset();
    }

    fn save(&mut self) {
        self.stack.save();
    }

    fn restore(&mut self) {
        self.stack.restore();
    }

    fn translate(&mut self, offset: Vec2) {
        self.stack.translate(offset);
    }

    fn rotate(&mut self, radians: f64) {
        self.stack.rotate(radians);
    }

    fn fill_arc(&mut self, arc: &ArcPath, color: Color) -> BadgeResult<()> {
        let path = bezpath_to_cpu(&arc.to_bez_path(ARC_TOLERANCE));
        self.begin_draw(self.stack.current());
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.fill_path(&path);
        Ok(())
    }

    fn stroke_arc(&mut self, arc: &ArcPath, width: f64, color: Color) -> BadgeResult<()> {
        if !width.is_finite() || width < 0.0 {
            return Err(BadgeError::surface(format!(
                "stroke width must be finite and >= 0, got {width}"
            )));
        }
        let path = bezpath_to_cpu(&arc.to_bez_path(ARC_TOLERANCE));
        self.begin_draw(self.stack.current());
        self.ctx.set_stroke(
            vello_cpu::kurbo::Stroke::new(width).with_caps(vello_cpu::kurbo::Cap::Butt),
        );
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.stroke_path(&path);
        Ok(())
    }

    fn fill_text(
        &mut self,
        text: &str,
        origin: Point,
        font: &FontDescriptor,
        color: Color,
    ) -> BadgeResult<()> {
        if text.is_empty() {
            return Ok(());
        }
        let resolved = self.fonts.resolve(font)?;
        let layout = self
            .text_engine
            .layout_line(text, &resolved, font.size_px() as f32)?;
        let data = self
            .font_data
            .entry(resolved.id)
            .or_insert_with(|| {
                vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(resolved.bytes.as_ref().clone()),
                    resolved.index,
                )
            })
            .clone();

        let tr = self.stack.current() * Affine::translate(origin.to_vec2());
        self.begin_draw(tr);
        self.ctx.set_paint(color_to_cpu(color));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                // Glyph y values are absolute within the layout; shift so the baseline sits at
                // the origin.
                let baseline = run.baseline();
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y - baseline,
                });
                self.ctx
                    .glyph_run(&data)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        Ok(())
    }

    fn draw_image(&mut self, image: &DecalImage, dst: Rect) -> BadgeResult<()> {
        let paint = rgba_premul_to_image(&image.rgba8_premul, image.width, image.height)?;
        let sx = dst.width() / f64::from(image.width);
        let sy = dst.height() / f64::from(image.height);
        let tr = self.stack.current()
            * Affine::translate(Vec2::new(dst.x0, dst.y0))
            * Affine::scale_non_uniform(sx, sy);
        self.begin_draw(tr);
        self.ctx.set_paint(paint);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(image.width),
            f64::from(image.height),
        ));
        Ok(())
    }
}

fn surface_dims(width: u32, height: u32) -> BadgeResult<(u16, u16)> {
    let w: u16 = width
        .try_into()
        .map_err(|_| BadgeError::surface(format!("surface width {width} exceeds u16")))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| BadgeError::surface(format!("surface height {height} exceeds u16")))?;
    if w == 0 || h == 0 {
        return Err(BadgeError::surface(format!(
            "surface size must be non-zero, got {width}x{height}"
        )));
    }
    Ok((w, h))
}

fn color_to_cpu(c: Color) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> BadgeResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| BadgeError::surface("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| BadgeError::surface("pixmap height exceeds u16"))?;
    if bytes.len() != width as usize * height as usize * 4 {
        return Err(BadgeError::surface("decal byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in bytes.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

fn rgba_premul_to_image(
    bytes_premul: &[u8],
    width: u32,
    height: u32,
) -> BadgeResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(bytes_premul, width, height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
