use std::sync::{Arc, Mutex, PoisonError};

use crate::assets::decode::DecalImage;
use crate::config::font::FontDescriptor;
use crate::foundation::core::{Affine, Color, Point, Rect, Vec2};
use crate::foundation::error::{BadgeError, BadgeResult};
use crate::render::surface::{ArcPath, Surface, TransformStack};

/// One command issued to a [`RecordingSurface`].
///
/// Drawing commands carry the transform that was current when they were issued.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// `resize(width, height)`.
    Resize {
        /// New width.
        width: u32,
        /// New height.
        height: u32,
    },
    /// `clear()`.
    Clear,
    /// `save()`.
    Save,
    /// `restore()`.
    Restore,
    /// `translate(offset)`.
    Translate(Vec2),
    /// `rotate(radians)`.
    Rotate(f64),
    /// `fill_arc(arc, color)`.
    FillArc {
        /// Filled arc.
        arc: ArcPath,
        /// Fill color.
        color: Color,
        /// Current transform.
        transform: Affine,
    },
    /// `stroke_arc(arc, width, color)`.
    StrokeArc {
        /// Stroked arc.
        arc: ArcPath,
        /// Line width.
        width: f64,
        /// Stroke color.
        color: Color,
        /// Current transform.
        transform: Affine,
    },
    /// `fill_text(text, origin, font, color)`.
    FillText {
        /// Drawn text.
        text: String,
        /// Baseline-left origin in local coordinates.
        origin: Point,
        /// Font descriptor string.
        font: String,
        /// Fill color.
        color: Color,
        /// Current transform.
        transform: Affine,
    },
    /// `draw_image(image, dst)`.
    DrawImage {
        /// Source pixel width.
        image_width: u32,
        /// Source pixel height.
        image_height: u32,
        /// Destination rectangle.
        dst: Rect,
        /// Current transform.
        transform: Affine,
    },
}

impl DrawCommand {
    /// Whether the command paints pixels (as opposed to state changes).
    pub fn is_paint(&self) -> bool {
        matches!(
            self,
            Self::FillArc { .. }
                | Self::StrokeArc { .. }
                | Self::FillText { .. }
                | Self::DrawImage { .. }
        )
    }
}

/// Shared handle to the commands recorded by a [`RecordingSurface`].
///
/// The handle stays readable while the surface itself is mutably borrowed by a render.
#[derive(Clone, Debug, Default)]
pub struct CommandLog(Arc<Mutex<Vec<DrawCommand>>>);

impl CommandLog {
    /// Copy of all commands recorded so far.
    pub fn snapshot(&self) -> Vec<DrawCommand> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Number of commands recorded so far.
    pub fn len(&self) -> usize {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Return `true` when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&self, cmd: DrawCommand) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(cmd);
    }

    fn clear(&self) {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

/// Surface that records commands instead of rasterizing them.
///
/// Recording restarts on every `resize`, so after a render the log holds exactly that render's
/// command sequence.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    log: CommandLog,
    width: u32,
    height: u32,
    stack: TransformStack,
}

impl RecordingSurface {
    /// Create an empty recording surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the command log.
    pub fn log(&self) -> CommandLog {
        self.log.clone()
    }

    /// Copy of the recorded commands.
    pub fn commands(&self) -> Vec<DrawCommand> {
        self.log.snapshot()
    }

    /// Current raster size.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of transforms currently saved.
    pub fn save_depth(&self) -> usize {
        self.stack.depth()
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, width: u32, height: u32) -> BadgeResult<()> {
        if width == 0 || height == 0 {
            return Err(BadgeError::surface(format!(
                "surface size must be non-zero, got {width}x{height}"
            )));
        }
        self.width = width;
        self.height = height;
        self.stack.reset();
        self.log.clear();
        self.log.push(DrawCommand::Resize { width, height });
        Ok(())
    }

    fn clear(&mut self) {
        self.log.push(DrawCommand::Clear);
    }

    fn save(&mut self) {
        self.stack.save();
        self.log.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.stack.restore();
        self.log.push(DrawCommand::Restore);
    }

    fn translate(&mut self, offset: Vec2) {
        self.stack.translate(offset);
        self.log.push(DrawCommand::Translate(offset));
    }

    fn rotate(&mut self, radians: f64) {
        self.stack.rotate(radians);
        self.log.push(DrawCommand::Rotate(radians));
    }

    fn fill_arc(&mut self, arc: &ArcPath, color: Color) -> BadgeResult<()> {
        self.log.push(DrawCommand::FillArc {
            arc: *arc,
            color,
            transform: self.stack.current(),
        });
        Ok(())
    }

    fn stroke_arc(&mut self, arc: &ArcPath, width: f64, color: Color) -> BadgeResult<()> {
        self.log.push(DrawCommand::StrokeArc {
            arc: *arc,
            width,
            color,
            transform: self.stack.current(),
        });
        Ok(())
    }

    fn fill_text(
        &mut self,
        text: &str,
        origin: Point,
        font: &FontDescriptor,
        color: Color,
    ) -> BadgeResult<()> {
        self.log.push(DrawCommand::FillText {
            text: text.to_owned(),
            origin,
            font: font.css().to_owned(),
            color,
            transform: self.stack.current(),
        });
        Ok(())
    }

    fn draw_image(&mut self, image: &DecalImage, dst: Rect) -> BadgeResult<()> {
        self.log.push(DrawCommand::DrawImage {
            image_width: image.width,
            image_height: image.height,
            dst,
            transform: self.stack.current(),
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/recording.rs"]
mod tests;
