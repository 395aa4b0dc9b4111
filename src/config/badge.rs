use crate::config::font::FontDescriptor;
use crate::config::patch::BadgePatch;

/// Smallest accepted decal scale.
pub const MIN_IMAGE_SCALE: f64 = 0.1;
/// Largest accepted decal scale.
pub const MAX_IMAGE_SCALE: f64 = 10.0;

/// Decal reference and load bookkeeping owned by a [`BadgeConfig`].
#[derive(Clone, Debug, PartialEq)]
pub struct DecalState {
    pub(crate) url: Option<String>,
    pub(crate) scale: f64,
    pub(crate) loaded: bool,
    pub(crate) pixel_width: u32,
    pub(crate) pixel_height: u32,
    pub(crate) revision: u64,
}

impl Default for DecalState {
    fn default() -> Self {
        Self {
            url: None,
            scale: 1.0,
            loaded: false,
            pixel_width: 0,
            pixel_height: 0,
            revision: 0,
        }
    }
}

impl DecalState {
    /// Configured decal url, if any.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Decal scale relative to the badge radius, within `[0.1, 10]`.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Whether pixels for the current url have been loaded since it was last set.
    pub fn loaded(&self) -> bool {
        self.loaded
    }

    /// Decoded pixel size, `(0, 0)` until loaded.
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.pixel_width, self.pixel_height)
    }

    /// Counter bumped by every `set_image` call.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub(crate) fn mark_loaded(&mut self, width: u32, height: u32) {
        self.loaded = true;
        self.pixel_width = width;
        self.pixel_height = height;
    }
}

/// Mutable badge configuration.
///
/// Every field has its own setter which validates or clamps only its own value. Colors are kept
/// as the CSS strings they were given and only parsed when a render snapshots the config.
#[derive(Clone, Debug, PartialEq)]
pub struct BadgeConfig {
    pub(crate) name: String,
    pub(crate) title: String,
    pub(crate) font: FontDescriptor,
    pub(crate) font_color: String,
    pub(crate) background_color: String,
    pub(crate) outline_color: String,
    pub(crate) decal: DecalState,
    pub(crate) size: u32,
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            name: "Empty".to_owned(),
            title: "Empty".to_owned(),
            font: FontDescriptor::default(),
            font_color: "white".to_owned(),
            background_color: "black".to_owned(),
            outline_color: "green".to_owned(),
            decal: DecalState::default(),
            size: 512,
        }
    }
}

impl BadgeConfig {
    /// Default configuration with `patch` applied on top.
    pub fn from_patch(patch: &BadgePatch) -> Self {
        let mut out = Self::default();
        out.apply(patch);
        out
    }

    /// Apply every present, truthy field of `patch` through its setter.
    ///
    /// Absent keys, empty strings, zero and NaN leave the current value untouched.
    pub fn apply(&mut self, patch: &BadgePatch) {
        if let Some(v) = truthy_str(&patch.name) {
            self.set_name(v);
        }
        if let Some(v) = truthy_str(&patch.title) {
            self.set_title(v);
        }
        if let Some(v) = truthy_str(&patch.outline_color) {
            self.set_outline_color(v);
        }
        if let Some(v) = truthy_str(&patch.background_color) {
            self.set_background_color(v);
        }
        if let Some(v) = truthy_str(&patch.font_color) {
            self.set_font_color(v);
        }
        if let Some(v) = truthy_str(&patch.image) {
            self.set_image(v);
        }
        if let Some(v) = patch.image_scale.filter(|v| *v != 0.0 && !v.is_nan()) {
            self.set_image_scale(v);
        }
        if let Some(v) = patch.font_size.filter(|v| *v != 0) {
            self.set_font_size(v);
        }
        if let Some(v) = patch.size.filter(|v| *v != 0) {
            self.set_size(v);
        }
    }

    /// Text painted along the bottom arc.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Text painted along the top arc.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Font parameters.
    pub fn font(&self) -> &FontDescriptor {
        &self.font
    }

    /// Glyph fill color string.
    pub fn font_color(&self) -> &str {
        &self.font_color
    }

    /// Disc fill color string.
    pub fn background_color(&self) -> &str {
        &self.background_color
    }

    /// Outline and bridge stroke color string.
    pub fn outline_color(&self) -> &str {
        &self.outline_color
    }

    /// Decal state.
    pub fn decal(&self) -> &DecalState {
        &self.decal
    }

    /// Square output side in pixels.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Set the bottom-arc text.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Set the top-arc text.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Set the outline color.
    pub fn set_outline_color(&mut self, color: impl Into<String>) {
        self.outline_color = color.into();
    }

    /// Set the disc color.
    pub fn set_background_color(&mut self, color: impl Into<String>) {
        self.background_color = color.into();
    }

    /// Set the text color.
    pub fn set_font_color(&mut self, color: impl Into<String>) {
        self.font_color = color.into();
    }

    /// Set the decal url.
    ///
    /// Always forgets previously loaded pixels, even when `url` equals the current one.
    pub fn set_image(&mut self, url: impl Into<String>) {
        self.decal.url = Some(url.into());
        self.decal.loaded = false;
        self.decal.pixel_width = 0;
        self.decal.pixel_height = 0;
        self.decal.revision = self.decal.revision.wrapping_add(1);
    }

    /// Remove the decal.
    pub fn clear_image(&mut self) {
        self.decal.url = None;
        self.decal.loaded = false;
        self.decal.pixel_width = 0;
        self.decal.pixel_height = 0;
        self.decal.revision = self.decal.revision.wrapping_add(1);
    }

    /// Set the decal scale, silently clamped to `[0.1, 10]`.
    pub fn set_image_scale(&mut self, scale: f64) {
        // NaN would slip through `clamp` unchanged; keep the current scale instead.
        if scale.is_nan() {
            return;
        }
        self.decal.scale = scale.clamp(MIN_IMAGE_SCALE, MAX_IMAGE_SCALE);
    }

    /// Set the font size in pixels.
    pub fn set_font_size(&mut self, size_px: u32) {
        self.font.set_size_px(size_px);
    }

    /// Set the font family.
    pub fn set_font_family(&mut self, family: impl Into<String>) {
        self.font.set_family(family);
    }

    /// Toggle the bold weight.
    pub fn set_font_bold(&mut self, bold: bool) {
        self.font.set_bold(bold);
    }

    /// Set the square output side in pixels.
    pub fn set_size(&mut self, size: u32) {
        self.size = size;
    }
}

fn truthy_str(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "../../tests/unit/config/badge.rs"]
mod tests;
