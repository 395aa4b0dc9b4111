use crate::assets::color::resolve_color;
use crate::config::badge::BadgeConfig;
use crate::config::font::FontDescriptor;
use crate::foundation::core::Color;
use crate::foundation::error::{BadgeError, BadgeResult};

/// Decal part of a [`RenderRequest`].
#[derive(Clone, Debug, PartialEq)]
pub struct DecalRequest {
    /// Source url handed to the loader.
    pub url: String,
    /// Scale relative to the badge radius.
    pub scale: f64,
    /// Decal revision the request was taken at.
    pub revision: u64,
}

/// Immutable snapshot of everything one render needs.
///
/// Colors are parsed here, once per render; malformed strings fall back to opaque black.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderRequest {
    /// Bottom-arc text.
    pub name: String,
    /// Top-arc text.
    pub title: String,
    /// Font used for both arcs.
    pub font: FontDescriptor,
    /// Glyph fill.
    pub font_color: Color,
    /// Disc fill and inner outline stroke.
    pub background_color: Color,
    /// Outer outline stroke and bridges.
    pub outline_color: Color,
    /// Decal to composite, if configured.
    pub decal: Option<DecalRequest>,
    /// Square output side in pixels.
    pub size: u32,
}

impl RenderRequest {
    /// Snapshot `config`, rejecting a zero size or font size.
    pub fn from_config(config: &BadgeConfig) -> BadgeResult<Self> {
        if config.size == 0 {
            return Err(BadgeError::validation("badge size must be > 0"));
        }
        if config.font.size_px() == 0 {
            return Err(BadgeError::validation("font size must be > 0"));
        }

        let decal = config.decal.url.as_ref().map(|url| DecalRequest {
            url: url.clone(),
            scale: config.decal.scale,
            revision: config.decal.revision,
        });

        Ok(Self {
            name: config.name.clone(),
            title: config.title.clone(),
            font: config.font.clone(),
            font_color: resolve_color("fontColor", &config.font_color),
            background_color: resolve_color("backgroundColor", &config.background_color),
            outline_color: resolve_color("outlineColor", &config.outline_color),
            decal,
            size: config.size,
        })
    }

    /// Font size in pixels as a float.
    pub fn font_size(&self) -> f64 {
        f64::from(self.font.size_px())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/badge/request.rs"]
mod tests;
