//! Roundel renders circular badges.
//!
//! A badge is a filled disc with an optional centered decal, a double outline, a name and a title
//! curved along the bottom and top of the disc, and two short arcs bridging the gaps between the
//! texts. The public API is renderer-oriented:
//!
//! - Build a [`BadgeConfig`] (setters, or a [`BadgePatch`] loaded from JSON)
//! - Create a [`BadgeRenderer`] around a [`DecalLoader`]
//! - `make` the badge into any [`Surface`], e.g. a [`CpuSurface`], and read back a [`FrameRGBA`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod badge;
mod config;
mod foundation;

/// Drawing surfaces.
pub mod render;

pub use crate::foundation::core::{Affine, Color, Point, Rect, Vec2};
pub use crate::foundation::error::{BadgeError, BadgeResult};

pub use crate::assets::cache::DecalCache;
pub use crate::assets::color::parse_css_color;
pub use crate::assets::decode::{DecalImage, decode_decal, decode_image, rasterize_svg};
pub use crate::assets::loader::{DecalLoader, FsDecalLoader, MemoryDecalLoader};
pub use crate::badge::decal::{CancelHandle, DecalOutcome, fit_decal};
pub use crate::badge::geometry::Geometry;
pub use crate::badge::paint::{paint_decal, paint_disc, paint_outline};
pub use crate::badge::pipeline::{RenderReport, RenderState};
pub use crate::badge::renderer::BadgeRenderer;
pub use crate::badge::request::{DecalRequest, RenderRequest};
pub use crate::badge::text::{
    ArcSide, GlyphPlacement, angle_per_char, angular_span, bridge_arcs, glyph_placements,
    paint_decoration, paint_text,
};
pub use crate::config::badge::{BadgeConfig, DecalState, MAX_IMAGE_SCALE, MIN_IMAGE_SCALE};
pub use crate::config::font::FontDescriptor;
pub use crate::config::opts::{DECAL_TIMEOUT_ENV, DEFAULT_DECAL_TIMEOUT, RendererOpts};
pub use crate::config::patch::BadgePatch;
pub use crate::render::cpu::CpuSurface;
pub use crate::render::frame::FrameRGBA;
pub use crate::render::recording::{CommandLog, DrawCommand, RecordingSurface};
pub use crate::render::surface::{ArcPath, Surface};
