use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use usvg::fontdb::{Family, Query, Stretch, Style, Weight};

use crate::config::font::FontDescriptor;
use crate::foundation::error::{BadgeError, BadgeResult};

/// Font face bytes resolved for a [`FontDescriptor`].
#[derive(Clone, Debug)]
pub(crate) struct ResolvedFont {
    /// Identity used to register the face with the layout engine once.
    pub(crate) id: u64,
    pub(crate) bytes: Arc<Vec<u8>>,
    pub(crate) index: u32,
}

/// Resolves font descriptors to face bytes.
///
/// A pinned face (from [`FontBook::pinned`]) is used for every descriptor. Otherwise the system
/// font database is loaded on first use and queried for the descriptor's family at the requested
/// weight. Misses fall back to an installed monospaced face, then to any face at all.
#[derive(Default)]
pub(crate) struct FontBook {
    pinned: Option<ResolvedFont>,
    db: Option<usvg::fontdb::Database>,
    resolved: HashMap<(String, bool), ResolvedFont>,
    next_id: u64,
}

impl FontBook {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Font book that always answers with the given face.
    pub(crate) fn pinned(bytes: Vec<u8>) -> Self {
        Self {
            pinned: Some(ResolvedFont {
                id: 0,
                bytes: Arc::new(bytes),
                index: 0,
            }),
            next_id: 1,
            ..Self::default()
        }
    }

    /// Font book pinned to the face stored at `path`.
    pub(crate) fn from_font_file(path: &Path) -> BadgeResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        Ok(Self::pinned(bytes))
    }

    pub(crate) fn resolve(&mut self, font: &FontDescriptor) -> BadgeResult<ResolvedFont> {
        if let Some(pinned) = &self.pinned {
            return Ok(pinned.clone());
        }
        let key = (font.family().to_owned(), font.bold());
        if let Some(hit) = self.resolved.get(&key) {
            return Ok(hit.clone());
        }

        let db = self.db.get_or_insert_with(|| {
            let mut db = usvg::fontdb::Database::new();
            db.load_system_fonts();
            // fontdb maps generic monospace to "Courier New" unless told otherwise.
            if let Some(family) = installed_monospace_family(&db) {
                tracing::debug!(%family, "using installed monospace family");
                db.set_monospace_family(family);
            }
            tracing::debug!(faces = db.len(), "loaded system font database");
            db
        });
        let weight = if font.bold() {
            Weight::BOLD
        } else {
            Weight::NORMAL
        };

        let families = [Family::Name(font.family()), Family::Monospace];
        let query = Query {
            families: &families,
            weight,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let face = db
            .query(&query)
            .or_else(|| {
                tracing::debug!(font = font.css(), "no matching face, falling back");
                fallback_face(db, weight)
            })
            .ok_or_else(|| BadgeError::font(format!("no face found for '{}'", font.css())))?;
        let (bytes, index) = db
            .with_face_data(face, |data, index| (data.to_vec(), index))
            .ok_or_else(|| BadgeError::font(format!("face data unavailable for '{}'", font.css())))?;

        let out = ResolvedFont {
            id: self.next_id,
            bytes: Arc::new(bytes),
            index,
        };
        self.next_id += 1;
        tracing::debug!(font = font.css(), id = out.id, "resolved font face");
        self.resolved.insert(key, out.clone());
        Ok(out)
    }
}

fn installed_monospace_family(db: &usvg::fontdb::Database) -> Option<String> {
    db.faces()
        .filter(|f| f.monospaced)
        .find_map(|f| f.families.first().map(|(name, _)| name.clone()))
}

fn fallback_face(db: &usvg::fontdb::Database, weight: Weight) -> Option<usvg::fontdb::ID> {
    db.faces()
        .find(|f| f.monospaced && f.weight == weight)
        .or_else(|| db.faces().find(|f| f.monospaced))
        .or_else(|| db.faces().find(|f| f.weight == weight))
        .or_else(|| db.faces().next())
        .map(|f| f.id)
}

/// Stateful helper for shaping single-line text with Parley.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    families: HashMap<u64, String>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Construct a new layout engine with fresh Parley contexts.
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            families: HashMap::new(),
        }
    }

    fn family_for(&mut self, font: &ResolvedFont) -> BadgeResult<String> {
        if let Some(name) = self.families.get(&font.id) {
            return Ok(name.clone());
        }

        let families = self.font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(font.bytes.as_ref().clone()),
            None,
        );
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| BadgeError::font("no font families registered from font bytes"))?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| BadgeError::font("registered font family has no name"))?
            .to_string();
        self.families.insert(font.id, family_name.clone());
        Ok(family_name)
    }

    /// Shape `text` as a single unbroken line.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        font: &ResolvedFont,
        size_px: f32,
    ) -> BadgeResult<parley::Layout<()>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(BadgeError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let family_name = self.family_for(font)?;
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
