use crate::foundation::core::Color;
use crate::foundation::error::{BadgeError, BadgeResult};

/// Parse a CSS color string (hex, functional notations and named colors).
pub fn parse_css_color(s: &str) -> BadgeResult<Color> {
    let s = s.trim();
    if s.is_empty() {
        return Err(BadgeError::validation("color string is empty"));
    }
    let parsed = csscolorparser::parse(s)
        .map_err(|e| BadgeError::validation(format!("color \"{s}\": {e}")))?;
    let [r, g, b, a] = parsed.to_rgba8();
    Ok(Color::rgba(r, g, b, a))
}

/// Resolve a color string for drawing, falling back to opaque black when it does not parse.
pub(crate) fn resolve_color(field: &'static str, s: &str) -> Color {
    match parse_css_color(s) {
        Ok(c) => c,
        Err(err) => {
            tracing::warn!(field, value = s, %err, "unparseable color, drawing black");
            Color::BLACK
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
