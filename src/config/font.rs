/// Font parameters for badge text, plus the derived CSS-style descriptor string.
///
/// The descriptor (`"bold 52px Courier"`) is rebuilt by every setter so reads are consistent
/// before any render happens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontDescriptor {
    family: String,
    bold: bool,
    size_px: u32,
    css: String,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self::new("Courier", true, 52)
    }
}

impl FontDescriptor {
    /// Create a descriptor.
    pub fn new(family: impl Into<String>, bold: bool, size_px: u32) -> Self {
        let mut out = Self {
            family: family.into(),
            bold,
            size_px,
            css: String::new(),
        };
        out.refresh();
        out
    }

    /// Font family name.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Whether the bold weight is requested.
    pub fn bold(&self) -> bool {
        self.bold
    }

    /// Font size in pixels.
    pub fn size_px(&self) -> u32 {
        self.size_px
    }

    /// Derived descriptor string, e.g. `"bold 52px Courier"`.
    pub fn css(&self) -> &str {
        &self.css
    }

    pub(crate) fn set_family(&mut self, family: impl Into<String>) {
        self.family = family.into();
        self.refresh();
    }

    pub(crate) fn set_bold(&mut self, bold: bool) {
        self.bold = bold;
        self.refresh();
    }

    pub(crate) fn set_size_px(&mut self, size_px: u32) {
        self.size_px = size_px;
        self.refresh();
    }

    fn refresh(&mut self) {
        self.css = if self.bold {
            format!("bold {}px {}", self.size_px, self.family)
        } else {
            format!("{}px {}", self.size_px, self.family)
        };
    }
}

impl std::fmt::Display for FontDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.css)
    }
}
