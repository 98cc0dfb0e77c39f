//! Fonts and attributed text used by text meshes

use atelier_math::Color;
use serde::{Serialize, Deserialize};

/// A font family at a point size (in scene units)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Font {
    /// Family name, `"system"` for the platform default
    pub family: String,
    /// Glyph height in scene units
    pub size: f32,
}

impl Default for Font {
    fn default() -> Self {
        Self::system(0.05)
    }
}

impl Font {
    /// Create a font from a family name and size
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }

    /// The platform default font at the given size
    pub fn system(size: f32) -> Self {
        Self::new("system", size)
    }

    /// Same family at a different size
    pub fn with_size(&self, size: f32) -> Self {
        Self::new(self.family.clone(), size)
    }
}

/// A span of text sharing the same attributes
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    /// Font override, `None` inherits the container default
    pub font: Option<Font>,
    /// Foreground color override
    pub color: Option<Color>,
}

impl TextRun {
    /// A run with no attribute overrides
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: None,
            color: None,
        }
    }

    /// Set the font of this run
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    /// Set the color of this run
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

/// Rich text: an ordered list of attributed runs
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributedText {
    pub runs: Vec<TextRun>,
}

impl AttributedText {
    /// Single unattributed run
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            runs: vec![TextRun::plain(text)],
        }
    }

    /// Append a run
    pub fn push(&mut self, run: TextRun) {
        self.runs.push(run);
    }

    /// Concatenated characters of every run
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// True if no run contains a visible character
    pub fn is_blank(&self) -> bool {
        self.runs
            .iter()
            .all(|r| r.text.chars().all(char::is_whitespace))
    }
}
