//! Icon identifiers.
//!
//! Icon ids below 1024 name images loaded by the rendering backend; ids from
//! 1024 up are code points in an icon font.

use crate::text::{Utf8Seq, utf8};

/// First icon id that refers to a font glyph.
pub const FONT_ICON_BASE: i32 = 1024;

/// Does the id name an image?
pub fn is_image_icon(id: i32) -> bool {
    id < FONT_ICON_BASE
}

/// Does the id name a font glyph?
pub fn is_font_icon(id: i32) -> bool {
    id >= FONT_ICON_BASE
}

/// A classified icon id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    /// Image handle.
    Image(i32),
    /// Icon font code point.
    Font(i32),
}

impl Icon {
    /// Classify a raw icon id.
    pub fn classify(id: i32) -> Self {
        if is_image_icon(id) {
            Self::Image(id)
        } else {
            Self::Font(id)
        }
    }

    /// The raw id.
    pub fn id(self) -> i32 {
        match self {
            Self::Image(id) | Self::Font(id) => id,
        }
    }

    /// The glyph to draw for a font icon.
    pub fn glyph(self) -> Option<Utf8Seq> {
        match self {
            Self::Font(id) => u32::try_from(id).ok().map(utf8),
            Self::Image(_) => None,
        }
    }
}

impl From<i32> for Icon {
    fn from(id: i32) -> Self {
        Self::classify(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition() {
        assert!(is_image_icon(512));
        assert!(!is_font_icon(512));
        assert!(is_font_icon(2048));
        assert!(!is_image_icon(2048));
        assert!(is_image_icon(1023));
        assert!(is_font_icon(1024));
        assert_eq!(Icon::classify(512), Icon::Image(512));
        assert_eq!(Icon::from(2048), Icon::Font(2048));
        assert_eq!(Icon::Font(2048).id(), 2048);
    }

    #[test]
    fn glyphs() {
        // U+E800, the first entypo icon.
        let g = Icon::classify(0xE800).glyph();
        assert_eq!(g.map(|g| g.len()), Some(3));
        assert_eq!(Icon::classify(3).glyph(), None);
    }
}
