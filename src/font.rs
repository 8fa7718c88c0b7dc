//! Font registry and the built-in 5x7 bitmap font.
//!
//! Fonts are registered once and referenced by [`FontId`] from style values.
//! Asset loading is out of scope; the registry starts with a built-in
//! fixed-width bitmap font and accepts caller-provided glyph tables.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a registered font.
    pub struct FontId;
}

/// A fixed-width bitmap font.
///
/// Glyphs are column-major bitmaps: `columns` bytes per glyph, one bit per
/// row, LSB at the top row. Glyph data covers printable ASCII 0x20..=0x7E;
/// characters outside that range fall back to the replacement glyph (0x7F
/// box, rendered as a filled cell).
#[derive(Debug, Clone)]
pub struct Font {
    /// Columns per glyph, excluding the inter-glyph gap.
    pub glyph_width: i32,
    /// Pixel rows per glyph.
    pub glyph_height: i32,
    /// Horizontal gap between glyphs.
    pub letter_gap: i32,
    /// Extra pixels between text lines.
    pub line_gap: i32,
    /// Column-major glyph bitmaps for ASCII 0x20..=0x7E, in order.
    glyphs: &'static [u8],
}

impl Font {
    /// Create a font over a static glyph table.
    ///
    /// `glyphs` must hold `glyph_width` bytes for each of the 95 printable
    /// ASCII characters.
    pub fn new(glyph_width: i32, glyph_height: i32, glyphs: &'static [u8]) -> Self {
        assert_eq!(
            glyphs.len() as i32,
            glyph_width * 95,
            "glyph table must cover ASCII 0x20..=0x7E"
        );
        Self {
            glyph_width,
            glyph_height,
            letter_gap: 1,
            line_gap: 1,
            glyphs,
        }
    }

    /// The built-in 5x7 font.
    pub fn builtin() -> Self {
        Self::new(5, 7, &FONT_5X7)
    }

    /// Horizontal advance of one glyph including the letter gap.
    pub fn advance(&self) -> i32 {
        self.glyph_width + self.letter_gap
    }

    /// Vertical advance of one text line including the line gap.
    pub fn line_height(&self) -> i32 {
        self.glyph_height + self.line_gap
    }

    /// Width in pixels of a single-line string.
    pub fn text_width(&self, text: &str) -> i32 {
        let n = text.chars().count() as i32;
        if n == 0 {
            0
        } else {
            n * self.advance() - self.letter_gap
        }
    }

    /// Column bitmap for a character. Non-ASCII maps to a filled box.
    pub fn glyph(&self, ch: char) -> &[u8] {
        let w = self.glyph_width as usize;
        let index = match ch {
            ' '..='~' => ch as usize - 0x20,
            // Replacement: reuse the last glyph slot as a filled box marker.
            _ => 94,
        };
        &self.glyphs[index * w..(index + 1) * w]
    }
}

/// Registry of fonts keyed by [`FontId`].
///
/// Always contains at least the built-in default font.
#[derive(Debug)]
pub struct FontRegistry {
    fonts: SlotMap<FontId, Font>,
    default: FontId,
}

impl FontRegistry {
    /// Create a registry seeded with the built-in font.
    pub fn new() -> Self {
        let mut fonts = SlotMap::with_key();
        let default = fonts.insert(Font::builtin());
        Self { fonts, default }
    }

    /// The default font id.
    pub fn default_font(&self) -> FontId {
        self.default
    }

    /// Register a font and return its id.
    pub fn register(&mut self, font: Font) -> FontId {
        self.fonts.insert(font)
    }

    /// Look up a font; falls back to the default for stale ids.
    pub fn get(&self, id: FontId) -> &Font {
        self.fonts
            .get(id)
            .unwrap_or_else(|| &self.fonts[self.default])
    }
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Classic 5x7 column-major bitmap font, ASCII 0x20..=0x7E.
#[rustfmt::skip]
static FONT_5X7: [u8; 475] = [
    0x00, 0x00, 0x00, 0x00, 0x00, // ' '
    0x00, 0x00, 0x5f, 0x00, 0x00, // '!'
    0x00, 0x07, 0x00, 0x07, 0x00, // '"'
    0x14, 0x7f, 0x14, 0x7f, 0x14, // '#'
    0x24, 0x2a, 0x7f, 0x2a, 0x12, // '$'
    0x23, 0x13, 0x08, 0x64, 0x62, // '%'
    0x36, 0x49, 0x55, 0x22, 0x50, // '&'
    0x00, 0x05, 0x03, 0x00, 0x00, // '\''
    0x00, 0x1c, 0x22, 0x41, 0x00, // '('
    0x00, 0x41, 0x22, 0x1c, 0x00, // ')'
    0x14, 0x08, 0x3e, 0x08, 0x14, // '*'
    0x08, 0x08, 0x3e, 0x08, 0x08, // '+'
    0x00, 0x50, 0x30, 0x00, 0x00, // ','
    0x08, 0x08, 0x08, 0x08, 0x08, // '-'
    0x00, 0x60, 0x60, 0x00, 0x00, // '.'
    0x20, 0x10, 0x08, 0x04, 0x02, // '/'
    0x3e, 0x51, 0x49, 0x45, 0x3e, // '0'
    0x00, 0x42, 0x7f, 0x40, 0x00, // '1'
    0x42, 0x61, 0x51, 0x49, 0x46, // '2'
    0x21, 0x41, 0x45, 0x4b, 0x31, // '3'
    0x18, 0x14, 0x12, 0x7f, 0x10, // '4'
    0x27, 0x45, 0x45, 0x45, 0x39, // '5'
    0x3c, 0x4a, 0x49, 0x49, 0x30, // '6'
    0x01, 0x71, 0x09, 0x05, 0x03, // '7'
    0x36, 0x49, 0x49, 0x49, 0x36, // '8'
    0x06, 0x49, 0x49, 0x29, 0x1e, // '9'
    0x00, 0x36, 0x36, 0x00, 0x00, // ':'
    0x00, 0x56, 0x36, 0x00, 0x00, // ';'
    0x08, 0x14, 0x22, 0x41, 0x00, // '<'
    0x14, 0x14, 0x14, 0x14, 0x14, // '='
    0x00, 0x41, 0x22, 0x14, 0x08, // '>'
    0x02, 0x01, 0x51, 0x09, 0x06, // '?'
    0x32, 0x49, 0x79, 0x41, 0x3e, // '@'
    0x7e, 0x11, 0x11, 0x11, 0x7e, // 'A'
    0x7f, 0x49, 0x49, 0x49, 0x36, // 'B'
    0x3e, 0x41, 0x41, 0x41, 0x22, // 'C'
    0x7f, 0x41, 0x41, 0x22, 0x1c, // 'D'
    0x7f, 0x49, 0x49, 0x49, 0x41, // 'E'
    0x7f, 0x09, 0x09, 0x09, 0x01, // 'F'
    0x3e, 0x41, 0x49, 0x49, 0x7a, // 'G'
    0x7f, 0x08, 0x08, 0x08, 0x7f, // 'H'
    0x00, 0x41, 0x7f, 0x41, 0x00, // 'I'
    0x20, 0x40, 0x41, 0x3f, 0x01, // 'J'
    0x7f, 0x08, 0x14, 0x22, 0x41, // 'K'
    0x7f, 0x40, 0x40, 0x40, 0x40, // 'L'
    0x7f, 0x02, 0x0c, 0x02, 0x7f, // 'M'
    0x7f, 0x04, 0x08, 0x10, 0x7f, // 'N'
    0x3e, 0x41, 0x41, 0x41, 0x3e, // 'O'
    0x7f, 0x09, 0x09, 0x09, 0x06, // 'P'
    0x3e, 0x41, 0x51, 0x21, 0x5e, // 'Q'
    0x7f, 0x09, 0x19, 0x29, 0x46, // 'R'
    0x46, 0x49, 0x49, 0x49, 0x31, // 'S'
    0x01, 0x01, 0x7f, 0x01, 0x01, // 'T'
    0x3f, 0x40, 0x40, 0x40, 0x3f, // 'U'
    0x1f, 0x20, 0x40, 0x20, 0x1f, // 'V'
    0x3f, 0x40, 0x38, 0x40, 0x3f, // 'W'
    0x63, 0x14, 0x08, 0x14, 0x63, // 'X'
    0x07, 0x08, 0x70, 0x08, 0x07, // 'Y'
    0x61, 0x51, 0x49, 0x45, 0x43, // 'Z'
    0x00, 0x7f, 0x41, 0x41, 0x00, // '['
    0x02, 0x04, 0x08, 0x10, 0x20, // '\\'
    0x00, 0x41, 0x41, 0x7f, 0x00, // ']'
    0x04, 0x02, 0x01, 0x02, 0x04, // '^'
    0x40, 0x40, 0x40, 0x40, 0x40, // '_'
    0x00, 0x01, 0x02, 0x04, 0x00, // '`'
    0x20, 0x54, 0x54, 0x54, 0x78, // 'a'
    0x7f, 0x48, 0x44, 0x44, 0x38, // 'b'
    0x38, 0x44, 0x44, 0x44, 0x20, // 'c'
    0x38, 0x44, 0x44, 0x48, 0x7f, // 'd'
    0x38, 0x54, 0x54, 0x54, 0x18, // 'e'
    0x08, 0x7e, 0x09, 0x01, 0x02, // 'f'
    0x0c, 0x52, 0x52, 0x52, 0x3e, // 'g'
    0x7f, 0x08, 0x04, 0x04, 0x78, // 'h'
    0x00, 0x44, 0x7d, 0x40, 0x00, // 'i'
    0x20, 0x40, 0x44, 0x3d, 0x00, // 'j'
    0x7f, 0x10, 0x28, 0x44, 0x00, // 'k'
    0x00, 0x41, 0x7f, 0x40, 0x00, // 'l'
    0x7c, 0x04, 0x18, 0x04, 0x78, // 'm'
    0x7c, 0x08, 0x04, 0x04, 0x78, // 'n'
    0x38, 0x44, 0x44, 0x44, 0x38, // 'o'
    0x7c, 0x14, 0x14, 0x14, 0x08, // 'p'
    0x08, 0x14, 0x14, 0x18, 0x7c, // 'q'
    0x7c, 0x08, 0x04, 0x04, 0x08, // 'r'
    0x48, 0x54, 0x54, 0x54, 0x20, // 's'
    0x04, 0x3f, 0x44, 0x40, 0x20, // 't'
    0x3c, 0x40, 0x40, 0x20, 0x7c, // 'u'
    0x1c, 0x20, 0x40, 0x20, 0x1c, // 'v'
    0x3c, 0x40, 0x30, 0x40, 0x3c, // 'w'
    0x44, 0x28, 0x10, 0x28, 0x44, // 'x'
    0x0c, 0x50, 0x50, 0x50, 0x3c, // 'y'
    0x44, 0x64, 0x54, 0x4c, 0x44, // 'z'
    0x00, 0x08, 0x36, 0x41, 0x00, // '{'
    0x00, 0x00, 0x7f, 0x00, 0x00, // '|'
    0x00, 0x41, 0x36, 0x08, 0x00, // '}'
    0x10, 0x08, 0x08, 0x10, 0x08, // '~'
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_metrics() {
        let f = Font::builtin();
        assert_eq!(f.glyph_width, 5);
        assert_eq!(f.glyph_height, 7);
        assert_eq!(f.advance(), 6);
        assert_eq!(f.line_height(), 8);
    }

    #[test]
    fn text_width() {
        let f = Font::builtin();
        assert_eq!(f.text_width(""), 0);
        assert_eq!(f.text_width("A"), 5);
        // Two glyphs plus one gap.
        assert_eq!(f.text_width("AB"), 11);
    }

    #[test]
    fn glyph_lookup() {
        let f = Font::builtin();
        // Space is fully blank.
        assert!(f.glyph(' ').iter().all(|&c| c == 0));
        // 'A' has set pixels.
        assert!(f.glyph('A').iter().any(|&c| c != 0));
        // Out-of-range characters fall back to the replacement slot.
        assert_eq!(f.glyph('\u{263a}'), f.glyph('~'));
    }

    #[test]
    fn registry_default_font() {
        let reg = FontRegistry::new();
        let id = reg.default_font();
        assert_eq!(reg.get(id).glyph_width, 5);
    }

    #[test]
    fn registry_register_and_get() {
        let mut reg = FontRegistry::new();
        let mut big = Font::builtin();
        big.line_gap = 3;
        let id = reg.register(big);
        assert_eq!(reg.get(id).line_gap, 3);
    }

    #[test]
    fn registry_stale_id_falls_back() {
        let reg = FontRegistry::new();
        let other = FontRegistry::new();
        // An id from a different registry generation still resolves to the
        // default rather than panicking.
        let _ = reg.get(other.default_font());
    }
}
