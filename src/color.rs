//! RGB color and opacity.
//!
//! Colors are 8-bit-per-channel RGB, matching a 24-bit framebuffer. Opacity
//! is a separate 0..=255 coverage value applied when blending a source color
//! over an existing framebuffer pixel.

/// An 8-bit-per-channel RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Create a color from channel values.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a `0xRRGGBB` hex value.
    pub const fn hex(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xff) as u8,
            g: ((value >> 8) & 0xff) as u8,
            b: (value & 0xff) as u8,
        }
    }

    /// Blend `self` over `dst` with the given opacity.
    ///
    /// `Opacity::COVER` returns `self`, `Opacity::TRANSPARENT` returns `dst`;
    /// everything in between is a linear mix per channel.
    pub fn blend_over(self, dst: Color, opa: Opacity) -> Color {
        match opa.0 {
            255 => self,
            0 => dst,
            a => {
                let a = a as u16;
                let inv = 255 - a;
                Color {
                    r: ((self.r as u16 * a + dst.r as u16 * inv) / 255) as u8,
                    g: ((self.g as u16 * a + dst.g as u16 * inv) / 255) as u8,
                    b: ((self.b as u16 * a + dst.b as u16 * inv) / 255) as u8,
                }
            }
        }
    }

    /// Mix toward `other` by `ratio` (0 = self, 255 = other).
    pub fn mix(self, other: Color, ratio: u8) -> Color {
        other.blend_over(self, Opacity(ratio))
    }
}

/// Opacity / alpha coverage, 0 (transparent) to 255 (cover).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Opacity(pub u8);

impl Opacity {
    pub const TRANSPARENT: Opacity = Opacity(0);
    pub const COVER: Opacity = Opacity(255);

    /// Build from a 0..=100 percentage, saturating.
    pub fn percent(pct: u8) -> Self {
        let pct = pct.min(100) as u16;
        Opacity((pct * 255 / 100) as u8)
    }

    /// Compose two opacities multiplicatively.
    pub fn scaled_by(self, other: Opacity) -> Opacity {
        Opacity(((self.0 as u16 * other.0 as u16) / 255) as u8)
    }

    pub fn is_transparent(self) -> bool {
        self.0 == 0
    }

    pub fn is_cover(self) -> bool {
        self.0 == 255
    }
}

impl Default for Opacity {
    fn default() -> Self {
        Opacity::COVER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_unpacks_channels() {
        let c = Color::hex(0x66_33_00);
        assert_eq!(c, Color::rgb(0x66, 0x33, 0x00));
    }

    #[test]
    fn blend_cover_and_transparent() {
        let src = Color::rgb(200, 100, 50);
        let dst = Color::rgb(10, 20, 30);
        assert_eq!(src.blend_over(dst, Opacity::COVER), src);
        assert_eq!(src.blend_over(dst, Opacity::TRANSPARENT), dst);
    }

    #[test]
    fn blend_midpoint() {
        let src = Color::rgb(255, 255, 255);
        let dst = Color::rgb(0, 0, 0);
        let mid = src.blend_over(dst, Opacity(128));
        // Linear mix lands on 128 (255 * 128 / 255).
        assert_eq!(mid, Color::rgb(128, 128, 128));
    }

    #[test]
    fn opacity_percent() {
        assert_eq!(Opacity::percent(0), Opacity::TRANSPARENT);
        assert_eq!(Opacity::percent(100), Opacity::COVER);
        assert_eq!(Opacity::percent(200), Opacity::COVER);
        assert_eq!(Opacity::percent(50), Opacity(127));
    }

    #[test]
    fn opacity_scaling() {
        assert_eq!(Opacity::COVER.scaled_by(Opacity(100)), Opacity(100));
        assert_eq!(Opacity(128).scaled_by(Opacity::TRANSPARENT), Opacity(0));
    }

    #[test]
    fn mix_is_reverse_blend() {
        let a = Color::rgb(0, 0, 0);
        let b = Color::rgb(255, 255, 255);
        assert_eq!(a.mix(b, 255), b);
        assert_eq!(a.mix(b, 0), a);
    }
}
