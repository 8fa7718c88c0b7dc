//! 24-bit RGB frame buffer.

use crate::color::{Color, Opacity};
use crate::geometry::{Rect, Size};

/// A full-frame pixel buffer the painter composites into.
///
/// Pixels are row-major [`Color`] values. All writes are bounds-checked;
/// out-of-range coordinates are silently dropped so the painter never needs
/// to pre-clip against the display edge.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: i32,
    height: i32,
    pixels: Vec<Color>,
}

impl FrameBuffer {
    /// Create a buffer filled with `fill`.
    pub fn new(width: i32, height: i32, fill: Color) -> Self {
        assert!(width > 0 && height > 0, "frame buffer must not be empty");
        Self {
            width,
            height,
            pixels: vec![fill; (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The full-buffer rect at the origin.
    pub fn bounds(&self) -> Rect {
        Rect::sized(self.width, self.height)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some((y * self.width + x) as usize)
    }

    /// Read one pixel. `None` outside the buffer.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Overwrite one pixel, ignoring out-of-range writes.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Blend one pixel over the existing value.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color, opa: Opacity) {
        if opa.is_transparent() {
            return;
        }
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color.blend_over(self.pixels[i], opa);
        }
    }

    /// Blend a solid rect over the buffer, clipped to the buffer bounds.
    pub fn fill_rect(&mut self, rect: Rect, color: Color, opa: Opacity) {
        if opa.is_transparent() {
            return;
        }
        let Some(clipped) = rect.intersection(self.bounds()) else {
            return;
        };
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                let i = (y * self.width + x) as usize;
                self.pixels[i] = color.blend_over(self.pixels[i], opa);
            }
        }
    }

    /// The raw row-major pixel data.
    pub fn as_slice(&self) -> &[Color] {
        &self.pixels
    }
}
