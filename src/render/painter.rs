//! Clipped drawing primitives over the frame buffer.

use crate::color::{Color, Opacity};
use crate::font::Font;
use crate::geometry::{Point, Rect};

use super::buffer::FrameBuffer;

/// Draws into a [`FrameBuffer`] with every operation clipped to one rect.
///
/// The refresh pass creates one painter per dirty region, so widget paint
/// code can draw its full geometry and rely on the clip to discard whatever
/// falls outside the damaged area.
pub struct Painter<'a> {
    fb: &'a mut FrameBuffer,
    clip: Rect,
}

impl<'a> Painter<'a> {
    /// Create a painter clipped to `clip` (further clipped to the buffer).
    pub fn new(fb: &'a mut FrameBuffer, clip: Rect) -> Self {
        let clip = clip.intersection(fb.bounds()).unwrap_or_default();
        Self { fb, clip }
    }

    /// The active clip rect.
    pub fn clip(&self) -> Rect {
        self.clip
    }

    fn blend(&mut self, x: i32, y: i32, color: Color, opa: Opacity) {
        if self.clip.contains(Point::new(x, y)) {
            self.fb.blend_pixel(x, y, color, opa);
        }
    }

    /// Fill a rect.
    pub fn fill_rect(&mut self, rect: Rect, color: Color, opa: Opacity) {
        if let Some(clipped) = rect.intersection(self.clip) {
            self.fb.fill_rect(clipped, color, opa);
        }
    }

    /// Fill a rect with rounded corners.
    ///
    /// `radius` is clamped to half the smaller side; zero falls back to the
    /// square fill.
    pub fn fill_rect_rounded(&mut self, rect: Rect, radius: i32, color: Color, opa: Opacity) {
        let r = radius.min(rect.width / 2).min(rect.height / 2);
        if r <= 0 {
            self.fill_rect(rect, color, opa);
            return;
        }
        let Some(clipped) = rect.intersection(self.clip) else {
            return;
        };
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                if Self::inside_rounded(rect, r, x, y) {
                    self.fb.blend_pixel(x, y, color, opa);
                }
            }
        }
    }

    fn inside_rounded(rect: Rect, r: i32, x: i32, y: i32) -> bool {
        // Distance test against the nearest corner circle center; pixels in
        // the straight sections have no corner on both axes.
        let cx = if x < rect.x + r {
            rect.x + r
        } else if x >= rect.right() - r {
            rect.right() - r - 1
        } else {
            return true;
        };
        let cy = if y < rect.y + r {
            rect.y + r
        } else if y >= rect.bottom() - r {
            rect.bottom() - r - 1
        } else {
            return true;
        };
        let dx = (x - cx) as i64;
        let dy = (y - cy) as i64;
        dx * dx + dy * dy <= (r as i64) * (r as i64)
    }

    /// Stroke a border just inside the rect.
    pub fn draw_border(&mut self, rect: Rect, width: i32, color: Color, opa: Opacity) {
        if width <= 0 || rect.is_empty() {
            return;
        }
        let w = width.min(rect.width / 2 + 1).min(rect.height / 2 + 1);
        self.fill_rect(Rect::new(rect.x, rect.y, rect.width, w), color, opa);
        self.fill_rect(
            Rect::new(rect.x, rect.bottom() - w, rect.width, w),
            color,
            opa,
        );
        self.fill_rect(
            Rect::new(rect.x, rect.y + w, w, rect.height - 2 * w),
            color,
            opa,
        );
        self.fill_rect(
            Rect::new(rect.right() - w, rect.y + w, w, rect.height - 2 * w),
            color,
            opa,
        );
    }

    /// Stroke an outline outside the rect, separated by `pad` pixels.
    pub fn draw_outline(&mut self, rect: Rect, width: i32, pad: i32, color: Color, opa: Opacity) {
        if width <= 0 || rect.is_empty() {
            return;
        }
        let outer = rect.inset(-(pad + width));
        let inner = rect.inset(-pad);
        self.fill_rect(
            Rect::new(outer.x, outer.y, outer.width, width),
            color,
            opa,
        );
        self.fill_rect(
            Rect::new(outer.x, inner.bottom(), outer.width, width),
            color,
            opa,
        );
        self.fill_rect(
            Rect::new(outer.x, inner.y, width, inner.height),
            color,
            opa,
        );
        self.fill_rect(
            Rect::new(inner.right(), inner.y, width, inner.height),
            color,
            opa,
        );
    }

    /// Draw one line of text with its top-left corner at `origin`.
    ///
    /// `letter_space` is added to the font's own letter gap.
    pub fn draw_text(
        &mut self,
        origin: Point,
        text: &str,
        font: &Font,
        color: Color,
        opa: Opacity,
        letter_space: i32,
    ) {
        let mut x = origin.x;
        for ch in text.chars() {
            for (col, bits) in font.glyph(ch).iter().enumerate() {
                for row in 0..font.glyph_height {
                    if bits & (1 << row) != 0 {
                        self.blend(x + col as i32, origin.y + row, color, opa);
                    }
                }
            }
            x += font.advance() + letter_space;
        }
    }

    /// Draw a straight line segment with square caps.
    pub fn draw_line(&mut self, from: Point, to: Point, width: i32, color: Color, opa: Opacity) {
        if width <= 0 {
            return;
        }
        // Bresenham over the spine, stamping a width-sized square per step.
        let half = width / 2;
        let dx = (to.x - from.x).abs();
        let dy = -(to.y - from.y).abs();
        let sx = if from.x < to.x { 1 } else { -1 };
        let sy = if from.y < to.y { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (from.x, from.y);
        loop {
            self.fill_rect(Rect::new(x - half, y - half, width, width), color, opa);
            if x == to.x && y == to.y {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Draw connected line segments through `points`.
    pub fn draw_polyline(&mut self, points: &[Point], width: i32, color: Color, opa: Opacity) {
        for pair in points.windows(2) {
            self.draw_line(pair[0], pair[1], width, color, opa);
        }
    }

    /// Draw a circular arc band.
    ///
    /// Angles are in degrees, zero at three o'clock, increasing clockwise.
    /// The band extends `width` pixels inward from `radius`. An end angle
    /// not greater than the start is treated as wrapping past 360.
    pub fn draw_arc(
        &mut self,
        center: Point,
        radius: i32,
        width: i32,
        start_deg: i32,
        end_deg: i32,
        color: Color,
        opa: Opacity,
    ) {
        if radius <= 0 || width <= 0 {
            return;
        }
        let start = start_deg.rem_euclid(360) as f32;
        let mut end = end_deg.rem_euclid(360) as f32;
        if end <= start {
            end += 360.0;
        }
        let inner = (radius - width).max(0) as f32;
        let outer = radius as f32;
        let bounds = Rect::new(
            center.x - radius,
            center.y - radius,
            2 * radius + 1,
            2 * radius + 1,
        );
        let Some(clipped) = bounds.intersection(self.clip) else {
            return;
        };
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                let dx = (x - center.x) as f32;
                let dy = (y - center.y) as f32;
                let dist = (dx * dx + dy * dy).sqrt();
                if dist < inner || dist > outer {
                    continue;
                }
                // Screen y grows downward, so atan2 angles already run
                // clockwise from three o'clock.
                let mut angle = dy.atan2(dx).to_degrees();
                if angle < 0.0 {
                    angle += 360.0;
                }
                if (angle >= start && angle <= end) || (angle + 360.0 <= end) {
                    self.fb.blend_pixel(x, y, color, opa);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn painter_over(fb: &mut FrameBuffer) -> Painter<'_> {
        let clip = fb.bounds();
        Painter::new(fb, clip)
    }

    #[test]
    fn fill_respects_clip() {
        let mut fb = FrameBuffer::new(20, 20, Color::BLACK);
        let mut p = Painter::new(&mut fb, Rect::new(5, 5, 5, 5));
        p.fill_rect(Rect::new(0, 0, 20, 20), Color::WHITE, Opacity::COVER);
        assert_eq!(fb.pixel(4, 4), Some(Color::BLACK));
        assert_eq!(fb.pixel(5, 5), Some(Color::WHITE));
        assert_eq!(fb.pixel(9, 9), Some(Color::WHITE));
        assert_eq!(fb.pixel(10, 10), Some(Color::BLACK));
    }

    #[test]
    fn rounded_fill_skips_corners() {
        let mut fb = FrameBuffer::new(20, 20, Color::BLACK);
        let mut p = painter_over(&mut fb);
        p.fill_rect_rounded(Rect::new(0, 0, 16, 16), 5, Color::WHITE, Opacity::COVER);
        // Extreme corner is outside the corner circle.
        assert_eq!(fb.pixel(0, 0), Some(Color::BLACK));
        assert_eq!(fb.pixel(15, 15), Some(Color::BLACK));
        // Center and edge midpoints are inside.
        assert_eq!(fb.pixel(8, 8), Some(Color::WHITE));
        assert_eq!(fb.pixel(8, 0), Some(Color::WHITE));
        assert_eq!(fb.pixel(0, 8), Some(Color::WHITE));
    }

    #[test]
    fn zero_radius_is_square() {
        let mut fb = FrameBuffer::new(10, 10, Color::BLACK);
        let mut p = painter_over(&mut fb);
        p.fill_rect_rounded(Rect::new(0, 0, 4, 4), 0, Color::WHITE, Opacity::COVER);
        assert_eq!(fb.pixel(0, 0), Some(Color::WHITE));
    }

    #[test]
    fn border_is_hollow() {
        let mut fb = FrameBuffer::new(20, 20, Color::BLACK);
        let mut p = painter_over(&mut fb);
        p.draw_border(Rect::new(2, 2, 10, 10), 2, Color::WHITE, Opacity::COVER);
        assert_eq!(fb.pixel(2, 2), Some(Color::WHITE));
        assert_eq!(fb.pixel(3, 11), Some(Color::WHITE));
        assert_eq!(fb.pixel(11, 5), Some(Color::WHITE));
        // Interior untouched.
        assert_eq!(fb.pixel(6, 6), Some(Color::BLACK));
        // Outside untouched.
        assert_eq!(fb.pixel(1, 1), Some(Color::BLACK));
    }

    #[test]
    fn outline_sits_outside() {
        let mut fb = FrameBuffer::new(30, 30, Color::BLACK);
        let mut p = painter_over(&mut fb);
        p.draw_outline(Rect::new(10, 10, 8, 8), 1, 2, Color::WHITE, Opacity::COVER);
        // One pixel ring at distance pad+1.
        assert_eq!(fb.pixel(7, 7), Some(Color::WHITE));
        assert_eq!(fb.pixel(20, 14), Some(Color::WHITE));
        // The pad gap and the rect itself stay clean.
        assert_eq!(fb.pixel(9, 9), Some(Color::BLACK));
        assert_eq!(fb.pixel(10, 10), Some(Color::BLACK));
    }

    #[test]
    fn text_paints_within_line_box() {
        let mut fb = FrameBuffer::new(60, 12, Color::BLACK);
        let font = Font::builtin();
        let mut p = painter_over(&mut fb);
        p.draw_text(
            Point::new(1, 2),
            "Hi",
            &font,
            Color::WHITE,
            Opacity::COVER,
            0,
        );
        let painted = fb.as_slice().iter().filter(|&&c| c == Color::WHITE).count();
        assert!(painted > 0);
        // Nothing outside the two-glyph line box.
        for y in 0..12 {
            for x in 0..60 {
                if fb.pixel(x, y) == Some(Color::WHITE) {
                    assert!(x >= 1 && x < 1 + font.text_width("Hi"));
                    assert!(y >= 2 && y < 2 + font.glyph_height);
                }
            }
        }
    }

    #[test]
    fn space_paints_nothing() {
        let mut fb = FrameBuffer::new(10, 10, Color::BLACK);
        let font = Font::builtin();
        let mut p = painter_over(&mut fb);
        p.draw_text(
            Point::new(0, 0),
            " ",
            &font,
            Color::WHITE,
            Opacity::COVER,
            0,
        );
        assert!(fb.as_slice().iter().all(|&c| c == Color::BLACK));
    }

    #[test]
    fn horizontal_line() {
        let mut fb = FrameBuffer::new(20, 20, Color::BLACK);
        let mut p = painter_over(&mut fb);
        p.draw_line(
            Point::new(2, 5),
            Point::new(10, 5),
            1,
            Color::WHITE,
            Opacity::COVER,
        );
        for x in 2..=10 {
            assert_eq!(fb.pixel(x, 5), Some(Color::WHITE));
        }
        assert_eq!(fb.pixel(1, 5), Some(Color::BLACK));
        assert_eq!(fb.pixel(5, 6), Some(Color::BLACK));
    }

    #[test]
    fn polyline_connects_segments() {
        let mut fb = FrameBuffer::new(20, 20, Color::BLACK);
        let mut p = painter_over(&mut fb);
        p.draw_polyline(
            &[Point::new(0, 0), Point::new(5, 0), Point::new(5, 5)],
            1,
            Color::WHITE,
            Opacity::COVER,
        );
        assert_eq!(fb.pixel(3, 0), Some(Color::WHITE));
        assert_eq!(fb.pixel(5, 3), Some(Color::WHITE));
    }

    #[test]
    fn arc_band_hits_expected_quadrant() {
        let mut fb = FrameBuffer::new(40, 40, Color::BLACK);
        let mut p = painter_over(&mut fb);
        // Quarter arc from 0 to 90 degrees: the lower-right quadrant.
        p.draw_arc(
            Point::new(20, 20),
            10,
            3,
            0,
            90,
            Color::WHITE,
            Opacity::COVER,
        );
        assert_eq!(fb.pixel(29, 20), Some(Color::WHITE));
        assert_eq!(fb.pixel(20, 29), Some(Color::WHITE));
        // Opposite quadrant untouched.
        assert_eq!(fb.pixel(11, 20), Some(Color::BLACK));
        assert_eq!(fb.pixel(20, 11), Some(Color::BLACK));
        // Inside the band's inner edge untouched.
        assert_eq!(fb.pixel(22, 22), Some(Color::BLACK));
    }
}
