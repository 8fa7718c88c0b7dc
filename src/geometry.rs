//! Geometry primitives: Point, Size, Rect.
//!
//! Coordinates are in display pixels. `Rect` is the workhorse of the
//! invalidation pipeline: dirty regions are rects, layout results are rects,
//! and painting is clipped to rects.

/// A point in display coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate by a delta.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// A width/height pair in display pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Whether either dimension is zero or negative.
    pub fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Pixel area. Zero for empty sizes.
    pub fn area(self) -> i64 {
        if self.is_empty() {
            0
        } else {
            self.width as i64 * self.height as i64
        }
    }
}

/// An axis-aligned rectangle: origin plus size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rect at the origin with the given size.
    pub const fn sized(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Build from an origin point and a size.
    pub fn from_parts(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// The origin corner.
    pub fn origin(self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The size component.
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Exclusive right edge.
    pub fn right(self) -> i32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(self) -> i32 {
        self.y + self.height
    }

    /// Whether the rect has no area.
    pub fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Pixel area. Zero for empty rects.
    pub fn area(self) -> i64 {
        self.size().area()
    }

    /// Whether a point lies inside (edges exclusive on right/bottom).
    pub fn contains(self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Whether `other` lies entirely within `self`.
    pub fn contains_rect(self, other: Rect) -> bool {
        if other.is_empty() {
            return true;
        }
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Whether two rects overlap (shared edges do not count).
    pub fn intersects(self, other: Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// The overlapping region, or `None` if the rects do not overlap.
    pub fn intersection(self, other: Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Some(Rect::new(x, y, right - x, bottom - y))
    }

    /// The smallest rect covering both. An empty operand contributes nothing.
    pub fn union(self, other: Rect) -> Rect {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }

    /// Shrink by `amount` on every side. Collapses to empty when over-shrunk.
    pub fn inset(self, amount: i32) -> Rect {
        Rect::new(
            self.x + amount,
            self.y + amount,
            self.width - 2 * amount,
            self.height - 2 * amount,
        )
    }

    /// Translate by a delta.
    pub fn translated(self, dx: i32, dy: i32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Whether two rects touch or overlap; used to decide dirty-rect merging.
    pub fn adjacent_or_overlapping(self, other: Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_offset() {
        let p = Point::new(3, 4).offset(-1, 2);
        assert_eq!(p, Point::new(2, 6));
    }

    #[test]
    fn size_empty_and_area() {
        assert!(Size::new(0, 10).is_empty());
        assert!(Size::new(10, -1).is_empty());
        assert_eq!(Size::new(0, 10).area(), 0);
        assert_eq!(Size::new(4, 5).area(), 20);
    }

    #[test]
    fn rect_edges() {
        let r = Rect::new(2, 3, 10, 20);
        assert_eq!(r.right(), 12);
        assert_eq!(r.bottom(), 23);
        assert_eq!(r.origin(), Point::new(2, 3));
        assert_eq!(r.size(), Size::new(10, 20));
    }

    #[test]
    fn rect_contains_point() {
        let r = Rect::new(0, 0, 10, 10);
        assert!(r.contains(Point::new(0, 0)));
        assert!(r.contains(Point::new(9, 9)));
        assert!(!r.contains(Point::new(10, 9)));
        assert!(!r.contains(Point::new(-1, 5)));
    }

    #[test]
    fn rect_contains_rect() {
        let outer = Rect::new(0, 0, 10, 10);
        assert!(outer.contains_rect(Rect::new(2, 2, 3, 3)));
        assert!(outer.contains_rect(outer));
        assert!(!outer.contains_rect(Rect::new(8, 8, 5, 5)));
        // Empty rects are trivially contained.
        assert!(outer.contains_rect(Rect::new(50, 50, 0, 0)));
    }

    #[test]
    fn rect_intersects() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        let c = Rect::new(10, 0, 5, 5);
        assert!(a.intersects(b));
        // Shared edge only: no overlap.
        assert!(!a.intersects(c));
    }

    #[test]
    fn rect_intersection() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert_eq!(a.intersection(b), Some(Rect::new(5, 5, 5, 5)));
        assert_eq!(a.intersection(Rect::new(20, 20, 5, 5)), None);
    }

    #[test]
    fn rect_union() {
        let a = Rect::new(0, 0, 4, 4);
        let b = Rect::new(6, 6, 2, 2);
        assert_eq!(a.union(b), Rect::new(0, 0, 8, 8));
    }

    #[test]
    fn rect_union_with_empty() {
        let a = Rect::new(1, 1, 4, 4);
        let empty = Rect::new(100, 100, 0, 0);
        assert_eq!(a.union(empty), a);
        assert_eq!(empty.union(a), a);
    }

    #[test]
    fn rect_inset() {
        let r = Rect::new(0, 0, 10, 10).inset(2);
        assert_eq!(r, Rect::new(2, 2, 6, 6));
        assert!(Rect::new(0, 0, 3, 3).inset(2).is_empty());
    }

    #[test]
    fn rect_translated() {
        assert_eq!(
            Rect::new(1, 1, 2, 2).translated(3, -1),
            Rect::new(4, 0, 2, 2)
        );
    }

    #[test]
    fn rect_adjacency() {
        let a = Rect::new(0, 0, 10, 10);
        // Touching at the right edge counts as adjacent.
        assert!(a.adjacent_or_overlapping(Rect::new(10, 0, 5, 10)));
        assert!(!a.adjacent_or_overlapping(Rect::new(12, 0, 5, 10)));
        assert!(!a.adjacent_or_overlapping(Rect::new(0, 0, 0, 0)));
    }
}
