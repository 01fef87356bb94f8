use crate::{Insets, Point, Size};

/// An axis-aligned rectangle stored as min/max corners.
///
/// The rectangle covers `min.x..max.x` by `min.y..max.y` (half-open). A
/// rectangle with `max <= min` on either axis is empty; empty rectangles
/// mean "unspecified" in layout answers and "fully clipped" in visibility
/// answers.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Rect {
    /// Top-left corner, inclusive.
    pub min: Point,
    /// Bottom-right corner, exclusive.
    pub max: Point,
}

impl Rect {
    /// The canonical empty rectangle.
    pub const EMPTY: Self = Self {
        min: Point::ZERO,
        max: Point::ZERO,
    };

    /// A rectangle from corner coordinates.
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Point::new(x0, y0),
            max: Point::new(x1, y1),
        }
    }

    /// A rectangle at `pos` extending by `size`.
    pub fn at(pos: Point, size: Size) -> Self {
        Self {
            min: pos,
            max: Point {
                x: pos.x.saturating_add(size.w.max(0)),
                y: pos.y.saturating_add(size.h.max(0)),
            },
        }
    }

    /// A rectangle at the origin extending by `size`.
    pub fn from_size(size: Size) -> Self {
        Self::at(Point::ZERO, size)
    }

    /// Width of the rectangle, zero when empty.
    pub fn width(&self) -> i32 {
        (self.max.x.saturating_sub(self.min.x)).max(0)
    }

    /// Height of the rectangle, zero when empty.
    pub fn height(&self) -> i32 {
        (self.max.y.saturating_sub(self.min.y)).max(0)
    }

    /// The rectangle's extents.
    pub fn size(&self) -> Size {
        Size {
            w: self.width(),
            h: self.height(),
        }
    }

    /// True when the rectangle covers no area.
    pub fn is_empty(&self) -> bool {
        self.max.x <= self.min.x || self.max.y <= self.min.y
    }

    /// True when `p` falls inside the rectangle (half-open).
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    /// True when `other` lies entirely within this rectangle. Empty
    /// rectangles are contained in everything.
    pub fn contains_rect(&self, other: Self) -> bool {
        if other.is_empty() {
            return true;
        }
        other.min.x >= self.min.x
            && other.min.y >= self.min.y
            && other.max.x <= self.max.x
            && other.max.y <= self.max.y
    }

    /// The overlapping region, or [`Rect::EMPTY`] when there is none.
    pub fn intersect(&self, other: Self) -> Self {
        let r = Self {
            min: Point {
                x: self.min.x.max(other.min.x),
                y: self.min.y.max(other.min.y),
            },
            max: Point {
                x: self.max.x.min(other.max.x),
                y: self.max.y.min(other.max.y),
            },
        };
        if r.is_empty() { Self::EMPTY } else { r }
    }

    /// The smallest rectangle covering both. Empty inputs are absorbed.
    pub fn union(&self, other: Self) -> Self {
        if self.is_empty() {
            return if other.is_empty() { Self::EMPTY } else { other };
        }
        if other.is_empty() {
            return *self;
        }
        Self {
            min: Point {
                x: self.min.x.min(other.min.x),
                y: self.min.y.min(other.min.y),
            },
            max: Point {
                x: self.max.x.max(other.max.x),
                y: self.max.y.max(other.max.y),
            },
        }
    }

    /// The rectangle shifted by an offset.
    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self {
            min: self.min.offset(dx, dy),
            max: self.max.offset(dx, dy),
        }
    }

    /// The rectangle shrunk by per-edge padding, clamped to empty.
    pub fn inset(&self, insets: Insets) -> Self {
        let r = Self {
            min: self.min.offset(insets.left, insets.top),
            max: self.max.offset(-insets.right, -insets.bottom),
        };
        if r.is_empty() { Self::EMPTY } else { r }
    }

    /// The center point, rounded toward the min corner.
    pub fn center(&self) -> Point {
        Point {
            x: self.min.x + self.width() / 2,
            y: self.min.y + self.height() / 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction() {
        let r = Rect::at(Point::new(10, 20), Size::new(30, 40));
        assert_eq!(r, Rect::new(10, 20, 40, 60));
        assert_eq!(r.size(), Size::new(30, 40));
        assert_eq!(Rect::at(Point::new(5, 5), Size::new(-3, 4)).width(), 0);
    }

    #[test]
    fn contains() {
        let r = Rect::new(0, 0, 10, 10);
        assert!(r.contains(Point::new(0, 0)));
        assert!(r.contains(Point::new(9, 9)));
        assert!(!r.contains(Point::new(10, 9)));
        assert!(!r.contains(Point::new(-1, 5)));
        assert!(!Rect::EMPTY.contains(Point::ZERO));
    }

    #[test]
    fn contains_rect() {
        let outer = Rect::new(0, 0, 100, 100);
        assert!(outer.contains_rect(Rect::new(10, 10, 90, 90)));
        assert!(outer.contains_rect(outer));
        assert!(!outer.contains_rect(Rect::new(10, 10, 101, 90)));
        assert!(outer.contains_rect(Rect::EMPTY));
    }

    #[test]
    fn intersect() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 15, 15);
        assert_eq!(a.intersect(b), Rect::new(5, 5, 10, 10));
        assert_eq!(a.intersect(Rect::new(20, 20, 30, 30)), Rect::EMPTY);
        // Edge-adjacent rectangles do not overlap.
        assert_eq!(a.intersect(Rect::new(10, 0, 20, 10)), Rect::EMPTY);
        assert_eq!(a.intersect(Rect::EMPTY), Rect::EMPTY);
    }

    #[test]
    fn union() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(20, 5, 30, 15);
        assert_eq!(a.union(b), Rect::new(0, 0, 30, 15));
        assert_eq!(a.union(Rect::EMPTY), a);
        assert_eq!(Rect::EMPTY.union(b), b);
        assert_eq!(Rect::EMPTY.union(Rect::EMPTY), Rect::EMPTY);
    }

    #[test]
    fn inset() {
        let r = Rect::new(0, 0, 100, 50);
        assert_eq!(r.inset(Insets::uniform(10)), Rect::new(10, 10, 90, 40));
        assert_eq!(r.inset(Insets::uniform(30)), Rect::EMPTY);
    }

    #[test]
    fn translate() {
        assert_eq!(
            Rect::new(0, 0, 10, 10).translate(-5, 3),
            Rect::new(-5, 3, 5, 13)
        );
    }

    #[test]
    fn center() {
        assert_eq!(Rect::new(0, 0, 10, 10).center(), Point::new(5, 5));
        assert_eq!(Rect::new(0, 0, 11, 11).center(), Point::new(5, 5));
    }
}
