/// A width/height pair in integer app coordinates.
///
/// Sizes are logically non-negative; operations that could produce a
/// negative extent clamp to zero.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Size {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

impl Size {
    /// The zero size.
    pub const ZERO: Self = Self { w: 0, h: 0 };

    /// A size with the given extents.
    pub const fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }

    /// True if either extent is zero or negative.
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Component-wise maximum of two sizes.
    pub fn max(self, other: Self) -> Self {
        Self {
            w: self.w.max(other.w),
            h: self.h.max(other.h),
        }
    }

    /// The size with both extents clamped to be non-negative.
    pub fn clamped(self) -> Self {
        Self {
            w: self.w.max(0),
            h: self.h.max(0),
        }
    }
}

impl From<(i32, i32)> for Size {
    #[inline]
    fn from(v: (i32, i32)) -> Self {
        Self { w: v.0, h: v.1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty() {
        assert!(Size::ZERO.is_empty());
        assert!(Size::new(10, 0).is_empty());
        assert!(Size::new(-1, 10).is_empty());
        assert!(!Size::new(1, 1).is_empty());
    }

    #[test]
    fn clamped() {
        assert_eq!(Size::new(-3, 7).clamped(), Size::new(0, 7));
    }
}
