/// Per-edge padding in pixels.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Insets {
    /// Left edge.
    pub left: i32,
    /// Top edge.
    pub top: i32,
    /// Right edge.
    pub right: i32,
    /// Bottom edge.
    pub bottom: i32,
}

impl Insets {
    /// No padding.
    pub const ZERO: Self = Self {
        left: 0,
        top: 0,
        right: 0,
        bottom: 0,
    };

    /// The same padding on every edge.
    pub const fn uniform(v: i32) -> Self {
        Self {
            left: v,
            top: v,
            right: v,
            bottom: v,
        }
    }

    /// Horizontal and vertical padding pairs.
    pub const fn symmetric(horizontal: i32, vertical: i32) -> Self {
        Self {
            left: horizontal,
            top: vertical,
            right: horizontal,
            bottom: vertical,
        }
    }

    /// Total horizontal padding.
    pub fn horizontal(&self) -> i32 {
        self.left.saturating_add(self.right)
    }

    /// Total vertical padding.
    pub fn vertical(&self) -> i32 {
        self.top.saturating_add(self.bottom)
    }
}
