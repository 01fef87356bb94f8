//! Layout primitives and the container layout helpers.
//!
//! [`Linear`] and [`Grid`] are not widgets: they are value types a widget
//! constructs during [`build`](crate::Widget::build) and queries for child
//! bounds. Both share the [`Sizing`] vocabulary (intrinsic, fixed pixels, or
//! a flexible weight) and the same integer flex distribution.

mod grid;
mod linear;

pub use grid::{Grid, RowSizing};
pub use linear::{Item, Linear};
pub(crate) use linear::LayoutCache;

use geom::Size;

/// Axis a linear container stacks its items along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Items run left to right.
    Horizontal,
    /// Items run top to bottom.
    Vertical,
}

/// How one slot of a container is sized along the container's axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sizing {
    /// Use the occupant's measured size.
    Intrinsic,
    /// A fixed extent in pixels.
    Fixed(i32),
    /// A share of the leftover space, proportional to the weight.
    Flex(u32),
}

/// Upper size limits passed to [`measure`](crate::Widget::measure). An unset
/// axis is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Constraint {
    /// Maximum width in pixels, if bounded.
    pub max_width: Option<i32>,
    /// Maximum height in pixels, if bounded.
    pub max_height: Option<i32>,
}

impl Constraint {
    /// No limit on either axis.
    pub const UNCONSTRAINED: Constraint = Constraint {
        max_width: None,
        max_height: None,
    };

    /// Bounded width, unbounded height.
    pub fn width(max: i32) -> Self {
        Constraint {
            max_width: Some(max),
            max_height: None,
        }
    }

    /// Bounded height, unbounded width.
    pub fn height(max: i32) -> Self {
        Constraint {
            max_width: None,
            max_height: Some(max),
        }
    }

    /// Both axes bounded by `max`.
    pub fn size(max: Size) -> Self {
        Constraint {
            max_width: Some(max.w),
            max_height: Some(max.h),
        }
    }
}

/// Split `total` pixels between flexible slots proportionally to `weights`.
///
/// Every slot gets the floor of its exact share; the leftover pixels are then
/// handed out one at a time walking the slots in reverse order. The result
/// always sums to `total` (or to zero when `total` or the weight sum is not
/// positive).
pub(crate) fn distribute(total: i32, weights: &[u32]) -> Vec<i32> {
    let sum: i64 = weights.iter().map(|w| i64::from(*w)).sum();
    if total <= 0 || sum == 0 {
        return vec![0; weights.len()];
    }
    let mut shares: Vec<i32> = weights
        .iter()
        .map(|w| (i64::from(total) * i64::from(*w) / sum) as i32)
        .collect();
    let mut rest = total - shares.iter().sum::<i32>();
    for (i, w) in weights.iter().enumerate().rev() {
        if rest == 0 {
            break;
        }
        if *w > 0 {
            shares[i] += 1;
            rest -= 1;
        }
    }
    shares
}
