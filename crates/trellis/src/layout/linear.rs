//! Row/column layout with memoized flex distribution.

use std::collections::HashMap;

use geom::{Insets, Rect, Size};

use crate::context::Context;
use crate::id::WidgetId;

use super::{Constraint, Direction, Sizing, distribute};

/// One slot of a [`Linear`] container.
#[derive(Debug)]
pub struct Item {
    /// Occupant, if the slot holds a widget.
    widget: Option<WidgetId>,
    /// Extent along the container's axis.
    sizing: Sizing,
    /// Layout to run within the slot, for slots holding a sub-container.
    sublayout: Option<Box<Linear>>,
}

impl Item {
    /// A slot holding a widget.
    pub fn widget(widget: impl Into<WidgetId>, sizing: Sizing) -> Self {
        Item {
            widget: Some(widget.into()),
            sizing,
            sublayout: None,
        }
    }

    /// An empty slot that only takes up space.
    pub fn spacer(sizing: Sizing) -> Self {
        Item {
            widget: None,
            sizing,
            sublayout: None,
        }
    }

    /// A slot holding a nested layout, which runs within the slot's bounds.
    pub fn nested(layout: Linear, sizing: Sizing) -> Self {
        Item {
            widget: None,
            sizing,
            sublayout: Some(Box::new(layout)),
        }
    }
}

/// A row or column of items.
///
/// Construct one per build, then ask it for item or widget bounds from
/// [`crate::Widget::layout`]. Repeated queries are cheap: the flex
/// distribution is memoized on the app, keyed by the container extents and
/// the item list, so only the first query per configuration pays for it.
#[derive(Debug)]
pub struct Linear {
    /// Axis the items run along.
    direction: Direction,
    /// The slots, in order.
    items: Vec<Item>,
    /// Pixels between adjacent slots.
    gap: i32,
    /// Padding between the container bounds and the first/last slots.
    padding: Insets,
}

impl Linear {
    /// An empty left-to-right container.
    pub fn horizontal() -> Self {
        Linear::new(Direction::Horizontal)
    }

    /// An empty top-to-bottom container.
    pub fn vertical() -> Self {
        Linear::new(Direction::Vertical)
    }

    /// An empty container along `direction`.
    pub fn new(direction: Direction) -> Self {
        Linear {
            direction,
            items: Vec::new(),
            gap: 0,
            padding: Insets::ZERO,
        }
    }

    /// Add a slot.
    #[must_use]
    pub fn item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    /// Add every slot from `items`.
    #[must_use]
    pub fn items(mut self, items: impl IntoIterator<Item = Item>) -> Self {
        self.items.extend(items);
        self
    }

    /// Set the pixels between adjacent slots.
    #[must_use]
    pub fn gap(mut self, gap: i32) -> Self {
        self.gap = gap;
        self
    }

    /// Set the padding between the container bounds and the slots.
    #[must_use]
    pub fn padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the container has no slots.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Bounds of slot `index` when the container occupies `bounds`. Empty
    /// for an out-of-range index.
    pub fn item_bounds(&self, ctx: &mut Context<'_>, bounds: Rect, index: usize) -> Rect {
        if index >= self.items.len() {
            return Rect::EMPTY;
        }
        let inner = bounds.inset(self.padding);
        let sizes = self.resolve(ctx, inner);
        let offset: i32 = sizes[..index].iter().map(|s| s + self.gap).sum();
        let along = sizes[index];
        match self.direction {
            Direction::Horizontal => Rect::new(
                inner.min.x + offset,
                inner.min.y,
                inner.min.x + offset + along,
                inner.max.y,
            ),
            Direction::Vertical => Rect::new(
                inner.min.x,
                inner.min.y + offset,
                inner.max.x,
                inner.min.y + offset + along,
            ),
        }
    }

    /// Bounds of the slot holding `widget`, searching nested layouts within
    /// their slots. Empty when no slot holds the widget.
    pub fn widget_bounds(
        &self,
        ctx: &mut Context<'_>,
        bounds: Rect,
        widget: impl Into<WidgetId>,
    ) -> Rect {
        let widget = widget.into();
        for (index, item) in self.items.iter().enumerate() {
            if item.widget == Some(widget) {
                return self.item_bounds(ctx, bounds, index);
            }
            if let Some(sub) = &item.sublayout {
                let slot = self.item_bounds(ctx, bounds, index);
                let found = sub.widget_bounds(ctx, slot, widget);
                if !found.is_empty() {
                    return found;
                }
            }
        }
        Rect::EMPTY
    }

    /// Pixel extents of every slot along the axis, memoized on the app.
    ///
    /// Intrinsic slots are measured under a fixed-across constraint first;
    /// the measured sizes are part of the cache key, so a widget whose
    /// measurement changes never sees a stale distribution.
    fn resolve(&self, ctx: &mut Context<'_>, inner: Rect) -> Vec<i32> {
        let (along, across) = match self.direction {
            Direction::Horizontal => (inner.width(), inner.height()),
            Direction::Vertical => (inner.height(), inner.width()),
        };
        let across_constraint = match self.direction {
            Direction::Horizontal => Constraint::height(across),
            Direction::Vertical => Constraint::width(across),
        };

        let mut item_keys = Vec::with_capacity(self.items.len());
        for item in &self.items {
            let measured = match (item.sizing, item.widget) {
                (Sizing::Intrinsic, Some(widget)) => Some(ctx.measure(widget, across_constraint)),
                _ => None,
            };
            item_keys.push(ItemKey {
                widget: item.widget,
                sizing: item.sizing,
                measured,
            });
        }
        let key = LinearKey {
            direction: self.direction,
            along,
            across,
            gap: self.gap,
            items: item_keys,
        };

        let now = ctx.ticks();
        if let Some(sizes) = ctx.app.layout_cache.lookup(&key, now) {
            return sizes;
        }

        let mut sizes = vec![0i32; self.items.len()];
        let mut flex_slots = Vec::new();
        let mut weights = Vec::new();
        let mut available = along - self.gap * (self.items.len().saturating_sub(1) as i32);
        for (index, item) in self.items.iter().enumerate() {
            match item.sizing {
                Sizing::Fixed(px) => sizes[index] = px.max(0),
                Sizing::Intrinsic => {
                    let measured = key.items[index].measured.unwrap_or(Size::ZERO);
                    sizes[index] = match self.direction {
                        Direction::Horizontal => measured.w,
                        Direction::Vertical => measured.h,
                    }
                    .max(0);
                }
                Sizing::Flex(weight) => {
                    flex_slots.push(index);
                    weights.push(weight);
                }
            }
            available -= sizes[index];
        }
        for (slot, share) in flex_slots.into_iter().zip(distribute(available, &weights)) {
            sizes[slot] = share;
        }

        ctx.app.layout_cache.store(key, sizes.clone(), now);
        sizes
    }
}

/// Identity of one slot for memoization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ItemKey {
    /// The occupant.
    widget: Option<WidgetId>,
    /// The size spec.
    sizing: Sizing,
    /// Measured size under the across constraint, for intrinsic slots.
    measured: Option<Size>,
}

/// Everything a linear distribution depends on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct LinearKey {
    /// Axis the items run along.
    direction: Direction,
    /// Container extent along the axis, after padding.
    along: i32,
    /// Container extent across the axis, after padding.
    across: i32,
    /// Pixels between adjacent slots.
    gap: i32,
    /// Per-slot identities.
    items: Vec<ItemKey>,
}

/// One memoized distribution.
struct CacheEntry {
    /// Slot extents along the axis.
    sizes: Vec<i32>,
    /// Tick of the most recent lookup or store.
    last_used: u64,
}

/// Memoized linear distributions, owned by the app and swept once per frame.
#[derive(Default)]
pub(crate) struct LayoutCache {
    /// Live entries.
    entries: HashMap<LinearKey, CacheEntry>,
}

impl LayoutCache {
    /// The memoized sizes for `key`, refreshing its last-used tick.
    fn lookup(&mut self, key: &LinearKey, now: u64) -> Option<Vec<i32>> {
        let entry = self.entries.get_mut(key)?;
        entry.last_used = now;
        Some(entry.sizes.clone())
    }

    /// Memoize `sizes` for `key`.
    fn store(&mut self, key: LinearKey, sizes: Vec<i32>, now: u64) {
        self.entries.insert(
            key,
            CacheEntry {
                sizes,
                last_used: now,
            },
        );
    }

    /// Drop entries that have not been used for a second. With an unknown
    /// tick rate nothing can age, so nothing is dropped.
    pub(crate) fn evict(&mut self, now: u64, ticks_per_second: u64) {
        if ticks_per_second == 0 {
            return;
        }
        self.entries
            .retain(|_, entry| now.saturating_sub(entry.last_used) <= ticks_per_second);
    }

    /// Number of live entries.
    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.len()
    }
}
