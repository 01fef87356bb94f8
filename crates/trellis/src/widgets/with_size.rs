//! Fixed-size wrapper widget.

use geom::{Rect, Size};

use crate::context::Context;
use crate::id::WidgetId;
use crate::layout::Constraint;
use crate::widget::{ChildList, Widget};

/// Pins an inner widget to a fixed width and/or height.
///
/// Layouts that measure their occupants see the fixed axes instead of the
/// inner widget's intrinsic size; an unset axis defers to the inner widget,
/// measured under the fixed axis as a constraint. The inner widget itself is
/// laid out to the wrapper's full bounds, so it needs no changes to be
/// pinned.
#[derive(Debug)]
pub struct WithSize {
    /// The wrapped widget.
    inner: WidgetId,
    /// Fixed width, if any.
    width: Option<i32>,
    /// Fixed height, if any.
    height: Option<i32>,
}

impl WithSize {
    /// Wrap `inner`, pinning the given axes. A `None` axis defers to the
    /// inner widget.
    pub fn new(inner: impl Into<WidgetId>, width: Option<i32>, height: Option<i32>) -> Self {
        WithSize {
            inner: inner.into(),
            width,
            height,
        }
    }

    /// Change the pinned axes.
    pub fn set_size(&mut self, width: Option<i32>, height: Option<i32>) {
        self.width = width;
        self.height = height;
    }

    /// The wrapped widget.
    pub fn inner(&self) -> WidgetId {
        self.inner
    }
}

impl Widget for WithSize {
    fn append_child_widgets(&mut self, _ctx: &mut Context<'_>, children: &mut ChildList) {
        children.append(self.inner);
    }

    fn measure(&self, ctx: &mut Context<'_>, constraint: Constraint) -> Size {
        match (self.width, self.height) {
            (Some(w), Some(h)) => Size::new(w, h),
            (Some(w), None) => {
                let inner = ctx.measure(self.inner, Constraint::width(w));
                Size::new(w, inner.h)
            }
            (None, Some(h)) => {
                let inner = ctx.measure(self.inner, Constraint::height(h));
                Size::new(inner.w, h)
            }
            (None, None) => ctx.measure(self.inner, constraint),
        }
    }

    fn layout(&self, ctx: &mut Context<'_>, _child: WidgetId) -> Rect {
        ctx.bounds(ctx.widget_id())
    }
}
