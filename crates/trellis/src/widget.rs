//! The widget protocol.
//!
//! Every widget implements [`Widget`]; all methods have default bodies, so a
//! widget overrides only what it needs. Widgets live in the app's pool and
//! are addressed by [`WidgetId`]; the tree over them is reassembled every
//! frame by [`Widget::append_child_widgets`], which is what makes a widget
//! reachable ("in the tree") for the current build.
//!
//! Lifecycle methods receive a [`Context`] that answers queries (bounds,
//! visibility, focus, input) and records state changes (position, size
//! overrides, visibility, opacity). Input handlers return an
//! [`InputOutcome`] that controls propagation.

use std::any::{Any, type_name};
use std::rc::Rc;

use geom::{Rect, Size};

use crate::context::Context;
use crate::error::Result;
use crate::id::WidgetId;
use crate::input::CursorShape;
use crate::layout::Constraint;
use crate::painter::Painter;

/// Result of a pointing or button input handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputOutcome {
    /// The widget handled the input; propagation stops.
    Handle,
    /// Propagation stops and the frame marks the input as consumed without a
    /// handling widget.
    Abort,
    /// The widget declined the input; dispatch continues.
    #[default]
    Ignore,
}

/// Collects the child ids a widget declares for the current frame.
///
/// Appending is an O(1) push; the host attaches the collected children
/// (setting parents and stamping the build count) after the declaring
/// callback returns.
#[derive(Debug, Default)]
pub struct ChildList {
    /// Appended child ids, in declaration order.
    ids: Vec<WidgetId>,
}

impl ChildList {
    /// Append a child for this frame.
    pub fn append(&mut self, child: impl Into<WidgetId>) {
        self.ids.push(child.into());
    }

    /// Number of children appended so far.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True when no children have been appended.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Consume the collected ids.
    pub(crate) fn into_ids(self) -> Vec<WidgetId> {
        self.ids
    }
}

/// The capability set every widget implements.
///
/// `Widget: Any` so that [`TypedId`](crate::TypedId) handles can downcast to
/// concrete types.
pub trait Widget: Any {
    /// Inherited lookup for dependency-injected application state. The host
    /// walks from the queried widget toward the root and returns the first
    /// `Some`.
    fn model(&self, key: &str) -> Option<Rc<dyn Any>> {
        let _ = key;
        None
    }

    /// Reset hook invoked immediately before this frame's append/build
    /// steps. The conventional place to clear and rebind event slots.
    fn before_build(&mut self, ctx: &mut Context<'_>) {
        let _ = ctx;
    }

    /// Declare children for this frame by appending their ids. A widget no
    /// ancestor appends this frame is not in the tree at this build.
    fn append_child_widgets(&mut self, ctx: &mut Context<'_>, children: &mut ChildList) {
        let _ = (ctx, children);
    }

    /// Populate per-frame state: set child positions and size overrides,
    /// bind handlers, create sub-widgets lazily via [`Context::insert`].
    fn build(&mut self, ctx: &mut Context<'_>) -> Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// The widget's intrinsic size under `constraint`. Must be pure and
    /// idempotent for the same input; the host may call it repeatedly within
    /// a frame.
    fn measure(&self, ctx: &mut Context<'_>, constraint: Constraint) -> Size {
        let _ = (ctx, constraint);
        Size::ZERO
    }

    /// Bounds for `child` in app coordinates, when this widget positions its
    /// children. An empty rectangle means "unspecified": the host falls back
    /// to the child's recorded position and size.
    fn layout(&self, ctx: &mut Context<'_>, child: WidgetId) -> Rect {
        let _ = (ctx, child);
        Rect::EMPTY
    }

    /// Pointing input while the cursor is over this widget. Dispatch runs
    /// innermost-first and stops at the first non-[`InputOutcome::Ignore`].
    fn handle_pointing_input(&mut self, ctx: &mut Context<'_>) -> InputOutcome {
        let _ = ctx;
        InputOutcome::Ignore
    }

    /// Keyboard/button input. Dispatch walks from the focused widget up its
    /// ancestor chain and stops at the first non-[`InputOutcome::Ignore`].
    fn handle_button_input(&mut self, ctx: &mut Context<'_>) -> InputOutcome {
        let _ = ctx;
        InputOutcome::Ignore
    }

    /// Periodic update independent of input, once per frame after dispatch.
    fn tick(&mut self, ctx: &mut Context<'_>) -> Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// The pointer shape to show while this widget is hovered. `None`
    /// defers to ancestors.
    fn cursor_shape(&self, ctx: &mut Context<'_>) -> Option<CursorShape> {
        let _ = ctx;
        None
    }

    /// Paint the widget. The painter is scissored to the widget's visible
    /// bounds and modulates colors by the effective opacity.
    fn draw(&mut self, ctx: &mut Context<'_>, painter: &mut Painter<'_>) {
        let _ = (ctx, painter);
    }

    /// Nonzero lifts this widget and its subtree into an overlay pass; its
    /// visible bounds then ignore parent clipping.
    fn z_delta(&self) -> i32 {
        0
    }

    /// True when this widget declines pointing input itself but lets its
    /// descendants receive it.
    fn pass_through(&self) -> bool {
        false
    }

    /// Short name for dumps and test instrumentation; defaults to the
    /// unqualified type name.
    fn name(&self) -> String {
        let full = type_name::<Self>();
        let base = full.split('<').next().unwrap_or(full);
        base.rsplit("::").next().unwrap_or(base).to_string()
    }
}

impl<W> From<W> for Box<dyn Widget>
where
    W: Widget + 'static,
{
    fn from(widget: W) -> Self {
        Box::new(widget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A widget relying entirely on default methods.
    struct Bare;
    impl Widget for Bare {}

    #[test]
    fn default_name_is_unqualified() {
        assert_eq!(Bare.name(), "Bare");
    }

    #[test]
    fn defaults_are_inert() {
        let w = Bare;
        assert_eq!(w.z_delta(), 0);
        assert!(!w.pass_through());
        assert!(w.model("anything").is_none());
    }

    #[test]
    fn child_list_collects_in_order() {
        let mut list = ChildList::default();
        assert!(list.is_empty());
        let a = WidgetId::default();
        list.append(a);
        assert_eq!(list.len(), 1);
        assert_eq!(list.into_ids(), vec![a]);
    }
}
