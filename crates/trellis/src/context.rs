//! The context handed to widget callbacks.
//!
//! A [`Context`] borrows the [`App`] for the duration of one callback and
//! scopes it to the widget being called. Geometry queries answer in app
//! coordinates and may run other widgets' `measure` and `layout` on demand;
//! the widget currently taken out of its slot sees fallback answers about
//! itself instead of an error.

use std::any::Any;
use std::rc::Rc;

use geom::{Point, Rect, Size};

use crate::app::App;
use crate::colormode::ColorMode;
use crate::error::{Error, Result};
use crate::focus::FocusManager;
use crate::id::{TypedId, WidgetId};
use crate::input::InputSnapshot;
use crate::layout::Constraint;
use crate::painter::Painter;
use crate::runtime::ImageHandle;
use crate::text::TextShaper;
use crate::widget::Widget;

/// Per-callback view of the app, scoped to one widget.
pub struct Context<'a> {
    /// The host. Layout helpers reach through for the memo cache.
    pub(crate) app: &'a mut App,
    /// The widget this callback belongs to.
    id: WidgetId,
}

impl<'a> Context<'a> {
    /// A context for `id`'s callbacks.
    pub(crate) fn new(app: &'a mut App, id: WidgetId) -> Self {
        Context { app, id }
    }

    /// The widget this callback belongs to.
    pub fn widget_id(&self) -> WidgetId {
        self.id
    }

    /// Id of the root widget.
    pub fn root(&self) -> WidgetId {
        self.app.root()
    }

    /// Parent of `id` for the current build, if any.
    pub fn parent(&self, id: impl Into<WidgetId>) -> Option<WidgetId> {
        self.app.parent(id)
    }

    /// Children of `id` for the current build, in declaration order.
    pub fn children(&self, id: impl Into<WidgetId>) -> &[WidgetId] {
        self.app.children(id)
    }

    /// Whether `id` participates in the current build.
    pub fn in_tree(&self, id: impl Into<WidgetId>) -> bool {
        self.app.in_tree(id)
    }

    /// The region widgets may occupy.
    pub fn app_bounds(&self) -> Rect {
        self.app.app_bounds()
    }

    /// Current device scale factor.
    pub fn scale(&self) -> f64 {
        self.app.scale()
    }

    /// The effective color mode.
    pub fn color_mode(&self) -> ColorMode {
        self.app.color_mode()
    }

    /// The effective locale list, most preferred first.
    pub fn locales(&self) -> Vec<String> {
        self.app.locales()
    }

    /// Runtime tick counter as of this frame.
    pub fn ticks(&self) -> u64 {
        self.app.ticks
    }

    /// Runtime tick rate.
    pub fn ticks_per_second(&self) -> u64 {
        self.app.ticks_per_second
    }

    /// Input state for this frame.
    pub fn input(&self) -> &InputSnapshot {
        &self.app.snapshot
    }

    /// Bounds of `id` in app coordinates; empty when `id` is unknown.
    pub fn bounds(&mut self, id: impl Into<WidgetId>) -> Rect {
        self.app.bounds(id).unwrap_or(Rect::EMPTY)
    }

    /// Visible region of `id`; empty when fully clipped or unknown.
    pub fn visible_bounds(&mut self, id: impl Into<WidgetId>) -> Rect {
        self.app.visible_bounds(id).unwrap_or(Rect::EMPTY)
    }

    /// Resolved size of `id`: overrides first, measurement for the rest.
    pub fn actual_size(&mut self, id: impl Into<WidgetId>) -> Size {
        self.app.actual_size(id).unwrap_or(Size::ZERO)
    }

    /// Measure `id` under `constraint`.
    pub fn measure(&mut self, id: impl Into<WidgetId>, constraint: Constraint) -> Size {
        self.app
            .measure_widget(id.into(), constraint)
            .unwrap_or(Size::ZERO)
    }

    /// A widget's recorded position.
    pub fn position(&self, id: impl Into<WidgetId>) -> Point {
        self.app.position(id)
    }

    /// A widget's opacity in `[0, 1]`.
    pub fn opacity(&self, id: impl Into<WidgetId>) -> f32 {
        self.app.opacity(id)
    }

    /// Whether `id` is in the tree with no hidden ancestor.
    pub fn is_visible(&self, id: impl Into<WidgetId>) -> bool {
        self.app.is_visible(id)
    }

    /// Whether `id` is in the tree with no disabled ancestor.
    pub fn is_enabled(&self, id: impl Into<WidgetId>) -> bool {
        self.app.is_enabled(id)
    }

    /// The focused widget, falling back to the root.
    pub fn focused(&self) -> WidgetId {
        FocusManager::focused(self.app)
    }

    /// Does the widget hold terminal focus?
    pub fn is_focused(&self, id: impl Into<WidgetId>) -> bool {
        self.app.is_focused(id.into())
    }

    /// Is the widget the focused widget or one of its ancestors?
    ///
    /// # Panics
    ///
    /// Panics when called during build; the tree is still forming then.
    pub fn is_focused_or_has_focused_child(&self, id: impl Into<WidgetId>) -> bool {
        self.app.is_focused_or_has_focused_child(id.into())
    }

    /// Focus a widget. Ignored unless the widget is in the tree, visible,
    /// and enabled. Returns `true` if focus changed.
    pub fn set_focus(&mut self, id: impl Into<WidgetId>) -> bool {
        self.app.set_focus(id.into())
    }

    /// Move focus to the root if the focused widget lies in the subtree
    /// rooted at `id`. Returns `true` if focus changed.
    pub fn blur(&mut self, id: impl Into<WidgetId>) -> bool {
        self.app.blur(id.into())
    }

    /// Move a widget. Effective until a parent `layout` says otherwise.
    pub fn set_position(&mut self, id: impl Into<WidgetId>, position: impl Into<Point>) {
        self.app.set_position(id, position);
    }

    /// Record a size override for `id`, attributed to the calling widget.
    pub fn set_size(&mut self, id: impl Into<WidgetId>, size: Size) {
        self.app
            .merge_override(id.into(), self.id, Some(size.w), Some(size.h));
    }

    /// Record a width override for `id`, attributed to the calling widget.
    pub fn set_width(&mut self, id: impl Into<WidgetId>, width: i32) {
        self.app.merge_override(id.into(), self.id, Some(width), None);
    }

    /// Record a height override for `id`, attributed to the calling widget.
    pub fn set_height(&mut self, id: impl Into<WidgetId>, height: i32) {
        self.app
            .merge_override(id.into(), self.id, None, Some(height));
    }

    /// Flip a widget's hidden flag; hiding blurs its subtree.
    pub fn set_hidden(&mut self, id: impl Into<WidgetId>, hidden: bool) {
        self.app.set_hidden(id, hidden);
    }

    /// Flip a widget's enabled flag; disabling blurs its subtree.
    pub fn set_enabled(&mut self, id: impl Into<WidgetId>, enabled: bool) {
        self.app.set_enabled(id, enabled);
    }

    /// Set a widget's opacity in `[0, 1]`.
    pub fn set_opacity(&mut self, id: impl Into<WidgetId>, opacity: f32) {
        self.app.set_opacity(id, opacity);
    }

    /// Install a draw hook that replaces `id`'s own draw.
    pub fn set_custom_draw(
        &mut self,
        id: impl Into<WidgetId>,
        hook: impl FnMut(&mut Context<'_>, &mut Painter<'_>) + 'static,
    ) {
        self.app.set_custom_draw_hook(id.into(), Some(Box::new(hook)));
    }

    /// Remove `id`'s draw hook, restoring its own draw.
    pub fn clear_custom_draw(&mut self, id: impl Into<WidgetId>) {
        self.app.set_custom_draw_hook(id.into(), None);
    }

    /// Add a widget to the pool. It joins the tree once some widget appends
    /// it during a build.
    pub fn insert(&mut self, widget: impl Into<Box<dyn Widget>>) -> WidgetId {
        self.app.insert(widget)
    }

    /// Add a widget to the pool, returning a typed handle.
    pub fn insert_typed<W: Widget>(&mut self, widget: W) -> TypedId<W> {
        self.app.insert_typed(widget)
    }

    /// Borrow another widget by typed handle. The calling widget's own slot
    /// is taken, so asking about itself reports busy.
    pub fn widget<W: Widget>(&self, id: TypedId<W>) -> Result<&W> {
        self.app.get(id)
    }

    /// Mutably borrow another widget by typed handle.
    pub fn widget_mut<W: Widget>(&mut self, id: TypedId<W>) -> Result<&mut W> {
        self.app.get_mut(id)
    }

    /// Resolve `name` through the registered image loader.
    pub fn image(&mut self, name: &str) -> Result<ImageHandle> {
        match self.app.images.as_mut() {
            Some(images) => images.load(name),
            None => Err(Error::Resource(format!(
                "no image registry to load {name:?}"
            ))),
        }
    }

    /// Pixel size of a loaded image, zero without a registry.
    pub fn image_size(&self, image: ImageHandle) -> Size {
        self.app
            .images
            .as_ref()
            .map_or(Size::ZERO, |images| images.size(image))
    }

    /// The registered text engine, if any.
    pub fn text_shaper(&self) -> Option<&dyn TextShaper> {
        self.app.shaper.as_deref()
    }

    /// Inherited model lookup from the calling widget upward.
    pub fn model(&self, key: &str) -> Option<Rc<dyn Any>> {
        self.app.lookup_model(self.id, key)
    }

    /// Mark a region for repaint at the next draw.
    pub fn request_redraw(&mut self, region: Rect) {
        self.app.request_redraw(region);
    }

    /// Mark everything for repaint at the next draw.
    pub fn request_full_redraw(&mut self) {
        self.app.request_full_redraw();
    }
}
