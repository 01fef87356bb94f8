//! The host application: widget pool ownership and the frame pipeline.
//!
//! [`App`] drives one frame as a strict sequence: capture input, rebuild the
//! tree top-down, dispatch pointing then button input, tick every widget,
//! then sweep for dirty pixels. Drawing is a separate entry point so the
//! runtime shell controls when pixels actually move; [`App::draw`] paints
//! only the coalesced dirty region and is a no-op when nothing changed.
//!
//! Widget callbacks run with the widget taken out of its pool slot, which
//! keeps the rest of the pool reachable through the [`Context`] they
//! receive. A slot found empty reports [`Error::WidgetBusy`].

use std::any::Any;
use std::rc::Rc;

use geom::{Point, Rect, Size};

use crate::colormode::{self, ColorMode};
use crate::context::Context;
use crate::error::{Error, Result};
use crate::focus::FocusManager;
use crate::id::{TypedId, WidgetId};
use crate::input::{CursorShape, InputSnapshot};
use crate::layout::{Constraint, LayoutCache};
use crate::locale;
use crate::node::{CustomDraw, SizeOverride};
use crate::painter::Painter;
use crate::runtime::{ImageRegistry, Runtime, Surface};
use crate::text::TextShaper;
use crate::tree::Tree;
use crate::widget::{ChildList, InputOutcome, Widget};

/// Which pipeline step is currently running. Some queries are restricted to
/// particular phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Phase {
    /// Between frames.
    #[default]
    Idle,
    /// BeforeBuild/AppendChildWidgets/Build callbacks.
    Build,
    /// Pointing and button dispatch.
    Input,
    /// Tick callbacks.
    Tick,
    /// Draw callbacks.
    Draw,
}

/// Widget-tree host. Owns the pool, runs the frame pipeline, and resolves
/// geometry lazily on query.
pub struct App {
    /// Widget pool and per-build structure.
    pub(crate) tree: Tree,
    /// Currently running pipeline step.
    pub(crate) phase: Phase,
    /// The region widgets may occupy, in app coordinates.
    pub(crate) app_bounds: Rect,
    /// Device scale factor.
    pub(crate) scale: f64,
    /// Explicit color mode, overriding detection.
    pub(crate) color_mode: Option<ColorMode>,
    /// Explicit locale list, overriding the system.
    pub(crate) locales: Option<Vec<String>>,
    /// Input state captured at tick-start; stable for the whole frame.
    pub(crate) snapshot: InputSnapshot,
    /// Runtime tick counter as of this frame.
    pub(crate) ticks: u64,
    /// Runtime tick rate.
    pub(crate) ticks_per_second: u64,
    /// Region that must repaint, coalesced across the frame.
    pub(crate) dirty: Rect,
    /// Repaint everything regardless of `dirty`.
    pub(crate) full_redraw: bool,
    /// Widgets whose styling changed without a geometry change.
    pub(crate) pending_repaint: Vec<WidgetId>,
    /// Widget that handled (or aborted) pointing input this frame.
    pub(crate) last_pointing: Option<(WidgetId, InputOutcome)>,
    /// Pointer shape resolved from the hover chain this frame.
    pub(crate) cursor: CursorShape,
    /// Image loader registered by the runtime shell.
    pub(crate) images: Option<Box<dyn ImageRegistry>>,
    /// Text engine registered by the runtime shell.
    pub(crate) shaper: Option<Box<dyn TextShaper>>,
    /// Memoized linear-layout distributions.
    pub(crate) layout_cache: LayoutCache,
}

impl App {
    /// An app hosting `root`. Call [`App::set_bounds`] before the first
    /// frame; until then every widget is fully clipped.
    pub fn new(root: impl Into<Box<dyn Widget>>) -> Self {
        App {
            tree: Tree::new(root.into()),
            phase: Phase::Idle,
            app_bounds: Rect::EMPTY,
            scale: 1.0,
            color_mode: None,
            locales: None,
            snapshot: InputSnapshot::default(),
            ticks: 0,
            ticks_per_second: 0,
            dirty: Rect::EMPTY,
            full_redraw: true,
            pending_repaint: Vec::new(),
            last_pointing: None,
            cursor: CursorShape::Default,
            images: None,
            shaper: None,
            layout_cache: LayoutCache::default(),
        }
    }

    /// Id of the root widget.
    pub fn root(&self) -> WidgetId {
        self.tree.root()
    }

    /// Borrow the root widget as its concrete type.
    pub fn root_as<W: Widget>(&self) -> Result<&W> {
        self.tree.get(TypedId::new(self.tree.root()))
    }

    /// Mutably borrow the root widget as its concrete type.
    pub fn root_as_mut<W: Widget>(&mut self) -> Result<&mut W> {
        self.tree.get_mut(TypedId::new(self.tree.root()))
    }

    /// Add a widget to the pool.
    pub fn insert(&mut self, widget: impl Into<Box<dyn Widget>>) -> WidgetId {
        self.tree.insert(widget.into())
    }

    /// Add a widget to the pool, returning a typed handle.
    pub fn insert_typed<W: Widget>(&mut self, widget: W) -> TypedId<W> {
        self.tree.insert_typed(widget)
    }

    /// Borrow a widget by typed handle.
    pub fn get<W: Widget>(&self, id: TypedId<W>) -> Result<&W> {
        self.tree.get(id)
    }

    /// Mutably borrow a widget by typed handle.
    pub fn get_mut<W: Widget>(&mut self, id: TypedId<W>) -> Result<&mut W> {
        self.tree.get_mut(id)
    }

    /// Remove a widget and its subtree from the pool, repainting the pixels
    /// it covered.
    pub fn remove(&mut self, id: impl Into<WidgetId>) -> Result<()> {
        let id = id.into();
        for sub in self.tree.preorder(id) {
            if let Ok(node) = self.tree.node(sub) {
                self.dirty = self.dirty.union(node.prev_visible_bounds);
            }
        }
        let had_focus = self.tree.focus;
        self.tree.remove(id)?;
        if had_focus != self.tree.focus {
            self.full_redraw = true;
        }
        Ok(())
    }

    /// Set the app bounds, usually to the window's client area.
    pub fn set_bounds(&mut self, bounds: Rect) {
        if self.app_bounds != bounds {
            self.app_bounds = bounds;
            self.invalidate_bounds(self.tree.root());
            self.full_redraw = true;
        }
    }

    /// The region widgets may occupy.
    pub fn app_bounds(&self) -> Rect {
        self.app_bounds
    }

    /// Set the device scale factor.
    pub fn set_scale(&mut self, scale: f64) {
        if self.scale != scale {
            self.scale = scale;
            self.invalidate_bounds(self.tree.root());
            self.full_redraw = true;
        }
    }

    /// Current device scale factor.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Force a color mode, overriding environment and platform detection.
    pub fn set_color_mode(&mut self, mode: ColorMode) {
        if self.color_mode != Some(mode) {
            self.color_mode = Some(mode);
            self.full_redraw = true;
        }
    }

    /// Return to automatic color mode detection.
    pub fn clear_color_mode(&mut self) {
        if self.color_mode.is_some() {
            self.color_mode = None;
            self.full_redraw = true;
        }
    }

    /// The effective color mode.
    pub fn color_mode(&self) -> ColorMode {
        self.color_mode.unwrap_or_else(colormode::detect)
    }

    /// Force a locale list, overriding the system preferences.
    pub fn set_locales(&mut self, locales: Vec<String>) {
        if self.locales.as_deref() != Some(locales.as_slice()) {
            self.locales = Some(locales);
            self.full_redraw = true;
        }
    }

    /// Return to the system locale list.
    pub fn clear_locales(&mut self) {
        if self.locales.is_some() {
            self.locales = None;
            self.full_redraw = true;
        }
    }

    /// The effective locale list, most preferred first.
    pub fn locales(&self) -> Vec<String> {
        match &self.locales {
            Some(list) => list.clone(),
            None => locale::system_locales(),
        }
    }

    /// Register the image loader widgets resolve images through.
    pub fn register_images(&mut self, images: Box<dyn ImageRegistry>) {
        self.images = Some(images);
    }

    /// Register the text engine widgets shape text through.
    pub fn register_text_shaper(&mut self, shaper: Box<dyn TextShaper>) {
        self.shaper = Some(shaper);
    }

    /// Mark a region for repaint at the next draw.
    pub fn request_redraw(&mut self, region: Rect) {
        self.dirty = self.dirty.union(region);
    }

    /// Mark everything for repaint at the next draw.
    pub fn request_full_redraw(&mut self) {
        self.full_redraw = true;
    }

    /// Widget that handled or aborted pointing input in the last frame.
    pub fn pointing_outcome(&self) -> Option<(WidgetId, InputOutcome)> {
        self.last_pointing
    }

    /// Pointer shape the hovered widget chain requested in the last frame.
    pub fn cursor_shape(&self) -> CursorShape {
        self.cursor
    }

    /// Whether `id` participates in the current build.
    pub fn in_tree(&self, id: impl Into<WidgetId>) -> bool {
        self.tree.in_tree(id.into())
    }

    /// Parent of `id` for the current build, if any.
    pub fn parent(&self, id: impl Into<WidgetId>) -> Option<WidgetId> {
        self.tree.parent(id.into())
    }

    /// Children of `id` for the current build, in declaration order.
    pub fn children(&self, id: impl Into<WidgetId>) -> &[WidgetId] {
        self.tree.children(id.into())
    }

    /// How many builds have run.
    pub fn build_count(&self) -> u64 {
        self.tree.build_count()
    }

    /// Whether the next [`App::draw`] has anything to paint.
    pub fn redraw_pending(&self) -> bool {
        self.full_redraw || !self.dirty.is_empty()
    }

    /// Debug rendering of the current tree.
    pub fn dump(&self) -> String {
        self.tree.dump()
    }

    /// Run one frame: capture input, rebuild the tree, dispatch input, tick,
    /// and collect the dirty region. Errors from `build` or `tick` stop the
    /// frame and propagate.
    pub fn frame(&mut self, runtime: &dyn Runtime) -> Result<()> {
        self.ticks = runtime.ticks();
        self.ticks_per_second = runtime.ticks_per_second();
        self.snapshot = InputSnapshot::capture(runtime);

        self.tree.begin_build();
        self.phase = Phase::Build;
        let built = self.build_subtree(self.tree.root());
        self.phase = Phase::Idle;
        built?;
        self.ensure_focus();

        self.phase = Phase::Input;
        let dispatched = self
            .dispatch_pointing()
            .and_then(|()| self.dispatch_button());
        self.phase = Phase::Idle;
        dispatched?;

        self.phase = Phase::Tick;
        let ticked = self.tick_tree();
        self.phase = Phase::Idle;
        ticked?;

        self.resolve_cursor_shape()?;
        self.sync_dirty()?;
        self.layout_cache.evict(self.ticks, self.ticks_per_second);
        Ok(())
    }

    /// Paint the dirty region to `surface`. Does nothing when no redraw is
    /// pending.
    pub fn draw(&mut self, surface: &mut dyn Surface) -> Result<()> {
        let region = if self.full_redraw {
            self.app_bounds
        } else {
            self.dirty.intersect(self.app_bounds)
        };
        if region.is_empty() {
            self.dirty = Rect::EMPTY;
            self.full_redraw = false;
            return Ok(());
        }

        self.phase = Phase::Draw;
        let painted = self.draw_region(surface, region);
        self.phase = Phase::Idle;
        painted?;

        self.dirty = Rect::EMPTY;
        self.full_redraw = false;
        Ok(())
    }

    /// Paint every visible widget intersecting `region`, in draw order.
    fn draw_region(&mut self, surface: &mut dyn Surface, region: Rect) -> Result<()> {
        for (id, _) in self.draw_order() {
            if !self.is_visible(id) {
                continue;
            }
            let clip = self.visible_bounds(id)?.intersect(region);
            if clip.is_empty() {
                continue;
            }
            let alpha = self.effective_alpha(id);
            if alpha <= 0.0 {
                continue;
            }
            self.draw_widget(surface, id, clip, alpha)?;
        }
        Ok(())
    }

    /// Paint one widget, preferring its custom draw hook when set.
    fn draw_widget(
        &mut self,
        surface: &mut dyn Surface,
        id: WidgetId,
        clip: Rect,
        alpha: f32,
    ) -> Result<()> {
        if let Some(mut hook) = self.tree.node_mut(id)?.custom_draw.take() {
            {
                let mut ctx = Context::new(self, id);
                let mut painter = Painter::new(surface, clip, alpha);
                hook(&mut ctx, &mut painter);
            }
            let node = self.tree.node_mut(id)?;
            if node.custom_draw.is_none() {
                node.custom_draw = Some(hook);
            }
            return Ok(());
        }
        match self.tree.take_widget(id) {
            Ok(mut widget) => {
                {
                    let mut ctx = Context::new(self, id);
                    let mut painter = Painter::new(surface, clip, alpha);
                    widget.draw(&mut ctx, &mut painter);
                }
                self.tree.restore_widget(id, widget);
                Ok(())
            }
            Err(Error::UnknownWidget(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Take `id`'s widget, run `f` with a context, and put the widget back.
    pub(crate) fn run_widget<R>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut dyn Widget, &mut Context<'_>) -> R,
    ) -> Result<R> {
        let mut widget = self.tree.take_widget(id)?;
        let out = {
            let mut ctx = Context::new(self, id);
            f(widget.as_mut(), &mut ctx)
        };
        self.tree.restore_widget(id, widget);
        Ok(out)
    }

    /// Build `id` and recurse into the children it declared.
    fn build_subtree(&mut self, id: WidgetId) -> Result<()> {
        let mut widget = self.tree.take_widget(id)?;
        let result = self.build_node(id, widget.as_mut());
        self.tree.restore_widget(id, widget);
        result?;
        let children = self.tree.children(id).to_vec();
        for child in children {
            self.build_subtree(child)?;
        }
        Ok(())
    }

    /// One widget's build steps: reset hook, child declaration, attach, then
    /// the build callback itself.
    fn build_node(&mut self, id: WidgetId, widget: &mut dyn Widget) -> Result<()> {
        {
            let mut ctx = Context::new(self, id);
            widget.before_build(&mut ctx);
        }
        let mut children = ChildList::default();
        {
            let mut ctx = Context::new(self, id);
            widget.append_child_widgets(&mut ctx, &mut children);
        }
        self.tree.attach_children(id, children.into_ids())?;
        let mut ctx = Context::new(self, id);
        widget.build(&mut ctx)
    }

    /// Drop focus if the focused widget left the tree or can no longer hold
    /// it; queries then fall back to the root.
    fn ensure_focus(&mut self) {
        if let Some(focus) = self.tree.focus {
            if !self.is_visible(focus) || !self.is_enabled(focus) {
                self.tree.focus = None;
                self.full_redraw = true;
            }
        }
    }

    /// Widgets in draw order with their accumulated z values: parents before
    /// children, stable-sorted so elevated subtrees composite afterward.
    pub(crate) fn draw_order(&self) -> Vec<(WidgetId, i32)> {
        let mut order = Vec::new();
        let mut stack = vec![(self.tree.root(), 0i32)];
        while let Some((id, base)) = stack.pop() {
            let Ok(node) = self.tree.node(id) else {
                continue;
            };
            let z = base + node.widget.as_ref().map_or(0, |w| w.z_delta());
            order.push((id, z));
            for child in node.children.iter().rev() {
                stack.push((*child, z));
            }
        }
        order.sort_by_key(|(_, z)| *z);
        order
    }

    /// Innermost-first pointing dispatch at the cursor position, stopping at
    /// the first widget that does not ignore the input.
    fn dispatch_pointing(&mut self) -> Result<()> {
        self.last_pointing = None;
        let cursor = self.snapshot.cursor;
        let order = self.draw_order();
        for (id, _) in order.into_iter().rev() {
            if !self.is_visible(id) || !self.is_enabled(id) || self.passes_through(id) {
                continue;
            }
            if !self.visible_bounds(id)?.contains(cursor) {
                continue;
            }
            match self.run_widget(id, |w, ctx| w.handle_pointing_input(ctx)) {
                Ok(InputOutcome::Ignore) => {}
                Ok(outcome) => {
                    self.last_pointing = Some((id, outcome));
                    return Ok(());
                }
                Err(Error::UnknownWidget(_)) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Button dispatch from the focused widget up its ancestor chain.
    fn dispatch_button(&mut self) -> Result<()> {
        let chain: Vec<WidgetId> = self.tree.ancestors(self.focused()).collect();
        for id in chain {
            if !self.is_enabled(id) {
                continue;
            }
            match self.run_widget(id, |w, ctx| w.handle_button_input(ctx)) {
                Ok(InputOutcome::Ignore) => {}
                Ok(_) => return Ok(()),
                Err(Error::UnknownWidget(_)) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Tick every widget in the tree, top-down. The first error stops the
    /// walk and propagates.
    fn tick_tree(&mut self) -> Result<()> {
        for id in self.tree.preorder(self.tree.root()) {
            if !self.tree.in_tree(id) {
                continue;
            }
            match self.run_widget(id, |w, ctx| w.tick(ctx)) {
                Ok(ticked) => ticked?,
                Err(Error::UnknownWidget(_)) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Ask the hovered widget chain for a pointer shape; the innermost
    /// widget with an opinion wins.
    fn resolve_cursor_shape(&mut self) -> Result<()> {
        let cursor = self.snapshot.cursor;
        let order = self.draw_order();
        let mut hovered = None;
        for (id, _) in order.into_iter().rev() {
            if !self.is_visible(id) || !self.is_enabled(id) || self.passes_through(id) {
                continue;
            }
            if self.visible_bounds(id)?.contains(cursor) {
                hovered = Some(id);
                break;
            }
        }
        let mut shape = CursorShape::Default;
        if let Some(hovered) = hovered {
            let chain: Vec<WidgetId> = self.tree.ancestors(hovered).collect();
            for id in chain {
                match self.run_widget(id, |w, ctx| w.cursor_shape(ctx)) {
                    Ok(Some(s)) => {
                        shape = s;
                        break;
                    }
                    Ok(None) => {}
                    Err(Error::UnknownWidget(_)) => {}
                    Err(e) => return Err(e),
                }
            }
        }
        self.cursor = shape;
        Ok(())
    }

    /// Diff every widget's visible region against the last sweep and mark
    /// the changed pixels dirty. Runs once per frame so repeated requests
    /// coalesce.
    fn sync_dirty(&mut self) -> Result<()> {
        let repaint = std::mem::take(&mut self.pending_repaint);
        for id in repaint {
            if self.is_visible(id) {
                let vb = self.visible_bounds(id)?;
                self.dirty = self.dirty.union(vb);
            }
        }

        for (id, _) in self.draw_order() {
            let vb = if self.is_visible(id) {
                self.visible_bounds(id)?
            } else {
                Rect::EMPTY
            };
            let node = self.tree.node_mut(id)?;
            if vb != node.prev_visible_bounds {
                let prev = node.prev_visible_bounds;
                node.prev_visible_bounds = vb;
                self.dirty = self.dirty.union(prev).union(vb);
            }
        }

        let stale: Vec<WidgetId> = self
            .tree
            .nodes
            .iter()
            .filter(|(id, node)| {
                !self.tree.in_tree(*id) && !node.prev_visible_bounds.is_empty()
            })
            .map(|(id, _)| id)
            .collect();
        for id in stale {
            let node = self.tree.node_mut(id)?;
            let prev = node.prev_visible_bounds;
            node.prev_visible_bounds = Rect::EMPTY;
            self.dirty = self.dirty.union(prev);
        }
        Ok(())
    }

    /// Whether `id` is in the tree with no hidden ancestor.
    pub fn is_visible(&self, id: impl Into<WidgetId>) -> bool {
        let id = id.into();
        if !self.tree.in_tree(id) {
            return false;
        }
        !self
            .tree
            .ancestors(id)
            .any(|a| self.tree.node(a).is_ok_and(|n| n.hidden))
    }

    /// Whether `id` is in the tree with no disabled ancestor.
    pub fn is_enabled(&self, id: impl Into<WidgetId>) -> bool {
        let id = id.into();
        if !self.tree.in_tree(id) {
            return false;
        }
        !self
            .tree
            .ancestors(id)
            .any(|a| self.tree.node(a).is_ok_and(|n| n.disabled))
    }

    /// Whether `id` declines pointing input in favor of its descendants.
    fn passes_through(&self, id: WidgetId) -> bool {
        self.tree
            .node(id)
            .ok()
            .and_then(|n| n.widget.as_ref())
            .is_some_and(|w| w.pass_through())
    }

    /// Bounds of `id` in app coordinates. The parent's `layout` wins when it
    /// returns a non-empty rectangle; otherwise the recorded position and
    /// resolved size apply.
    pub fn bounds(&mut self, id: impl Into<WidgetId>) -> Result<Rect> {
        let id = id.into();
        if id == self.tree.root() {
            return Ok(self.app_bounds);
        }
        if let Some(parent) = self.tree.parent(id) {
            if self.tree.in_tree(id) {
                let laid_out = self.layout_of(parent, id)?;
                if !laid_out.is_empty() {
                    return Ok(laid_out);
                }
            }
        }
        let position = self.tree.node(id)?.position;
        let size = self.actual_size(id)?;
        Ok(Rect::at(position, size))
    }

    /// Ask `parent` to lay out `child`. A parent busy with its own layout
    /// yields empty, which falls back to the child's recorded state.
    fn layout_of(&mut self, parent: WidgetId, child: WidgetId) -> Result<Rect> {
        match self.tree.take_widget(parent) {
            Ok(widget) => {
                let rect = {
                    let mut ctx = Context::new(self, parent);
                    widget.layout(&mut ctx, child)
                };
                self.tree.restore_widget(parent, widget);
                Ok(rect)
            }
            Err(Error::WidgetBusy(_)) => Ok(Rect::EMPTY),
            Err(e) => Err(e),
        }
    }

    /// Resolve `id`'s size: the first ancestor-or-self specifier with an
    /// override wins, with unset axes measured; no override means measure.
    pub fn actual_size(&mut self, id: impl Into<WidgetId>) -> Result<Size> {
        let id = id.into();
        let chain: Vec<WidgetId> = self.tree.ancestors(id).collect();
        let mut entry: Option<SizeOverride> = None;
        let node = self.tree.node(id)?;
        for specifier in chain {
            if let Some(found) = node.size_overrides.get(&specifier) {
                entry = Some(*found);
                break;
            }
        }
        match entry {
            None => self.measure_widget(id, Constraint::UNCONSTRAINED),
            Some(ov) => {
                let measured = if ov.width.is_none() || ov.height.is_none() {
                    self.measure_widget(id, Constraint::UNCONSTRAINED)?
                } else {
                    Size::ZERO
                };
                Ok(Size::new(
                    ov.width.unwrap_or(measured.w),
                    ov.height.unwrap_or(measured.h),
                ))
            }
        }
    }

    /// Measure `id` under `constraint`. A widget measuring itself while its
    /// slot is taken sees its most recent unconstrained measurement.
    pub(crate) fn measure_widget(&mut self, id: WidgetId, constraint: Constraint) -> Result<Size> {
        match self.tree.take_widget(id) {
            Ok(widget) => {
                let size = {
                    let mut ctx = Context::new(self, id);
                    widget.measure(&mut ctx, constraint)
                };
                self.tree.restore_widget(id, widget);
                if constraint == Constraint::UNCONSTRAINED {
                    if let Ok(node) = self.tree.node_mut(id) {
                        node.last_measured = Some(size);
                    }
                }
                Ok(size)
            }
            Err(Error::WidgetBusy(_)) => {
                Ok(self.tree.node(id)?.last_measured.unwrap_or(Size::ZERO))
            }
            Err(e) => Err(e),
        }
    }

    /// Visible region of `id`: app bounds for the root, own bounds for
    /// elevated widgets, else the intersection with the parent's visible
    /// region. Cached per frame.
    pub fn visible_bounds(&mut self, id: impl Into<WidgetId>) -> Result<Rect> {
        let id = id.into();
        if let Some(cached) = self.tree.node(id)?.visible_bounds {
            return Ok(cached);
        }
        let vb = self.compute_visible_bounds(id)?;
        self.tree.node_mut(id)?.visible_bounds = Some(vb);
        Ok(vb)
    }

    /// The uncached visible-bounds formula.
    fn compute_visible_bounds(&mut self, id: WidgetId) -> Result<Rect> {
        if id == self.tree.root() {
            return Ok(self.app_bounds);
        }
        let bounds = self.bounds(id)?;
        let z = self
            .tree
            .node(id)?
            .widget
            .as_ref()
            .map_or(0, |w| w.z_delta());
        if z != 0 {
            return Ok(bounds);
        }
        match self.tree.parent(id) {
            Some(parent) => Ok(self.visible_bounds(parent)?.intersect(bounds)),
            None => Ok(bounds),
        }
    }

    /// Product of `1 - transparency` along the ancestor-or-self chain.
    pub(crate) fn effective_alpha(&self, id: WidgetId) -> f32 {
        let mut alpha = 1.0f32;
        for ancestor in self.tree.ancestors(id) {
            if let Ok(node) = self.tree.node(ancestor) {
                alpha *= 1.0 - node.transparency;
            }
        }
        alpha.clamp(0.0, 1.0)
    }

    /// Drop the visible-bounds caches of `id` and every descendant.
    pub(crate) fn invalidate_bounds(&mut self, id: WidgetId) {
        for sub in self.tree.preorder(id) {
            if let Ok(node) = self.tree.node_mut(sub) {
                node.visible_bounds = None;
            }
        }
    }

    /// Flip a widget's hidden flag; hiding blurs its subtree synchronously.
    pub fn set_hidden(&mut self, id: impl Into<WidgetId>, hidden: bool) {
        let id = id.into();
        let Ok(node) = self.tree.node_mut(id) else {
            return;
        };
        if node.hidden == hidden {
            return;
        }
        node.hidden = hidden;
        if hidden {
            self.blur(id);
        }
    }

    /// Flip a widget's enabled flag; disabling blurs its subtree
    /// synchronously and repaints for the style change.
    pub fn set_enabled(&mut self, id: impl Into<WidgetId>, enabled: bool) {
        let id = id.into();
        let Ok(node) = self.tree.node_mut(id) else {
            return;
        };
        if node.disabled == !enabled {
            return;
        }
        node.disabled = !enabled;
        if !enabled {
            self.blur(id);
        }
        self.pending_repaint.push(id);
    }

    /// Set a widget's opacity in `[0, 1]`.
    pub fn set_opacity(&mut self, id: impl Into<WidgetId>, opacity: f32) {
        let id = id.into();
        let Ok(node) = self.tree.node_mut(id) else {
            return;
        };
        let transparency = (1.0 - opacity).clamp(0.0, 1.0);
        if node.transparency != transparency {
            node.transparency = transparency;
            self.pending_repaint.push(id);
        }
    }

    /// A widget's opacity in `[0, 1]`.
    pub fn opacity(&self, id: impl Into<WidgetId>) -> f32 {
        self.tree
            .node(id.into())
            .map_or(1.0, |node| 1.0 - node.transparency)
    }

    /// Move a widget, invalidating the geometry caches underneath it.
    pub fn set_position(&mut self, id: impl Into<WidgetId>, position: impl Into<Point>) {
        let id = id.into();
        let position = position.into();
        let Ok(node) = self.tree.node_mut(id) else {
            return;
        };
        if node.position != position {
            node.position = position;
            self.invalidate_bounds(id);
        }
    }

    /// A widget's recorded position.
    pub fn position(&self, id: impl Into<WidgetId>) -> Point {
        self.tree
            .node(id.into())
            .map_or(Point::ZERO, |node| node.position)
    }

    /// Record a size override for `id`, using the widget itself as the
    /// specifier so the entry wins over any ancestor's.
    pub fn set_size(&mut self, id: impl Into<WidgetId>, size: Size) {
        let id = id.into();
        self.merge_override(id, id, Some(size.w), Some(size.h));
    }

    /// Record a width override for `id`, leaving the height entry untouched.
    pub fn set_width(&mut self, id: impl Into<WidgetId>, width: i32) {
        let id = id.into();
        self.merge_override(id, id, Some(width), None);
    }

    /// Record a height override for `id`, leaving the width entry untouched.
    pub fn set_height(&mut self, id: impl Into<WidgetId>, height: i32) {
        let id = id.into();
        self.merge_override(id, id, None, Some(height));
    }

    /// Merge the given axes into the specifier's override entry,
    /// invalidating geometry when anything changed.
    pub(crate) fn merge_override(
        &mut self,
        target: WidgetId,
        specifier: WidgetId,
        width: Option<i32>,
        height: Option<i32>,
    ) {
        if let Some(w) = width {
            assert!(w >= 0, "size overrides must be non-negative");
        }
        if let Some(h) = height {
            assert!(h >= 0, "size overrides must be non-negative");
        }
        let Ok(node) = self.tree.node_mut(target) else {
            return;
        };
        let entry = node.size_overrides.entry(specifier).or_default();
        let before = *entry;
        if let Some(w) = width {
            entry.width = Some(w);
        }
        if let Some(h) = height {
            entry.height = Some(h);
        }
        if *entry != before {
            self.invalidate_bounds(target);
        }
    }

    /// Install a draw hook that replaces the widget's own draw.
    pub(crate) fn set_custom_draw_hook(&mut self, id: WidgetId, hook: Option<CustomDraw>) {
        let Ok(node) = self.tree.node_mut(id) else {
            return;
        };
        node.custom_draw = hook;
        self.pending_repaint.push(id);
    }

    /// Inherited model lookup: walk the ancestor-or-self chain and return
    /// the first widget that answers for `key`.
    pub(crate) fn lookup_model(&self, from: WidgetId, key: &str) -> Option<Rc<dyn Any>> {
        for id in self.tree.ancestors(from) {
            let Ok(node) = self.tree.node(id) else {
                continue;
            };
            if let Some(widget) = node.widget.as_ref() {
                if let Some(value) = widget.model(key) {
                    return Some(value);
                }
            }
        }
        None
    }
}
