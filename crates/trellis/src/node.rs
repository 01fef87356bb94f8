//! Per-widget bookkeeping record.
//!
//! A [`Node`] is the pool slot behind a [`WidgetId`](crate::WidgetId): the
//! boxed widget plus everything the host tracks about it between and during
//! frames. Nodes are internal; all access goes through the tree and the
//! context facade.

use std::collections::HashMap;

use geom::{Point, Rect, Size};

use crate::context::Context;
use crate::id::WidgetId;
use crate::painter::Painter;
use crate::widget::Widget;

/// Replacement draw hook installed via
/// [`Context::set_custom_draw`](crate::context::Context::set_custom_draw).
pub type CustomDraw = Box<dyn FnMut(&mut Context<'_>, &mut Painter<'_>)>;

/// Explicit per-axis size override; `None` leaves the axis to
/// [`Widget::measure`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizeOverride {
    /// Fixed width in pixels, if set.
    pub width: Option<i32>,
    /// Fixed height in pixels, if set.
    pub height: Option<i32>,
}

/// Pool record for one widget.
pub(crate) struct Node {
    /// The widget itself. Taken out of the slot while its own methods run,
    /// so the host can be re-entered; `None` means "currently borrowed".
    pub widget: Option<Box<dyn Widget>>,
    /// Parent for the current build, set at attach time.
    pub parent: Option<WidgetId>,
    /// Children appended during the current build, in declaration order.
    pub children: Vec<WidgetId>,
    /// Build count at which this node was last appended. A node whose stamp
    /// trails the current count is not in the tree.
    pub built_at: u64,
    /// Recorded position in app coordinates; used when no ancestor lays
    /// this widget out.
    pub position: Point,
    /// Size overrides keyed by the specifier that set them. Resolution
    /// walks the ancestor-or-self chain and takes the first specifier with
    /// an entry.
    pub size_overrides: HashMap<WidgetId, SizeOverride>,
    /// Hidden widgets are skipped for drawing, input, and focus.
    pub hidden: bool,
    /// Disabled widgets keep drawing but refuse input and focus.
    pub disabled: bool,
    /// 0.0 is opaque, 1.0 fully transparent. Effective opacity multiplies
    /// down the ancestor chain.
    pub transparency: f32,
    /// Cached visible bounds for the current frame; cleared at build start
    /// and whenever position or size state changes.
    pub visible_bounds: Option<Rect>,
    /// Visible region as of the last dirty-region sweep. Comparing against
    /// the current region tells the host which pixels to repaint.
    pub prev_visible_bounds: Rect,
    /// Most recent unconstrained measurement. Consulted when a widget
    /// queries its own bounds while its slot is taken.
    pub last_measured: Option<Size>,
    /// When set, drawing runs this hook instead of [`Widget::draw`].
    pub custom_draw: Option<CustomDraw>,
}

impl Node {
    /// A fresh node for a newly inserted widget. It is not in the tree
    /// until an `append_child_widgets` pass stamps it.
    pub fn new(widget: Box<dyn Widget>) -> Self {
        Node {
            widget: Some(widget),
            parent: None,
            children: Vec::new(),
            built_at: 0,
            position: Point::ZERO,
            size_overrides: HashMap::new(),
            hidden: false,
            disabled: false,
            transparency: 0.0,
            visible_bounds: None,
            prev_visible_bounds: Rect::EMPTY,
            last_measured: None,
            custom_draw: None,
        }
    }
}
