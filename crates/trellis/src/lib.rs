//! Trellis: a widget-tree host for 2D game-engine runtimes.
//!
//! Trellis owns a pool of widgets and drives them through a per-frame
//! pipeline: the tree over the pool is reassembled every frame by the
//! widgets themselves, then input is dispatched, widgets tick, and the
//! changed pixels are painted through a runtime-provided surface. The host
//! brings no renderer, window, or font stack of its own; it is embedded in a
//! 2D game-engine runtime that provides those as capability traits.
//!
//! # Quick start
//!
//! The main entry points are:
//! - [`App`] - the host: widget pool, frame pipeline, dirty tracking
//! - [`Widget`] - the trait every widget implements
//! - [`Context`] - the per-callback view widgets query and mutate through
//!
//! # Module organization
//!
//! - [`layout`] - linear and grid layout with memoized flex distribution
//! - [`widgets`] - reusable widget building blocks
//! - [`runtime`] - the capability traits a runtime implements
//! - [`text`] - line splitting, tab stops, and the shaper contract

// Internal modules, re-exported selectively below
mod app;
mod colormode;
mod context;
mod focus;
mod id;
mod locale;
mod node;
mod tree;

// Public modules
pub mod error;
pub mod event;
pub mod input;
pub mod layout;
pub mod painter;
pub mod runtime;
pub mod text;
pub mod widget;
pub mod widgets;

/// Test utilities, compiled for this crate's tests and behind the `testing`
/// feature for downstream crates.
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use app::App;
pub use colormode::ColorMode;
pub use context::Context;
pub use error::{Error, Result};
pub use event::Slot;
pub use focus::FocusManager;
pub use id::{TypedId, WidgetId};
pub use input::{ButtonState, CursorShape, InputSnapshot, Key, MouseButton};
pub use layout::{Constraint, Direction, Grid, Item, Linear, RowSizing, Sizing};
pub use node::{CustomDraw, SizeOverride};
pub use painter::{Color, Painter};
pub use runtime::{Clock, ImageHandle, ImageRegistry, InputSource, Runtime, Surface};
pub use widget::{ChildList, InputOutcome, Widget};
pub use widgets::{ListItem, NumberInput, SelectableList, WithSize};

// Export the geometry crate and its common types at the root
pub use geom;
pub use geom::{Insets, Point, Rect, Size};
