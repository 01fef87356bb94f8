//! Capability traits the host runtime provides.
//!
//! The core does not own a window, a clock, or a GPU surface; it is embedded
//! in a 2D game-engine runtime that exposes four capabilities. [`InputSource`]
//! and [`Clock`] are polled once at tick-start by [`crate::App::frame`];
//! [`Surface`] receives the draw pass via [`crate::App::draw`]; an
//! [`ImageRegistry`] is registered on the app and answers widget resource
//! loads during the frame.

use geom::{Point, Rect, Size};

use crate::error::Result;
use crate::input::{Key, MouseButton};
use crate::painter::Color;

/// Polled input state: cursor, mouse buttons, keyboard with repeat.
///
/// All queries describe the current frame. "Just" means the transition
/// happened between the previous frame and this one.
pub trait InputSource {
    /// Cursor position in app coordinates.
    fn cursor_position(&self) -> Point;

    /// Wheel movement for this frame as (horizontal, vertical) deltas.
    fn wheel(&self) -> (f64, f64);

    /// True while `button` is held.
    fn is_mouse_button_pressed(&self, button: MouseButton) -> bool;

    /// True when `button` went down this frame.
    fn is_mouse_button_just_pressed(&self, button: MouseButton) -> bool;

    /// True when `button` went up this frame.
    fn is_mouse_button_just_released(&self, button: MouseButton) -> bool;

    /// True while `key` is held.
    fn is_key_pressed(&self, key: Key) -> bool;

    /// True when `key` went down this frame.
    fn is_key_just_pressed(&self, key: Key) -> bool;

    /// True when a key-repeat fired for `key` this frame.
    fn is_key_repeating(&self, key: Key) -> bool;

    /// Append every key held this frame to `keys`.
    fn append_pressed_keys(&self, keys: &mut Vec<Key>);

    /// Append every key released this frame to `keys`.
    fn append_just_released_keys(&self, keys: &mut Vec<Key>);
}

/// Frame timing exposed by the runtime.
pub trait Clock {
    /// Monotonic tick counter; advances once per runtime update.
    fn ticks(&self) -> u64;

    /// Nominal ticks per second, used for time-based cache eviction.
    fn ticks_per_second(&self) -> u64;
}

/// What [`crate::App::frame`] needs from the runtime each frame.
pub trait Runtime: InputSource + Clock {}

impl<T: InputSource + Clock + ?Sized> Runtime for T {}

/// Handle to an image held by the runtime's [`ImageRegistry`].
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct ImageHandle(pub u64);

/// Named image lookup.
///
/// Load failures are surfaced to the calling widget, which decides whether
/// to draw a placeholder.
pub trait ImageRegistry {
    /// Resolve `name` to an image handle, loading it if necessary.
    fn load(&mut self, name: &str) -> Result<ImageHandle>;

    /// Pixel size of a loaded image.
    fn size(&self, image: ImageHandle) -> Size;
}

/// Draw-call sink the host paints into.
///
/// Coordinates are app coordinates; the host scissors every widget by
/// setting the clip before its draw calls and clears it after the pass.
pub trait Surface {
    /// Restrict subsequent draw calls to `clip`; `None` removes the scissor.
    fn set_clip(&mut self, clip: Option<Rect>);

    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Stroke a rectangle outline.
    fn stroke_rect(&mut self, rect: Rect, width: f64, color: Color);

    /// Stroke a line segment.
    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Color);

    /// Composite `src` of `image` into `dst`, scaling geometry as needed and
    /// modulating by `tint`.
    fn draw_image(&mut self, image: ImageHandle, src: Rect, dst: Rect, tint: Color);
}
