//! Input state types.
//!
//! The host polls the runtime's [`InputSource`] once at tick-start and keeps
//! the result in an [`InputSnapshot`]; every context query within the frame
//! reads the snapshot, so input state is stable across all phases of one
//! frame.

use geom::Point;

use crate::runtime::InputSource;

/// Mouse buttons the host dispatches on.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Wheel button.
    Middle,
    /// Secondary button.
    Right,
}

impl MouseButton {
    /// All buttons, in snapshot order.
    pub const ALL: [Self; 3] = [Self::Left, Self::Middle, Self::Right];

    /// Index of this button within [`MouseButton::ALL`].
    pub(crate) fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Middle => 1,
            Self::Right => 2,
        }
    }
}

/// Keyboard keys the host understands.
///
/// The set is deliberately small: navigation and editing keys that core
/// widgets poll for, plus `Char` for printable input. Runtimes with a richer
/// keyboard map fold unreported keys away.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Key {
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Return/enter.
    Enter,
    /// Escape.
    Escape,
    /// Tab.
    Tab,
    /// Backspace.
    Backspace,
    /// Forward delete.
    Delete,
    /// Home.
    Home,
    /// End.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Space bar.
    Space,
    /// Either shift key.
    Shift,
    /// Either control key.
    Control,
    /// Either alt/option key.
    Alt,
    /// Either super/command key.
    Meta,
    /// A printable character key.
    Char(char),
}

/// Pointer shapes a hovered widget may request.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum CursorShape {
    /// The platform default arrow.
    Default,
    /// Text caret.
    Text,
    /// Crosshair.
    Crosshair,
    /// Pointing hand.
    Pointer,
    /// Horizontal resize.
    ResizeEw,
    /// Vertical resize.
    ResizeNs,
    /// Diagonal resize, north-east/south-west.
    ResizeNesw,
    /// Diagonal resize, north-west/south-east.
    ResizeNwse,
    /// Drag/move.
    Move,
    /// Operation not allowed.
    NotAllowed,
}

/// Pressed/just-pressed/just-released flags for one mouse button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    /// Held down this frame.
    pub pressed: bool,
    /// Went down this frame.
    pub just_pressed: bool,
    /// Went up this frame.
    pub just_released: bool,
}

/// Snapshot entry for one pressed key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct KeyState {
    /// The key.
    key: Key,
    /// Went down this frame.
    just_pressed: bool,
    /// Key-repeat fired this frame.
    repeating: bool,
}

/// Input state captured from the runtime at tick-start.
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    /// Cursor position in app coordinates.
    pub cursor: Point,
    /// Wheel deltas for this frame.
    pub wheel: (f64, f64),
    /// Per-button state, indexed per [`MouseButton::ALL`].
    buttons: [ButtonState; 3],
    /// State of every key held this frame.
    keys: Vec<KeyState>,
    /// Keys released this frame.
    released: Vec<Key>,
}

impl InputSnapshot {
    /// Poll `source` for the frame's input state.
    pub fn capture(source: &dyn InputSource) -> Self {
        let mut buttons = [ButtonState::default(); 3];
        for button in MouseButton::ALL {
            buttons[button.index()] = ButtonState {
                pressed: source.is_mouse_button_pressed(button),
                just_pressed: source.is_mouse_button_just_pressed(button),
                just_released: source.is_mouse_button_just_released(button),
            };
        }

        let mut pressed = Vec::new();
        source.append_pressed_keys(&mut pressed);
        let keys = pressed
            .into_iter()
            .map(|key| KeyState {
                key,
                just_pressed: source.is_key_just_pressed(key),
                repeating: source.is_key_repeating(key),
            })
            .collect();

        let mut released = Vec::new();
        source.append_just_released_keys(&mut released);

        Self {
            cursor: source.cursor_position(),
            wheel: source.wheel(),
            buttons,
            keys,
            released,
        }
    }

    /// State of one mouse button.
    pub fn mouse_button(&self, button: MouseButton) -> ButtonState {
        self.buttons[button.index()]
    }

    /// True while `key` is held.
    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.keys.iter().any(|k| k.key == key)
    }

    /// True when `key` went down this frame.
    pub fn is_key_just_pressed(&self, key: Key) -> bool {
        self.keys.iter().any(|k| k.key == key && k.just_pressed)
    }

    /// True when a key-repeat fired for `key` this frame.
    pub fn is_key_repeating(&self, key: Key) -> bool {
        self.keys.iter().any(|k| k.key == key && k.repeating)
    }

    /// True when `key` went down or repeated this frame. The usual test for
    /// navigation keys that should auto-repeat.
    pub fn is_key_triggered(&self, key: Key) -> bool {
        self.keys
            .iter()
            .any(|k| k.key == key && (k.just_pressed || k.repeating))
    }

    /// True when `key` went up this frame.
    pub fn is_key_just_released(&self, key: Key) -> bool {
        self.released.contains(&key)
    }

    /// Keys held this frame, in runtime order.
    pub fn pressed_keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.keys.iter().map(|k| k.key)
    }
}
