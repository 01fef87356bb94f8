//! A scriptable runtime for driving frames in tests.

use geom::Point;

use crate::input::{ButtonState, Key, MouseButton};
use crate::runtime::{Clock, InputSource};

/// An [`InputSource`] and [`Clock`] tests poke directly.
///
/// Press and release calls describe the upcoming frame; [`TestRuntime::step`]
/// advances the clock and decays the one-frame transitions, so a typical test
/// alternates scripting calls with `app.frame(&rt)` and `rt.step()`.
#[derive(Debug, Default)]
pub struct TestRuntime {
    /// Cursor position handed to the next snapshot.
    pub cursor: Point,
    /// Wheel deltas for the upcoming frame.
    pub wheel: (f64, f64),
    /// Current tick.
    pub ticks: u64,
    /// Tick rate reported to the app.
    pub ticks_per_second: u64,
    /// Per-button state, indexed per [`MouseButton::ALL`].
    buttons: [ButtonState; 3],
    /// Keys currently held.
    pressed: Vec<Key>,
    /// Keys that went down since the last step.
    just_pressed: Vec<Key>,
    /// Keys with a repeat pending for the upcoming frame.
    repeating: Vec<Key>,
    /// Keys released since the last step.
    released: Vec<Key>,
}

impl TestRuntime {
    /// A runtime at tick zero with nothing pressed, reporting 60 ticks per
    /// second.
    pub fn new() -> Self {
        TestRuntime {
            ticks_per_second: 60,
            ..Self::default()
        }
    }

    /// Press a mouse button; it reads as held and just-pressed until the
    /// next step.
    pub fn press_button(&mut self, button: MouseButton) {
        let state = &mut self.buttons[button.index()];
        state.pressed = true;
        state.just_pressed = true;
    }

    /// Release a mouse button; it reads as just-released until the next
    /// step.
    pub fn release_button(&mut self, button: MouseButton) {
        let state = &mut self.buttons[button.index()];
        state.pressed = false;
        state.just_released = true;
    }

    /// Press a key; it reads as held and just-pressed until the next step.
    pub fn press_key(&mut self, key: Key) {
        if !self.pressed.contains(&key) {
            self.pressed.push(key);
        }
        self.just_pressed.push(key);
    }

    /// Release a key; it reads as just-released until the next step.
    pub fn release_key(&mut self, key: Key) {
        self.pressed.retain(|k| *k != key);
        self.released.push(key);
    }

    /// Fire a key-repeat for the upcoming frame, pressing the key if it is
    /// not already held.
    pub fn repeat_key(&mut self, key: Key) {
        if !self.pressed.contains(&key) {
            self.pressed.push(key);
        }
        self.repeating.push(key);
    }

    /// Advance one tick and decay the one-frame transitions: just-pressed,
    /// just-released, repeats, and wheel movement. Held buttons and keys
    /// stay held.
    pub fn step(&mut self) {
        self.ticks += 1;
        self.wheel = (0.0, 0.0);
        for state in &mut self.buttons {
            state.just_pressed = false;
            state.just_released = false;
        }
        self.just_pressed.clear();
        self.repeating.clear();
        self.released.clear();
    }
}

impl InputSource for TestRuntime {
    fn cursor_position(&self) -> Point {
        self.cursor
    }

    fn wheel(&self) -> (f64, f64) {
        self.wheel
    }

    fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons[button.index()].pressed
    }

    fn is_mouse_button_just_pressed(&self, button: MouseButton) -> bool {
        self.buttons[button.index()].just_pressed
    }

    fn is_mouse_button_just_released(&self, button: MouseButton) -> bool {
        self.buttons[button.index()].just_released
    }

    fn is_key_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    fn is_key_just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&key)
    }

    fn is_key_repeating(&self, key: Key) -> bool {
        self.repeating.contains(&key)
    }

    fn append_pressed_keys(&self, keys: &mut Vec<Key>) {
        keys.extend(self.pressed.iter().copied());
    }

    fn append_just_released_keys(&self, keys: &mut Vec<Key>) {
        keys.extend(self.released.iter().copied());
    }
}

impl Clock for TestRuntime {
    fn ticks(&self) -> u64 {
        self.ticks
    }

    fn ticks_per_second(&self) -> u64 {
        self.ticks_per_second
    }
}
